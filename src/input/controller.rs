//! Turns board actions into cursor moves or outbound intents
//!
//! Navigation changes the board directly. Mutations never touch entities
//! here: they only compute the target value and return an [`Intent`], and
//! the board changes once the API confirms it.

use super::keymap::{Action, KeyMap};
use crate::api::TodoFields;
use crate::message::Intent;
use crate::state::{
    bump_priority, column_priority, column_status, Board, BoardKind, Entity, Todo,
};
use crossterm::event::KeyEvent;

pub struct Controller {
    keymap: KeyMap,
}

impl Controller {
    pub fn new(keymap: KeyMap) -> Self {
        Self { keymap }
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        self.keymap.resolve(key)
    }

    /// Apply a board action. Actions that are not about the board itself
    /// (open, back, edit, quit, ...) are left to the caller and yield `None`.
    pub fn handle(&self, board: &mut Board, action: Action) -> Option<Intent> {
        match action {
            Action::Left => board.move_left(),
            Action::Right => board.move_right(),
            Action::Up => board.move_up(),
            Action::Down => board.move_down(),
            Action::Progress => return shift_column(board, true),
            Action::Regress => return shift_column(board, false),
            Action::RaisePriority => return change_priority(board, true),
            Action::LowerPriority => return change_priority(board, false),
            Action::Refresh => return Some(reload(board.kind())),
            Action::Delete => return delete_todo(board),
            Action::Open
            | Action::Back
            | Action::New
            | Action::Edit
            | Action::CopyPath
            | Action::Quit => {}
        }
        None
    }
}

/// Refetch intent for a board
pub fn reload(kind: BoardKind) -> Intent {
    match kind {
        BoardKind::Projects => Intent::LoadProjects,
        BoardKind::Todos { project_id } => Intent::LoadTodos(project_id),
    }
}

fn todo_fields(board: &Board, todo: &Todo) -> TodoFields {
    let project_id = match board.kind() {
        BoardKind::Todos { project_id } => project_id,
        BoardKind::Projects => todo.project_id.unwrap_or_default(),
    };
    TodoFields::from_todo(todo, project_id)
}

fn shift_column(board: &Board, forward: bool) -> Option<Intent> {
    let entity = board.selected()?;
    let column = board.selected_column();
    let target = if forward {
        column + 1
    } else {
        column.checked_sub(1)?
    };

    match entity {
        Entity::Project(project) => Some(Intent::UpdateStatus {
            id: project.id,
            status: column_status(target)?.to_string(),
        }),
        Entity::Todo(todo) => Some(Intent::UpdateTodo {
            id: todo.id,
            fields: TodoFields {
                priority: column_priority(target)?,
                ..todo_fields(board, todo)
            },
        }),
    }
}

fn change_priority(board: &Board, raise: bool) -> Option<Intent> {
    match board.selected()? {
        Entity::Project(project) => Some(Intent::UpdatePriority {
            id: project.id,
            priority: bump_priority(project.priority, raise),
        }),
        Entity::Todo(todo) => Some(Intent::UpdateTodo {
            id: todo.id,
            fields: TodoFields {
                priority: bump_priority(todo.priority, raise),
                ..todo_fields(board, todo)
            },
        }),
    }
}

fn delete_todo(board: &Board) -> Option<Intent> {
    let BoardKind::Todos { project_id } = board.kind() else {
        return None;
    };
    let todo = board.selected()?.as_todo()?;
    Some(Intent::DeleteTodo {
        id: todo.id,
        project_id,
    })
}
