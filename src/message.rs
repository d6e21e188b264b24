//! Events consumed by the app reducer and requests it hands back

use crate::api::{ApiError, ProjectFields, TodoFields};
use crate::state::{Entity, EntityId, Project, Todo};
use crossterm::event::KeyEvent;

/// Everything the event loop feeds into [`crate::app::App::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Key(KeyEvent),
    Resize(u16, u16),
    Api(ApiEvent),
}

/// Completion of a dispatched [`Intent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    ProjectsLoaded(Result<Vec<Project>, ApiError>),
    TodosLoaded {
        project_id: EntityId,
        result: Result<Vec<Todo>, ApiError>,
    },
    /// A single entity came back from a mutation and can be reconciled
    EntityUpdated(Result<Entity, ApiError>),
    /// A mutation whose result is only visible after refetching
    Changed {
        scope: Scope,
        result: Result<(), ApiError>,
    },
}

/// Which board a refetch covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Projects,
    Todos(EntityId),
}

/// A remote operation requested by the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    LoadProjects,
    LoadTodos(EntityId),
    /// Fresh copy of one project, reconciled like any update
    LoadProject(EntityId),
    UpdateStatus { id: EntityId, status: String },
    UpdatePriority { id: EntityId, priority: u8 },
    CreateProject(ProjectFields),
    UpdateProject { id: EntityId, fields: ProjectFields },
    CreateTodo(TodoFields),
    UpdateTodo { id: EntityId, fields: TodoFields },
    DeleteTodo { id: EntityId, project_id: EntityId },
}

impl Intent {
    /// Short label for logs and the status bar
    pub fn describe(&self) -> String {
        match self {
            Intent::LoadProjects => "load projects".to_string(),
            Intent::LoadTodos(id) => format!("load todos for project {id}"),
            Intent::LoadProject(id) => format!("load project {id}"),
            Intent::UpdateStatus { id, status } => format!("set project {id} status to {status}"),
            Intent::UpdatePriority { id, priority } => {
                format!("set project {id} priority to {priority}")
            }
            Intent::CreateProject(fields) => format!("create project {}", fields.name),
            Intent::UpdateProject { id, .. } => format!("update project {id}"),
            Intent::CreateTodo(_) => "create todo".to_string(),
            Intent::UpdateTodo { id, .. } => format!("update todo {id}"),
            Intent::DeleteTodo { id, .. } => format!("delete todo {id}"),
        }
    }
}
