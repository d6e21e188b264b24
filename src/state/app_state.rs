//! Application state definitions

use super::board::Board;
use super::classify::BoardKind;
use super::entity::{Entity, EntityId, Project, Todo};
use super::forms::FormState;
use chrono::{DateTime, Local};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Nothing fetched yet
    #[default]
    Loading,
    Projects,
    /// Todos of the open project
    Todos,
    Error,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,

    // Boards
    pub projects: Option<Board>,
    pub todos: Option<Board>,
    /// Project whose todos are shown
    pub open_project: Option<Project>,

    // Status
    pub error: Option<String>,
    pub pending_requests: usize,
    pub last_refresh: Option<DateTime<Local>>,
    /// Transient feedback, cleared on the next key press
    pub status_message: Option<String>,

    pub form: FormState,

    /// Terminal size (width, height)
    pub terminal_size: Option<(u16, u16)>,
}

impl AppState {
    /// Board behind the current view
    pub fn active_board(&self) -> Option<&Board> {
        match self.current_view {
            View::Projects => self.projects.as_ref(),
            View::Todos => self.todos.as_ref(),
            View::Loading | View::Error => None,
        }
    }

    pub fn active_board_mut(&mut self) -> Option<&mut Board> {
        match self.current_view {
            View::Projects => self.projects.as_mut(),
            View::Todos => self.todos.as_mut(),
            View::Loading | View::Error => None,
        }
    }

    pub fn open_project_id(&self) -> Option<EntityId> {
        self.open_project.as_ref().map(|p| p.id)
    }

    /// Replace the projects board with freshly fetched data
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        let board = self.sized(Board::new(
            BoardKind::Projects,
            projects.into_iter().map(Entity::from),
        ));
        self.projects = Some(board);
        self.last_refresh = Some(Local::now());
        if self.current_view == View::Loading {
            self.current_view = View::Projects;
        }
    }

    /// Replace the todos board for the open project
    pub fn set_todos(&mut self, project_id: EntityId, todos: Vec<Todo>) {
        let board = self.sized(Board::new(
            BoardKind::Todos { project_id },
            todos.into_iter().map(Entity::from),
        ));
        self.todos = Some(board);
        self.last_refresh = Some(Local::now());
    }

    /// Switch to the todos view of a project; the board arrives later
    pub fn open_todos(&mut self, project: Project) {
        self.open_project = Some(project);
        self.todos = None;
        self.current_view = View::Todos;
    }

    pub fn close_todos(&mut self) {
        self.open_project = None;
        self.todos = None;
        self.current_view = View::Projects;
    }

    /// Replace the view with an error. Boards are kept as they were.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.form = FormState::None;
        self.current_view = View::Error;
    }

    /// Leave the error view and fall back to the projects board
    pub fn clear_error(&mut self) {
        self.error = None;
        self.open_project = None;
        self.todos = None;
        self.current_view = if self.projects.is_some() {
            View::Projects
        } else {
            View::Loading
        };
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = Some((width, height));
        for board in [self.projects.as_mut(), self.todos.as_mut()].into_iter().flatten() {
            board.set_size(width, height);
        }
    }

    fn sized(&self, mut board: Board) -> Board {
        if let Some((width, height)) = self.terminal_size {
            board.set_size(width, height);
        }
        board
    }
}
