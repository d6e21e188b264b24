//! Application state and core logic
//!
//! [`App::update`] is the single reducer: every key press, resize and API
//! completion goes through it and comes back as a list of [`Intent`]s.
//! [`App::dispatch`] runs an intent on the tokio runtime and feeds the
//! result back into the event channel.

use crate::api::{ApiError, ProjectApi};
use crate::input::{reload, Action, Controller, KeyMap};
use crate::message::{ApiEvent, Intent, Message, Scope};
use crate::state::{
    AppState, Entity, FormMode, FormOutcome, FormState, ProjectForm, Reconciled, TodoForm, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    controller: Controller,
    api: Arc<dyn ProjectApi>,
    tx: UnboundedSender<Message>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    pub fn new(api: Arc<dyn ProjectApi>, keymap: KeyMap, tx: UnboundedSender<Message>) -> Self {
        Self {
            state: AppState::default(),
            controller: Controller::new(keymap),
            api,
            tx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn keymap(&self) -> &KeyMap {
        self.controller.keymap()
    }

    /// Requests to issue right after startup
    pub fn start(&self) -> Vec<Intent> {
        vec![Intent::LoadProjects]
    }

    /// Apply one event to the state
    pub fn update(&mut self, message: Message) -> Vec<Intent> {
        match message {
            Message::Key(key) => self.handle_key(key),
            Message::Resize(width, height) => {
                self.state.resize(width, height);
                Vec::new()
            }
            Message::Api(event) => {
                self.state.pending_requests = self.state.pending_requests.saturating_sub(1);
                self.handle_api(event)
            }
        }
    }

    /// Run an intent in the background; its result arrives as [`Message::Api`]
    pub fn dispatch(&mut self, intent: Intent) {
        debug!(intent = %intent.describe(), "Dispatching");
        self.state.pending_requests += 1;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = execute(api.as_ref(), intent).await;
            // The receiver is gone only while shutting down
            let _ = tx.send(Message::Api(event));
        });
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Intent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return Vec::new();
        }

        if self.state.form.is_open() {
            return self.handle_form_key(&key);
        }

        self.state.status_message = None;
        let Some(action) = self.controller.resolve(&key) else {
            return Vec::new();
        };
        if action == Action::Quit {
            self.quit = true;
            return Vec::new();
        }

        match self.state.current_view {
            View::Loading => Vec::new(),
            View::Error => match action {
                Action::Refresh => {
                    info!("Retrying after error");
                    self.state.clear_error();
                    vec![Intent::LoadProjects]
                }
                _ => Vec::new(),
            },
            View::Projects | View::Todos => self.handle_board_action(action),
        }
    }

    fn handle_board_action(&mut self, action: Action) -> Vec<Intent> {
        let view = self.state.current_view;
        match (view, action) {
            (View::Projects, Action::Open) => self.open_selected_project(),
            (View::Todos, Action::Back) => {
                self.state.close_todos();
                Vec::new()
            }
            (_, Action::New) => {
                self.open_create_form();
                Vec::new()
            }
            (_, Action::Edit) => {
                self.open_edit_form();
                Vec::new()
            }
            (View::Projects, Action::CopyPath) => {
                self.copy_selected_path();
                Vec::new()
            }
            _ => {
                let Some(board) = self.state.active_board_mut() else {
                    return Vec::new();
                };
                self.controller.handle(board, action).into_iter().collect()
            }
        }
    }

    fn open_selected_project(&mut self) -> Vec<Intent> {
        let Some(project) = self
            .state
            .projects
            .as_ref()
            .and_then(|b| b.selected())
            .and_then(Entity::as_project)
            .cloned()
        else {
            return Vec::new();
        };
        let id = project.id;
        info!(project = id, "Opening todos");
        self.state.open_todos(project);
        vec![Intent::LoadTodos(id), Intent::LoadProject(id)]
    }

    fn open_create_form(&mut self) {
        self.state.form = match (self.state.current_view, self.state.open_project_id()) {
            (View::Projects, _) => FormState::Project(ProjectForm::new()),
            (View::Todos, Some(project_id)) => FormState::Todo(TodoForm::new(project_id)),
            _ => FormState::None,
        };
    }

    fn open_edit_form(&mut self) {
        let project_id = self.state.open_project_id();
        let Some(selected) = self.state.active_board().and_then(|b| b.selected()) else {
            return;
        };
        let form = match (selected, project_id) {
            (Entity::Project(project), _) => FormState::Project(ProjectForm::edit(project)),
            (Entity::Todo(todo), Some(project_id)) => {
                FormState::Todo(TodoForm::edit(todo, project_id))
            }
            (Entity::Todo(_), None) => FormState::None,
        };
        self.state.form = form;
    }

    fn handle_form_key(&mut self, key: &KeyEvent) -> Vec<Intent> {
        match self.state.form.handle_key(key) {
            FormOutcome::Continue => Vec::new(),
            FormOutcome::Cancel => {
                self.state.form = FormState::None;
                Vec::new()
            }
            FormOutcome::SubmitProject { mode, fields } => {
                self.state.form = FormState::None;
                match mode {
                    FormMode::Create => vec![Intent::CreateProject(fields)],
                    FormMode::Edit(id) => vec![Intent::UpdateProject { id, fields }],
                }
            }
            FormOutcome::SubmitTodo { mode, fields } => {
                self.state.form = FormState::None;
                match mode {
                    FormMode::Create => vec![Intent::CreateTodo(fields)],
                    FormMode::Edit(id) => vec![Intent::UpdateTodo { id, fields }],
                }
            }
        }
    }

    fn copy_selected_path(&mut self) {
        let Some(path) = self
            .state
            .projects
            .as_ref()
            .and_then(|b| b.selected())
            .and_then(Entity::as_project)
            .map(|p| p.path.clone())
        else {
            return;
        };
        if path.is_empty() {
            self.state.status_message = Some("Project has no path".to_string());
            return;
        }

        self.state.status_message = Some(match copy_to_clipboard(&path) {
            Ok(()) => format!("Copied {path}"),
            Err(err) => {
                warn!(error = %err, "Clipboard unavailable");
                format!("Copy failed: {err}")
            }
        });
    }

    fn handle_api(&mut self, event: ApiEvent) -> Vec<Intent> {
        match event {
            ApiEvent::ProjectsLoaded(Ok(projects)) => {
                info!(count = projects.len(), "Projects loaded");
                self.state.set_projects(projects);
                Vec::new()
            }
            ApiEvent::TodosLoaded { project_id, result } => {
                if self.state.open_project_id() != Some(project_id) {
                    debug!(project = project_id, "Dropping todos for closed project");
                    return Vec::new();
                }
                match result {
                    Ok(todos) => {
                        info!(project = project_id, count = todos.len(), "Todos loaded");
                        self.state.set_todos(project_id, todos);
                    }
                    Err(err) => self.fail(err),
                }
                Vec::new()
            }
            ApiEvent::EntityUpdated(Ok(entity)) => self.reconcile(entity),
            ApiEvent::Changed {
                scope,
                result: Ok(()),
            } => self.refetch(scope),
            ApiEvent::ProjectsLoaded(Err(err))
            | ApiEvent::EntityUpdated(Err(err))
            | ApiEvent::Changed {
                result: Err(err), ..
            } => {
                self.fail(err);
                Vec::new()
            }
        }
    }

    fn reconcile(&mut self, entity: Entity) -> Vec<Intent> {
        let open_project = self.state.open_project_id();
        if let Entity::Project(project) = &entity {
            if open_project == Some(project.id) {
                self.state.open_project = Some(project.clone());
            }
        }

        let board = match &entity {
            Entity::Project(_) => self.state.projects.as_mut(),
            Entity::Todo(todo) => match (open_project, todo.project_id) {
                (Some(open), Some(owner)) if open != owner => None,
                (Some(_), _) => self.state.todos.as_mut(),
                (None, _) => None,
            },
        };
        let Some(board) = board else {
            debug!(id = entity.id(), "Update for a board that is not loaded");
            return Vec::new();
        };

        let id = entity.id();
        let kind = board.kind();
        match board.apply_updated(entity) {
            Reconciled::Placed { column, index } => {
                info!(id, column, index, "Reconciled update");
                Vec::new()
            }
            Reconciled::Removed => {
                info!(id, "Removed deleted entity");
                Vec::new()
            }
            Reconciled::Missing => {
                info!(id, "Updated entity not on board, refetching");
                vec![reload(kind)]
            }
        }
    }

    fn refetch(&mut self, scope: Scope) -> Vec<Intent> {
        match scope {
            Scope::Projects => vec![Intent::LoadProjects],
            Scope::Todos(project_id) if self.state.open_project_id() == Some(project_id) => {
                vec![Intent::LoadTodos(project_id)]
            }
            Scope::Todos(_) => Vec::new(),
        }
    }

    fn fail(&mut self, err: ApiError) {
        warn!(error = %err, "API request failed");
        self.state.show_error(err.to_string());
    }
}

/// Perform an intent against the API
pub async fn execute(api: &dyn ProjectApi, intent: Intent) -> ApiEvent {
    match intent {
        Intent::LoadProjects => ApiEvent::ProjectsLoaded(api.list_projects().await),
        Intent::LoadTodos(project_id) => ApiEvent::TodosLoaded {
            project_id,
            result: api.list_todos(project_id).await,
        },
        Intent::LoadProject(id) => {
            ApiEvent::EntityUpdated(api.get_project(id).await.map(Entity::from))
        }
        Intent::UpdateStatus { id, status } => {
            ApiEvent::EntityUpdated(api.update_status(id, &status).await.map(Entity::from))
        }
        Intent::UpdatePriority { id, priority } => {
            ApiEvent::EntityUpdated(api.update_priority(id, priority).await.map(Entity::from))
        }
        Intent::CreateProject(fields) => ApiEvent::Changed {
            scope: Scope::Projects,
            result: api.create_project(&fields).await.map(|_| ()),
        },
        Intent::UpdateProject { id, fields } => {
            ApiEvent::EntityUpdated(api.update_project(id, &fields).await.map(Entity::from))
        }
        Intent::CreateTodo(fields) => ApiEvent::Changed {
            scope: Scope::Todos(fields.project_id),
            result: api.create_todo(&fields).await.map(|_| ()),
        },
        Intent::UpdateTodo { id, fields } => {
            ApiEvent::EntityUpdated(api.update_todo(id, &fields).await.map(Entity::from))
        }
        Intent::DeleteTodo { id, project_id } => ApiEvent::Changed {
            scope: Scope::Todos(project_id),
            result: api.delete_todo(id).await,
        },
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockProjectApi, ProjectFields, TodoFields};
    use crate::state::fixtures::{project, todo};
    use crate::state::{Project, Todo};
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn app_with(api: MockProjectApi) -> (App, UnboundedReceiver<Message>) {
        let (tx, rx) = unbounded_channel();
        (App::new(Arc::new(api), KeyMap::default(), tx), rx)
    }

    fn app() -> App {
        app_with(MockProjectApi::new()).0
    }

    fn as_project(entity: Entity) -> Project {
        match entity {
            Entity::Project(p) => p,
            Entity::Todo(_) => panic!("not a project"),
        }
    }

    fn as_todo(entity: Entity) -> Todo {
        match entity {
            Entity::Todo(t) => t,
            Entity::Project(_) => panic!("not a todo"),
        }
    }

    fn key(c: char) -> Message {
        let modifiers = if c.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        Message::Key(KeyEvent::new(KeyCode::Char(c), modifiers))
    }

    fn special(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn loaded(app: &mut App, projects: Vec<Entity>) {
        app.update(Message::Resize(100, 40));
        let projects = projects.into_iter().map(as_project).collect();
        app.update(Message::Api(ApiEvent::ProjectsLoaded(Ok(projects))));
    }

    fn column_names(app: &App, column: usize) -> Vec<String> {
        app.state.active_board().unwrap().columns()[column]
            .members
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: 500,
            message: "database locked".to_string(),
        }
    }

    mod loading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_start_requests_projects() {
            assert_eq!(app().start(), vec![Intent::LoadProjects]);
        }

        #[test]
        fn test_projects_loaded_shows_board() {
            let mut app = app();
            assert_eq!(app.state.current_view, View::Loading);

            loaded(&mut app, vec![project(1, "ready", 0, "A"), project(2, "done", 2, "B")]);

            assert_eq!(app.state.current_view, View::Projects);
            assert_eq!(column_names(&app, 0), vec!["A"]);
            assert!(column_names(&app, 1).is_empty());
            assert_eq!(column_names(&app, 2), vec!["B"]);
        }

        #[test]
        fn test_load_failure_shows_error() {
            let mut app = app();
            app.update(Message::Api(ApiEvent::ProjectsLoaded(Err(server_error()))));
            assert_eq!(app.state.current_view, View::Error);
            assert_eq!(
                app.state.error.as_deref(),
                Some("API error (status 500): database locked")
            );
        }

        #[test]
        fn test_retry_reloads_projects() {
            let mut app = app();
            loaded(&mut app, vec![project(1, "ready", 0, "A")]);
            app.update(Message::Api(ApiEvent::EntityUpdated(Err(server_error()))));

            assert_eq!(app.update(key('j')), Vec::new());
            assert_eq!(app.update(key('r')), vec![Intent::LoadProjects]);
            assert_eq!(app.state.current_view, View::Projects);
            assert_eq!(app.state.error, None);
        }

        #[test]
        fn test_pending_count_never_underflows() {
            let mut app = app();
            app.update(Message::Api(ApiEvent::ProjectsLoaded(Ok(Vec::new()))));
            assert_eq!(app.state.pending_requests, 0);
        }
    }

    mod board {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_progress_then_reconcile() {
            let mut app = app();
            loaded(&mut app, vec![project(1, "ready", 0, "A"), project(2, "done", 2, "B")]);

            let intents = app.update(key('L'));
            assert_eq!(
                intents,
                vec![Intent::UpdateStatus {
                    id: 1,
                    status: "in_progress".to_string()
                }]
            );
            // Nothing moves until the server confirms
            assert_eq!(column_names(&app, 0), vec!["A"]);

            let confirmed = as_project(project(1, "in_progress", 0, "A"));
            app.update(Message::Api(ApiEvent::EntityUpdated(Ok(confirmed.into()))));

            assert!(column_names(&app, 0).is_empty());
            assert_eq!(column_names(&app, 1), vec!["A"]);
            assert_eq!(app.state.active_board().unwrap().selected_column(), 1);
        }

        #[test]
        fn test_failed_mutation_keeps_board() {
            let mut app = app();
            loaded(&mut app, vec![project(1, "ready", 0, "A")]);
            let before = app.state.projects.clone();

            app.update(key('L'));
            app.update(Message::Api(ApiEvent::EntityUpdated(Err(server_error()))));

            assert_eq!(app.state.current_view, View::Error);
            assert_eq!(app.state.projects, before);
        }

        #[test]
        fn test_unknown_entity_triggers_refetch() {
            let mut app = app();
            loaded(&mut app, vec![project(1, "ready", 0, "A")]);
            let stranger = project(42, "ready", 0, "New");
            assert_eq!(
                app.update(Message::Api(ApiEvent::EntityUpdated(Ok(stranger)))),
                vec![Intent::LoadProjects]
            );
        }

        #[test]
        fn test_last_completion_wins() {
            let mut app = app();
            loaded(&mut app, vec![project(1, "ready", 0, "A")]);

            app.update(Message::Api(ApiEvent::EntityUpdated(Ok(project(1, "in_progress", 0, "A")))));
            app.update(Message::Api(ApiEvent::EntityUpdated(Ok(project(1, "ready", 3, "A")))));

            assert_eq!(column_names(&app, 0), vec!["A"]);
            assert_eq!(
                app.state.active_board().unwrap().selected().map(Entity::priority),
                Some(3)
            );
        }

        #[test]
        fn test_raise_priority_at_max() {
            let mut app = app();
            loaded(&mut app, vec![project(1, "ready", 3, "A")]);
            assert_eq!(
                app.update(key('+')),
                vec![Intent::UpdatePriority { id: 1, priority: 3 }]
            );
        }

        #[test]
        fn test_quit_key() {
            let mut app = app();
            loaded(&mut app, Vec::new());
            app.update(key('q'));
            assert!(app.should_quit());
        }

        #[test]
        fn test_resize_resets_scroll() {
            let mut app = app();
            let many = (0..8).map(|i| project(i, "ready", 0, &format!("P{i}"))).collect();
            loaded(&mut app, many);
            for _ in 0..6 {
                app.update(key('j'));
            }
            assert!(app.state.active_board().unwrap().scroll_offset(0) > 0);

            app.update(Message::Resize(100, 30));

            let board = app.state.active_board().unwrap();
            assert_eq!(board.scroll_offset(0), 0);
            assert_eq!(board.selected_index(), 0);
        }

        #[test]
        fn test_copy_without_selection_is_silent() {
            let mut app = app();
            loaded(&mut app, Vec::new());
            app.update(key('y'));
            assert_eq!(app.state.status_message, None);
        }

        #[test]
        fn test_copy_project_without_path() {
            let mut app = app();
            let mut kiln = as_project(project(1, "ready", 0, "Kiln"));
            kiln.path.clear();
            loaded(&mut app, vec![Entity::Project(kiln)]);

            app.update(key('y'));
            assert_eq!(app.state.status_message.as_deref(), Some("Project has no path"));

            // Any other key clears the message
            app.update(key('j'));
            assert_eq!(app.state.status_message, None);
        }
    }

    mod todos {
        use super::*;
        use pretty_assertions::assert_eq;

        fn with_open_project() -> App {
            let mut app = app();
            loaded(&mut app, vec![project(1, "ready", 0, "Kiln")]);
            assert_eq!(
                app.update(special(KeyCode::Enter)),
                vec![Intent::LoadTodos(1), Intent::LoadProject(1)]
            );
            app
        }

        #[test]
        fn test_open_and_load_todos() {
            let mut app = with_open_project();
            assert_eq!(app.state.current_view, View::Todos);

            let todos = vec![as_todo(todo(1, 0, "a")), as_todo(todo(2, 3, "b"))];
            app.update(Message::Api(ApiEvent::TodosLoaded {
                project_id: 1,
                result: Ok(todos),
            }));

            assert_eq!(column_names(&app, 0), vec!["a"]);
            assert_eq!(column_names(&app, 2), vec!["b"]);
        }

        #[test]
        fn test_refreshed_project_renames_open_view() {
            let mut app = with_open_project();
            let renamed = project(1, "in_progress", 0, "Kiln v2");

            let intents = app.update(Message::Api(ApiEvent::EntityUpdated(Ok(renamed))));

            assert!(intents.is_empty());
            assert_eq!(app.state.current_view, View::Todos);
            assert_eq!(app.state.open_project.as_ref().map(|p| p.name.as_str()), Some("Kiln v2"));
            let projects = app.state.projects.as_ref().unwrap();
            assert_eq!(projects.columns()[1].members[0].name(), "Kiln v2");
        }

        #[test]
        fn test_stale_todos_are_dropped() {
            let mut app = with_open_project();
            app.update(special(KeyCode::Esc));
            assert_eq!(app.state.current_view, View::Projects);

            app.update(Message::Api(ApiEvent::TodosLoaded {
                project_id: 1,
                result: Err(server_error()),
            }));

            assert_eq!(app.state.current_view, View::Projects);
            assert!(app.state.todos.is_none());
        }

        #[test]
        fn test_delete_then_refetch() {
            let mut app = with_open_project();
            app.update(Message::Api(ApiEvent::TodosLoaded {
                project_id: 1,
                result: Ok(vec![as_todo(todo(5, 0, "old"))]),
            }));

            assert_eq!(
                app.update(key('d')),
                vec![Intent::DeleteTodo { id: 5, project_id: 1 }]
            );
            assert_eq!(
                app.update(Message::Api(ApiEvent::Changed {
                    scope: Scope::Todos(1),
                    result: Ok(())
                })),
                vec![Intent::LoadTodos(1)]
            );
        }

        #[test]
        fn test_add_todo() {
            let mut app = with_open_project();
            app.update(Message::Api(ApiEvent::TodosLoaded {
                project_id: 1,
                result: Ok(Vec::new()),
            }));

            app.update(key('n'));
            for c in "ship".chars() {
                app.update(key(c));
            }
            let intents = app.update(special(KeyCode::Enter));

            assert_eq!(
                intents,
                vec![Intent::CreateTodo(TodoFields {
                    description: "ship".to_string(),
                    priority: 0,
                    project_id: 1,
                })]
            );
            assert!(!app.state.form.is_open());
        }

        #[test]
        fn test_todo_priority_change_reconciles() {
            let mut app = with_open_project();
            app.update(Message::Api(ApiEvent::TodosLoaded {
                project_id: 1,
                result: Ok(vec![as_todo(todo(5, 0, "task"))]),
            }));

            let intents = app.update(key('+'));
            assert!(matches!(
                intents.as_slice(),
                [Intent::UpdateTodo { id: 5, fields }] if fields.priority == 1
            ));

            app.update(Message::Api(ApiEvent::EntityUpdated(Ok(todo(5, 1, "task")))));
            assert_eq!(column_names(&app, 1), vec!["task"]);
        }
    }

    mod forms {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_form_captures_quit_key() {
            let mut app = app();
            loaded(&mut app, Vec::new());
            app.update(key('n'));
            app.update(key('q'));
            assert!(!app.should_quit());
            assert!(app.state.form.is_open());

            app.update(Message::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            )));
            assert!(app.should_quit());
        }

        #[test]
        fn test_create_project_then_refetch() {
            let mut app = app();
            loaded(&mut app, Vec::new());
            app.update(key('n'));
            for c in "Forge".chars() {
                app.update(key(c));
            }
            app.update(special(KeyCode::BackTab));

            let intents = app.update(special(KeyCode::Enter));

            assert_eq!(
                intents,
                vec![Intent::CreateProject(ProjectFields {
                    name: "Forge".to_string(),
                    status: "ready".to_string(),
                    ..Default::default()
                })]
            );
            assert_eq!(
                app.update(Message::Api(ApiEvent::Changed {
                    scope: Scope::Projects,
                    result: Ok(())
                })),
                vec![Intent::LoadProjects]
            );
        }

        #[test]
        fn test_edit_project_submits_update() {
            let mut app = app();
            loaded(&mut app, vec![project(7, "in_progress", 1, "Kiln")]);
            app.update(key('e'));
            app.update(special(KeyCode::BackTab));

            let intents = app.update(special(KeyCode::Enter));

            let [Intent::UpdateProject { id, fields }] = intents.as_slice() else {
                panic!("expected update, got {intents:?}");
            };
            assert_eq!(*id, 7);
            assert_eq!(fields.status, "in_progress");
            assert_eq!(fields.priority, 1);
        }

        #[test]
        fn test_escape_closes_form() {
            let mut app = app();
            loaded(&mut app, Vec::new());
            app.update(key('n'));
            app.update(special(KeyCode::Esc));
            assert!(!app.state.form.is_open());
            assert_eq!(app.state.current_view, View::Projects);
        }
    }

    mod execute {
        use super::*;
        use pretty_assertions::assert_eq;
        use tokio_test::block_on;

        #[test]
        fn test_update_status_returns_entity() {
            let mut api = MockProjectApi::new();
            api.expect_update_status()
                .withf(|id, status| *id == 1 && status == "finished")
                .times(1)
                .returning(|id, status| Ok(as_project(project(id, status, 0, "A"))));

            let event = block_on(execute(
                &api,
                Intent::UpdateStatus {
                    id: 1,
                    status: "finished".to_string(),
                },
            ));

            assert_eq!(event, ApiEvent::EntityUpdated(Ok(project(1, "finished", 0, "A"))));
        }

        #[test]
        fn test_delete_reports_todo_scope() {
            let mut api = MockProjectApi::new();
            api.expect_delete_todo()
                .withf(|id| *id == 5)
                .returning(|_| Ok(()));

            let event = block_on(execute(&api, Intent::DeleteTodo { id: 5, project_id: 2 }));

            assert_eq!(
                event,
                ApiEvent::Changed {
                    scope: Scope::Todos(2),
                    result: Ok(())
                }
            );
        }

        #[test]
        fn test_load_project_returns_entity() {
            let mut api = MockProjectApi::new();
            api.expect_get_project()
                .withf(|id| *id == 4)
                .times(1)
                .returning(|id| Ok(as_project(project(id, "ready", 1, "Loom"))));

            let event = block_on(execute(&api, Intent::LoadProject(4)));

            assert_eq!(event, ApiEvent::EntityUpdated(Ok(project(4, "ready", 1, "Loom"))));
        }

        #[test]
        fn test_errors_are_passed_through() {
            let mut api = MockProjectApi::new();
            api.expect_list_todos()
                .returning(|_| Err(ApiError::Network("connection refused".to_string())));

            let event = block_on(execute(&api, Intent::LoadTodos(3)));

            assert_eq!(
                event,
                ApiEvent::TodosLoaded {
                    project_id: 3,
                    result: Err(ApiError::Network("connection refused".to_string())),
                }
            );
        }

        #[tokio::test]
        async fn test_dispatch_feeds_result_back() {
            let mut api = MockProjectApi::new();
            api.expect_list_projects().returning(|| Ok(Vec::new()));
            let (mut app, mut rx) = app_with(api);

            app.dispatch(Intent::LoadProjects);
            assert_eq!(app.state.pending_requests, 1);

            let message = rx.recv().await.unwrap();
            assert_eq!(message, Message::Api(ApiEvent::ProjectsLoaded(Ok(Vec::new()))));
            app.update(message);
            assert_eq!(app.state.pending_requests, 0);
            assert_eq!(app.state.current_view, View::Projects);
        }
    }
}
