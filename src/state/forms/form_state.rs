//! Form state management and form structs

use super::field::{FieldValue, FormField};
use crate::api::{ProjectFields, TodoFields};
use crate::state::classify::{classify_status, column_status};
use crate::state::entity::{EntityId, Project, Todo, MAX_PRIORITY};
use crossterm::event::{KeyCode, KeyEvent};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Whether a form creates a record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

/// What a key press did to an open form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Continue,
    Cancel,
    SubmitProject {
        mode: FormMode,
        fields: ProjectFields,
    },
    SubmitTodo {
        mode: FormMode,
        fields: TodoFields,
    },
}

/// Enum representing all possible form states
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    None,
    Project(ProjectForm),
    Todo(TodoForm),
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::None)
    }

    /// Route a key to the open form
    pub fn handle_key(&mut self, key: &KeyEvent) -> FormOutcome {
        match self {
            FormState::None => FormOutcome::Continue,
            FormState::Project(form) => form.handle_key(key),
            FormState::Todo(form) => form.handle_key(key),
        }
    }
}

/// Project create/edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    pub mode: FormMode,
    pub name: FormField,
    pub description: FormField,
    pub path: FormField,
    pub file: FormField,
    pub language: FormField,
    pub priority: FormField,
    pub status: FormField,
    pub active_field_index: usize,
    /// Validation message from the last submit attempt
    pub error: Option<String>,
}

const STATUS_FIELD: usize = 6;

impl ProjectForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            name: FormField::text("name", "Name").required(),
            description: FormField::text("description", "Description"),
            path: FormField::text("path", "Project Dir"),
            file: FormField::text("file", "Default File"),
            language: FormField::text("language", "Language"),
            priority: FormField::text_with_value("priority", "Priority (0-3)", "0".to_string()),
            status: FormField::status("status", "Status", 0),
            active_field_index: 0,
            error: None,
        }
    }

    /// Form pre-filled from an existing project
    pub fn edit(project: &Project) -> Self {
        Self {
            mode: FormMode::Edit(project.id),
            name: FormField::text_with_value("name", "Name", project.name.clone()).required(),
            description: FormField::text_with_value(
                "description",
                "Description",
                project.description.clone(),
            ),
            path: FormField::text_with_value("path", "Project Dir", project.path.clone()),
            file: FormField::text_with_value("file", "Default File", project.file.clone()),
            language: FormField::text_with_value("language", "Language", project.language.clone()),
            priority: FormField::text_with_value(
                "priority",
                "Priority (0-3)",
                project.priority.to_string(),
            ),
            status: FormField::status("status", "Status", classify_status(&project.status)),
            active_field_index: 0,
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New Project",
            FormMode::Edit(_) => "Edit Project",
        }
    }

    /// Validate and collect the request body
    pub fn validate(&self) -> Result<ProjectFields, String> {
        let name = self.name.as_text().trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }

        let priority = match self.priority.as_text().trim() {
            "" => 0,
            text => text
                .parse::<u8>()
                .ok()
                .filter(|p| *p <= MAX_PRIORITY)
                .ok_or_else(|| format!("Priority must be a number from 0 to {MAX_PRIORITY}"))?,
        };

        let status = match &self.status.value {
            FieldValue::Status(column) => column_status(*column),
            FieldValue::Text(_) => None,
        }
        .unwrap_or("ready");

        Ok(ProjectFields {
            name: name.to_string(),
            description: self.description.as_text().trim().to_string(),
            path: self.path.as_text().trim().to_string(),
            file: self.file.as_text().trim().to_string(),
            language: self.language.as_text().trim().to_string(),
            priority,
            status: status.to_string(),
        })
    }

    fn submit(&mut self) -> FormOutcome {
        match self.validate() {
            Ok(fields) => FormOutcome::SubmitProject {
                mode: self.mode,
                fields,
            },
            Err(message) => {
                self.error = Some(message);
                FormOutcome::Continue
            }
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancel,
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Enter if self.active_field_index == STATUS_FIELD => return self.submit(),
            KeyCode::Enter => self.next_field(),
            KeyCode::Left => self.get_active_field_mut().cycle(false),
            KeyCode::Right => self.get_active_field_mut().cycle(true),
            KeyCode::Backspace => self.get_active_field_mut().pop_char(),
            KeyCode::Char(c) => self.get_active_field_mut().push_char(c),
            _ => {}
        }
        FormOutcome::Continue
    }
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ProjectForm {
    fn field_count(&self) -> usize {
        7
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index;
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.name,
            1 => &mut self.description,
            2 => &mut self.path,
            3 => &mut self.file,
            4 => &mut self.language,
            5 => &mut self.priority,
            _ => &mut self.status,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.description),
            2 => Some(&self.path),
            3 => Some(&self.file),
            4 => Some(&self.language),
            5 => Some(&self.priority),
            6 => Some(&self.status),
            _ => None,
        }
    }
}

/// Single-line todo description input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoForm {
    pub mode: FormMode,
    pub project_id: EntityId,
    pub description: FormField,
    /// Priority carried over unchanged when editing
    pub priority: u8,
}

impl TodoForm {
    pub fn new(project_id: EntityId) -> Self {
        Self {
            mode: FormMode::Create,
            project_id,
            description: FormField::text("description", "Description"),
            priority: 0,
        }
    }

    pub fn edit(todo: &Todo, project_id: EntityId) -> Self {
        Self {
            mode: FormMode::Edit(todo.id),
            project_id: todo.project_id.unwrap_or(project_id),
            description: FormField::text_with_value(
                "description",
                "Description",
                todo.description.clone(),
            ),
            priority: todo.priority,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New Todo",
            FormMode::Edit(_) => "Edit Todo",
        }
    }

    /// Enter submits; an empty description cancels instead
    pub fn handle_key(&mut self, key: &KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => FormOutcome::Cancel,
            KeyCode::Enter => {
                let description = self.description.as_text().trim();
                if description.is_empty() {
                    return FormOutcome::Cancel;
                }
                FormOutcome::SubmitTodo {
                    mode: self.mode,
                    fields: TodoFields {
                        description: description.to_string(),
                        priority: self.priority,
                        project_id: self.project_id,
                    },
                }
            }
            KeyCode::Backspace => {
                self.description.pop_char();
                FormOutcome::Continue
            }
            KeyCode::Char(c) => {
                self.description.push_char(c);
                FormOutcome::Continue
            }
            _ => FormOutcome::Continue,
        }
    }
}
