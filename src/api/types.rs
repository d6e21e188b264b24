//! Request bodies sent to the API

use crate::state::{EntityId, Todo};
use serde::{Deserialize, Serialize};

/// Editable project fields, as sent on create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFields {
    pub name: String,
    pub description: String,
    pub path: String,
    pub file: String,
    pub language: String,
    pub priority: u8,
    pub status: String,
}

/// Editable todo fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFields {
    pub description: String,
    pub priority: u8,
    pub project_id: EntityId,
}

impl TodoFields {
    /// Fields of an existing todo, keeping its project
    pub fn from_todo(todo: &Todo, project_id: EntityId) -> Self {
        Self {
            description: todo.description.clone(),
            priority: todo.priority,
            project_id: todo.project_id.unwrap_or(project_id),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct StatusBody<'a> {
    pub status: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct PriorityBody {
    pub priority: u8,
}
