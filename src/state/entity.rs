//! Entities shown on the boards
//!
//! Projects and todos share the board machinery through [`Entity`]. Each
//! variant brings its own column placement strategy (status for projects,
//! priority bucket for todos).

use super::classify::{classify_priority, classify_status};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Identifier assigned by the API
pub type EntityId = i64;

/// Highest priority the API accepts
pub const MAX_PRIORITY: u8 = 3;

/// Project as returned by the projectarium API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub language: String,
}

/// Todo attached to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: EntityId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub project_id: Option<EntityId>,
}

/// Anything that can sit in a board column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Project(Project),
    Todo(Todo),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Project(p) => p.id,
            Self::Todo(t) => t.id,
        }
    }

    /// Text used as the card title and as the secondary sort key
    pub fn name(&self) -> &str {
        match self {
            Self::Project(p) => &p.name,
            Self::Todo(t) => &t.description,
        }
    }

    pub fn priority(&self) -> u8 {
        match self {
            Self::Project(p) => p.priority,
            Self::Todo(t) => t.priority,
        }
    }

    /// Soft-deleted entities never occupy a column
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Todo(t) if t.deleted)
    }

    /// Whether both values refer to the same API record
    pub fn same_identity(&self, other: &Entity) -> bool {
        match (self, other) {
            (Self::Project(a), Self::Project(b)) => a.id == b.id,
            (Self::Todo(a), Self::Todo(b)) => a.id == b.id,
            _ => false,
        }
    }

    /// Column index this entity belongs to, `None` when it is deleted.
    ///
    /// Board construction and reconciliation both go through here.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Project(p) => Some(classify_status(&p.status)),
            Self::Todo(t) if t.deleted => None,
            Self::Todo(t) => Some(classify_priority(t.priority)),
        }
    }

    /// Board ordering: higher priority first, then name ascending
    pub fn board_order(&self, other: &Entity) -> Ordering {
        other
            .priority()
            .cmp(&self.priority())
            .then_with(|| self.name().cmp(other.name()))
    }

    pub fn as_project(&self) -> Option<&Project> {
        match self {
            Self::Project(p) => Some(p),
            Self::Todo(_) => None,
        }
    }

    pub fn as_todo(&self) -> Option<&Todo> {
        match self {
            Self::Todo(t) => Some(t),
            Self::Project(_) => None,
        }
    }
}

impl From<Project> for Entity {
    fn from(project: Project) -> Self {
        Self::Project(project)
    }
}

impl From<Todo> for Entity {
    fn from(todo: Todo) -> Self {
        Self::Todo(todo)
    }
}

/// Raise or lower a priority by one, clamped to `0..=MAX_PRIORITY`
pub fn bump_priority(priority: u8, raise: bool) -> u8 {
    if raise {
        priority.saturating_add(1).min(MAX_PRIORITY)
    } else {
        priority.saturating_sub(1).min(MAX_PRIORITY)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn project(id: EntityId, status: &str, priority: u8, name: &str) -> Entity {
        Entity::Project(Project {
            id,
            name: name.to_string(),
            description: String::new(),
            path: format!("/src/{}", name.to_lowercase()),
            file: String::new(),
            priority,
            status: status.to_string(),
            language: String::new(),
        })
    }

    pub fn todo(id: EntityId, priority: u8, description: &str) -> Entity {
        Entity::Todo(Todo {
            id,
            description: description.to_string(),
            priority,
            deleted: false,
            project_id: Some(1),
        })
    }
}
