//! Column placement rules

use super::entity::EntityId;

/// Number of columns on every board
pub const COLUMN_COUNT: usize = 3;

const PROJECT_COLUMNS: [&str; COLUMN_COUNT] = ["Ready", "In Progress", "Finished"];
const TODO_COLUMNS: [&str; COLUMN_COUNT] = ["Todo", "In Progress", "Done"];

/// Status written back to the API when a project lands in a column
const PROJECT_STATUSES: [&str; COLUMN_COUNT] = ["ready", "in_progress", "finished"];

/// Which entities a board holds, and for todos which project they belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    Projects,
    Todos { project_id: EntityId },
}

impl BoardKind {
    pub fn column_names(&self) -> [&'static str; COLUMN_COUNT] {
        match self {
            Self::Projects => PROJECT_COLUMNS,
            Self::Todos { .. } => TODO_COLUMNS,
        }
    }

    /// Display lines taken by one card, margin included
    pub fn row_height(&self) -> usize {
        match self {
            Self::Projects => 7,
            Self::Todos { .. } => 4,
        }
    }

    pub fn empty_label(&self) -> &'static str {
        match self {
            Self::Projects => "No projects",
            Self::Todos { .. } => "No todos",
        }
    }
}

/// Map a free-form project status to a column.
///
/// Matching ignores case and treats spaces, hyphens and underscores alike.
/// Unknown values land in the first column.
pub fn classify_status(status: &str) -> usize {
    let normalized: String = status
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect();

    match normalized.as_str() {
        "" | "ready" => 0,
        "in_progress" => 1,
        "finished" | "done" => 2,
        _ => 0,
    }
}

/// Map a todo priority to a column
pub fn classify_priority(priority: u8) -> usize {
    match priority {
        0 => 0,
        1 => 1,
        _ => 2,
    }
}

/// Canonical project status for a column
pub fn column_status(column: usize) -> Option<&'static str> {
    PROJECT_STATUSES.get(column).copied()
}

/// Priority that places a todo in the given column
pub fn column_priority(column: usize) -> Option<u8> {
    (column < COLUMN_COUNT).then_some(column as u8)
}
