//! Form domain layer
//!
//! Type-safe form handling for the project form and the todo input line.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{Form, FormMode, FormOutcome, FormState, ProjectForm, TodoForm};
