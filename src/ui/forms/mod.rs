//! Form rendering module
//!
//! - `field_renderer`: single field boxes
//! - `project_form`: project create/edit overlay
//! - `todo_form`: todo description input

mod field_renderer;
mod project_form;
mod todo_form;

pub use project_form::draw_project_form;
pub use todo_form::draw_todo_form;
