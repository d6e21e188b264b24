//! Reusable UI components

mod dialog;

pub use dialog::{centered, render_error_dialog};
