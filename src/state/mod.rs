//! Application state module

mod app_state;
mod board;
mod classify;
mod entity;
mod forms;
mod reconcile;

pub use app_state::*;
pub use board::Board;
pub use classify::*;
pub use entity::*;
pub use forms::*;
pub use reconcile::Reconciled;

#[cfg(test)]
pub(crate) use board::test_support;
#[cfg(test)]
pub(crate) use entity::fixtures;
