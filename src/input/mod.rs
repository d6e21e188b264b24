//! Keyboard handling for the board screens

mod controller;
mod keymap;

pub use controller::{reload, Controller};
pub use keymap::{Action, KeyMap};
