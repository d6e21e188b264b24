//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use crate::input::{Action, KeyMap};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the error view: message plus retry and quit keys
pub fn render_error_dialog(frame: &mut Frame, error_message: &str, keymap: &KeyMap) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Press "),
        Span::styled(keymap.hint(Action::Refresh), key_style),
        Span::raw(" to retry, "),
        Span::styled(keymap.hint(Action::Quit), key_style),
        Span::raw(" to quit"),
    ];
    let message = format!("Error: {error_message}");

    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            title_color: Color::Red,
            border_color: Color::Red,
            message: &message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
