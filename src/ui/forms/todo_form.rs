//! Todo description input

use super::field_renderer::{draw_field, draw_help_text};
use crate::state::TodoForm;
use crate::ui::components::centered;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

pub fn draw_todo_form(frame: &mut Frame, form: &TodoForm) {
    let area = centered(frame.area(), 64, 7);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .margin(1)
        .split(area);

    draw_field(frame, chunks[0], &form.description, true);
    draw_help_text(frame, chunks[1], &[("Enter", "save"), ("Esc", "cancel")]);
}
