//! Project create/edit overlay

use super::field_renderer::{draw_field, draw_help_text};
use crate::state::{Form, ProjectForm};
use crate::ui::components::centered;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

pub fn draw_project_form(frame: &mut Frame, form: &ProjectForm) {
    let field_count = form.field_count() as u16;
    // Fields, error line, help line, margins and borders
    let height = field_count * FIELD_HEIGHT + 2 + 4;
    let area = centered(frame.area(), 64, height);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = (0..field_count)
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(1)); // Error
    constraints.push(Constraint::Length(1)); // Help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (idx, chunk) in chunks.iter().take(form.field_count()).enumerate() {
        if let Some(field) = form.get_field(idx) {
            draw_field(frame, *chunk, field, idx == form.active_field());
        }
    }

    if let Some(error) = &form.error {
        let error = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(error, chunks[form.field_count()]);
    }

    draw_help_text(
        frame,
        chunks[form.field_count() + 1],
        &[
            ("Tab", "next"),
            ("Shift+Tab", "previous"),
            ("←/→", "status"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ],
    );
}
