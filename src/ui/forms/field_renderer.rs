//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a form field as a bordered box titled with its label
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let content = if field.is_selector() {
        // Selectors show their arrows only while focused
        let value = if is_active {
            format!("‹ {display_value} ›")
        } else {
            display_value
        };
        Line::from(Span::styled(value, style))
    } else {
        let value = if display_value.is_empty() && !is_active {
            "(empty)".to_string()
        } else {
            display_value
        };
        let cursor = if is_active { "▌" } else { "" };
        Line::from(vec![
            Span::styled(value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    };

    let label = if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };
    let block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Draw a help line like "Tab: next field  Esc: cancel"
pub fn draw_help_text(frame: &mut Frame, area: Rect, items: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (idx, (key, action)) in items.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
