//! Layout components (title, help line, status bar)

use crate::app::App;
use crate::input::Action;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Screen regions, top to bottom
pub struct Chunks {
    pub title: Rect,
    pub help: Rect,
    pub body: Rect,
    pub status: Rect,
}

pub fn create_layout(area: Rect) -> Chunks {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Help
            Constraint::Min(0),    // Board
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    Chunks {
        title: chunks[0],
        help: chunks[1],
        body: chunks[2],
        status: chunks[3],
    }
}

pub fn draw_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " Projectarium",
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    )];

    let section = match app.state.current_view {
        View::Projects => Some("Projects".to_string()),
        View::Todos => app
            .state
            .open_project
            .as_ref()
            .map(|p| format!("{} todos", p.name)),
        View::Loading | View::Error => None,
    };
    if let Some(section) = section {
        spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(section, Style::default().fg(Color::White)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Key hints for the current view, labelled from the active key map
pub fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let keymap = app.keymap();
    let mut spans = vec![Span::raw(" ")];
    for (idx, (action, label)) in view_hints(app.state.current_view).iter().enumerate() {
        let keys = keymap.hint(*action);
        if keys.is_empty() {
            continue;
        }
        if idx > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(keys, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {label}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn view_hints(view: View) -> &'static [(Action, &'static str)] {
    match view {
        View::Projects => &[
            (Action::Left, "columns"),
            (Action::Up, "up"),
            (Action::Down, "down"),
            (Action::Progress, "progress"),
            (Action::Regress, "regress"),
            (Action::RaisePriority, "priority"),
            (Action::Open, "todos"),
            (Action::New, "new"),
            (Action::Edit, "edit"),
            (Action::CopyPath, "copy path"),
            (Action::Refresh, "refresh"),
            (Action::Quit, "quit"),
        ],
        View::Todos => &[
            (Action::Left, "columns"),
            (Action::Up, "up"),
            (Action::Down, "down"),
            (Action::Progress, "progress"),
            (Action::Regress, "regress"),
            (Action::New, "add"),
            (Action::Edit, "edit"),
            (Action::Delete, "delete"),
            (Action::Back, "back"),
            (Action::Quit, "quit"),
        ],
        View::Error => &[(Action::Refresh, "retry"), (Action::Quit, "quit")],
        View::Loading => &[(Action::Quit, "quit")],
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let mut spans = vec![];

    // Request activity
    if state.pending_requests > 0 {
        spans.push(Span::styled(" ● ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!("{} in flight", state.pending_requests)));
    } else {
        spans.push(Span::styled(" ● ", Style::default().fg(Color::Green)));
        spans.push(Span::raw("idle"));
    }

    if let Some(at) = state.last_refresh {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("updated {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ));
    }

    if let Some(msg) = &state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
