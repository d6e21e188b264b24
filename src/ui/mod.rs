//! UI module for rendering the TUI

mod board;
mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::{FormState, View};
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = layout::create_layout(frame.area());

    layout::draw_title(frame, chunks.title, app);
    layout::draw_help(frame, chunks.help, app);

    // Draw main content based on current view
    match app.state.current_view {
        View::Loading => draw_placeholder(frame, chunks.body, "Loading projects…"),
        View::Projects => match &app.state.projects {
            Some(board) => board::draw(frame, chunks.body, board),
            None => draw_placeholder(frame, chunks.body, "Loading projects…"),
        },
        View::Todos => match &app.state.todos {
            Some(board) => board::draw(frame, chunks.body, board),
            None => draw_placeholder(frame, chunks.body, "Loading todos…"),
        },
        View::Error => {
            let message = app.state.error.as_deref().unwrap_or("Unknown error");
            components::render_error_dialog(frame, message, app.keymap());
        }
    }

    match &app.state.form {
        FormState::None => {}
        FormState::Project(form) => forms::draw_project_form(frame, form),
        FormState::Todo(form) => forms::draw_todo_form(frame, form),
    }

    layout::draw_status_bar(frame, chunks.status, app);
}

fn draw_placeholder(frame: &mut Frame, area: ratatui::layout::Rect, text: &str) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Blue))
        .alignment(Alignment::Center);
    let area = components::centered(area, area.width, 1);
    frame.render_widget(paragraph, area);
}
