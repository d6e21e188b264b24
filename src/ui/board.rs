//! Three-column kanban board

use crate::state::{Board, Entity, Project, Todo};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Column border colors, left to right
const COLUMN_COLORS: [Color; 3] = [Color::Blue, Color::Yellow, Color::Green];

/// Glyphs for todo priority 0..=3
const PRIORITY_MARKS: [&str; 4] = ["○", "◐", "◑", "●"];

/// Card border color by priority, ascending severity
fn priority_color(priority: u8) -> Color {
    match priority {
        0 => Color::DarkGray,
        1 => Color::Yellow,
        2 => Color::Indexed(214),
        _ => Color::Red,
    }
}

/// Draw a board into the body area
pub fn draw(frame: &mut Frame, area: Rect, board: &Board) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (idx, column_area) in columns.iter().enumerate() {
        draw_column(frame, *column_area, board, idx);
    }
}

fn draw_column(frame: &mut Frame, area: Rect, board: &Board, idx: usize) {
    let Some(column) = board.columns().get(idx) else {
        return;
    };
    let focused = idx == board.selected_column();
    let color = COLUMN_COLORS[idx % COLUMN_COLORS.len()];

    let title_style = if focused {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ({}) ", column.name, column.len()),
            title_style,
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if column.is_empty() {
        let empty = Paragraph::new(board.kind().empty_label())
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center);
        frame.render_widget(empty, Rect { height: 1, ..inner });
        return;
    }

    let range = board.visible_range(idx);
    let above = range.start;
    let below = column.len() - range.end;

    // Top line is kept for the "more above" indicator
    let mut y = inner.y;
    if above > 0 {
        draw_indicator(frame, inner, y, format!("↑ {above} more above"));
    }
    y += 1;

    let row_height = board.kind().row_height() as u16;
    let card_height = row_height.saturating_sub(1);
    let bottom = inner.y + inner.height;
    for index in range {
        // Leave the last line for the "more below" indicator
        if y + card_height > bottom.saturating_sub(1) {
            break;
        }
        let card = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: card_height,
        };
        let selected = focused && index == board.selected_index();
        match &column.members[index] {
            Entity::Project(project) => draw_project_card(frame, card, project, selected),
            Entity::Todo(todo) => draw_todo_card(frame, card, todo, selected),
        }
        y += row_height;
    }

    if below > 0 && inner.height > 1 {
        draw_indicator(frame, inner, bottom - 1, format!("↓ {below} more below"));
    }
}

fn draw_indicator(frame: &mut Frame, inner: Rect, y: u16, text: String) {
    let indicator = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(
        indicator,
        Rect {
            y,
            height: 1,
            ..inner
        },
    );
}

fn card_block(priority: u8, selected: bool) -> Block<'static> {
    let border_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(priority_color(priority))
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
}

/// Draw a project card: name and language, description, path
fn draw_project_card(frame: &mut Frame, area: Rect, project: &Project, selected: bool) {
    let block = card_block(project.priority, selected);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let language = project.language.as_str();
    let name_width = width.saturating_sub(language.chars().count() + 1);
    let name = truncate(&project.name, name_width);
    let gap = width.saturating_sub(name.chars().count() + language.chars().count());

    let name_style = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(name, name_style),
            Span::raw(" ".repeat(gap)),
            Span::styled(language, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(truncate(&project.description, width)),
        Line::from(Span::styled(
            truncate(&project.path, width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("P{}", project.priority),
            Style::default().fg(priority_color(project.priority)),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw a todo card: priority mark and description
fn draw_todo_card(frame: &mut Frame, area: Rect, todo: &Todo, selected: bool) {
    let block = card_block(todo.priority, selected);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mark = PRIORITY_MARKS[usize::from(todo.priority).min(PRIORITY_MARKS.len() - 1)];
    let style = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let line = Line::from(vec![
        Span::styled(mark, Style::default().fg(priority_color(todo.priority))),
        Span::raw(" "),
        Span::styled(
            truncate(&todo.description, (inner.width as usize).saturating_sub(2)),
            style,
        ),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Cut to `width` characters, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
