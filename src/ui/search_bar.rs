use crate::app::App;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::ui::spinner_char;

/// Renders the search input. Submission happens on Enter only; while a
/// search is in flight the bar is dimmed and shows a spinner instead of
/// accepting input.
pub fn render_search_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    app.areas.search = area;

    let border_style = if app.editing {
        Style::default().fg(Color::Yellow)
    } else if app.loading() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let search_block = Block::default()
        .title("Search")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = search_block.inner(area);

    let mut spans = Vec::new();
    if app.loading() {
        spans.push(Span::styled(
            format!("{} ", spinner_char()),
            Style::default().fg(Color::Cyan),
        ));
    }
    if app.input.is_empty() && !app.editing {
        spans.push(Span::styled(
            "Search for movies or series",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(app.input.clone()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(search_block), area);

    if app.editing && inner.width > 0 {
        let x = inner.x + (app.input.chars().count() as u16).min(inner.width - 1);
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}
