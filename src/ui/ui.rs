use crate::app::{App, HitAreas};
use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::detail::render_detail_overlay;
use super::filters::{render_filter_row, render_open_menu};
use super::footer::render_footer;
use super::grid::render_grid;
use super::header::render_header;
use super::pagination::render_pagination;
use super::search_bar::render_search_bar;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    // Hit areas are rebuilt from scratch on every draw; anything not
    // rendered this frame is not clickable.
    app.areas = HitAreas::default();

    let banner_height = if app.error.is_some() { 3 } else { 0 };
    let pagination_height = if app.total_pages() > 1 { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                 // Header
            Constraint::Length(3),                 // Search bar
            Constraint::Length(3),                 // Filter buttons
            Constraint::Length(banner_height),     // Error banner
            Constraint::Min(1),                    // Content
            Constraint::Length(pagination_height), // Pagination
            Constraint::Length(3),                 // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_search_bar(frame, app, chunks[1]);
    render_filter_row(frame, app, chunks[2]);
    render_banner(frame, app, chunks[3]);
    render_grid(frame, app, chunks[4]);
    render_pagination(frame, app, chunks[5]);
    render_footer(frame, app, chunks[6]);

    // Popups last so they draw on top of the main layout
    render_open_menu(frame, app);
    render_detail_overlay(frame, app);
}

/// Renders the dismissible error banner for failed fetches
fn render_banner(frame: &mut Frame, app: &mut App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let Some(message) = &app.error else {
        return;
    };

    let banner_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Line::from(vec![
        Span::styled(
            message.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("(x) dismiss", Style::default().fg(Color::Gray)),
    ]);

    frame.render_widget(
        Paragraph::new(text)
            .block(banner_block)
            .alignment(Alignment::Center),
        area,
    );
    app.areas.banner = area;
}

/// Spinner frame keyed off the wall clock; the event loop redraws every
/// 100ms while a fetch is outstanding, which advances it.
pub(super) fn spinner_char() -> char {
    const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
    let idx = (Utc::now().timestamp_millis() / 100) as usize % SPINNER.len();
    SPINNER[idx]
}
