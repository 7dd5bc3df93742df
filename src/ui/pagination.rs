use crate::app::App;
use crate::app::pagination::page_window;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

const ARROW_WIDTH: u16 = 8;
const PAGE_WIDTH: u16 = 6;

/// Renders the sliding page-number window with prev/next arrows. Nothing
/// is drawn when there is a single page (the layout gives this a zero
/// height area in that case).
pub fn render_pagination(frame: &mut Frame, app: &mut App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let total = app.total_pages();
    if total <= 1 {
        return;
    }

    let window = page_window(app.page, total);
    let row_width = 2 * ARROW_WIDTH + window.len() as u16 * PAGE_WIDTH;
    let mut x = area.x + area.width.saturating_sub(row_width) / 2;

    let prev_enabled = app.page > 1;
    let prev_rect = button_rect(area, x, ARROW_WIDTH);
    render_button(frame, prev_rect, "◀ Prev", prev_enabled, false);
    app.areas.prev = if prev_enabled { prev_rect } else { Rect::default() };
    x += ARROW_WIDTH;

    let mut pages = Vec::with_capacity(window.len());
    for number in window {
        let rect = button_rect(area, x, PAGE_WIDTH);
        render_button(frame, rect, &number.to_string(), true, number == app.page);
        if number != app.page {
            pages.push((rect, number));
        }
        x += PAGE_WIDTH;
    }
    app.areas.pages = pages;

    let next_enabled = app.page < total;
    let next_rect = button_rect(area, x, ARROW_WIDTH);
    render_button(frame, next_rect, "Next ▶", next_enabled, false);
    app.areas.next = if next_enabled { next_rect } else { Rect::default() };
}

fn button_rect(area: Rect, x: u16, width: u16) -> Rect {
    Rect::new(x, area.y, width, area.height.min(3)).intersection(area)
}

fn render_button(frame: &mut Frame, area: Rect, label: &str, enabled: bool, current: bool) {
    if area.width == 0 {
        return;
    }

    let style = if current {
        Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else if enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if current {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let button = Paragraph::new(label.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));

    frame.render_widget(button, area);
}
