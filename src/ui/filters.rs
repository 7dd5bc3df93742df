use crate::app::filters::TypeFilter;
use crate::app::{App, Menu};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

const MENU_MAX_HEIGHT: u16 = 14;

/// Renders the two filter buttons. The open dropdown itself is drawn last
/// by [`render_open_menu`] so it sits on top of the content.
pub fn render_filter_row(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Length(24),
            Constraint::Min(0),
        ])
        .split(area);

    render_filter_button(
        frame,
        chunks[0],
        "Type",
        app.type_filter.label(),
        app.menu == Some(Menu::Type),
        app.loading(),
    );
    render_filter_button(
        frame,
        chunks[1],
        "Year of Release",
        app.year_filter.label(),
        app.menu == Some(Menu::Year),
        app.loading(),
    );

    app.areas.type_button = chunks[0];
    app.areas.year_button = chunks[1];
}

fn render_filter_button(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    label: &str,
    open: bool,
    disabled: bool,
) {
    let border_style = if open {
        Style::default().fg(Color::Yellow)
    } else if disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let text_style = if disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let arrow = if open { "▴" } else { "▾" };
    let button = Paragraph::new(format!("{label} {arrow}"))
        .style(text_style)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    frame.render_widget(button, area);
}

/// Renders the open dropdown as a popup anchored under its button.
pub fn render_open_menu(frame: &mut Frame, app: &mut App) {
    let Some(menu) = app.menu else {
        return;
    };

    let (anchor, labels): (Rect, Vec<String>) = match menu {
        Menu::Type => (
            app.areas.type_button,
            TypeFilter::OPTIONS
                .iter()
                .map(|o| o.label().to_string())
                .collect(),
        ),
        Menu::Year => (
            app.areas.year_button,
            app.year_options.iter().map(|o| o.label().to_string()).collect(),
        ),
    };

    let screen = frame.area();
    let available = screen.height.saturating_sub(anchor.bottom());
    let height = (labels.len() as u16 + 2).min(MENU_MAX_HEIGHT).min(available);
    if height < 3 || anchor.width == 0 {
        return;
    }

    let popup = Rect::new(anchor.x, anchor.bottom(), anchor.width, height).intersection(screen);
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = labels.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, popup, &mut app.menu_state);

    app.areas.menu = popup;
    app.areas.menu_inner = popup.inner(Margin::new(1, 1));
    app.areas.menu_offset = app.menu_state.offset();
}
