use crate::app::omdb::MovieSummary;
use crate::app::{App, GRID_COLUMNS, Phase};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_big_text::{BigText, PixelSize};

const GRID_ROWS: usize = 2;
const SKELETON_CARDS: usize = 10;

/// Renders the main content area: splash, skeleton, empty state or the
/// card grid, depending on the controller phase.
pub fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    if matches!(app.phase, Phase::Loading) {
        render_skeleton(frame, area);
    } else if matches!(app.phase, Phase::Idle) {
        render_splash(frame, app, area);
    } else if matches!(app.phase, Phase::Empty) {
        render_empty(frame, app, area);
    } else {
        render_cards(frame, app, area);
    }
}

/// One rect per card, row-major, five per row.
fn card_cells(area: Rect, count: usize) -> Vec<Rect> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut cells = Vec::with_capacity(GRID_COLUMNS * GRID_ROWS);
    for row in rows.iter() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row);
        cells.extend(columns.iter().copied());
    }
    cells.truncate(count);
    cells
}

fn render_cards(frame: &mut Frame, app: &mut App, area: Rect) {
    let cells = card_cells(area, app.movies().len());
    let mut cards = Vec::with_capacity(cells.len());

    for (index, (movie, cell)) in app.movies().iter().zip(cells).enumerate() {
        render_card(frame, cell, movie, index == app.selected);
        cards.push((cell, index));
    }

    app.areas.cards = cards;
}

fn render_card(frame: &mut Frame, area: Rect, movie: &MovieSummary, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let card_block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = card_block.inner(area);
    frame.render_widget(card_block, area);
    if inner.width == 0 || inner.height < 3 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Poster
            Constraint::Length(1), // Title
            Constraint::Length(1), // Kind and year
        ])
        .split(inner);

    render_poster_chip(frame, chunks[0], movie.poster.is_some());

    let title_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(movie.title.clone(), title_style)),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            movie.caption(),
            Style::default().fg(Color::Gray),
        )),
        chunks[2],
    );
}

/// Poster stand-in for the grid; the real image is only rendered in the
/// details overlay.
fn render_poster_chip(frame: &mut Frame, area: Rect, has_poster: bool) {
    if has_poster {
        let fill = "░".repeat(area.width as usize);
        let lines: Vec<Line> = (0..area.height).map(|_| Line::from(fill.clone())).collect();
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    } else {
        let mut lines = vec![Line::from(""); (area.height / 2) as usize];
        lines.push(Line::from(Span::styled(
            "No Image",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

/// Fixed set of placeholder cards shown while a search is in flight.
fn render_skeleton(frame: &mut Frame, area: Rect) {
    for cell in card_cells(area, SKELETON_CARDS) {
        let card_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = card_block.inner(cell);
        frame.render_widget(card_block, cell);
        if inner.width < 2 || inner.height < 3 {
            continue;
        }

        let mut lines: Vec<Line> = (0..inner.height.saturating_sub(2))
            .map(|_| Line::from("▒".repeat(inner.width as usize)))
            .collect();
        lines.push(Line::from("▬".repeat((inner.width / 2) as usize)));
        lines.push(Line::from("▬".repeat((inner.width / 3) as usize)));
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
    }
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let empty_block = Block::default().borders(Borders::ALL);

    // A failed search already explains itself in the banner.
    if app.error.is_some() {
        frame.render_widget(empty_block, area);
        return;
    }

    let empty_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No movies found for \"{}\"", app.query),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Try a different query or loosen the filters",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(empty_text)
            .block(empty_block)
            .alignment(Alignment::Center),
        area,
    );
}

/// Idle splash shown before the first query.
fn render_splash(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Big text
            Constraint::Min(5),    // Instructions
        ])
        .split(area);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .lines(vec!["CINEMA".into(), "SEARCH".into()])
        .alignment(Alignment::Center)
        .build();

    frame.render_widget(big_text, chunks[0]);

    let mut instructions = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Search for movies or series to get started",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "(/) focus the search box, (t)/(y) filters, (q) quit",
            Style::default().fg(Color::White),
        )),
    ];

    if !app.config.has_api_key() {
        instructions.push(Line::from(""));
        instructions.push(Line::from(Span::styled(
            "No OMDb API key set - searches will fail upstream",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        instructions.push(Line::from(Span::styled(
            "Get a free key at http://www.omdbapi.com/apikey.aspx and export OMDB_API_KEY",
            Style::default().fg(Color::White),
        )));
    }

    let instructions_block = Block::default().borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(instructions)
            .block(instructions_block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}
