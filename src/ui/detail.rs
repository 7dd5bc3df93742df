use crate::app::omdb::MovieDetails;
use crate::app::{App, DetailsView, PosterState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

use super::ui::spinner_char;

/// Renders the details overlay on top of everything else. Only drawn when
/// a payload has been fetched; the backdrop click and Esc handling key off
/// the areas recorded here.
pub fn render_detail_overlay(frame: &mut Frame, app: &mut App) {
    if app.details.is_none() {
        return;
    }

    let area = centered_rect(frame.area(), 84, 88);
    frame.render_widget(Clear, area);

    let close = Rect::new(area.right().saturating_sub(6), area.y, 5, 1).intersection(area);

    let Some(view) = app.details.as_mut() else {
        return;
    };

    let outer_block = Block::default()
        .title(format!(" {} ", view.movie.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer_block.inner(area);
    frame.render_widget(outer_block, area);
    frame.render_widget(
        Paragraph::new(Span::styled("[ ✕ ]", Style::default().fg(Color::Gray))),
        close,
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(inner);

    render_poster_section(frame, chunks[0], view);
    render_info_section(frame, chunks[1], &view.movie);

    app.areas.overlay = area;
    app.areas.overlay_close = close;
}

/// Renders the poster column: spinner while downloading, the decoded image
/// once it arrived, a placeholder otherwise.
fn render_poster_section(frame: &mut Frame, area: Rect, view: &mut DetailsView) {
    let poster_block = Block::default().borders(Borders::ALL).title("Poster");
    let inner = poster_block.inner(area);
    frame.render_widget(poster_block, area);

    match &mut view.poster {
        PosterState::Loading => {
            let loading_text = vec![
                Line::from(""),
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} Downloading poster...", spinner_char()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
            ];
            frame.render_widget(
                Paragraph::new(loading_text).alignment(Alignment::Center),
                inner,
            );
        }
        PosterState::Ready(protocol) => {
            let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));
            frame.render_stateful_widget(image, inner, protocol);
        }
        PosterState::Missing => {
            let placeholder_text = vec![
                Line::from(""),
                Line::from(""),
                Line::from(Span::styled(
                    "No poster available",
                    Style::default().fg(Color::Gray),
                )),
            ];
            frame.render_widget(
                Paragraph::new(placeholder_text).alignment(Alignment::Center),
                inner,
            );
        }
    }
}

fn render_info_section(frame: &mut Frame, area: Rect, movie: &MovieDetails) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Headline
            Constraint::Min(5),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_headline(frame, chunks[0], movie);
    render_content(frame, chunks[1], movie);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Press (Esc) or (b) to close, (q) to quit",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}

fn render_headline(frame: &mut Frame, area: Rect, movie: &MovieDetails) {
    let mut meta = vec![
        Span::styled(
            format!(" {} ", movie.kind.label()),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw(" "),
        Span::styled(movie.year.clone(), Style::default().fg(Color::Cyan)),
    ];
    if let Some(rated) = &movie.rated {
        meta.push(Span::raw(" | "));
        meta.push(Span::styled(rated.clone(), Style::default().fg(Color::White)));
    }
    if let Some(runtime) = &movie.runtime {
        meta.push(Span::raw(" | "));
        meta.push(Span::styled(runtime.clone(), Style::default().fg(Color::White)));
    }

    let mut headline = vec![Line::from(meta)];
    if let Some(rating) = movie.imdb_rating {
        let mut spans = vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{rating:.1}/10"),
                Style::default()
                    .fg(rating_color(rating))
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(votes) = movie.imdb_votes {
            spans.push(Span::styled(
                format!(" ({votes} votes)"),
                Style::default().fg(Color::Gray),
            ));
        }
        headline.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(headline), area);
}

fn render_content(frame: &mut Frame, area: Rect, movie: &MovieDetails) {
    let mut content = vec![];

    if let Some(plot) = &movie.plot {
        content.push(Line::from(Span::styled(
            "Plot:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        content.push(Line::from(Span::styled(
            plot.clone(),
            Style::default().fg(Color::White),
        )));
        content.push(Line::from(""));
    }

    push_field(&mut content, "Director", &movie.director);
    push_field(&mut content, "Writer", &movie.writer);
    push_field(&mut content, "Cast", &movie.actors);
    push_field(&mut content, "Genre", &movie.genre);
    push_field(&mut content, "Released", &movie.released);
    content.push(Line::from(""));

    if movie.metascore.is_some() || !movie.ratings.is_empty() {
        content.push(Line::from(Span::styled(
            "Ratings:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        if let Some(metascore) = movie.metascore {
            content.push(Line::from(vec![
                Span::raw("  Metascore: "),
                Span::styled(
                    metascore.to_string(),
                    Style::default()
                        .fg(metascore_color(metascore))
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        for rating in &movie.ratings {
            content.push(Line::from(vec![
                Span::raw(format!("  {}: ", rating.source)),
                Span::styled(rating.value.clone(), Style::default().fg(Color::Yellow)),
            ]));
        }
        content.push(Line::from(""));
    }

    if let Some(awards) = &movie.awards {
        content.push(Line::from(vec![
            Span::styled(
                "Awards: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(awards.clone(), Style::default().fg(Color::Yellow)),
        ]));
    }
    push_field(&mut content, "Box Office", &movie.box_office);
    push_field(&mut content, "Production", &movie.production);
    push_field(&mut content, "Website", &movie.website);

    let mut origin = vec![];
    if let Some(language) = &movie.language {
        origin.push(Span::styled("Language: ", Style::default().fg(Color::Gray)));
        origin.push(Span::styled(language.clone(), Style::default().fg(Color::White)));
    }
    if let Some(country) = &movie.country {
        if !origin.is_empty() {
            origin.push(Span::raw(" | "));
        }
        origin.push(Span::styled("Country: ", Style::default().fg(Color::Gray)));
        origin.push(Span::styled(country.clone(), Style::default().fg(Color::White)));
    }
    if !origin.is_empty() {
        content.push(Line::from(origin));
    }

    frame.render_widget(Paragraph::new(content).wrap(Wrap { trim: true }), area);
}

fn push_field(content: &mut Vec<Line>, label: &str, value: &Option<String>) {
    if let Some(value) = value {
        content.push(Line::from(vec![
            Span::styled(
                format!("{label}: "),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(value.clone(), Style::default().fg(Color::White)),
        ]));
    }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Helper function to get color based on IMDb rating
fn rating_color(rating: f32) -> Color {
    if rating >= 7.0 {
        Color::Green
    } else if rating >= 5.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Helper function to get color based on Metascore
fn metascore_color(score: u8) -> Color {
    if score >= 70 {
        Color::Green
    } else if score >= 50 {
        Color::Yellow
    } else {
        Color::Red
    }
}
