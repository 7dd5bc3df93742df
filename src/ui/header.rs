use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the header/title block at the top of the screen
pub fn render_header(frame: &mut Frame, area: Rect) {
    let title_block = Block::default().borders(Borders::ALL).style(Style::default());

    let title = Paragraph::new(Line::from(vec![
        Span::styled("◆ ", Style::default().fg(Color::Blue)),
        Span::styled(
            "CinemaSearch",
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(title_block);

    frame.render_widget(title, area);
}
