use crate::app::{App, Phase};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn instruction_text(app: &App) -> String {
    if app.editing {
        return "(Enter) to search, (Esc) to cancel".to_string();
    }
    if app.menu.is_some() {
        return "(↑↓/jk) choose, (Enter) apply, (Esc) close".to_string();
    }
    if app.details.is_some() {
        return "(Esc/b) close details, (q) quit".to_string();
    }
    if app.details_pending {
        return "Fetching details... (q) to quit".to_string();
    }

    match &app.phase {
        Phase::Loading => "Searching... (q) to quit".to_string(),
        Phase::Ready { total_results, .. } => format!(
            "{} results, page {}/{} | (↑↓←→/hjkl) move, (Enter) details, (n/p) page, (/) search, (t/y) filters, (q) quit",
            total_results,
            app.page,
            app.total_pages()
        ),
        _ => "(/) to search, (t) type filter, (y) year filter, (q) to quit".to_string(),
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default().borders(Borders::ALL).style(Style::default());

    let bottom = Paragraph::new(Text::styled(instruction_text(app), Style::default()))
        .block(bottom_block);

    frame.render_widget(bottom, area);
}
