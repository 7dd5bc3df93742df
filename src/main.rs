mod app;
use app::App;

mod ui;

use std::error::Error;
use std::fs::File;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::Position;
use ratatui::prelude::{Backend, CrosstermBackend};
use ratatui_image::picker::Picker;
use tracing_subscriber::EnvFilter;

use crate::app::config::Config;
use crate::app::{FetchRequest, Menu};

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    // setup terminal
    enable_raw_mode()?;
    let picker = Picker::from_query_stdio().ok();

    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let mut app = App::new(Config::from_env(), picker);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Logging goes to a file under the user state directory, and only when
/// RUST_LOG asks for it; writing to the terminal would corrupt the UI.
fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_default_env() else {
        return;
    };
    let Some(dir) = dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|d| d.join("cinesearch"))
    else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("cinesearch.log")) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // Apply completions from the background fetch threads
        loop {
            let message = match app.receiver.try_recv() {
                Ok(message) => message,
                Err(_) => break,
            };
            if let Some(follow_up) = app.apply_message(message) {
                app.dispatch(follow_up);
            }
        }

        // Poll for events with a timeout to allow UI updates
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == event::KeyEventKind::Release {
                        // Skip events that are not KeyEventKind::Press
                        continue;
                    }
                    if handle_key(app, key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }
    }
}

/// Routes a key press by interaction mode. Returns true to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // The search input captures everything while editing
    if app.editing {
        match key.code {
            KeyCode::Char(c) => {
                app.input.push(c);
            }
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Enter => {
                if let Some(request) = app.submit_query() {
                    app.dispatch(request);
                }
            }
            KeyCode::Esc => {
                app.editing = false;
            }
            _ => {}
        }
        return false;
    }

    // An open dropdown owns navigation; any other key counts as an
    // outside interaction and closes it
    if app.menu.is_some() {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.menu_next(),
            KeyCode::Up | KeyCode::Char('k') => app.menu_previous(),
            KeyCode::Enter => {
                if let Some(request) = app.choose_selected_menu_entry() {
                    app.dispatch(request);
                }
            }
            KeyCode::Esc => app.close_menu(),
            KeyCode::Char('q') => return true,
            _ => app.close_menu(),
        }
        return false;
    }

    // The overlay routes everything away from the main panel while open
    if app.details.is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.close_overlay(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') | KeyCode::Char('s') => {
            if !app.loading() {
                app.editing = true;
            }
        }
        KeyCode::Char('t') => {
            if !app.loading() {
                app.toggle_menu(Menu::Type);
            }
        }
        KeyCode::Char('y') => {
            if !app.loading() {
                app.toggle_menu(Menu::Year);
            }
        }
        KeyCode::Char('x') | KeyCode::Esc => app.dismiss_error(),
        KeyCode::Down | KeyCode::Char('j') => app.card_below(),
        KeyCode::Up | KeyCode::Char('k') => app.card_above(),
        KeyCode::Right | KeyCode::Char('l') => app.next_card(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_card(),
        KeyCode::Enter => {
            if let Some(request) = app.select_current() {
                app.dispatch(request);
            }
        }
        KeyCode::Char('n') => {
            if let Some(request) = app.next_page() {
                app.dispatch(request);
            }
        }
        KeyCode::Char('p') => {
            if let Some(request) = app.previous_page() {
                app.dispatch(request);
            }
        }
        _ => {}
    }
    false
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    let position = Position::new(mouse.column, mouse.row);
    if let Some(request) = handle_click(app, position) {
        app.dispatch(request);
    }
}

/// Hit-tests a click against the regions recorded by the last draw.
fn handle_click(app: &mut App, position: Position) -> Option<FetchRequest> {
    // The overlay owns all interaction while open; a click on the close
    // control or the backdrop (anywhere outside the panel) closes it
    if app.details.is_some() {
        if app.areas.overlay_close.contains(position) || !app.areas.overlay.contains(position) {
            app.close_overlay();
        }
        return None;
    }

    // A click inside an open dropdown picks an entry; anywhere else is an
    // outside interaction that closes it
    if let Some(menu) = app.menu {
        if app.areas.menu.contains(position) {
            let inner = app.areas.menu_inner;
            if inner.contains(position) {
                let index = app.areas.menu_offset + (position.y - inner.y) as usize;
                if index < app.menu_len() {
                    return app.choose_menu_entry(index);
                }
            }
            return None;
        }
        app.close_menu();
        let owner = match menu {
            Menu::Type => app.areas.type_button,
            Menu::Year => app.areas.year_button,
        };
        if owner.contains(position) {
            // Clicking the open menu's own button just toggles it closed
            return None;
        }
        // Fall through: the outside click may hit another control
    }

    if app.areas.banner.contains(position) {
        app.dismiss_error();
        return None;
    }

    if app.editing && !app.areas.search.contains(position) {
        app.editing = false;
    }

    // Input controls are disabled while a search is in flight
    if app.loading() {
        return None;
    }

    if app.areas.search.contains(position) {
        app.editing = true;
        return None;
    }
    if app.areas.type_button.contains(position) {
        app.toggle_menu(Menu::Type);
        return None;
    }
    if app.areas.year_button.contains(position) {
        app.toggle_menu(Menu::Year);
        return None;
    }
    if let Some((_, index)) = app
        .areas
        .cards
        .iter()
        .find(|(rect, _)| rect.contains(position))
        .copied()
    {
        return app.select_card(index);
    }
    if app.areas.prev.contains(position) {
        return app.previous_page();
    }
    if app.areas.next.contains(position) {
        return app.next_page();
    }
    if let Some((_, number)) = app
        .areas
        .pages
        .iter()
        .find(|(rect, _)| rect.contains(position))
        .copied()
    {
        return app.change_page(number);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::filters::TypeFilter;
    use crate::app::omdb::{MediaKind, MovieDetails};
    use crate::app::{DetailsView, Phase, PosterState};
    use ratatui::crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn test_app() -> App {
        App::new(
            Config {
                api_key: "testkey".to_string(),
                base_url: "http://127.0.0.1:1/".to_string(),
            },
            None,
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn open_overlay(app: &mut App) {
        app.details = Some(DetailsView {
            movie: MovieDetails {
                imdb_id: "tt0468569".to_string(),
                title: "The Dark Knight".to_string(),
                year: "2008".to_string(),
                kind: MediaKind::Movie,
                poster: None,
                rated: None,
                released: None,
                runtime: None,
                genre: None,
                director: None,
                writer: None,
                actors: None,
                plot: None,
                language: None,
                country: None,
                awards: None,
                ratings: Vec::new(),
                metascore: None,
                imdb_rating: None,
                imdb_votes: None,
                dvd: None,
                box_office: None,
                production: None,
                website: None,
            },
            poster: PosterState::Missing,
        });
    }

    #[test]
    fn editing_captures_keystrokes_until_escape() {
        let mut app = test_app();
        app.editing = true;

        assert!(!handle_key(&mut app, key(KeyCode::Char('q'))));
        assert!(!handle_key(&mut app, key(KeyCode::Char('t'))));
        assert_eq!(app.input, "qt", "ordinary keys type, never quit or route");
        assert_eq!(app.menu, None);

        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.input, "q");

        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.editing);
    }

    #[test]
    fn any_outside_key_closes_an_open_menu() {
        let mut app = test_app();
        app.toggle_menu(Menu::Type);

        handle_key(&mut app, key(KeyCode::Char('z')));
        assert_eq!(app.menu, None);
    }

    #[test]
    fn menu_keys_navigate_and_apply() {
        let mut app = test_app();
        app.toggle_menu(Menu::Type);

        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.type_filter, TypeFilter::Movie);
        assert_eq!(app.menu, None);
    }

    #[test]
    fn overlay_routes_keys_away_from_the_main_panel() {
        let mut app = test_app();
        open_overlay(&mut app);

        assert!(!handle_key(&mut app, key(KeyCode::Char('t'))));
        assert_eq!(app.menu, None, "menus stay closed behind the overlay");
        assert!(app.details.is_some());

        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.details.is_none());
    }

    #[test]
    fn quit_works_from_every_mode_except_editing() {
        let mut app = test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));

        app.toggle_menu(Menu::Year);
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));

        app.menu = None;
        open_overlay(&mut app);
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));
    }

    #[test]
    fn loading_disables_search_and_filter_keys() {
        let mut app = test_app();
        app.phase = Phase::Loading;

        handle_key(&mut app, key(KeyCode::Char('/')));
        assert!(!app.editing);
        handle_key(&mut app, key(KeyCode::Char('t')));
        handle_key(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.menu, None);
    }

    #[test]
    fn backdrop_click_closes_the_overlay_but_panel_clicks_do_not() {
        let mut app = test_app();
        open_overlay(&mut app);
        app.areas.overlay = Rect::new(10, 5, 60, 20);
        app.areas.overlay_close = Rect::new(64, 5, 5, 1);

        assert!(handle_click(&mut app, Position::new(20, 10)).is_none());
        assert!(app.details.is_some(), "clicks inside the panel keep it open");

        let _ = handle_click(&mut app, Position::new(0, 0));
        assert!(app.details.is_none(), "backdrop click closes");

        open_overlay(&mut app);
        let _ = handle_click(&mut app, Position::new(65, 5));
        assert!(app.details.is_none(), "close control closes");
    }

    #[test]
    fn outside_click_closes_the_menu_and_still_hits_other_controls() {
        let mut app = test_app();
        app.toggle_menu(Menu::Type);
        app.areas.type_button = Rect::new(0, 3, 24, 3);
        app.areas.year_button = Rect::new(24, 3, 24, 3);
        app.areas.menu = Rect::new(0, 6, 24, 8);

        let _ = handle_click(&mut app, Position::new(30, 4));
        assert_eq!(
            app.menu,
            Some(Menu::Year),
            "the closing click falls through to the year button"
        );
    }

    #[test]
    fn clicking_a_menu_entry_applies_it() {
        let mut app = test_app();
        app.toggle_menu(Menu::Type);
        app.areas.menu = Rect::new(0, 6, 24, 8);
        app.areas.menu_inner = Rect::new(1, 7, 22, 6);
        app.areas.menu_offset = 0;

        // Second row of the list: TypeFilter::Movie.
        assert!(handle_click(&mut app, Position::new(2, 8)).is_none());
        assert_eq!(app.type_filter, TypeFilter::Movie);
        assert_eq!(app.menu, None);
    }

    #[test]
    fn banner_click_dismisses_even_while_loading() {
        let mut app = test_app();
        app.phase = Phase::Loading;
        app.error = Some("Movie not found!".to_string());
        app.areas.banner = Rect::new(0, 9, 80, 3);

        let _ = handle_click(&mut app, Position::new(5, 10));
        assert!(app.error.is_none());
    }

    #[test]
    fn loading_disables_the_clickable_controls() {
        let mut app = test_app();
        app.phase = Phase::Loading;
        app.areas.search = Rect::new(0, 3, 80, 3);
        app.areas.type_button = Rect::new(0, 6, 24, 3);

        let _ = handle_click(&mut app, Position::new(2, 4));
        assert!(!app.editing);
        let _ = handle_click(&mut app, Position::new(2, 7));
        assert_eq!(app.menu, None);
    }

    #[test]
    fn clicking_outside_the_search_bar_stops_editing() {
        let mut app = test_app();
        app.editing = true;
        app.areas.search = Rect::new(0, 3, 80, 3);

        let _ = handle_click(&mut app, Position::new(5, 20));
        assert!(!app.editing);
    }
}
