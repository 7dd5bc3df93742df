use std::sync::mpsc;

use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use crate::app::config::Config;
use crate::app::fetch::{
    self, DetailsRequest, FetchMessage, FetchRequest, PosterRequest, SearchRequest,
};
use crate::app::filters::{self, TypeFilter, YearFilter};
use crate::app::omdb::{MovieDetails, MovieSummary, OmdbClient, OmdbError, SearchPage};
use crate::app::pagination;

pub const GRID_COLUMNS: usize = 5;

const SEARCH_FAILED: &str = "Failed to fetch movies. Please try again.";
const DETAILS_FAILED: &str = "Failed to load movie details. Please try again.";

/// What the main panel is showing. One variant at a time, so impossible
/// combinations like "loading and ready" cannot be represented.
pub enum Phase {
    /// No query submitted yet.
    Idle,
    /// A search is in flight; the grid shows skeleton cards.
    Loading,
    Ready {
        movies: Vec<MovieSummary>,
        total_results: u32,
    },
    /// A query is active but produced nothing (or its results were cleared
    /// by a failed search).
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Type,
    Year,
}

pub enum PosterState {
    Loading,
    Ready(StatefulProtocol),
    Missing,
}

/// The open details overlay: the fetched payload plus the poster that is
/// downloaded for it. Dropped wholesale when the overlay closes.
pub struct DetailsView {
    pub movie: MovieDetails,
    pub poster: PosterState,
}

/// Clickable regions recorded by the render pass, consumed by mouse
/// handling on the next event. Zero-sized rects never match.
#[derive(Debug, Default, Clone)]
pub struct HitAreas {
    pub search: Rect,
    pub type_button: Rect,
    pub year_button: Rect,
    pub menu: Rect,
    pub menu_inner: Rect,
    pub menu_offset: usize,
    pub cards: Vec<(Rect, usize)>,
    pub pages: Vec<(Rect, u32)>,
    pub prev: Rect,
    pub next: Rect,
    pub banner: Rect,
    pub overlay: Rect,
    pub overlay_close: Rect,
}

pub struct App {
    pub config: Config,
    client: OmdbClient,
    sender: mpsc::Sender<FetchMessage>,
    pub receiver: mpsc::Receiver<FetchMessage>,
    pub picker: Option<Picker>,

    /// Text being typed in the search bar; becomes `query` on submit.
    pub input: String,
    pub editing: bool,
    /// The submitted query every fetch is issued for.
    pub query: String,
    pub type_filter: TypeFilter,
    pub year_filter: YearFilter,
    pub year_options: Vec<YearFilter>,
    pub page: u32,
    pub phase: Phase,
    /// Dismissible error banner. Search failures set it alongside clearing
    /// the results; details failures set it without touching them.
    pub error: Option<String>,
    pub selected: usize,
    pub menu: Option<Menu>,
    pub menu_state: ListState,
    pub details: Option<DetailsView>,
    pub details_pending: bool,
    pub areas: HitAreas,

    search_seq: u64,
    details_seq: u64,
}

impl App {
    pub fn new(config: Config, picker: Option<Picker>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let client = OmdbClient::new(&config);

        Self {
            config,
            client,
            sender,
            receiver,
            picker,
            input: String::new(),
            editing: false,
            query: String::new(),
            type_filter: TypeFilter::default(),
            year_filter: YearFilter::default(),
            year_options: filters::year_options(),
            page: 1,
            phase: Phase::Idle,
            error: None,
            selected: 0,
            menu: None,
            menu_state: ListState::default(),
            details: None,
            details_pending: false,
            areas: HitAreas::default(),
            search_seq: 0,
            details_seq: 0,
        }
    }

    /// Runs a request on a background thread; its completion arrives
    /// through `receiver` and is applied with [`App::apply_message`].
    pub fn dispatch(&self, request: FetchRequest) {
        fetch::dispatch(&self.client, &self.sender, request);
    }

    pub fn loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn movies(&self) -> &[MovieSummary] {
        match &self.phase {
            Phase::Ready { movies, .. } => movies,
            _ => &[],
        }
    }

    pub fn total_pages(&self) -> u32 {
        match &self.phase {
            Phase::Ready { total_results, .. } => pagination::total_pages(*total_results),
            _ => 0,
        }
    }

    // --- search bar ---

    /// Submits the edit buffer. Blank or whitespace-only text never issues
    /// a request and leaves all state untouched.
    pub fn submit_query(&mut self) -> Option<FetchRequest> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.editing = false;
        self.query = trimmed.to_string();
        self.begin_search(1)
    }

    // --- filters ---

    pub fn toggle_menu(&mut self, menu: Menu) {
        if self.menu == Some(menu) {
            self.menu = None;
            return;
        }
        let current = match menu {
            Menu::Type => TypeFilter::OPTIONS
                .iter()
                .position(|o| *o == self.type_filter)
                .unwrap_or(0),
            Menu::Year => self
                .year_options
                .iter()
                .position(|o| *o == self.year_filter)
                .unwrap_or(0),
        };
        self.menu = Some(menu);
        self.menu_state = ListState::default();
        self.menu_state.select(Some(current));
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    pub fn menu_len(&self) -> usize {
        match self.menu {
            Some(Menu::Type) => TypeFilter::OPTIONS.len(),
            Some(Menu::Year) => self.year_options.len(),
            None => 0,
        }
    }

    pub fn menu_next(&mut self) {
        let len = self.menu_len();
        if len == 0 {
            return;
        }
        let next = match self.menu_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.menu_state.select(Some(next));
    }

    pub fn menu_previous(&mut self) {
        let len = self.menu_len();
        if len == 0 {
            return;
        }
        let previous = match self.menu_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.menu_state.select(Some(previous));
    }

    pub fn choose_menu_entry(&mut self, index: usize) -> Option<FetchRequest> {
        match self.menu {
            Some(Menu::Type) => {
                let filter = *TypeFilter::OPTIONS.get(index)?;
                self.set_type_filter(filter)
            }
            Some(Menu::Year) => {
                let filter = self.year_options.get(index)?.clone();
                self.set_year_filter(filter)
            }
            None => None,
        }
    }

    pub fn choose_selected_menu_entry(&mut self) -> Option<FetchRequest> {
        let index = self.menu_state.selected()?;
        self.choose_menu_entry(index)
    }

    /// Records the filter and, when a query is active, re-issues the search
    /// from page 1.
    pub fn set_type_filter(&mut self, filter: TypeFilter) -> Option<FetchRequest> {
        self.type_filter = filter;
        self.menu = None;
        self.page = 1;
        if self.has_query() {
            self.begin_search(1)
        } else {
            None
        }
    }

    pub fn set_year_filter(&mut self, filter: YearFilter) -> Option<FetchRequest> {
        self.year_filter = filter;
        self.menu = None;
        self.page = 1;
        if self.has_query() {
            self.begin_search(1)
        } else {
            None
        }
    }

    // --- pagination ---

    pub fn change_page(&mut self, page: u32) -> Option<FetchRequest> {
        if !self.has_query() || page == self.page {
            return None;
        }
        if page < 1 || page > self.total_pages() {
            return None;
        }
        self.begin_search(page)
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        self.change_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        if self.page <= 1 {
            return None;
        }
        self.change_page(self.page - 1)
    }

    // --- grid ---

    pub fn next_card(&mut self) {
        let count = self.movies().len();
        if count == 0 {
            return;
        }
        self.selected = (self.selected + 1) % count;
    }

    pub fn previous_card(&mut self) {
        let count = self.movies().len();
        if count == 0 {
            return;
        }
        if self.selected == 0 {
            self.selected = count - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn card_below(&mut self) {
        let count = self.movies().len();
        let below = self.selected + GRID_COLUMNS;
        if below < count {
            self.selected = below;
        }
    }

    pub fn card_above(&mut self) {
        self.selected = self.selected.saturating_sub(GRID_COLUMNS);
    }

    // --- details overlay ---

    pub fn select_card(&mut self, index: usize) -> Option<FetchRequest> {
        let imdb_id = self.movies().get(index)?.imdb_id.clone();
        self.selected = index;
        self.details_seq += 1;
        self.details_pending = true;
        Some(FetchRequest::Details(DetailsRequest {
            imdb_id,
            seq: self.details_seq,
        }))
    }

    pub fn select_current(&mut self) -> Option<FetchRequest> {
        self.select_card(self.selected)
    }

    pub fn close_overlay(&mut self) {
        self.details = None;
        self.details_pending = false;
        // In-flight details or poster fetches for the closed view must not
        // reopen it.
        self.details_seq += 1;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // --- fetch completions ---

    /// Applies a completion message. May return a follow-up request (the
    /// poster download after a successful details fetch).
    pub fn apply_message(&mut self, message: FetchMessage) -> Option<FetchRequest> {
        match message {
            FetchMessage::Search { seq, outcome } => {
                self.apply_search(seq, outcome);
                None
            }
            FetchMessage::Details { seq, outcome } => self.apply_details(seq, outcome),
            FetchMessage::Poster { seq, outcome } => {
                self.apply_poster(seq, outcome);
                None
            }
        }
    }

    fn begin_search(&mut self, page: u32) -> Option<FetchRequest> {
        self.page = page;
        self.error = None;
        self.phase = Phase::Loading;
        self.menu = None;
        self.search_seq += 1;
        Some(FetchRequest::Search(SearchRequest {
            query: self.query.clone(),
            page,
            kind: self.type_filter,
            year: self.year_filter.clone(),
            seq: self.search_seq,
        }))
    }

    fn apply_search(&mut self, seq: u64, outcome: Result<SearchPage, OmdbError>) {
        if seq != self.search_seq {
            // Superseded by a newer request; the newer completion wins.
            return;
        }
        match outcome {
            Ok(page) if !page.movies.is_empty() => {
                let total_pages = pagination::total_pages(page.total_results).max(1);
                if self.page > total_pages {
                    self.page = total_pages;
                }
                self.selected = 0;
                self.phase = Phase::Ready {
                    movies: page.movies,
                    total_results: page.total_results,
                };
            }
            Ok(_) => self.phase = Phase::Empty,
            Err(err) => {
                self.phase = Phase::Empty;
                self.error = Some(search_error_text(&err));
            }
        }
    }

    fn apply_details(
        &mut self,
        seq: u64,
        outcome: Result<MovieDetails, OmdbError>,
    ) -> Option<FetchRequest> {
        if seq != self.details_seq {
            // Stale fetch, or the overlay was closed in the meantime.
            return None;
        }
        self.details_pending = false;
        match outcome {
            Ok(movie) => {
                let poster_url = movie.poster.clone();
                let poster = match (&poster_url, &self.picker) {
                    (Some(_), Some(_)) => PosterState::Loading,
                    _ => PosterState::Missing,
                };
                self.details = Some(DetailsView { movie, poster });
                match (poster_url, &self.picker) {
                    (Some(url), Some(_)) => Some(FetchRequest::Poster(PosterRequest { url, seq })),
                    _ => None,
                }
            }
            Err(err) => {
                // An already-open overlay keeps showing its payload.
                self.error = Some(details_error_text(&err));
                None
            }
        }
    }

    fn apply_poster(&mut self, seq: u64, outcome: Option<image::DynamicImage>) {
        if seq != self.details_seq {
            return;
        }
        let Some(view) = self.details.as_mut() else {
            return;
        };
        if !matches!(view.poster, PosterState::Loading) {
            return;
        }
        view.poster = match (outcome, self.picker.as_mut()) {
            (Some(image), Some(picker)) => PosterState::Ready(picker.new_resize_protocol(image)),
            _ => PosterState::Missing,
        };
    }
}

fn search_error_text(err: &OmdbError) -> String {
    match err {
        OmdbError::Upstream(reason) => reason.clone(),
        _ => SEARCH_FAILED.to_string(),
    }
}

fn details_error_text(err: &OmdbError) -> String {
    match err {
        OmdbError::Upstream(reason) => reason.clone(),
        _ => DETAILS_FAILED.to_string(),
    }
}
