use chrono::{Datelike, Local};

/// Narrows a search to one OMDb media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Movie,
    Series,
    Episode,
}

impl TypeFilter {
    pub const OPTIONS: [TypeFilter; 4] = [
        TypeFilter::All,
        TypeFilter::Movie,
        TypeFilter::Series,
        TypeFilter::Episode,
    ];

    /// Value for the `type` query parameter; `All` sends nothing.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Movie => Some("movie"),
            TypeFilter::Series => Some("series"),
            TypeFilter::Episode => Some("episode"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeFilter::All => "All Types",
            TypeFilter::Movie => "Movie",
            TypeFilter::Series => "Series",
            TypeFilter::Episode => "Episode",
        }
    }
}

/// Narrows a search to one release year.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(String),
}

impl YearFilter {
    /// Value for the `y` query parameter; `All` sends nothing.
    pub fn query_value(&self) -> Option<&str> {
        match self {
            YearFilter::All => None,
            YearFilter::Year(y) => Some(y),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            YearFilter::All => "All Years",
            YearFilter::Year(y) => y,
        }
    }
}

/// "All Years" plus the current year down through the previous 29.
pub fn year_options() -> Vec<YearFilter> {
    year_options_from(Local::now().year())
}

fn year_options_from(current_year: i32) -> Vec<YearFilter> {
    let mut options = vec![YearFilter::All];
    options.extend((0..30).map(|offset| YearFilter::Year((current_year - offset).to_string())));
    options
}
