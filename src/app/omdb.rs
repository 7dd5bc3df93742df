use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::app::config::Config;
use crate::app::filters::{TypeFilter, YearFilter};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum OmdbError {
    /// OMDb answered with `Response: "False"` and a reason string.
    #[error("{0}")]
    Upstream(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors that can occur while downloading a poster image.
#[derive(Debug, Error)]
pub enum PosterError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
    Other(String),
}

impl MediaKind {
    fn from_wire(raw: &str) -> Self {
        match raw {
            "movie" => MediaKind::Movie,
            "series" => MediaKind::Series,
            "episode" => MediaKind::Episode,
            other => MediaKind::Other(other.to_string()),
        }
    }

    /// Display form with the first letter capitalized, e.g. "Series".
    pub fn label(&self) -> String {
        match self {
            MediaKind::Movie => "Movie".to_string(),
            MediaKind::Series => "Series".to_string(),
            MediaKind::Episode => "Episode".to_string(),
            MediaKind::Other(raw) => {
                let mut chars = raw.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Minimal movie record returned by a search query.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub kind: MediaKind,
    pub poster: Option<String>,
}

impl MovieSummary {
    /// Card caption, e.g. "Movie, 2008".
    pub fn caption(&self) -> String {
        format!("{}, {}", self.kind.label(), self.year)
    }

    fn from_wire(wire: WireSummary) -> Self {
        Self {
            imdb_id: wire.imdb_id,
            title: wire.title,
            year: wire.year,
            kind: MediaKind::from_wire(&wire.kind),
            poster: present(wire.poster),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Full movie record fetched per-item on demand. Upstream sends every field
/// as a string with `"N/A"` standing in for absence; those become `None`
/// here and the numeric ones are parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub kind: MediaKind,
    pub poster: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub ratings: Vec<Rating>,
    pub metascore: Option<u8>,
    pub imdb_rating: Option<f32>,
    pub imdb_votes: Option<u64>,
    pub dvd: Option<String>,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub website: Option<String>,
}

impl MovieDetails {
    fn from_wire(wire: WireDetails) -> Self {
        Self {
            imdb_id: wire.imdb_id.unwrap_or_default(),
            title: wire.title.unwrap_or_default(),
            year: wire.year.unwrap_or_default(),
            kind: MediaKind::from_wire(wire.kind.as_deref().unwrap_or_default()),
            poster: present(wire.poster),
            rated: present(wire.rated),
            released: present(wire.released),
            runtime: present(wire.runtime),
            genre: present(wire.genre),
            director: present(wire.director),
            writer: present(wire.writer),
            actors: present(wire.actors),
            plot: present(wire.plot),
            language: present(wire.language),
            country: present(wire.country),
            awards: present(wire.awards),
            ratings: wire
                .ratings
                .into_iter()
                .map(|r| Rating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
            metascore: present(wire.metascore).and_then(|v| v.parse().ok()),
            imdb_rating: present(wire.imdb_rating).and_then(|v| v.parse().ok()),
            imdb_votes: parse_count(wire.imdb_votes),
            dvd: present(wire.dvd),
            box_office: present(wire.box_office),
            production: present(wire.production),
            website: present(wire.website),
        }
    }
}

/// One page of search results, in the order OMDb returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub movies: Vec<MovieSummary>,
    pub total_results: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchEnvelope {
    #[serde(default)]
    search: Vec<WireSummary>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    response: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSummary {
    title: String,
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireRating {
    source: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireDetails {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    rated: Option<String>,
    #[serde(default)]
    released: Option<String>,
    #[serde(default)]
    runtime: Option<String>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    director: Option<String>,
    #[serde(default)]
    writer: Option<String>,
    #[serde(default)]
    actors: Option<String>,
    #[serde(default)]
    plot: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    awards: Option<String>,
    #[serde(default)]
    poster: Option<String>,
    #[serde(default)]
    ratings: Vec<WireRating>,
    #[serde(default)]
    metascore: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default)]
    imdb_votes: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(rename = "Type", default)]
    kind: Option<String>,
    #[serde(rename = "DVD", default)]
    dvd: Option<String>,
    #[serde(default)]
    box_office: Option<String>,
    #[serde(default)]
    production: Option<String>,
    #[serde(default)]
    website: Option<String>,
    response: String,
    #[serde(default)]
    error: Option<String>,
}

/// OMDb API client. One GET per operation, no caching, no retries.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn search(
        &self,
        query: &str,
        page: u32,
        kind: TypeFilter,
        year: &YearFilter,
    ) -> Result<SearchPage, OmdbError> {
        let url = self.search_url(query, page, kind, year);
        debug!(%query, page, "searching OMDb");

        let body = self.http.get(&url).send()?.text()?;
        parse_search(&body)
    }

    pub fn details(&self, imdb_id: &str) -> Result<MovieDetails, OmdbError> {
        let url = self.details_url(imdb_id);
        debug!(%imdb_id, "fetching OMDb details");

        let body = self.http.get(&url).send()?.text()?;
        parse_details(&body)
    }

    /// Downloads and decodes a poster image for the details overlay.
    pub fn fetch_poster(&self, url: &str) -> Result<image::DynamicImage, PosterError> {
        debug!(%url, "downloading poster");

        let response = self.http.get(url).send()?;
        if !response.status().is_success() {
            return Err(PosterError::Status(response.status().as_u16()));
        }
        let bytes = response.bytes()?;
        Ok(image::load_from_memory(&bytes)?)
    }

    fn search_url(&self, query: &str, page: u32, kind: TypeFilter, year: &YearFilter) -> String {
        let mut url = format!(
            "{}?apikey={}&s={}&page={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(query),
            page
        );
        if let Some(kind) = kind.query_value() {
            url.push_str("&type=");
            url.push_str(kind);
        }
        if let Some(year) = year.query_value() {
            url.push_str("&y=");
            url.push_str(year);
        }
        url
    }

    fn details_url(&self, imdb_id: &str) -> String {
        format!(
            "{}?apikey={}&i={}&plot=full",
            self.base_url,
            self.api_key,
            urlencoding::encode(imdb_id)
        )
    }
}

fn parse_search(body: &str) -> Result<SearchPage, OmdbError> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    if envelope.response != "True" {
        return Err(OmdbError::Upstream(
            envelope
                .error
                .unwrap_or_else(|| "No movies found".to_string()),
        ));
    }

    Ok(SearchPage {
        movies: envelope
            .search
            .into_iter()
            .map(MovieSummary::from_wire)
            .collect(),
        total_results: present(envelope.total_results)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
    })
}

fn parse_details(body: &str) -> Result<MovieDetails, OmdbError> {
    let wire: WireDetails = serde_json::from_str(body)?;
    if wire.response != "True" {
        return Err(OmdbError::Upstream(
            wire.error
                .unwrap_or_else(|| "Failed to load movie details".to_string()),
        ));
    }
    Ok(MovieDetails::from_wire(wire))
}

/// Filters out the upstream "no value" sentinels.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && v != "N/A")
}

/// Vote counts arrive with thousands separators, e.g. "1,234,567".
fn parse_count(value: Option<String>) -> Option<u64> {
    present(value).and_then(|v| v.replace(',', "").parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OmdbClient {
        OmdbClient::new(&Config {
            api_key: "testkey".to_string(),
            base_url: "https://www.omdbapi.com/".to_string(),
        })
    }

    #[test]
    fn search_url_without_filters_sends_only_query_and_page() {
        let url = client().search_url("batman", 1, TypeFilter::All, &YearFilter::All);
        assert!(url.contains("s=batman&page=1"), "{url}");
        assert!(url.contains("apikey=testkey"));
        assert!(!url.contains("type="));
        assert!(!url.contains("&y="));
    }

    #[test]
    fn search_url_includes_active_filters() {
        let url = client().search_url(
            "dark knight",
            3,
            TypeFilter::Series,
            &YearFilter::Year("1999".to_string()),
        );
        assert!(url.contains("s=dark%20knight&page=3"), "{url}");
        assert!(url.contains("&type=series"));
        assert!(url.contains("&y=1999"));
    }

    #[test]
    fn details_url_requests_full_plot() {
        let url = client().details_url("tt0372784");
        assert!(url.contains("i=tt0372784"));
        assert!(url.contains("plot=full"));
    }

    #[test]
    fn parses_a_successful_search_page() {
        let body = r#"{
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784",
                 "Type": "movie", "Poster": "https://example.com/begins.jpg"},
                {"Title": "Batman: The Animated Series", "Year": "1992–1995",
                 "imdbID": "tt0103359", "Type": "series", "Poster": "N/A"}
            ],
            "totalResults": "523",
            "Response": "True"
        }"#;

        let page = parse_search(body).unwrap();
        assert_eq!(page.total_results, 523);
        assert_eq!(page.movies.len(), 2);
        assert_eq!(page.movies[0].title, "Batman Begins");
        assert_eq!(page.movies[0].kind, MediaKind::Movie);
        assert_eq!(
            page.movies[0].poster.as_deref(),
            Some("https://example.com/begins.jpg")
        );
        assert_eq!(page.movies[1].poster, None);
        assert_eq!(page.movies[1].caption(), "Series, 1992\u{2013}1995");
    }

    #[test]
    fn upstream_no_results_is_reported_with_its_reason() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        match parse_search(body) {
            Err(OmdbError::Upstream(reason)) => assert_eq!(reason, "Movie not found!"),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        assert!(matches!(
            parse_search("<html>502 Bad Gateway</html>"),
            Err(OmdbError::Decode(_))
        ));
    }

    #[test]
    fn unparseable_total_counts_as_zero() {
        let body = r#"{"Search": [], "totalResults": "lots", "Response": "True"}"#;
        let page = parse_search(body).unwrap();
        assert_eq!(page.total_results, 0);
        assert!(page.movies.is_empty());
    }

    #[test]
    fn parses_details_with_sentinels_and_numeric_strings() {
        let body = r#"{
            "Title": "The Dark Knight", "Year": "2008", "Rated": "PG-13",
            "Released": "18 Jul 2008", "Runtime": "152 min",
            "Genre": "Action, Crime, Drama", "Director": "Christopher Nolan",
            "Writer": "Jonathan Nolan, Christopher Nolan",
            "Actors": "Christian Bale, Heath Ledger",
            "Plot": "Batman raises the stakes in his war on crime.",
            "Language": "English", "Country": "United States",
            "Awards": "Won 2 Oscars.",
            "Poster": "https://example.com/tdk.jpg",
            "Ratings": [{"Source": "Internet Movie Database", "Value": "9.0/10"}],
            "Metascore": "84", "imdbRating": "9.0", "imdbVotes": "1,234,567",
            "imdbID": "tt0468569", "Type": "movie",
            "DVD": "N/A", "BoxOffice": "$534,987,076",
            "Production": "N/A", "Website": "N/A",
            "Response": "True"
        }"#;

        let details = parse_details(body).unwrap();
        assert_eq!(details.title, "The Dark Knight");
        assert_eq!(details.kind, MediaKind::Movie);
        assert_eq!(details.metascore, Some(84));
        assert_eq!(details.imdb_rating, Some(9.0));
        assert_eq!(details.imdb_votes, Some(1_234_567));
        assert_eq!(details.dvd, None);
        assert_eq!(details.website, None);
        assert_eq!(details.box_office.as_deref(), Some("$534,987,076"));
        assert_eq!(details.ratings.len(), 1);
        assert_eq!(details.ratings[0].source, "Internet Movie Database");
    }

    #[test]
    fn details_failure_carries_the_upstream_reason() {
        let body = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
        match parse_details(body) {
            Err(OmdbError::Upstream(reason)) => assert_eq!(reason, "Incorrect IMDb ID."),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_media_kinds_are_preserved_and_capitalized() {
        assert_eq!(MediaKind::from_wire("game").label(), "Game");
        assert_eq!(MediaKind::from_wire("movie"), MediaKind::Movie);
    }
}
