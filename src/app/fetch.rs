use std::sync::mpsc;
use std::thread;

use tracing::warn;

use crate::app::filters::{TypeFilter, YearFilter};
use crate::app::omdb::{MovieDetails, OmdbClient, OmdbError, SearchPage};

/// A network operation the controller has decided to issue. Each request
/// carries the sequence number it was issued under so the completion can be
/// matched against the state that is current by then.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Search(SearchRequest),
    Details(DetailsRequest),
    Poster(PosterRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub kind: TypeFilter,
    pub year: YearFilter,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsRequest {
    pub imdb_id: String,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosterRequest {
    pub url: String,
    pub seq: u64,
}

/// Completion of a background fetch, delivered over the app channel.
pub enum FetchMessage {
    Search {
        seq: u64,
        outcome: Result<SearchPage, OmdbError>,
    },
    Details {
        seq: u64,
        outcome: Result<MovieDetails, OmdbError>,
    },
    Poster {
        seq: u64,
        outcome: Option<image::DynamicImage>,
    },
}

/// Runs one request on its own thread and reports back over the channel.
/// There is no cancellation; superseded completions are discarded by the
/// controller via their sequence tag.
pub fn dispatch(client: &OmdbClient, sender: &mpsc::Sender<FetchMessage>, request: FetchRequest) {
    let client = client.clone();
    let sender = sender.clone();

    thread::spawn(move || {
        let message = match request {
            FetchRequest::Search(req) => FetchMessage::Search {
                seq: req.seq,
                outcome: client.search(&req.query, req.page, req.kind, &req.year),
            },
            FetchRequest::Details(req) => FetchMessage::Details {
                seq: req.seq,
                outcome: client.details(&req.imdb_id),
            },
            FetchRequest::Poster(req) => FetchMessage::Poster {
                seq: req.seq,
                outcome: match client.fetch_poster(&req.url) {
                    Ok(image) => Some(image),
                    Err(err) => {
                        warn!(url = %req.url, error = %err, "poster download failed");
                        None
                    }
                },
            },
        };

        // The receiver is gone only when the app is shutting down.
        let _ = sender.send(message);
    });
}
