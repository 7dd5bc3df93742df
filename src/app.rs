mod app;
pub mod config;
pub mod fetch;
pub mod filters;
pub mod omdb;
pub mod pagination;

pub use app::{App, DetailsView, HitAreas, Menu, Phase, PosterState, GRID_COLUMNS};
pub use fetch::{FetchMessage, FetchRequest};
