#[allow(clippy::module_inception)]
mod app;
pub mod bindings;
pub mod omdb;
pub mod search;
pub mod watchlist;

pub use app::{App, DetailState, PosterState};

#[cfg(test)]
pub(crate) use app::tests as test_support;

use image::DynamicImage;

use crate::error::Result;
use omdb::{MovieDetail, SearchOutcome};

/// Results sent back from background fetch threads.
///
/// All requests share one channel and are applied in arrival order, so
/// the last response to land is the one on screen.
pub enum FetchMessage {
    Search {
        query: String,
        outcome: Result<SearchOutcome>,
    },
    Detail {
        imdb_id: String,
        result: Result<MovieDetail>,
    },
    Poster {
        imdb_id: String,
        result: Result<DynamicImage>,
    },
}

/// Which panel receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Results,
    Watchlist,
}
