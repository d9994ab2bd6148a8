use crate::app::omdb::{MovieSummary, SearchOutcome};
use crate::error::AppError;

pub const SEARCHING_MESSAGE: &str = "Searching...";
pub const NO_RESULTS_MESSAGE: &str = "No movies found.";
pub const NO_RESULTS_HINT: &str = "Try a shorter title or check the spelling.";
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterArt {
    Url(String),
    Placeholder,
}

/// What a result card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    pub year: String,
    pub imdb_id: String,
    pub poster: PosterArt,
}

impl From<&MovieSummary> for ResultCard {
    fn from(movie: &MovieSummary) -> Self {
        let poster = if movie.has_poster() {
            PosterArt::Url(movie.poster.clone())
        } else {
            PosterArt::Placeholder
        };
        Self {
            title: movie.title.clone(),
            year: movie.year.clone(),
            imdb_id: movie.imdb_id.clone(),
            poster,
        }
    }
}

pub fn build_cards(movies: &[MovieSummary]) -> Vec<ResultCard> {
    movies.iter().map(ResultCard::from).collect()
}

/// State of the results area.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// Nothing searched yet; the welcome banner is showing.
    #[default]
    Idle,
    Searching { query: String },
    Results { query: String, cards: Vec<ResultCard> },
    NoResults { query: String, reason: Option<String> },
    Failed { query: String, cause: String, missing_key: bool },
}

impl SearchState {
    pub fn from_outcome(query: String, outcome: Result<SearchOutcome, AppError>) -> Self {
        match outcome {
            Ok(SearchOutcome::Found(movies)) => SearchState::Results {
                query,
                cards: build_cards(&movies),
            },
            Ok(SearchOutcome::NotFound(reason)) => SearchState::NoResults { query, reason },
            Err(err) => SearchState::Failed {
                query,
                missing_key: matches!(err, AppError::MissingApiKey),
                cause: err.to_string(),
            },
        }
    }

    /// The query behind the current state, once a search has been made.
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Idle => None,
            SearchState::Searching { query }
            | SearchState::Results { query, .. }
            | SearchState::NoResults { query, .. }
            | SearchState::Failed { query, .. } => Some(query),
        }
    }

    pub fn cards(&self) -> &[ResultCard] {
        match self {
            SearchState::Results { cards, .. } => cards,
            _ => &[],
        }
    }

    /// The "Available Movies" heading only shows above real results.
    pub fn heading_visible(&self) -> bool {
        matches!(self, SearchState::Results { .. })
    }

    pub fn welcome_visible(&self) -> bool {
        matches!(self, SearchState::Idle)
    }

    /// The text a user sees in place of cards, if any.
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            SearchState::Idle | SearchState::Results { .. } => None,
            SearchState::Searching { .. } => Some(SEARCHING_MESSAGE),
            SearchState::NoResults { .. } => Some(NO_RESULTS_MESSAGE),
            SearchState::Failed { .. } => Some(FETCH_ERROR_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str, poster: &str) -> MovieSummary {
        MovieSummary {
            title: title.to_string(),
            year: "1999".to_string(),
            imdb_id: format!("tt-{title}"),
            poster: poster.to_string(),
        }
    }

    #[test]
    fn one_card_per_summary_with_placeholder_for_missing_posters() {
        let movies = vec![
            summary("The Matrix", "https://img/matrix.jpg"),
            summary("eXistenZ", "N/A"),
            summary("Office Space", ""),
        ];
        let cards = build_cards(&movies);

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].poster, PosterArt::Url("https://img/matrix.jpg".to_string()));
        assert_eq!(cards[1].poster, PosterArt::Placeholder);
        assert_eq!(cards[2].poster, PosterArt::Placeholder);
        for (card, movie) in cards.iter().zip(&movies) {
            assert_eq!(card.title, movie.title);
            assert_eq!(card.year, movie.year);
        }
    }

    #[test]
    fn visibility_follows_state() {
        assert!(SearchState::Idle.welcome_visible());
        assert!(!SearchState::Idle.heading_visible());
        assert_eq!(SearchState::Idle.query(), None);

        let searching = SearchState::Searching { query: "x".into() };
        assert!(!searching.welcome_visible());
        assert!(!searching.heading_visible());
        assert_eq!(searching.status_message(), Some(SEARCHING_MESSAGE));

        let found = SearchState::from_outcome("x".into(), Ok(SearchOutcome::Found(vec![])));
        assert!(found.heading_visible());
        assert!(found.cards().is_empty());
        assert_eq!(found.query(), Some("x"));
    }

    #[test]
    fn failures_hide_the_heading() {
        let none = SearchState::from_outcome("zzz".into(), Ok(SearchOutcome::NotFound(None)));
        assert!(!none.heading_visible());
        assert_eq!(none.status_message(), Some(NO_RESULTS_MESSAGE));

        let failed = SearchState::from_outcome("zzz".into(), Err(AppError::MissingApiKey));
        assert!(!failed.heading_visible());
        assert_eq!(failed.status_message(), Some(FETCH_ERROR_MESSAGE));
        assert!(matches!(failed, SearchState::Failed { missing_key: true, .. }));
    }
}
