use std::sync::{Arc, mpsc};
use std::thread;

use chrono::{DateTime, Local};
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use throbber_widgets_tui::ThrobberState;

use crate::app::bindings::{ClickTarget, ViewBindings};
use crate::app::omdb::{MovieApi, MovieDetail};
use crate::app::search::SearchState;
use crate::app::watchlist::Watchlist;
use crate::app::{FetchMessage, Focus};
use crate::theme::ThemeMode;

/// The detail modal. Anything other than `Hidden` means the modal is open.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Hidden,
    Loaded {
        imdb_id: String,
        detail: Box<MovieDetail>,
    },
    Failed {
        imdb_id: String,
        cause: String,
    },
}

pub enum PosterState {
    None,
    Loading,
    Ready(Box<StatefulProtocol>),
    Unavailable,
}

pub struct App {
    api: Arc<dyn MovieApi>,
    sender: mpsc::Sender<FetchMessage>,
    receiver: mpsc::Receiver<FetchMessage>,
    pub picker: Option<Picker>,
    pub focus: Focus,
    pub search_term: String,
    pub search: SearchState,
    pub last_search_at: Option<DateTime<Local>>,
    pub selected_card: usize,
    pub watchlist: Watchlist,
    pub selected_entry: usize,
    pub theme: ThemeMode,
    pub detail: DetailState,
    pub poster: PosterState,
    pub bindings: ViewBindings,
    pub throbber_state: ThrobberState,
    pub exit: bool,
}

impl App {
    pub fn new(api: Arc<dyn MovieApi>, picker: Option<Picker>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            api,
            sender,
            receiver,
            picker,
            focus: Focus::Search,
            search_term: String::new(),
            search: SearchState::Idle,
            last_search_at: None,
            selected_card: 0,
            watchlist: Watchlist::new(),
            selected_entry: 0,
            theme: ThemeMode::Dark,
            detail: DetailState::Hidden,
            poster: PosterState::None,
            bindings: ViewBindings::default(),
            throbber_state: ThrobberState::default(),
            exit: false,
        }
    }

    fn spawn_fetch<F>(&self, job: F)
    where
        F: FnOnce(&dyn MovieApi) -> FetchMessage + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        thread::spawn(move || {
            // The receiver only goes away when the app is shutting down.
            let _ = sender.send(job(api.as_ref()));
        });
    }

    /// Searches for the current contents of the search input.
    ///
    /// In-flight searches are not cancelled; whichever answer arrives last
    /// replaces the results.
    pub fn submit_search(&mut self) {
        let query = self.search_term.clone();
        tracing::info!(query = %query, "searching");

        self.search = SearchState::Searching {
            query: query.clone(),
        };
        self.selected_card = 0;
        self.last_search_at = Some(Local::now());
        self.focus = Focus::Results;

        self.spawn_fetch(move |api| {
            let outcome = api.search(&query);
            FetchMessage::Search { query, outcome }
        });
    }

    /// Requests the full record for a result card. The modal opens when it arrives.
    pub fn open_detail(&mut self, card_index: usize) {
        let Some(card) = self.search.cards().get(card_index) else {
            return;
        };
        let imdb_id = card.imdb_id.clone();
        tracing::info!(imdb_id = %imdb_id, "requesting details");

        self.spawn_fetch(move |api| {
            let result = api.details(&imdb_id);
            FetchMessage::Detail { imdb_id, result }
        });
    }

    pub fn open_selected_detail(&mut self) {
        self.open_detail(self.selected_card);
    }

    pub fn add_card_to_watchlist(&mut self, card_index: usize) {
        if let Some(card) = self.search.cards().get(card_index) {
            self.watchlist.add(card.title.clone());
        }
    }

    pub fn add_selected_card_to_watchlist(&mut self) {
        self.add_card_to_watchlist(self.selected_card);
    }

    pub fn add_detail_to_watchlist(&mut self) {
        if let DetailState::Loaded { detail, .. } = &self.detail {
            self.watchlist.add(detail.title.clone());
        }
    }

    /// Removes the first watchlist entry with the same title as the entry at `index`.
    pub fn remove_watchlist_entry(&mut self, index: usize) {
        let Some(title) = self.watchlist.get(index).map(str::to_owned) else {
            return;
        };
        self.watchlist.remove(&title);
        self.clamp_entry_selection();
    }

    pub fn remove_selected_entry(&mut self) {
        self.remove_watchlist_entry(self.selected_entry);
    }

    pub fn clear_watchlist(&mut self) {
        self.watchlist.clear();
        self.selected_entry = 0;
    }

    fn clamp_entry_selection(&mut self) {
        self.selected_entry = self
            .selected_entry
            .min(self.watchlist.len().saturating_sub(1));
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = self.theme.label(), "theme toggled");
    }

    pub fn modal_visible(&self) -> bool {
        !matches!(self.detail, DetailState::Hidden)
    }

    pub fn close_modal(&mut self) {
        self.detail = DetailState::Hidden;
        self.poster = PosterState::None;
    }

    pub fn next_card(&mut self) {
        let count = self.search.cards().len();
        if count == 0 {
            return;
        }
        self.selected_card = (self.selected_card + 1) % count;
    }

    pub fn previous_card(&mut self) {
        let count = self.search.cards().len();
        if count == 0 {
            return;
        }
        self.selected_card = if self.selected_card == 0 {
            count - 1
        } else {
            self.selected_card - 1
        };
    }

    pub fn next_entry(&mut self) {
        let count = self.watchlist.len();
        if count == 0 {
            return;
        }
        self.selected_entry = (self.selected_entry + 1) % count;
    }

    pub fn previous_entry(&mut self) {
        let count = self.watchlist.len();
        if count == 0 {
            return;
        }
        self.selected_entry = if self.selected_entry == 0 {
            count - 1
        } else {
            self.selected_entry - 1
        };
    }

    pub fn on_tick(&mut self) {
        if matches!(self.search, SearchState::Searching { .. }) {
            self.throbber_state.calc_next();
        }
    }

    /// Applies every fetch result that has arrived since the last call.
    pub fn poll_fetches(&mut self) {
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_message(message);
        }
    }

    pub fn handle_message(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::Search { query, outcome } => {
                match &outcome {
                    Ok(_) => tracing::info!(query = %query, "search finished"),
                    Err(e) => tracing::error!(query = %query, error = %e, "search failed"),
                }
                self.search = SearchState::from_outcome(query, outcome);
                self.selected_card = 0;
            }
            FetchMessage::Detail { imdb_id, result } => match result {
                Ok(detail) => {
                    self.poster = PosterState::Unavailable;
                    if detail.has_poster() && self.picker.is_some() {
                        self.poster = PosterState::Loading;
                        let poster_url = detail.poster.clone();
                        let id = imdb_id.clone();
                        self.spawn_fetch(move |api| FetchMessage::Poster {
                            imdb_id: id,
                            result: api.poster(&poster_url),
                        });
                    }
                    self.detail = DetailState::Loaded {
                        imdb_id,
                        detail: Box::new(detail),
                    };
                }
                Err(e) => {
                    tracing::warn!(imdb_id = %imdb_id, error = %e, "detail request failed");
                    self.poster = PosterState::None;
                    self.detail = DetailState::Failed {
                        imdb_id,
                        cause: e.to_string(),
                    };
                }
            },
            FetchMessage::Poster { imdb_id, result } => {
                let showing = matches!(
                    &self.detail,
                    DetailState::Loaded { imdb_id: open, .. } if *open == imdb_id
                );
                if !showing {
                    tracing::debug!(imdb_id = %imdb_id, "dropping poster for closed modal");
                    return;
                }
                self.poster = match (result, self.picker.as_mut()) {
                    (Ok(image), Some(picker)) => {
                        PosterState::Ready(Box::new(picker.new_resize_protocol(image)))
                    }
                    (Ok(_), None) => PosterState::Unavailable,
                    (Err(e), _) => {
                        tracing::warn!(imdb_id = %imdb_id, error = %e, "poster download failed");
                        PosterState::Unavailable
                    }
                };
            }
        }
    }

    /// Routes a left click to whatever was drawn under it on the last frame.
    pub fn handle_click(&mut self, column: u16, row: u16) {
        let Some(target) = self.bindings.hit_test(column, row) else {
            return;
        };
        match target {
            ClickTarget::SearchInput => self.focus = Focus::Search,
            ClickTarget::ThemeButton => self.toggle_theme(),
            ClickTarget::Card(index) => {
                self.focus = Focus::Results;
                self.selected_card = index;
                self.open_detail(index);
            }
            ClickTarget::CardAdd(index) => {
                self.focus = Focus::Results;
                self.selected_card = index;
                self.add_card_to_watchlist(index);
            }
            ClickTarget::WatchlistRemove(index) => {
                self.focus = Focus::Watchlist;
                self.remove_watchlist_entry(index);
            }
            ClickTarget::ClearWatchlist => self.clear_watchlist(),
            ClickTarget::ModalClose | ClickTarget::ModalBackdrop => self.close_modal(),
            ClickTarget::ModalAdd => self.add_detail_to_watchlist(),
            ClickTarget::ModalBody => {}
        }
    }

    /// Blocks until one fetch result arrives and applies it.
    #[cfg(test)]
    pub fn wait_for_fetch(&mut self) -> bool {
        match self.receiver.recv_timeout(std::time::Duration::from_secs(5)) {
            Ok(message) => {
                self.handle_message(message);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::bindings::{CardRegion, ModalRegion};
    use crate::app::omdb::{MovieSummary, SearchOutcome};
    use crate::app::search::{FETCH_ERROR_MESSAGE, NO_RESULTS_MESSAGE};
    use crate::error::{AppError, Result};
    use image::DynamicImage;
    use ratatui::layout::Rect;

    type SearchFn = Box<dyn Fn(&str) -> Result<SearchOutcome> + Send + Sync>;
    type DetailFn = Box<dyn Fn(&str) -> Result<MovieDetail> + Send + Sync>;

    pub(crate) struct MockApi {
        search: SearchFn,
        details: DetailFn,
    }

    impl MockApi {
        pub(crate) fn new(search: SearchFn, details: DetailFn) -> Self {
            Self { search, details }
        }

        pub(crate) fn batman() -> Self {
            Self::new(
                Box::new(|_| Ok(SearchOutcome::Found(batman_results()))),
                Box::new(|id| Ok(detail_for(id))),
            )
        }
    }

    impl MovieApi for MockApi {
        fn search(&self, query: &str) -> Result<SearchOutcome> {
            (self.search)(query)
        }

        fn details(&self, imdb_id: &str) -> Result<MovieDetail> {
            (self.details)(imdb_id)
        }

        fn poster(&self, _poster_url: &str) -> Result<DynamicImage> {
            Err(AppError::NotFound("no posters in tests".to_string()))
        }
    }

    pub(crate) fn batman_results() -> Vec<MovieSummary> {
        vec![
            MovieSummary {
                title: "Batman Begins".to_string(),
                year: "2005".to_string(),
                imdb_id: "tt0372784".to_string(),
                poster: "https://img.example/begins.jpg".to_string(),
            },
            MovieSummary {
                title: "Batman".to_string(),
                year: "1989".to_string(),
                imdb_id: "tt0096895".to_string(),
                poster: "N/A".to_string(),
            },
        ]
    }

    pub(crate) fn detail_for(imdb_id: &str) -> MovieDetail {
        MovieDetail {
            title: format!("Title of {imdb_id}"),
            year: "2005".to_string(),
            genre: "Action".to_string(),
            runtime: "140 min".to_string(),
            director: "Christopher Nolan".to_string(),
            actors: "Christian Bale, Michael Caine".to_string(),
            plot: "A young Bruce Wayne travels to the Far East.".to_string(),
            imdb_rating: "8.2".to_string(),
            imdb_id: imdb_id.to_string(),
            poster: "N/A".to_string(),
        }
    }

    fn app_with(api: MockApi) -> App {
        App::new(Arc::new(api), None)
    }

    fn search_for(app: &mut App, query: &str) {
        app.search_term = query.to_string();
        app.submit_search();
        assert!(app.wait_for_fetch(), "search never answered");
    }

    #[test]
    fn starts_with_welcome_dark_theme_and_empty_watchlist() {
        let app = app_with(MockApi::batman());
        assert!(app.search.welcome_visible());
        assert!(!app.search.heading_visible());
        assert_eq!(app.theme, ThemeMode::Dark);
        assert!(app.watchlist.is_empty());
        assert!(!app.modal_visible());
    }

    #[test]
    fn submit_shows_searching_before_the_answer() {
        let mut app = app_with(MockApi::batman());
        app.search_term = "batman".to_string();
        app.submit_search();
        assert!(matches!(app.search, SearchState::Searching { .. }));
        assert!(!app.search.welcome_visible());
        assert!(!app.search.heading_visible());
        assert!(app.last_search_at.is_some());
    }

    #[test]
    fn batman_search_then_add_first_card() {
        let mut app = app_with(MockApi::batman());
        search_for(&mut app, "batman");

        assert_eq!(app.search.cards().len(), 2);
        assert!(app.search.heading_visible());
        assert!(!app.search.welcome_visible());

        app.add_card_to_watchlist(0);
        assert_eq!(app.watchlist.titles(), ["Batman Begins"]);
        assert!(!app.modal_visible());
    }

    #[test]
    fn repeated_searches_do_not_accumulate_cards() {
        let mut app = app_with(MockApi::batman());
        search_for(&mut app, "batman");
        app.selected_card = 1;
        search_for(&mut app, "batman");
        assert_eq!(app.search.cards().len(), 2);
        assert_eq!(app.selected_card, 0);
    }

    #[test]
    fn negative_response_shows_no_results() {
        let mut app = app_with(MockApi::new(
            Box::new(|_| Ok(SearchOutcome::NotFound(Some("Movie not found!".to_string())))),
            Box::new(|id| Ok(detail_for(id))),
        ));
        search_for(&mut app, "qwertyuiop");

        assert_eq!(app.search.status_message(), Some(NO_RESULTS_MESSAGE));
        assert!(!app.search.heading_visible());
        assert!(app.search.cards().is_empty());
    }

    #[test]
    fn network_failure_shows_generic_error() {
        let mut app = app_with(MockApi::new(
            Box::new(|_| {
                Err(AppError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )))
            }),
            Box::new(|id| Ok(detail_for(id))),
        ));
        search_for(&mut app, "heat");

        assert_eq!(app.search.status_message(), Some(FETCH_ERROR_MESSAGE));
        assert!(!app.search.heading_visible());
    }

    #[test]
    fn last_arriving_search_wins() {
        let mut app = app_with(MockApi::batman());
        app.handle_message(FetchMessage::Search {
            query: "second".to_string(),
            outcome: Ok(SearchOutcome::Found(batman_results())),
        });
        app.handle_message(FetchMessage::Search {
            query: "first".to_string(),
            outcome: Ok(SearchOutcome::NotFound(None)),
        });
        assert!(matches!(&app.search, SearchState::NoResults { query, .. } if query == "first"));
    }

    #[test]
    fn detail_opens_modal_and_adds_its_title() {
        let mut app = app_with(MockApi::batman());
        search_for(&mut app, "batman");

        app.open_detail(1);
        assert!(!app.modal_visible(), "no loading modal while the request is in flight");
        assert!(app.wait_for_fetch());
        assert!(app.modal_visible());

        app.add_detail_to_watchlist();
        assert_eq!(app.watchlist.titles(), ["Title of tt0096895"]);

        app.close_modal();
        assert!(!app.modal_visible());
    }

    #[test]
    fn detail_failure_is_visible() {
        let mut app = app_with(MockApi::new(
            Box::new(|_| Ok(SearchOutcome::Found(batman_results()))),
            Box::new(|_| Err(AppError::NotFound("Incorrect IMDb ID.".to_string()))),
        ));
        search_for(&mut app, "batman");
        app.open_detail(0);
        assert!(app.wait_for_fetch());

        assert!(app.modal_visible());
        assert_eq!(
            app.detail,
            DetailState::Failed {
                imdb_id: "tt0372784".to_string(),
                cause: "Incorrect IMDb ID.".to_string(),
            }
        );
        // Nothing to add from a failed detail.
        app.add_detail_to_watchlist();
        assert!(app.watchlist.is_empty());
    }

    #[test]
    fn late_poster_for_closed_modal_is_dropped() {
        let mut app = app_with(MockApi::batman());
        app.poster = PosterState::None;
        app.handle_message(FetchMessage::Poster {
            imdb_id: "tt0372784".to_string(),
            result: Err(AppError::NotFound("gone".to_string())),
        });
        assert!(matches!(app.poster, PosterState::None));
    }

    #[test]
    fn removing_an_entry_removes_the_first_matching_title() {
        let mut app = app_with(MockApi::batman());
        for title in ["Heat", "Alien", "Heat"] {
            app.watchlist.add(title);
        }
        app.selected_entry = 2;
        app.remove_selected_entry();
        assert_eq!(app.watchlist.titles(), ["Alien", "Heat"]);
        assert_eq!(app.selected_entry, 1);

        app.clear_watchlist();
        assert!(app.watchlist.is_empty());
        app.clear_watchlist();
        assert!(app.watchlist.is_empty());
    }

    #[test]
    fn selection_wraps_around() {
        let mut app = app_with(MockApi::batman());
        app.previous_card();
        assert_eq!(app.selected_card, 0);

        search_for(&mut app, "batman");
        app.previous_card();
        assert_eq!(app.selected_card, 1);
        app.next_card();
        assert_eq!(app.selected_card, 0);
    }

    #[test]
    fn theme_toggle_round_trips() {
        let mut app = app_with(MockApi::batman());
        app.toggle_theme();
        assert_eq!(app.theme, ThemeMode::Light);
        app.toggle_theme();
        assert_eq!(app.theme, ThemeMode::Dark);
    }

    #[test]
    fn clicks_route_through_bindings() {
        let mut app = app_with(MockApi::batman());
        search_for(&mut app, "batman");
        app.bindings.cards = vec![CardRegion {
            index: 0,
            card: Rect::new(0, 0, 40, 4),
            add_button: Rect::new(1, 2, 15, 1),
        }];

        app.handle_click(2, 2);
        assert_eq!(app.watchlist.titles(), ["Batman Begins"]);
        assert!(!app.modal_visible());

        app.handle_click(30, 1);
        assert!(app.wait_for_fetch());
        assert!(app.modal_visible());

        app.bindings.modal = Some(ModalRegion {
            body: Rect::new(5, 5, 20, 10),
            close_button: Rect::new(21, 5, 3, 1),
            add_button: None,
        });
        app.handle_click(10, 10);
        assert!(app.modal_visible(), "click inside the body keeps it open");
        app.handle_click(60, 1);
        assert!(!app.modal_visible(), "click outside closes it");
    }
}
