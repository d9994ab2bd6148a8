use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
};

use super::footer::render_footer;
use super::header::render_header;
use super::main_content::render_main_content;
use super::movie_detail::render_movie_detail;
use super::watchlist::render_watchlist;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    // Regions are re-recorded every frame for mouse hit-testing.
    app.bindings.reset();

    let palette = app.theme.palette();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(3),
    ])
    .areas(area);

    let [results_area, watchlist_area] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
            .areas(body_area);

    render_header(frame, app, header_area);
    render_main_content(frame, app, results_area);
    render_watchlist(frame, app, watchlist_area);
    render_footer(frame, app, footer_area);

    if app.modal_visible() {
        render_movie_detail(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{MockApi, batman_results, detail_for};
    use crate::app::omdb::SearchOutcome;
    use crate::app::{FetchMessage, Focus};
    use crate::ui::main_content::{PLACEHOLDER_MARKER, POSTER_MARKER};
    use crate::app::search::{FETCH_ERROR_MESSAGE, NO_RESULTS_MESSAGE};
    use crate::theme::ThemeMode;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app_with_results() -> App {
        let mut app = App::new(Arc::new(MockApi::batman()), None);
        app.search_term = "batman".to_string();
        app.handle_message(FetchMessage::Search {
            query: "batman".to_string(),
            outcome: Ok(SearchOutcome::Found(batman_results())),
        });
        app.focus = Focus::Results;
        app
    }

    #[test]
    fn idle_screen_shows_counter_and_theme() {
        let mut app = App::new(Arc::new(MockApi::batman()), None);
        app.search_term = "alien".to_string();
        let screen = draw(&mut app);
        assert!(screen.contains("5 chars"));
        assert!(screen.contains("[Theme: dark]"));
        assert!(screen.contains("Welcome!"));
        assert!(!screen.contains("Available Movies"));
    }

    #[test]
    fn results_render_one_card_per_summary() {
        let mut app = app_with_results();
        let screen = draw(&mut app);

        assert!(screen.contains("Available Movies (2)"));
        assert!(screen.contains("Batman Begins"));
        assert!(screen.contains("2005"));
        assert!(screen.contains("1989"));
        assert_eq!(screen.matches(POSTER_MARKER).count(), 1);
        assert_eq!(screen.matches(PLACEHOLDER_MARKER).count(), 1);
        assert!(!screen.contains("Welcome!"));
        assert_eq!(app.bindings.cards.len(), 2);
    }

    #[test]
    fn clicking_a_card_button_adds_to_the_watchlist_panel() {
        let mut app = app_with_results();
        draw(&mut app);

        let button = app.bindings.cards[0].add_button;
        app.handle_click(button.x, button.y);
        assert_eq!(app.watchlist.titles(), ["Batman Begins"]);
        assert!(!app.modal_visible());

        let screen = draw(&mut app);
        assert!(screen.contains("Watchlist (1)"));
        assert!(screen.contains("[Remove] Batman Begins"));
        assert_eq!(app.bindings.watchlist_remove.len(), 1);

        let (_, remove) = app.bindings.watchlist_remove[0];
        app.handle_click(remove.x, remove.y);
        assert!(app.watchlist.is_empty());
    }

    #[test]
    fn clear_button_empties_the_watchlist() {
        let mut app = app_with_results();
        app.watchlist.add("Heat");
        app.watchlist.add("Heat");
        draw(&mut app);

        let clear = app.bindings.clear_button;
        app.handle_click(clear.x, clear.y);
        assert!(app.watchlist.is_empty());
        assert!(draw(&mut app).contains("Your watchlist is empty."));
    }

    #[test]
    fn negative_and_failed_searches_hide_the_heading() {
        let mut app = App::new(Arc::new(MockApi::batman()), None);
        app.handle_message(FetchMessage::Search {
            query: "zzz".to_string(),
            outcome: Ok(SearchOutcome::NotFound(Some("Movie not found!".to_string()))),
        });
        let screen = draw(&mut app);
        assert!(screen.contains(NO_RESULTS_MESSAGE));
        assert!(screen.contains("Movie not found!"));
        assert!(!screen.contains("Available Movies"));

        app.handle_message(FetchMessage::Search {
            query: "zzz".to_string(),
            outcome: Err(crate::error::AppError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            )),
        });
        let screen = draw(&mut app);
        assert!(screen.contains(FETCH_ERROR_MESSAGE));
        assert!(!screen.contains("Available Movies"));
    }

    #[test]
    fn modal_shows_detail_and_closes_on_outside_click() {
        let mut app = app_with_results();
        app.handle_message(FetchMessage::Detail {
            imdb_id: "tt0372784".to_string(),
            result: Ok(detail_for("tt0372784")),
        });
        let screen = draw(&mut app);
        assert!(screen.contains("Title of tt0372784"));
        assert!(screen.contains("Christian Bale"));
        assert!(screen.contains("8.2"));

        let modal = app.bindings.modal.expect("modal drawn");
        let add = modal.add_button.expect("add button drawn");
        app.handle_click(add.x, add.y);
        assert_eq!(app.watchlist.titles(), ["Title of tt0372784"]);
        assert!(app.modal_visible());

        app.handle_click(0, 0);
        assert!(!app.modal_visible());
        draw(&mut app);
        assert!(app.bindings.modal.is_none());
    }

    #[test]
    fn modal_close_button_closes() {
        let mut app = app_with_results();
        app.handle_message(FetchMessage::Detail {
            imdb_id: "tt0096895".to_string(),
            result: Err(crate::error::AppError::NotFound("Incorrect IMDb ID.".to_string())),
        });
        let screen = draw(&mut app);
        assert!(screen.contains("Failed to fetch movie details"));
        assert!(screen.contains("Incorrect IMDb ID."));

        let close = app.bindings.modal.expect("modal drawn").close_button;
        app.handle_click(close.x, close.y);
        assert!(!app.modal_visible());
    }

    #[test]
    fn theme_button_toggles() {
        let mut app = App::new(Arc::new(MockApi::batman()), None);
        draw(&mut app);
        let theme = app.bindings.theme_button;
        app.handle_click(theme.x + 2, theme.y + 1);
        assert_eq!(app.theme, ThemeMode::Light);
        assert!(draw(&mut app).contains("[Theme: light]"));
    }
}
