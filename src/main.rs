mod app;
mod config;
mod error;
mod logging;
mod theme;
mod ui;

use std::io::{self, Stderr};
use std::sync::Arc;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use ratatui_image::picker::Picker;

use crate::app::omdb::OmdbClient;
use crate::app::{App, Focus};
use crate::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {e}. Using default settings.");
        let mut config = Config::default();
        config.apply_overrides(
            std::env::var("OMDB_API_KEY").ok(),
            std::env::var("OMDB_ENDPOINT").ok(),
        );
        config
    });

    let _log_guard = match logging::init_logging(&config::log_dir(), config.log_filter.as_deref()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e}");
            None
        }
    };

    tracing::info!(endpoint = %config.endpoint, "starting");
    if config.api_key().is_none() {
        tracing::warn!("no OMDb API key configured, searches will fail");
    }

    let api = Arc::new(OmdbClient::new(
        config.endpoint.clone(),
        config.api_key().map(str::to_owned),
    ));

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let picker = match Picker::from_query_stdio() {
        Ok(picker) => picker,
        Err(e) => {
            tracing::warn!(error = %e, "terminal graphics query failed, using half blocks");
            Picker::halfblocks()
        }
    };

    // create app and run it
    let mut app = App::new(api, Some(picker));
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "exited with error");
    }
    tracing::info!("shutting down");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stderr>>, app: &mut App) -> anyhow::Result<()> {
    while !app.exit {
        terminal.draw(|f| ui::ui(f, app))?;

        // Apply whatever the fetch threads have finished
        app.poll_fetches();

        // Poll for events with a timeout to allow UI updates
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => handle_key(app, key),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    app.handle_click(mouse.column, mouse.row);
                }
                _ => {}
            }
        }

        app.on_tick();
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.exit = true;
        return;
    }

    if app.modal_visible() {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('x') => app.close_modal(),
            KeyCode::Char('a') => app.add_detail_to_watchlist(),
            KeyCode::Char('q') => app.exit = true,
            _ => {}
        }
        return;
    }

    match app.focus {
        Focus::Search => match key.code {
            KeyCode::Char(c) => {
                app.search_term.push(c);
            }
            KeyCode::Backspace => {
                app.search_term.pop();
            }
            KeyCode::Enter => app.submit_search(),
            KeyCode::Esc | KeyCode::Tab => app.focus = Focus::Results,
            _ => {}
        },
        Focus::Results => match key.code {
            KeyCode::Char('q') => app.exit = true,
            KeyCode::Char('/') | KeyCode::Char('i') => app.focus = Focus::Search,
            KeyCode::Tab => app.focus = Focus::Watchlist,
            KeyCode::Down | KeyCode::Char('j') => app.next_card(),
            KeyCode::Up | KeyCode::Char('k') => app.previous_card(),
            KeyCode::Enter => app.open_selected_detail(),
            KeyCode::Char('a') => app.add_selected_card_to_watchlist(),
            KeyCode::Char('t') => app.toggle_theme(),
            _ => {}
        },
        Focus::Watchlist => match key.code {
            KeyCode::Char('q') => app.exit = true,
            KeyCode::Char('/') | KeyCode::Tab => app.focus = Focus::Search,
            KeyCode::Down | KeyCode::Char('j') => app.next_entry(),
            KeyCode::Up | KeyCode::Char('k') => app.previous_entry(),
            KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_entry(),
            KeyCode::Char('c') => app.clear_watchlist(),
            KeyCode::Char('t') => app.toggle_theme(),
            _ => {}
        },
    }
}
