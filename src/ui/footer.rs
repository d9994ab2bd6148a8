use crate::app::search::SearchState;
use crate::app::{App, Focus};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> &'static str {
    if app.modal_visible() {
        return "(a) add to watchlist, (Esc/b) close, (q) quit";
    }
    match app.focus {
        Focus::Search => "(Enter) search, (Tab) results, (Esc) leave input",
        Focus::Results => {
            if app.search.cards().is_empty() {
                "(/) search, (Tab) watchlist, (t) theme, (q) quit"
            } else {
                "(↑↓/jk) move, (Enter) details, (a) add, (/) search, (Tab) watchlist, (t) theme, (q) quit"
            }
        }
        Focus::Watchlist => "(↑↓/jk) move, (d) remove, (c) clear, (Tab) search, (t) theme, (q) quit",
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.theme.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [hint_area, status_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(44)]).areas(inner);

    let hints = Paragraph::new(Text::styled(
        get_instruction_text(app),
        Style::default().fg(palette.muted),
    ));
    frame.render_widget(hints, hint_area);

    if let Some(at) = app.last_search_at {
        let label = match app.search {
            SearchState::Searching { .. } => "searching since",
            _ => "last search",
        };
        let status = Paragraph::new(
            Line::styled(
                format!(
                    "{label} \"{}\" {}",
                    app.search.query().unwrap_or_default(),
                    at.format("%H:%M:%S")
                ),
                Style::default().fg(palette.muted),
            )
            .right_aligned(),
        );
        frame.render_widget(status, status_area);
    }
}
