use crate::app::App;
use crate::app::search::SEARCHING_MESSAGE;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, WhichUse};

/// Renders the spinner shown while a search is in flight.
pub fn render_searching(frame: &mut Frame, app: &mut App, area: Rect, query: &str) {
    let palette = app.theme.palette();
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [_, spinner_area, query_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let throbber = Throbber::default()
        .label(SEARCHING_MESSAGE)
        .style(Style::default().fg(palette.text))
        .throbber_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);
    frame.render_stateful_widget(throbber, spinner_area, &mut app.throbber_state);

    let query_line = Paragraph::new(Line::styled(
        format!("  \"{query}\""),
        Style::default().fg(palette.muted),
    ));
    frame.render_widget(query_line, query_area);
}
