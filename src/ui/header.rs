use crate::app::{App, Focus};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const THEME_BUTTON_WIDTH: u16 = 16;
const TITLE_WIDTH: u16 = 16;

/// Renders the title, the search input with its character counter, and the theme button.
pub fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.theme.palette();
    let [title_area, input_area, theme_area] = Layout::horizontal([
        Constraint::Length(TITLE_WIDTH),
        Constraint::Min(10),
        Constraint::Length(THEME_BUTTON_WIDTH),
    ])
    .areas(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "Movie Search",
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, title_area);

    let focused = app.focus == Focus::Search && !app.modal_visible();
    let border_color = if focused { palette.accent } else { palette.muted };
    let counter = format!(" {} chars ", app.search_term.chars().count());
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Search (Enter) ")
        .title_top(Line::from(counter).right_aligned());

    let input_inner = input_block.inner(input_area);
    let input = Paragraph::new(Line::from(Span::styled(
        app.search_term.as_str(),
        Style::default().fg(palette.text),
    )))
    .block(input_block);
    frame.render_widget(input, input_area);

    if focused {
        let typed = Span::raw(app.search_term.as_str()).width() as u16;
        let x = input_inner
            .x
            .saturating_add(typed)
            .min(input_inner.right().saturating_sub(1));
        frame.set_cursor_position((x, input_inner.y));
    }

    let theme_button = Paragraph::new(Line::from(Span::styled(
        format!("[Theme: {}]", app.theme.label()),
        Style::default().fg(palette.button).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(theme_button, theme_area);

    app.bindings.search_input = input_area;
    app.bindings.theme_button = theme_area;
}
