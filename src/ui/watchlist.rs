use crate::app::{App, Focus};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::main_content::scroll_offset;

pub const REMOVE_BUTTON_LABEL: &str = "[Remove]";
pub const CLEAR_BUTTON_LABEL: &str = "[Clear]";

/// Rebuilds the watchlist panel from the store.
pub fn render_watchlist(frame: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.theme.palette();
    let focused = app.focus == Focus::Watchlist;
    let border_color = if focused { palette.accent } else { palette.muted };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Line::from(Span::styled(
            format!(" Watchlist ({}) ", app.watchlist.len()),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [list_area, clear_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let mut remove_buttons = Vec::new();
    if app.watchlist.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "Your watchlist is empty.",
            Style::default().fg(palette.muted),
        )));
        frame.render_widget(empty, list_area);
    } else {
        let visible = list_area.height as usize;
        let offset = scroll_offset(app.selected_entry, visible);
        let button_width = REMOVE_BUTTON_LABEL.len() as u16;

        for (row, (index, title)) in app
            .watchlist
            .titles()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let row_area = Rect::new(list_area.x, list_area.y + row as u16, list_area.width, 1);
            let selected = focused && index == app.selected_entry;
            let row_style = if selected {
                Style::default().bg(palette.highlight_bg)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(REMOVE_BUTTON_LABEL, Style::default().fg(palette.error)),
                Span::raw(" "),
                Span::styled(title.as_str(), Style::default().fg(palette.text)),
            ]);
            frame.render_widget(Paragraph::new(line).style(row_style), row_area);

            remove_buttons.push((
                index,
                Rect::new(row_area.x, row_area.y, button_width.min(row_area.width), 1),
            ));
        }
    }

    let clear = Paragraph::new(Line::from(Span::styled(
        CLEAR_BUTTON_LABEL,
        Style::default().fg(palette.button).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(clear, clear_area);

    app.bindings.watchlist_remove = remove_buttons;
    app.bindings.clear_button = Rect::new(
        clear_area.x,
        clear_area.y,
        (CLEAR_BUTTON_LABEL.len() as u16).min(clear_area.width),
        clear_area.height.min(1),
    );
}
