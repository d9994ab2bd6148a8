use crate::app::bindings::CardRegion;
use crate::app::search::{NO_RESULTS_HINT, PosterArt, ResultCard, SearchState};
use crate::app::{App, Focus};
use crate::theme::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_big_text::{BigText, PixelSize};

use super::loading::render_searching;

pub const CARD_HEIGHT: u16 = 4;
pub const ADD_BUTTON_LABEL: &str = "[+ Watchlist]";
pub const POSTER_MARKER: &str = "▣ poster";
pub const PLACEHOLDER_MARKER: &str = "▢ no image";

/// Renders the results area for whatever state the last search left behind.
pub fn render_main_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let message = app.search.status_message().unwrap_or_default();
    match &app.search {
        SearchState::Idle => render_welcome(frame, app.theme.palette(), area),
        SearchState::Searching { query } => {
            let query = query.clone();
            render_searching(frame, app, area, &query);
        }
        SearchState::NoResults { reason, .. } => {
            render_no_results(frame, app.theme.palette(), area, message, reason.as_deref())
        }
        SearchState::Failed {
            missing_key: true, ..
        } => render_missing_api_key(frame, app.theme.palette(), area),
        SearchState::Failed { cause, .. } => {
            render_fetch_error(frame, app.theme.palette(), area, message, cause)
        }
        SearchState::Results { .. } => render_cards(frame, app, area),
    }
}

/// Welcome banner shown until the first search.
fn render_welcome(frame: &mut Frame, palette: Palette, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [banner_area, text_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(3)]).areas(inner);

    let banner = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .lines(vec!["Find a".into(), "movie".into()])
        .alignment(Alignment::Center)
        .build();
    frame.render_widget(banner, banner_area);

    let text = vec![
        Line::from(Span::styled(
            "Welcome! Type a title and press Enter to search OMDb.",
            Style::default().fg(palette.text),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Open a result for plot, rating and cast, or add it straight to your watchlist.",
            Style::default().fg(palette.muted),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, text_area);
}

fn render_no_results(
    frame: &mut Frame,
    palette: Palette,
    area: Rect,
    message: &str,
    reason: Option<&str>,
) {
    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(palette.warning).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(reason) = reason {
        text.push(Line::from(Span::styled(reason, Style::default().fg(palette.muted))));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        NO_RESULTS_HINT,
        Style::default().fg(palette.text),
    )));

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_fetch_error(frame: &mut Frame, palette: Palette, area: Rect, message: &str, cause: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(cause, Style::default().fg(palette.error))),
        Line::from(""),
        Line::from(Span::styled(
            "Check your connection and search again.",
            Style::default().fg(palette.muted),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Renders missing API key error with big text
fn render_missing_api_key(frame: &mut Frame, palette: Palette, area: Rect) {
    let [big_area, text_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(5)]).areas(area);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(palette.error).add_modifier(Modifier::BOLD))
        .lines(vec!["API KEY".into(), "REQUIRED!".into()])
        .alignment(Alignment::Center)
        .build();
    frame.render_widget(big_text, big_area);

    let instructions = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Please set your OMDb API key to search movies",
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "1. Get a free key at: http://www.omdbapi.com/apikey.aspx",
            Style::default().fg(palette.text),
        )),
        Line::from(Span::styled(
            "2. export OMDB_API_KEY=your_key_here, or set api_key in config.toml",
            Style::default().fg(palette.text),
        )),
        Line::from(Span::styled(
            "3. Restart the application",
            Style::default().fg(palette.text),
        )),
    ];

    let paragraph = Paragraph::new(instructions)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, text_area);
}

/// First card index to draw so that `selected` stays on screen.
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 || selected < visible {
        0
    } else {
        selected + 1 - visible
    }
}

fn render_cards(frame: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.theme.palette();
    let count = app.search.cards().len();
    let heading = Line::from(Span::styled(
        format!(" Available Movies ({count}) "),
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ));
    let block = Block::default().borders(Borders::ALL).title(heading);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = (inner.height / CARD_HEIGHT) as usize;
    let offset = scroll_offset(app.selected_card, visible);
    let focused = app.focus == Focus::Results;

    let mut regions = Vec::new();
    for (slot, (index, card)) in app
        .search
        .cards()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .enumerate()
    {
        let card_area = Rect::new(
            inner.x,
            inner.y + slot as u16 * CARD_HEIGHT,
            inner.width,
            CARD_HEIGHT,
        );
        let selected = focused && index == app.selected_card;
        let add_button = render_card(frame, palette, card_area, card, selected);
        regions.push(CardRegion {
            index,
            card: card_area,
            add_button,
        });
    }
    app.bindings.cards = regions;
}

/// Draws one card and returns where its watchlist button landed.
fn render_card(
    frame: &mut Frame,
    palette: Palette,
    area: Rect,
    card: &ResultCard,
    selected: bool,
) -> Rect {
    let (border_style, body_style) = if selected {
        (
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            Style::default().bg(palette.highlight_bg),
        )
    } else {
        (Style::default().fg(palette.muted), Style::default())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(body_style);
    let inner = block.inner(area);

    let marker = match card.poster {
        PosterArt::Url(_) => Span::styled(POSTER_MARKER, Style::default().fg(palette.good)),
        PosterArt::Placeholder => {
            Span::styled(PLACEHOLDER_MARKER, Style::default().fg(palette.muted))
        }
    };
    let year = Span::styled(card.year.as_str(), Style::default().fg(palette.muted));
    let gap = "  ";
    let button_x = inner.x.saturating_add((year.width() + gap.len()) as u16);

    let lines = vec![
        Line::from(vec![
            marker,
            Span::raw("  "),
            Span::styled(
                card.title.as_str(),
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            year,
            Span::raw(gap),
            Span::styled(
                ADD_BUTTON_LABEL,
                Style::default().fg(palette.button).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);

    let button_width = (ADD_BUTTON_LABEL.len() as u16).min(inner.right().saturating_sub(button_x));
    Rect::new(button_x, inner.y + 1, button_width, 1)
}
