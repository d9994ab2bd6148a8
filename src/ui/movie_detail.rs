use crate::app::bindings::ModalRegion;
use crate::app::omdb::{MovieDetail, NOT_AVAILABLE};
use crate::app::{App, DetailState, PosterState};
use crate::theme::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

use super::main_content::ADD_BUTTON_LABEL;

const CLOSE_BUTTON_LABEL: &str = "[x]";
const POSTER_WIDTH: u16 = 28;

/// Area of the modal: 70% of the screen, centred.
pub fn modal_area(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(area);
    let [modal] = Layout::horizontal([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(row);
    modal
}

/// Renders the detail modal over whatever is underneath.
pub fn render_movie_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.theme.palette();
    let modal = modal_area(area);
    frame.render_widget(Clear, modal);

    let title = match &app.detail {
        DetailState::Loaded { detail, .. } => format!(" {} ", detail.title),
        _ => " Movie Details ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.background).fg(palette.text))
        .title(Line::from(Span::styled(
            title,
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )))
        .title_top(
            Line::from(Span::styled(
                CLOSE_BUTTON_LABEL,
                Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let close_x = modal.right().saturating_sub(CLOSE_BUTTON_LABEL.len() as u16 + 1);
    let close_button = Rect::new(close_x, modal.y, CLOSE_BUTTON_LABEL.len() as u16, 1);

    let add_button = match &app.detail {
        DetailState::Loaded { detail, .. } => {
            let detail = detail.clone();
            Some(render_movie_info(frame, app, palette, inner, &detail))
        }
        DetailState::Failed { imdb_id, cause } => {
            render_error_state(frame, palette, inner, imdb_id, cause);
            None
        }
        DetailState::Hidden => None,
    };

    app.bindings.modal = Some(ModalRegion {
        body: modal,
        close_button,
        add_button,
    });
}

/// Renders movie information and returns the watchlist button's area.
fn render_movie_info(
    frame: &mut Frame,
    app: &mut App,
    palette: Palette,
    area: Rect,
    movie: &MovieDetail,
) -> Rect {
    let [body_area, button_area, footer_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let text_area = if matches!(app.poster, PosterState::Ready(_) | PosterState::Loading) {
        let [poster_area, text_area] =
            Layout::horizontal([Constraint::Length(POSTER_WIDTH), Constraint::Min(10)])
                .areas(body_area);
        render_poster_section(frame, app, palette, poster_area);
        text_area
    } else {
        body_area
    };

    let content = Paragraph::new(detail_lines(movie, palette)).wrap(Wrap { trim: true });
    frame.render_widget(content, text_area);

    let button = Paragraph::new(Line::from(Span::styled(
        ADD_BUTTON_LABEL,
        Style::default().fg(palette.button).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(button, button_area);

    let footer = Paragraph::new(Line::from(Span::styled(
        "(a) add to watchlist, (Esc) or click outside to close",
        Style::default().fg(palette.muted),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, footer_area);

    Rect::new(
        button_area.x,
        button_area.y,
        (ADD_BUTTON_LABEL.len() as u16).min(button_area.width),
        button_area.height,
    )
}

fn detail_lines(movie: &MovieDetail, palette: Palette) -> Vec<Line<'_>> {
    let label = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(palette.text);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                movie.title.as_str(),
                Style::default().fg(palette.warning).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(format!("({})", movie.year), Style::default().fg(palette.muted)),
        ]),
        Line::from(vec![
            Span::styled("Genre: ", Style::default().fg(palette.muted)),
            Span::styled(movie.genre.as_str(), value),
            Span::raw(" | "),
            Span::styled("Runtime: ", Style::default().fg(palette.muted)),
            Span::styled(movie.runtime.as_str(), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Plot: ", label),
            Span::styled(movie.plot.as_str(), value),
        ]),
        Line::from(""),
    ];

    let rating = if movie.imdb_rating == NOT_AVAILABLE {
        Span::styled(NOT_AVAILABLE, Style::default().fg(palette.muted))
    } else {
        Span::styled(
            format!("{} ⭐", movie.imdb_rating),
            Style::default()
                .fg(palette.rating_color(&movie.imdb_rating))
                .add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(vec![Span::styled("Rating: ", label), rating]));

    if movie.director != NOT_AVAILABLE {
        lines.push(Line::from(vec![
            Span::styled("Director: ", label),
            Span::styled(movie.director.as_str(), value),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Actors: ", label),
        Span::styled(movie.actors.as_str(), value),
    ]));

    lines
}

/// Renders the poster section
fn render_poster_section(frame: &mut Frame, app: &mut App, palette: Palette, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Poster");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &mut app.poster {
        PosterState::Ready(protocol) => {
            let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));
            frame.render_stateful_widget(image, inner, protocol.as_mut());
        }
        PosterState::Loading => {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Downloading poster...",
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(loading, inner);
        }
        PosterState::None | PosterState::Unavailable => {}
    }
}

/// Renders error state
fn render_error_state(frame: &mut Frame, palette: Palette, area: Rect, imdb_id: &str, error: &str) {
    let error_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Failed to fetch movie details",
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error, Style::default().fg(palette.error))),
        Line::from(Span::styled(
            format!("IMDb id: {imdb_id}"),
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (Esc) or (b) to go back",
            Style::default().fg(palette.muted),
        )),
    ];

    let error_paragraph = Paragraph::new(error_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}
