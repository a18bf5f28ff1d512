use crate::api::Track;
use crate::app::controllers::LoadState;
use crate::app::router::Route;
use crate::app::App;
use crate::ui::layout::scroll_window;
use crate::ui::theme::Theme;
use crate::ui::utils::{format_time, truncate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};

pub mod index;
pub mod log;
pub mod playlist;
pub mod playlists;
pub mod search;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    match app.route() {
        Route::Index => index::render(f, area, app),
        Route::Search => search::render(f, area, app),
        Route::Playlists => playlists::render(f, area, app),
        Route::Playlist { .. } => playlist::render(f, area, app),
        Route::Log => log::render(f, area, app),
    }
}

/// Rounded panel shared by every view.
pub fn view_block<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset))
}

/// Centered placeholder for loading/empty/failed lists.
pub fn status_line<'a>(state: &LoadState, empty: &'a str, theme: &Theme) -> Line<'a> {
    let (text, color) = match state {
        LoadState::Loading => ("Loading…".to_string(), theme.yellow),
        LoadState::Failed(msg) => (msg.clone(), theme.red),
        LoadState::Idle | LoadState::Ready => (empty.to_string(), theme.overlay),
    };
    Line::from(Span::styled(text, Style::default().fg(color))).alignment(Alignment::Center)
}

/// Track rows with the cursor on `selected`, scrolled to keep it visible.
pub fn track_lines<'a>(
    tracks: &'a [Track],
    selected: usize,
    width: usize,
    height: usize,
    now_playing: Option<&str>,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let artist_w = width / 4;
    let time_w = 6;
    let prefix_w = 4;
    let start_idx = scroll_window(selected, tracks.len(), height);

    tracks
        .iter()
        .enumerate()
        .skip(start_idx)
        .take(height)
        .map(|(idx, track)| {
            let is_sel = idx == selected;
            let is_current = now_playing == Some(track.uri.as_str());
            let title_w = width.saturating_sub(artist_w + time_w + prefix_w);

            let name = truncate(&track.name, title_w.saturating_sub(1));
            let artist = truncate(
                track.artist.as_deref().unwrap_or(""),
                artist_w.saturating_sub(1),
            );
            let time = track.duration.map(format_time).unwrap_or_default();

            let marker = if is_current {
                "♪"
            } else if is_sel {
                "●"
            } else {
                "○"
            };
            let (m_style, t_style, a_style) = if is_sel {
                (
                    Style::default().fg(theme.yellow),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                    Style::default().fg(theme.text),
                )
            } else {
                (
                    Style::default().fg(theme.surface),
                    Style::default().fg(theme.text),
                    Style::default().fg(theme.overlay),
                )
            };
            let m_style = if is_current {
                Style::default().fg(theme.green)
            } else {
                m_style
            };

            Line::from(vec![
                Span::styled(format!(" {} ", marker), m_style),
                Span::styled(format!("{:<w$}", name, w = title_w), t_style),
                Span::styled(format!("{:<w$}", artist, w = artist_w), a_style),
                Span::styled(format!("{:>w$}", time, w = time_w), a_style),
            ])
        })
        .collect()
}
