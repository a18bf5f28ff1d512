use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};

pub mod info;
pub mod progress;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    // --- MUSIC CARD ---
    let music_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(vec![Span::styled(
            " Now Playing ",
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        )]))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let inner = music_block.inner(area);
    f.render_widget(music_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Time
        ])
        .split(inner);

    info::render(f, chunks[0], app);

    // track-end hides the bar until the next play-track
    if app.session.playback.display_progress().is_some() {
        progress::render_progress(f, chunks[1], app);
        progress::render_time(f, chunks[2], app);
    }
}
