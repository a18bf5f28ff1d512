use crate::app::App;
use crate::player::PlayerState;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let playback = &app.session.playback;
    let max_width = area.width.saturating_sub(4) as usize;

    let line = match playback.track_name() {
        Some(name) => {
            let icon = if playback.state() == PlayerState::Playing {
                "▶"
            } else {
                "⏸"
            };
            Line::from(vec![
                Span::styled(format!("{} ", icon), Style::default().fg(theme.green)),
                Span::styled(
                    truncate(name, max_width.saturating_sub(2)),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
            ])
        }
        None => Line::from(Span::styled(
            "Nothing playing",
            Style::default().fg(theme.overlay).add_modifier(Modifier::DIM),
        )),
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
