use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

const SLIDE_MS: u128 = 300;

/// Horizontal offset from the resting position for the slide animation.
pub fn slide_offset(width: u16, since_start_ms: u128, remaining_ms: u128) -> u16 {
    if since_start_ms < SLIDE_MS {
        // Entrance: slide left, cubic out
        let t = since_start_ms as f32 / SLIDE_MS as f32;
        let ease = 1.0 - (1.0 - t).powi(3);
        (width as f32 * (1.0 - ease)) as u16
    } else if remaining_ms < SLIDE_MS {
        // Exit: slide right, cubic in
        let t = (SLIDE_MS - remaining_ms) as f32 / SLIDE_MS as f32;
        (width as f32 * t.powi(3)) as u16
    } else {
        0
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let Some(ref toast) = app.toast else {
        return;
    };
    let theme = &app.theme;
    let now = Instant::now();
    let screen = f.area();

    // Auto-dismiss handled in App::on_tick()
    let message = &toast.message;
    let width = (message.width() as u16 + 6).min(screen.width.saturating_sub(4));
    let height = 3;
    let target_x = screen.width.saturating_sub(width + 1);

    let entrance_elapsed = now.duration_since(toast.start_time).as_millis();
    let time_remaining = toast.deadline.saturating_duration_since(now).as_millis();
    let x = target_x.saturating_add(slide_offset(width, entrance_elapsed, time_remaining));

    if x >= screen.width {
        return;
    }

    // Clip to screen bounds to avoid panic
    let visible_area = Rect::new(x, 1, width, height).intersection(screen);
    if visible_area.is_empty() {
        return;
    }

    f.render_widget(Clear, visible_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let style = Style::default().fg(theme.blue).add_modifier(Modifier::BOLD);
    let text = Paragraph::new(Line::from(vec![Span::styled(message.as_str(), style)]))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(text, visible_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_offset() {
        assert_eq!(slide_offset(20, 0, 2000), 20);
        assert_eq!(slide_offset(20, 1000, 1000), 0);
        assert_eq!(slide_offset(20, 1900, 0), 20);
    }
}
