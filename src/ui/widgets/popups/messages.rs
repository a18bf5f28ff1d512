use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Messages pushed by the server with `user-message`, newest last.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let screen = f.area();

    let width = 70.min(screen.width.saturating_sub(4));
    let height = 14.min(screen.height.saturating_sub(4));
    let x = (screen.width.saturating_sub(width)) / 2;
    let y = (screen.height.saturating_sub(height)) / 2;
    let area = Rect::new(x, y, width, height);

    f.render_widget(Clear, area);

    let messages = &app.session.messages;
    let rows = height.saturating_sub(2) as usize;
    let text_w = width.saturating_sub(6) as usize;

    let lines: Vec<Line> = if messages.is_empty() {
        vec![Line::from(Span::styled(
            "No messages",
            Style::default().fg(theme.overlay),
        ))
        .alignment(Alignment::Center)]
    } else {
        messages
            .iter()
            .skip(messages.len().saturating_sub(rows))
            .map(|m| {
                Line::from(vec![
                    Span::styled(" ✉ ", Style::default().fg(theme.yellow)),
                    Span::styled(truncate(m, text_w), Style::default().fg(theme.text)),
                ])
            })
            .collect()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.yellow))
        .title(format!(" Messages ({}) ", messages.len()))
        .title_alignment(Alignment::Left)
        .style(Style::default().bg(Color::Reset));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
