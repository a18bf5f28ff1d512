use super::view_block;
use crate::app::App;
use crate::events::LogEntry;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn level_color(level: Option<&str>, theme: &Theme) -> Color {
    match level.map(|l| l.to_ascii_lowercase()).as_deref() {
        Some("error") | Some("critical") => theme.red,
        Some("warning") | Some("warn") => theme.yellow,
        Some("debug") => theme.overlay,
        _ => theme.text,
    }
}

fn entry_line<'a>(entry: &'a LogEntry, theme: &Theme) -> Line<'a> {
    let color = level_color(entry.level.as_deref(), theme);
    let mut spans = Vec::new();
    if let Some(level) = &entry.level {
        spans.push(Span::styled(
            format!("{:<7} ", level.to_ascii_uppercase()),
            Style::default().fg(color),
        ));
    }
    if let Some(module) = &entry.module {
        spans.push(Span::styled(
            format!("{} ", module),
            Style::default().fg(theme.cyan),
        ));
    }
    spans.push(Span::styled(entry.message.as_str(), Style::default().fg(color)));
    Line::from(spans)
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let session = &app.session;
    let view = &session.log_view;

    let title = if view.scroll_back > 0 {
        format!("Log (+{} new, ↑{})", view.received, view.scroll_back)
    } else {
        format!("Log (+{} new)", view.received)
    };
    let block = view_block(title, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if session.logs.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Waiting for server log…",
                Style::default().fg(theme.overlay),
            )))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    // Tail of the ring, shifted up by scroll_back
    let height = inner.height as usize;
    let end = session.logs.len().saturating_sub(view.scroll_back);
    let start = end.saturating_sub(height);
    let lines: Vec<Line> = session
        .logs
        .range(start..end)
        .map(|entry| entry_line(entry, theme))
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
