use super::{status_line, view_block};
use crate::app::App;
use crate::ui::layout::scroll_window;
use crate::ui::utils::truncate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let ctl = &app.playlists;

    let title = if ctl.filter.is_empty() {
        "Playlists".to_string()
    } else {
        format!("Playlists ~ {}", ctl.filter)
    };
    let block = view_block(title, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = ctl.visible();
    if visible.is_empty() {
        let empty = if ctl.filter.is_empty() {
            "No playlists"
        } else {
            "No playlists match"
        };
        f.render_widget(
            Paragraph::new(vec![Line::from(""), status_line(&ctl.state, empty, theme)]),
            inner,
        );
        return;
    }

    let width = inner.width as usize;
    let height = inner.height as usize;
    let start = scroll_window(ctl.selected, visible.len(), height);
    let count_w = 8;

    let lines: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(idx, item)| {
            let is_sel = idx == ctl.selected;
            let name = truncate(&item.name, width.saturating_sub(count_w + 4));
            let count = item.tracks.map(|n| format!("{} ♪", n)).unwrap_or_default();
            let (marker, style) = if is_sel {
                (
                    "●",
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", Style::default().fg(theme.text))
            };
            Line::from(vec![
                Span::styled(format!(" {} ", marker), Style::default().fg(theme.magenta)),
                Span::styled(
                    format!("{:<w$}", name, w = width.saturating_sub(count_w + 4)),
                    style,
                ),
                Span::styled(
                    format!("{:>w$}", count, w = count_w),
                    Style::default().fg(theme.overlay),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
