use crate::app::router::Route;
use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

type Hint<'a> = (String, &'a str, &'a str);

fn context_keys(app: &App) -> (&'static str, Vec<Hint<'static>>) {
    let k = &app.keys;
    let nav = (
        format!("{}/{}", k.display(&k.nav_down), k.display(&k.nav_up)),
        "📋",
        "Navigate",
    );
    let page = (
        format!("{}/{}", k.display(&k.page_down), k.display(&k.page_up)),
        "📜",
        "Page",
    );
    match app.route() {
        Route::Index => ("Home", vec![]),
        Route::Search => (
            "Search",
            vec![
                nav,
                page,
                (k.display(&k.select), "▶️", "Play track"),
                (k.display(&k.refresh), "↻", "Search again"),
            ],
        ),
        Route::Playlists => (
            "Playlists",
            vec![
                nav,
                page,
                (k.display(&k.select), "📂", "Open playlist"),
                (k.display(&k.filter), "🔍", "Filter"),
                (k.display(&k.refresh), "↻", "Reload"),
            ],
        ),
        Route::Playlist { .. } => (
            "Playlist",
            vec![
                nav,
                page,
                (k.display(&k.select), "▶️", "Play track"),
                (k.display(&k.refresh), "↻", "Reload"),
            ],
        ),
        Route::Log => (
            "Log",
            vec![(
                format!("{}/{}", k.display(&k.nav_up), k.display(&k.nav_down)),
                "📜",
                "Scroll back/forward",
            )],
        ),
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let k = &app.keys;

    // 🎹 WhichKey-style floating popup
    let (title, keys) = context_keys(app);

    let global_keys: Vec<Hint> = vec![
        (k.display(&k.play_pause), "▶️", "Play/Pause"),
        (k.display(&k.search), "🔍", "Search"),
        (
            format!(
                "{}-{}",
                k.display(&k.view_index),
                k.display(&k.view_log)
            ),
            "🖼️",
            "Views",
        ),
        (
            format!("{}/{}", k.display(&k.back), k.display(&k.back_alt)),
            "←",
            "Back",
        ),
        (k.display(&k.toggle_messages), "✉", "Messages"),
        (k.display(&k.quit), "🚪", "Quit"),
    ];

    let mut lines: Vec<Line> = Vec::new();

    for (key, icon, desc) in &keys {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<7} ", key),
                Style::default()
                    .fg(theme.yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   ", Style::default().fg(theme.overlay)),
            Span::styled(format!("{} ", icon), Style::default()),
            Span::styled(*desc, Style::default().fg(theme.text)),
        ]));
    }

    if !keys.is_empty() {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "────── Global ──────",
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (key, icon, desc) in &global_keys {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<7} ", key),
                Style::default()
                    .fg(theme.green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   ", Style::default().fg(theme.overlay)),
            Span::styled(format!("{} ", icon), Style::default()),
            Span::styled(*desc, Style::default().fg(theme.text)),
        ]));
    }

    // Fit content: padding + key column + spacer + icon + description
    let content_width = keys
        .iter()
        .chain(global_keys.iter())
        .map(|(key, _, desc)| 2 + key.width().max(7) + 3 + 3 + desc.width())
        .max()
        .unwrap_or(20)
        .max(22);

    let max_height = f.area().height.saturating_sub(4);
    let popup_height = (lines.len() as u16 + 2).min(max_height);
    let popup_width = (content_width as u16 + 4).min(f.area().width.saturating_sub(2));

    // Bottom-right, above the footer
    let popup_x = f.area().width.saturating_sub(popup_width + 1);
    let popup_y = f.area().height.saturating_sub(popup_height + 2);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.blue))
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Left)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, popup_area);
}
