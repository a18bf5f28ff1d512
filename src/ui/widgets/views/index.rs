use super::view_block;
use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let keys = &app.keys;
    let session = &app.session;

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "sith remote",
            Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            app.config.server_url.as_str(),
            Style::default().fg(theme.overlay),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
    ];

    let state = session.server_state.as_deref().unwrap_or("unknown");
    let user = session
        .login
        .as_ref()
        .and_then(|l| l.user.as_deref())
        .unwrap_or("not logged in");
    for (label, value) in [("Session", state), ("User", user)] {
        lines.push(
            Line::from(vec![
                Span::styled(format!("{:>8}  ", label), Style::default().fg(theme.overlay)),
                Span::styled(value, Style::default().fg(theme.text)),
            ])
            .alignment(Alignment::Center),
        );
    }

    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(
            format!(
                "{} search   {} playlists   {} log   {} messages ({})",
                keys.display(&keys.search),
                keys.display(&keys.view_playlists),
                keys.display(&keys.view_log),
                keys.display(&keys.toggle_messages),
                session.messages.len()
            ),
            Style::default().fg(theme.overlay),
        ))
        .alignment(Alignment::Center),
    );

    let p = Paragraph::new(lines).block(view_block(app.route().title().to_string(), theme));
    f.render_widget(p, area);
}
