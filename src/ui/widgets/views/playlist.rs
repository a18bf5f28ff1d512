use super::{status_line, track_lines, view_block};
use crate::app::App;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let ctl = &app.playlist;

    let title = match (&ctl.playlist, ctl.target()) {
        (Some(p), _) => match &p.owner {
            Some(owner) => format!("{} · {}", p.name, owner),
            None => p.name.clone(),
        },
        (None, Some((user, id))) => format!("{}/{}", user, id),
        (None, None) => "Playlist".to_string(),
    };
    let block = view_block(title, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = if ctl.tracks().is_empty() {
        vec![Line::from(""), status_line(&ctl.state, "Empty playlist", theme)]
    } else {
        track_lines(
            ctl.tracks(),
            ctl.selected,
            inner.width as usize,
            inner.height as usize,
            app.session.playback.track_uri(),
            theme,
        )
    };

    f.render_widget(Paragraph::new(lines), inner);
}
