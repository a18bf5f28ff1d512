use super::{status_line, track_lines, view_block};
use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let search = &app.search;

    let title = match search.query() {
        Some(q) => format!("Search: \"{}\"", q),
        None => "Search".to_string(),
    };
    let block = view_block(title, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(results) = &search.results {
        // Artists and albums are listed as counts; only tracks are playable
        lines.push(
            Line::from(Span::styled(
                format!(
                    "{} tracks · {} albums · {} artists",
                    results.tracks.len(),
                    results.albums.len(),
                    results.artists.len()
                ),
                Style::default().fg(theme.overlay),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(Line::from(""));
    }

    let height = (inner.height as usize).saturating_sub(lines.len());
    if search.tracks().is_empty() {
        let empty = if search.query().is_some() || search.pending_query().is_some() {
            "No results found"
        } else {
            "Press / to search"
        };
        lines.push(status_line(&search.state, empty, theme));
    } else {
        lines.extend(track_lines(
            search.tracks(),
            search.selected,
            inner.width as usize,
            height,
            app.session.playback.track_uri(),
            theme,
        ));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
