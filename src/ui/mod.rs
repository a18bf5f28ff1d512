pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::router::Route;
use crate::app::App;
use crate::events::TransportStatus;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn ui(f: &mut Frame, app: &App) {
    let area = f.area();

    // 1. Layout
    let main_layout = layout::get_main_layout(area);

    // 2. Route tabs + connection badge
    render_header(f, main_layout.header_area, app);

    // 3. Current view
    widgets::views::render(f, main_layout.body_area, app);

    // 4. Now playing
    if main_layout.player_area.height > 0 {
        widgets::player::render(f, main_layout.player_area, app);
    }

    // 5. Footer Hint (if no popup active)
    if !app.show_keyhints {
        let theme = &app.theme;
        let hint = Line::from(vec![
            Span::styled(
                " ? ",
                Style::default()
                    .fg(theme.overlay)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys", Style::default().fg(theme.overlay)),
        ]);
        let footer = Paragraph::new(hint).alignment(Alignment::Right);
        f.render_widget(footer, main_layout.footer_area);
    }

    // 6. Popups (Overlays)
    widgets::popups::render(f, app);
}

fn render_header(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let theme = &app.theme;
    let current = app.route();

    let keys = &app.keys;
    let tabs = [
        (keys.display(&keys.view_index), Route::Index),
        (keys.display(&keys.view_search), Route::Search),
        (keys.display(&keys.view_playlists), Route::Playlists),
        (keys.display(&keys.view_log), Route::Log),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (key, route) in tabs {
        // The playlist detail view lives under the Playlists tab
        let active = *current == route
            || (route == Route::Playlists && matches!(current, Route::Playlist { .. }));
        let style = if active {
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.overlay)
        };
        let dot = if active { "●" } else { "○" };
        spans.push(Span::styled(format!("{} {} {}", dot, key, route.title()), style));
        spans.push(Span::raw("   "));
    }

    let (badge, color) = match &app.session.transport {
        TransportStatus::Connected => ("● live", theme.green),
        TransportStatus::Connecting => ("◌ connecting", theme.yellow),
        TransportStatus::Disconnected(_) => ("○ offline", theme.red),
    };
    let mut right = vec![Span::styled(badge, Style::default().fg(color))];
    if let Some(login) = &app.session.login {
        if let Some(user) = &login.user {
            right.insert(
                0,
                Span::styled(format!("{}  ", user), Style::default().fg(theme.magenta)),
            );
        }
    }
    right.push(Span::raw(" "));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
    f.render_widget(
        Paragraph::new(Line::from(right)).alignment(Alignment::Right),
        area,
    );
}
