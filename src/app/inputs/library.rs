use crate::app::router::Route;
use crate::app::{App, InputMode, InputState};
use crossterm::event::KeyEvent;

const PAGE: isize = 10;

/// Cursor movement and selection in the list views.
pub fn handle_list_events(key: KeyEvent, app: &mut App) -> bool {
    let keys = app.keys.clone();

    if keys.matches_any(key, &[keys.nav_down.as_str(), keys.nav_down_alt.as_str()]) {
        app.move_selection(1);
        return true;
    }
    if keys.matches_any(key, &[keys.nav_up.as_str(), keys.nav_up_alt.as_str()]) {
        app.move_selection(-1);
        return true;
    }
    if keys.matches(key, &keys.page_down) {
        app.move_selection(PAGE);
        return true;
    }
    if keys.matches(key, &keys.page_up) {
        app.move_selection(-PAGE);
        return true;
    }

    if keys.matches(key, &keys.select) {
        app.activate_selected();
        return true;
    }

    if keys.matches(key, &keys.filter) && *app.route() == Route::Playlists {
        let current = app.playlists.filter.clone();
        app.input_state = Some(InputState::new(
            InputMode::PlaylistFilter,
            "Filter playlists",
            &current,
        ));
        return true;
    }

    false
}
