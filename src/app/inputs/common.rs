use crate::app::router::Route;
use crate::app::{App, InputMode, InputState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_common_events(key: KeyEvent, app: &mut App) -> bool {
    let keys = app.keys.clone();

    // Ctrl-C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.is_running = false;
        return true;
    }

    // Quit ('q'): close popups first, then quit (Neovim-style)
    if keys.matches(key, &keys.quit) {
        if app.show_keyhints {
            app.show_keyhints = false;
        } else if app.show_messages {
            app.show_messages = false;
        } else {
            app.is_running = false;
        }
        return true;
    }

    if keys.matches(key, &keys.toggle_keyhints) {
        app.show_keyhints = !app.show_keyhints;
        return true;
    }

    if keys.matches(key, &keys.toggle_messages) {
        app.show_messages = !app.show_messages;
        return true;
    }

    // Esc closes popups before it means "back"
    if key.code == KeyCode::Esc && (app.show_keyhints || app.show_messages) {
        app.show_keyhints = false;
        app.show_messages = false;
        return true;
    }

    if keys.matches(key, &keys.search) {
        let current = app.search.input.clone();
        app.input_state = Some(InputState::new(InputMode::Search, "Search", &current));
        return true;
    }

    if keys.matches(key, &keys.view_index) {
        app.navigate(Route::Index);
        return true;
    }
    if keys.matches(key, &keys.view_search) {
        app.navigate(Route::Search);
        return true;
    }
    if keys.matches(key, &keys.view_playlists) {
        app.navigate(Route::Playlists);
        return true;
    }
    if keys.matches(key, &keys.view_log) {
        app.navigate(Route::Log);
        return true;
    }

    if keys.matches_any(key, &[keys.back.as_str(), keys.back_alt.as_str()]) {
        app.back();
        return true;
    }

    if keys.matches(key, &keys.refresh) {
        app.refresh();
        return true;
    }

    false
}
