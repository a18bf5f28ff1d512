use crate::app::{App, InputMode};
use crossterm::event::{KeyCode, KeyEvent};

/// Keys for the text prompt. Returns false when no prompt is open.
pub fn handle_input_box(key: KeyEvent, app: &mut App) -> bool {
    let Some(mode) = app.input_state.as_ref().map(|i| i.mode) else {
        return false;
    };

    match key.code {
        KeyCode::Esc => {
            app.input_state = None;
        }
        KeyCode::Enter => {
            if let Some(input) = app.input_state.take() {
                match input.mode {
                    InputMode::Search => app.submit_search(&input.value),
                    InputMode::PlaylistFilter => app.playlists.set_filter(&input.value),
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.input_state.as_mut() {
                input.value.pop();
            }
            live_update(app, mode);
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.input_state.as_mut() {
                input.value.push(c);
            }
            live_update(app, mode);
        }
        _ => {}
    }
    true
}

/// The playlist filter narrows the list as you type.
fn live_update(app: &mut App, mode: InputMode) {
    if mode == InputMode::PlaylistFilter {
        if let Some(value) = app.input_state.as_ref().map(|i| i.value.clone()) {
            app.playlists.set_filter(&value);
        }
    }
}
