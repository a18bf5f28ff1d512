use crate::app::App;
use crossterm::event::{Event, KeyEvent, KeyEventKind};

pub mod common;
pub mod input_box;
pub mod library;
pub mod player;

/// Route one terminal event to the handler chain.
pub fn handle_event(event: Event, app: &mut App) {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            handle_key(key, app);
        }
    }
}

pub fn handle_key(key: KeyEvent, app: &mut App) {
    // 1. Priority: the text prompt captures every key while open
    if input_box::handle_input_box(key, app) {
        return;
    }

    // 2. Common/Global Keys (Quit, Help, views)
    if common::handle_common_events(key, app) {
        return;
    }

    // 3. List views
    if library::handle_list_events(key, app) {
        return;
    }

    // 4. Player controls apply anywhere not consumed above
    player::handle_player_events(key, app);
}
