use crate::app::App;
use crossterm::event::KeyEvent;

pub fn handle_player_events(key: KeyEvent, app: &mut App) -> bool {
    let keys = &app.keys;

    // Play/Pause ('Space'). Sent even before the first play-track event,
    // since the server may already be playing.
    if keys.matches(key, &keys.play_pause) {
        app.toggle_play();
        let playing = app.transport.requested_playing();
        app.show_toast(if playing { "▶ Play" } else { "⏸ Pause" });
        return true;
    }

    false
}
