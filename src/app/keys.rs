use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    // Global
    pub quit: String,
    pub play_pause: String,
    pub toggle_keyhints: String,
    pub toggle_messages: String,
    pub search: String,
    pub refresh: String,

    // Routes
    pub view_index: String,
    pub view_search: String,
    pub view_playlists: String,
    pub view_log: String,

    // Lists
    pub nav_up: String,
    pub nav_up_alt: String,
    pub nav_down: String,
    pub nav_down_alt: String,
    pub page_up: String,
    pub page_down: String,
    pub select: String,
    pub back: String,
    pub back_alt: String,
    pub filter: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            play_pause: "Space".to_string(),
            toggle_keyhints: "?".to_string(),
            toggle_messages: "m".to_string(),
            search: "/".to_string(),
            refresh: "r".to_string(),

            view_index: "1".to_string(),
            view_search: "2".to_string(),
            view_playlists: "3".to_string(),
            view_log: "4".to_string(),

            nav_up: "k".to_string(),
            nav_up_alt: "Up".to_string(),
            nav_down: "j".to_string(),
            nav_down_alt: "Down".to_string(),
            page_up: "PageUp".to_string(),
            page_down: "PageDown".to_string(),
            select: "Enter".to_string(),
            back: "Backspace".to_string(),
            back_alt: "Esc".to_string(),
            filter: "f".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        match key_str {
            "Space" => event.code == KeyCode::Char(' '),
            "Enter" => event.code == KeyCode::Enter,
            "Backspace" => event.code == KeyCode::Backspace,
            "Esc" => event.code == KeyCode::Esc,
            "Tab" => event.code == KeyCode::Tab,
            "BackTab" => event.code == KeyCode::BackTab,
            "Up" => event.code == KeyCode::Up,
            "Down" => event.code == KeyCode::Down,
            "Left" => event.code == KeyCode::Left,
            "Right" => event.code == KeyCode::Right,
            "PageUp" => event.code == KeyCode::PageUp,
            "PageDown" => event.code == KeyCode::PageDown,
            s if s.chars().count() == 1 => {
                if let Some(ch) = s.chars().next() {
                    // Uppercase bindings also accept shift + lowercase
                    if ch.is_uppercase() {
                        event.code == KeyCode::Char(ch)
                            || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                                && event.modifiers.contains(KeyModifiers::SHIFT))
                    } else {
                        event.code == KeyCode::Char(ch)
                    }
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    pub fn matches_any(&self, event: KeyEvent, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.matches(event, k))
    }

    // Helper for UI display
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "BackTab" => "S-Tab".to_string(),
            "Backspace" => "Bksp".to_string(),
            "PageUp" => "PgUp".to_string(),
            "PageDown" => "PgDn".to_string(),
            _ => key_str.to_string(),
        }
    }
}
