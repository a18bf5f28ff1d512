use crate::app::config::AppConfig;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

// Catppuccin Mocha
impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
        }
    }
}

/// `theme.toml` holds a single `[theme]` table.
#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

pub fn get_theme_path() -> PathBuf {
    AppConfig::get_config_dir().join("theme.toml")
}

fn parse_theme(content: &str) -> Option<Theme> {
    // Nested [theme] first, then a flat file
    toml::from_str::<ThemeFile>(content)
        .map(|wrapper| wrapper.theme)
        .or_else(|_| toml::from_str::<Theme>(content))
        .ok()
}

pub fn load_current_theme() -> Theme {
    let path = get_theme_path();

    if !path.exists() {
        let default_theme = Theme::default();
        let wrapper = ThemeFile {
            theme: default_theme.clone(),
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(toml_str) = toml::to_string_pretty(&wrapper) {
            let _ = fs::write(&path, toml_str);
        }
        return default_theme;
    }

    fs::read_to_string(&path)
        .ok()
        .and_then(|content| parse_theme(&content))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_and_flat() {
        let nested = toml::to_string_pretty(&ThemeFile {
            theme: Theme::default(),
        })
        .unwrap();
        assert!(parse_theme(&nested).is_some());

        let flat = toml::to_string_pretty(&Theme::default()).unwrap();
        let theme = parse_theme(&flat).unwrap();
        assert_eq!(theme.blue, Color::Rgb(137, 180, 250));

        assert!(parse_theme("blue = 3").is_none());
    }
}
