use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub player_area: Rect,
    pub footer_area: Rect,
}

/// Route tabs on top, the view, the player card, one footer line.
pub fn get_main_layout(area: Rect) -> MainLayout {
    // Short terminals drop the player card first
    let player_height = if area.height >= 16 { 5 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Header
            Constraint::Min(0),                // Body
            Constraint::Length(player_height), // Player
            Constraint::Length(1),             // Footer
        ])
        .split(area);

    MainLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        player_area: chunks[2],
        footer_area: chunks[3],
    }
}

/// First index of a `height`-row window that keeps `selected` in view,
/// centered where the list allows.
pub fn scroll_window(selected: usize, len: usize, height: usize) -> usize {
    selected
        .saturating_sub(height / 2)
        .min(len.saturating_sub(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_terminal_hides_player() {
        let layout = get_main_layout(Rect::new(0, 0, 80, 10));
        assert_eq!(layout.player_area.height, 0);
        assert_eq!(layout.footer_area.y, 9);

        let layout = get_main_layout(Rect::new(0, 0, 80, 40));
        assert_eq!(layout.player_area.height, 5);
    }

    #[test]
    fn test_scroll_window() {
        assert_eq!(scroll_window(0, 100, 10), 0);
        assert_eq!(scroll_window(50, 100, 10), 45);
        assert_eq!(scroll_window(99, 100, 10), 90);
        assert_eq!(scroll_window(3, 4, 10), 0);
    }
}
