//! View controllers.
//!
//! Each controller owns one view's slice of state. None of them perform I/O:
//! they hand out a generation number when a request should be made and
//! accept the response later, dropping it if a newer request has been issued
//! since.

pub mod log;
pub mod playlist;
pub mod playlists;
pub mod search;
pub mod transport;

pub use log::LogController;
pub use playlist::PlaylistController;
pub use playlists::PlaylistsController;
pub use search::{SearchController, SearchTicket};
pub use transport::TransportController;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Move a list cursor by `delta`, clamped to the list.
pub fn step(selected: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = selected as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, 0, 1), 0);
        assert_eq!(step(0, 5, -1), 0);
        assert_eq!(step(3, 5, 10), 4);
        assert_eq!(step(2, 5, 1), 3);
    }
}
