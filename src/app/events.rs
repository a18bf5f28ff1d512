use crate::api::{ApiError, Playlist, PlaylistSummary, SearchResults};
use crate::app::controllers::transport::Command;
use crate::events::{ServerEvent, TransportStatus};
use crossterm::event::Event;
use std::time::Duration;

pub enum AppEvent {
    Input(Event),
    Server(ServerEvent),
    Transport(TransportStatus),
    /// Progress estimator timer; carries the time since the previous tick
    ProgressTick(Duration),
    SearchLoaded {
        generation: u64,
        result: Result<SearchResults, ApiError>,
    },
    PlaylistsLoaded {
        generation: u64,
        result: Result<Vec<PlaylistSummary>, ApiError>,
    },
    PlaylistLoaded {
        generation: u64,
        result: Result<Playlist, ApiError>,
    },
    CommandDone {
        command: Command,
        result: Result<(), ApiError>,
    },
    Tick,
}

impl From<ServerEvent> for AppEvent {
    fn from(event: ServerEvent) -> Self {
        AppEvent::Server(event)
    }
}

impl From<TransportStatus> for AppEvent {
    fn from(status: TransportStatus) -> Self {
        AppEvent::Transport(status)
    }
}
