//! Outgoing HTTP work. The app queues [`Request`]s; the main loop hands
//! them to [`dispatch`], which runs each on its own task and reports back
//! through the app channel.

use super::controllers::transport::Command;
use super::events::AppEvent;
use crate::api::ApiClient;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Search {
        generation: u64,
        query: String,
    },
    Playlists {
        generation: u64,
        limit: u32,
    },
    Playlist {
        generation: u64,
        user: String,
        id: String,
        limit: u32,
    },
    Command(Command),
}

pub fn dispatch(request: Request, api: &ApiClient, tx: &mpsc::Sender<AppEvent>) {
    debug!(?request, "dispatching");
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = match request {
            Request::Search { generation, query } => AppEvent::SearchLoaded {
                generation,
                result: api.search(&query).await,
            },
            Request::Playlists { generation, limit } => AppEvent::PlaylistsLoaded {
                generation,
                result: api.playlists(limit).await,
            },
            Request::Playlist {
                generation,
                user,
                id,
                limit,
            } => AppEvent::PlaylistLoaded {
                generation,
                result: api.playlist(&user, &id, limit).await,
            },
            Request::Command(command) => {
                let result = match &command {
                    Command::Play { .. } => api.play().await,
                    Command::Pause { .. } => api.pause().await,
                    Command::Load(req) => api.load(req).await,
                };
                AppEvent::CommandDone { command, result }
            }
        };
        // The receiver is gone only during shutdown
        let _ = tx.send(event).await;
    });
}
