use super::{step, LoadState};
use crate::api::{ApiError, LoadPosition, LoadRequest, Playlist, Track};
use tracing::debug;

#[derive(Debug, Default)]
pub struct PlaylistController {
    generation: u64,
    target: Option<(String, String)>,
    pub playlist: Option<Playlist>,
    pub state: LoadState,
    pub selected: usize,
}

impl PlaylistController {
    /// Start fetching `user`'s playlist `id`. Switching to another playlist
    /// clears what was shown before.
    pub fn begin(&mut self, user: &str, id: &str) -> u64 {
        let target = (user.to_string(), id.to_string());
        if self.target.as_ref() != Some(&target) {
            self.playlist = None;
            self.selected = 0;
            self.target = Some(target);
        }
        self.generation += 1;
        self.state = LoadState::Loading;
        self.generation
    }

    pub fn complete(&mut self, generation: u64, result: Result<Playlist, ApiError>) -> Option<String> {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "dropping stale playlist response");
            return None;
        }
        match result {
            Ok(playlist) => {
                self.playlist = Some(playlist);
                self.selected = 0;
                self.state = LoadState::Ready;
                None
            }
            Err(e) => {
                let msg = format!("Could not load playlist: {}", e);
                self.state = LoadState::Failed(msg.clone());
                Some(msg)
            }
        }
    }

    pub fn target(&self) -> Option<(&str, &str)> {
        self.target.as_ref().map(|(u, i)| (u.as_str(), i.as_str()))
    }

    pub fn tracks(&self) -> &[Track] {
        self.playlist.as_ref().map(|p| p.tracks.as_slice()).unwrap_or(&[])
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.selected = step(self.selected, self.tracks().len(), delta);
    }

    /// `/player/load` for the highlighted track with the playlist as context.
    pub fn load_selected(&self) -> Option<LoadRequest> {
        let playlist = self.playlist.as_ref()?;
        let track = playlist.tracks.get(self.selected)?;
        Some(LoadRequest {
            ctx: playlist.uri.clone(),
            position: LoadPosition::Index(self.selected),
            uri: track.uri.clone(),
            query: None,
        })
    }
}
