use super::{step, LoadState};
use crate::api::{ApiError, PlaylistSummary};
use crate::app::router::Route;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tracing::debug;

#[derive(Debug, Default)]
pub struct PlaylistsController {
    generation: u64,
    pub items: Vec<PlaylistSummary>,
    pub state: LoadState,
    /// Index into [`Self::visible`]
    pub selected: usize,
    pub filter: String,
}

impl PlaylistsController {
    /// Start a refresh of the playlist list.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.generation
    }

    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<Vec<PlaylistSummary>, ApiError>,
    ) -> Option<String> {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "dropping stale playlists response");
            return None;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.selected = 0;
                self.state = LoadState::Ready;
                None
            }
            Err(e) => {
                let msg = format!("Could not load playlists: {}", e);
                self.state = LoadState::Failed(msg.clone());
                Some(msg)
            }
        }
    }

    /// Playlists matching the filter, best match first. Without a filter
    /// the server order is kept.
    pub fn visible(&self) -> Vec<&PlaylistSummary> {
        if self.filter.is_empty() {
            return self.items.iter().collect();
        }
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &PlaylistSummary)> = self
            .items
            .iter()
            .filter_map(|p| matcher.fuzzy_match(&p.name, &self.filter).map(|s| (s, p)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, p)| p).collect()
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.selected = 0;
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.selected = step(self.selected, self.visible().len(), delta);
    }

    pub fn selected_item(&self) -> Option<&PlaylistSummary> {
        self.visible().get(self.selected).copied()
    }

    /// Route of the highlighted playlist, if its uri names an owner and id.
    pub fn selected_route(&self) -> Option<Route> {
        let (username, playlist_id) = self.selected_item()?.route_parts()?;
        Some(Route::Playlist {
            username,
            playlist_id,
        })
    }
}
