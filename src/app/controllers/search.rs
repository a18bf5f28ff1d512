use super::{step, LoadState};
use crate::api::{ApiError, LoadPosition, LoadRequest, SearchResults, Track};
use tracing::debug;

/// Context name the server expects for tracks loaded from a search.
pub const SEARCH_CONTEXT: &str = "search";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug, Default)]
pub struct SearchController {
    /// Text in the search box
    pub input: String,
    /// Query behind `results`
    query: Option<String>,
    /// Query of the request in flight
    pending: Option<String>,
    generation: u64,
    pub results: Option<SearchResults>,
    pub state: LoadState,
    /// Index into `results.tracks`
    pub selected: usize,
}

impl SearchController {
    /// Start a search for `query`. Blank queries are ignored.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.generation += 1;
        self.pending = Some(query.to_string());
        self.state = LoadState::Loading;
        Some(SearchTicket {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Apply a finished search. Results from anything but the latest
    /// request are dropped. On failure the previous results and their query
    /// stay, and the returned message should be shown to the user.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<SearchResults, ApiError>,
    ) -> Option<String> {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "dropping stale search response");
            return None;
        }
        match result {
            Ok(results) => {
                self.query = self.pending.take();
                self.results = Some(results);
                self.selected = 0;
                self.state = LoadState::Ready;
                None
            }
            Err(e) => {
                self.pending = None;
                let msg = format!("Search failed: {}", e);
                self.state = LoadState::Failed(msg.clone());
                Some(msg)
            }
        }
    }

    /// Query the shown results belong to.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn pending_query(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tracks(&self) -> &[Track] {
        self.results.as_ref().map(|r| r.tracks.as_slice()).unwrap_or(&[])
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.selected = step(self.selected, self.tracks().len(), delta);
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.tracks().get(self.selected)
    }

    /// `/player/load` for the highlighted track, in the search context.
    pub fn load_selected(&self) -> Option<LoadRequest> {
        let track = self.selected_track()?;
        Some(LoadRequest {
            ctx: SEARCH_CONTEXT.to_string(),
            position: LoadPosition::Index(self.selected),
            uri: track.uri.clone(),
            query: self.query.clone(),
        })
    }
}
