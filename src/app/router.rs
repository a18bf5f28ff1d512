//! Client-side routes and navigation history.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;

/// Everything but RFC 3986 unreserved characters is escaped in a segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Index,
    Search,
    Playlists,
    Playlist {
        username: String,
        playlist_id: String,
    },
    Log,
}

impl Route {
    /// Parse a path such as `/user/o.p/playlist/4xYz`. Query strings and a
    /// trailing slash are tolerated; anything else unknown is `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        if !path.starts_with('/') {
            return None;
        }
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] => Some(Route::Index),
            ["search"] => Some(Route::Search),
            ["playlists"] => Some(Route::Playlists),
            ["log"] => Some(Route::Log),
            ["user", user, "playlist", id] => {
                let username = decode_segment(user)?;
                let playlist_id = decode_segment(id)?;
                if username.is_empty() || playlist_id.is_empty() {
                    return None;
                }
                Some(Route::Playlist {
                    username,
                    playlist_id,
                })
            }
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Search => "/search".to_string(),
            Route::Playlists => "/playlists".to_string(),
            Route::Log => "/log".to_string(),
            Route::Playlist {
                username,
                playlist_id,
            } => format!(
                "/user/{}/playlist/{}",
                encode_segment(username),
                encode_segment(playlist_id)
            ),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Index => "Home",
            Route::Search => "Search",
            Route::Playlists => "Playlists",
            Route::Playlist { .. } => "Playlist",
            Route::Log => "Log",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current route plus a back-stack.
#[derive(Debug, Default)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Returns the route that was left, or `None` when already there.
    pub fn navigate(&mut self, route: Route) -> Option<Route> {
        if route == self.current {
            return None;
        }
        let left = std::mem::replace(&mut self.current, route);
        self.history.push(left.clone());
        Some(left)
    }

    /// Pops the back-stack. Returns the route that was left.
    pub fn back(&mut self) -> Option<Route> {
        let previous = self.history.pop()?;
        Some(std::mem::replace(&mut self.current, previous))
    }
}

fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT).to_string()
}

/// Strict decode: every `%` must start a two-digit hex escape and the
/// result must be UTF-8.
fn decode_segment(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || (bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }
    percent_decode_str(s).decode_utf8().ok().map(|c| c.into_owned())
}
