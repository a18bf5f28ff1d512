use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    /// Seconds
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Album {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artist: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Artist {
    pub uri: String,
    pub name: String,
}

/// Search response. Older servers answer with only some of the lists, so
/// every list is optional on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub artists: Vec<Artist>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub albums: Vec<Album>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tracks: Vec<Track>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.albums.is_empty() && self.tracks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    /// Track count, when the server includes it
    #[serde(default)]
    pub tracks: Option<u32>,
}

impl PlaylistSummary {
    /// `(username, playlist_id)` from a `spotify:user:{user}:playlist:{id}` uri.
    pub fn route_parts(&self) -> Option<(String, String)> {
        playlist_uri_parts(&self.uri)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Playlist {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistsEnvelope {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub playlists: Vec<PlaylistSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistEnvelope {
    pub playlist: Playlist,
}

/// `{"error": {...}}` body the server sends with handled failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub param: String,
}

pub fn playlist_uri_parts(uri: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = uri.split(':').collect();
    match parts.as_slice() {
        [_, "user", user, "playlist", id] if !user.is_empty() && !id.is_empty() => {
            Some((user.to_string(), id.to_string()))
        }
        _ => None,
    }
}

fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}
