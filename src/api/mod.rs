//! HTTP bindings for the sith server API.
//!
//! Every call is a plain `GET`. Reads return the decoded body; transport
//! commands return `()` on any 2xx.

pub mod models;

use models::{ErrorEnvelope, PlaylistEnvelope, PlaylistsEnvelope};
pub use models::{Album, Artist, Playlist, PlaylistSummary, SearchResults, Track};

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid server url `{0}`")]
    InvalidUrl(String),
}

/// Where to start inside the context being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPosition {
    Index(usize),
    Offset(usize),
}

/// Parameters of `/player/load`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Context: `search` or a playlist uri
    pub ctx: String,
    pub position: LoadPosition,
    pub uri: String,
    /// Search query that produced the context, if any
    pub query: Option<String>,
}

impl fmt::Display for LoadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.uri, self.ctx)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    token: String,
}

impl ApiClient {
    pub fn new(client: Client, base: Url, token: impl Into<String>) -> Self {
        Self {
            client,
            base,
            token: token.into(),
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Joins percent-encoded path segments onto the base url and appends the
    /// query pairs, encoded.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub fn events_url(&self) -> Result<Url, ApiError> {
        self.endpoint(&["events"], &[])
    }

    pub fn search_url(&self, query: &str) -> Result<Url, ApiError> {
        self.endpoint(&["search"], &[("query", query), ("oauth_token", self.token.as_str())])
    }

    pub fn playlists_url(&self, limit: u32) -> Result<Url, ApiError> {
        self.endpoint(&["playlists"], &[("limit", limit.to_string().as_str())])
    }

    pub fn playlist_url(&self, user: &str, id: &str, limit: u32) -> Result<Url, ApiError> {
        self.endpoint(&["user", user, "playlist", id], &[("limit", limit.to_string().as_str())])
    }

    pub fn play_url(&self) -> Result<Url, ApiError> {
        self.endpoint(&["player", "play"], &[("oauth_token", self.token.as_str())])
    }

    pub fn pause_url(&self) -> Result<Url, ApiError> {
        self.endpoint(&["player", "pause"], &[("oauth_token", self.token.as_str())])
    }

    pub fn load_url(&self, req: &LoadRequest) -> Result<Url, ApiError> {
        let (pos_key, pos) = match req.position {
            LoadPosition::Index(i) => ("index", i.to_string()),
            LoadPosition::Offset(o) => ("offset", o.to_string()),
        };
        let mut pairs: Vec<(&str, &str)> = vec![
            ("ctx", req.ctx.as_str()),
            (pos_key, pos.as_str()),
            ("uri", req.uri.as_str()),
        ];
        if let Some(q) = req.query.as_deref() {
            pairs.push(("query", q));
        }
        pairs.push(("oauth_token", self.token.as_str()));
        self.endpoint(&["player", "load"], &pairs)
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                message: error_message(status, &body),
            });
        }
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let body = self.get(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        self.get_json(self.search_url(query)?).await
    }

    pub async fn playlists(&self, limit: u32) -> Result<Vec<PlaylistSummary>, ApiError> {
        let envelope: PlaylistsEnvelope = self.get_json(self.playlists_url(limit)?).await?;
        Ok(envelope.playlists)
    }

    pub async fn playlist(&self, user: &str, id: &str, limit: u32) -> Result<Playlist, ApiError> {
        let envelope: PlaylistEnvelope = self.get_json(self.playlist_url(user, id, limit)?).await?;
        Ok(envelope.playlist)
    }

    pub async fn play(&self) -> Result<(), ApiError> {
        self.get(self.play_url()?).await.map(drop)
    }

    pub async fn pause(&self) -> Result<(), ApiError> {
        self.get(self.pause_url()?).await.map(drop)
    }

    pub async fn load(&self, req: &LoadRequest) -> Result<(), ApiError> {
        self.get(self.load_url(req)?).await.map(drop)
    }
}

/// Prefer the server's own description; fall back to the status reason.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(env) if !env.error.description.is_empty() => {
            if env.error.code.is_empty() {
                env.error.description
            } else {
                format!("{} ({})", env.error.description, env.error.code)
            }
        }
        _ => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}
