//! Typed server push events.
//!
//! The server pushes a fixed, closed set of named events over SSE. Each name
//! maps to exactly one [`ServerEvent`] variant so that subscribers can match
//! exhaustively instead of dispatching on strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod bus;
pub mod relay;
pub mod sse;

pub use bus::{EventBus, SubscriptionId};
pub use relay::{EventRelay, TransportStatus};
pub use sse::{SseDecoder, SseFrame};

/// Every event name the server is known to emit 📡
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    ConnectionError,
    ConnectionState,
    Test,
    Log,
    LoggedIn,
    LoggedOut,
    PlayTokenLost,
    PlayTrack,
    PlayTrackFailed,
    StreamingError,
    TrackEnd,
    UserMessage,
}

impl EventKind {
    pub const ALL: [EventKind; 12] = [
        EventKind::ConnectionError,
        EventKind::ConnectionState,
        EventKind::Test,
        EventKind::Log,
        EventKind::LoggedIn,
        EventKind::LoggedOut,
        EventKind::PlayTokenLost,
        EventKind::PlayTrack,
        EventKind::PlayTrackFailed,
        EventKind::StreamingError,
        EventKind::TrackEnd,
        EventKind::UserMessage,
    ];

    /// Wire name used in the `event:` field of the stream.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::ConnectionError => "connection-error",
            EventKind::ConnectionState => "connection-state",
            EventKind::Test => "event-test",
            EventKind::Log => "log",
            EventKind::LoggedIn => "logged-in",
            EventKind::LoggedOut => "logged-out",
            EventKind::PlayTokenLost => "play-token-lost",
            EventKind::PlayTrack => "play-track",
            EventKind::PlayTrackFailed => "play-track-failed",
            EventKind::StreamingError => "streaming-error",
            EventKind::TrackEnd => "track-end",
            EventKind::UserMessage => "user-message",
        }
    }

    pub fn parse(name: &str) -> Option<EventKind> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("unknown event type `{0}`")]
    UnknownEvent(String),
    #[error("malformed `{kind}` payload: {source}")]
    MalformedPayload {
        kind: EventKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Track reference carried by `play-track` and `play-track-failed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackLink {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Seconds
    #[serde(default, alias = "durationSeconds", alias = "duration_secs")]
    pub duration: Option<f64>,
}

impl TrackLink {
    /// Best human-readable label: the name, else the uri.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.uri.as_deref())
            .unwrap_or("unknown track")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: Option<String>,
    pub module: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginInfo {
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    ConnectionError(String),
    ConnectionState(String),
    Test(serde_json::Value),
    Log(LogEntry),
    LoggedIn(LoginInfo),
    LoggedOut,
    PlayTokenLost,
    PlayTrack(TrackLink),
    PlayTrackFailed(TrackLink),
    StreamingError(String),
    TrackEnd,
    UserMessage(String),
}

// Payloads arrive either as bare strings or as small objects depending on
// the server revision, so both shapes are accepted.

/// Keys that carry the text of an object payload, most specific first.
const TEXT_KEYS: [&str; 4] = ["message", "description", "error", "state"];

/// Text of a string-ish payload. Objects yield their first text key, read
/// the same way, so `{"error": {"description": ..}}` unwraps too. Anything
/// else is shown as JSON.
fn text_payload(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(mut map) => {
            match TEXT_KEYS.iter().find_map(|key| map.remove(*key)) {
                Some(inner) => text_payload(inner),
                None => serde_json::Value::Object(map).to_string(),
            }
        }
        other => value_to_text(other),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LogPayload {
    Text(String),
    Entry {
        #[serde(default)]
        level: Option<serde_json::Value>,
        #[serde(default)]
        module: Option<String>,
        #[serde(alias = "msg")]
        message: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LoginPayload {
    User {
        #[serde(alias = "username")]
        user: String,
    },
    Other(serde_json::Value),
}

fn value_to_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl ServerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ServerEvent::ConnectionError(_) => EventKind::ConnectionError,
            ServerEvent::ConnectionState(_) => EventKind::ConnectionState,
            ServerEvent::Test(_) => EventKind::Test,
            ServerEvent::Log(_) => EventKind::Log,
            ServerEvent::LoggedIn(_) => EventKind::LoggedIn,
            ServerEvent::LoggedOut => EventKind::LoggedOut,
            ServerEvent::PlayTokenLost => EventKind::PlayTokenLost,
            ServerEvent::PlayTrack(_) => EventKind::PlayTrack,
            ServerEvent::PlayTrackFailed(_) => EventKind::PlayTrackFailed,
            ServerEvent::StreamingError(_) => EventKind::StreamingError,
            ServerEvent::TrackEnd => EventKind::TrackEnd,
            ServerEvent::UserMessage(_) => EventKind::UserMessage,
        }
    }

    /// Decode a named frame into its typed variant.
    ///
    /// The payload must be valid JSON; an empty payload is read as `null`.
    pub fn decode(name: &str, data: &str) -> Result<ServerEvent, EventError> {
        let kind = EventKind::parse(name).ok_or_else(|| EventError::UnknownEvent(name.to_string()))?;
        let malformed = |source| EventError::MalformedPayload { kind, source };

        let value: serde_json::Value = if data.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(data).map_err(malformed)?
        };

        let event = match kind {
            EventKind::ConnectionError => {
                ServerEvent::ConnectionError(text_payload(value))
            }
            EventKind::ConnectionState => {
                ServerEvent::ConnectionState(text_payload(value))
            }
            EventKind::StreamingError => {
                ServerEvent::StreamingError(text_payload(value))
            }
            EventKind::UserMessage => {
                ServerEvent::UserMessage(text_payload(value))
            }
            EventKind::Test => ServerEvent::Test(value),
            EventKind::Log => {
                let entry = match serde_json::from_value::<LogPayload>(value).map_err(malformed)? {
                    LogPayload::Text(message) => LogEntry { level: None, module: None, message },
                    LogPayload::Entry { level, module, message } => LogEntry {
                        level: level.map(value_to_text),
                        module,
                        message,
                    },
                };
                ServerEvent::Log(entry)
            }
            EventKind::LoggedIn => {
                let user = match serde_json::from_value::<LoginPayload>(value).map_err(malformed)? {
                    LoginPayload::User { user } => Some(user),
                    LoginPayload::Other(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
                    LoginPayload::Other(_) => None,
                };
                ServerEvent::LoggedIn(LoginInfo { user })
            }
            EventKind::LoggedOut => ServerEvent::LoggedOut,
            EventKind::PlayTokenLost => ServerEvent::PlayTokenLost,
            EventKind::TrackEnd => ServerEvent::TrackEnd,
            EventKind::PlayTrack => ServerEvent::PlayTrack(serde_json::from_value(value).map_err(malformed)?),
            EventKind::PlayTrackFailed => {
                ServerEvent::PlayTrackFailed(serde_json::from_value(value).map_err(malformed)?)
            }
        };
        Ok(event)
    }
}
