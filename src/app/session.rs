//! App-wide state fed by server push events.
//!
//! The [`Session`] is the context handed to every [`EventBus`] handler. The
//! subscriptions registered here live as long as the app; view-scoped ones
//! are added and removed by the controllers.

use crate::events::{EventBus, EventKind, LogEntry, LoginInfo, ServerEvent, TransportStatus};
use crate::player::{ProgressEstimator, TickMode};
use std::collections::VecDeque;
use tracing::info;

/// User messages kept for the messages popup.
pub const MESSAGE_CAPACITY: usize = 100;

/// State of the log view, written by its view-scoped subscription.
#[derive(Debug, Clone, Default)]
pub struct LogViewState {
    /// Lines received while the view was open
    pub received: usize,
    /// Rows scrolled up from the tail; 0 follows new lines
    pub scroll_back: usize,
}

#[derive(Debug)]
pub struct Session {
    pub playback: ProgressEstimator,
    pub messages: VecDeque<String>,
    pub logs: VecDeque<LogEntry>,
    log_capacity: usize,
    pub transport: TransportStatus,
    pub server_state: Option<String>,
    pub login: Option<LoginInfo>,
    pub log_view: LogViewState,
    notices: Vec<String>,
}

impl Session {
    pub fn new(increment_secs: f64, mode: TickMode, log_capacity: usize) -> Self {
        Self {
            playback: ProgressEstimator::new(increment_secs, mode),
            messages: VecDeque::new(),
            logs: VecDeque::with_capacity(log_capacity.min(1024)),
            log_capacity: log_capacity.max(1),
            transport: TransportStatus::Connecting,
            server_state: None,
            login: None,
            log_view: LogViewState::default(),
            notices: Vec::new(),
        }
    }

    pub fn push_log(&mut self, entry: LogEntry) {
        if self.logs.len() == self.log_capacity {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    pub fn push_message(&mut self, message: String) {
        if self.messages.len() == MESSAGE_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Queue a toast for the shell to show.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn is_connected(&self) -> bool {
        self.transport == TransportStatus::Connected
    }
}

/// Register the subscriptions that live for the whole app.
pub fn register(bus: &mut EventBus<Session>) {
    bus.subscribe(EventKind::UserMessage, |s, ev| {
        if let ServerEvent::UserMessage(msg) = ev {
            s.push_message(msg.clone());
            s.notify(format!("✉ {}", msg));
        }
        Ok(())
    });

    bus.subscribe(EventKind::Log, |s, ev| {
        if let ServerEvent::Log(entry) = ev {
            s.push_log(entry.clone());
        }
        Ok(())
    });

    bus.subscribe(EventKind::ConnectionState, |s, ev| {
        if let ServerEvent::ConnectionState(state) = ev {
            info!("server connection state: {state}");
            s.server_state = Some(state.clone());
        }
        Ok(())
    });

    bus.subscribe(EventKind::ConnectionError, |s, ev| {
        if let ServerEvent::ConnectionError(err) = ev {
            s.notify(format!("❌ Connection error: {}", err));
        }
        Ok(())
    });

    bus.subscribe(EventKind::StreamingError, |s, ev| {
        if let ServerEvent::StreamingError(err) = ev {
            s.notify(format!("❌ Streaming error: {}", err));
        }
        Ok(())
    });

    bus.subscribe(EventKind::LoggedIn, |s, ev| {
        if let ServerEvent::LoggedIn(login) = ev {
            s.login = Some(login.clone());
        }
        Ok(())
    });

    bus.subscribe(EventKind::LoggedOut, |s, _| {
        s.login = None;
        s.notify("Logged out");
        Ok(())
    });

    // Playback: the estimator is the only consumer of these three.
    bus.subscribe(EventKind::PlayTrack, |s, ev| {
        if let ServerEvent::PlayTrack(link) = ev {
            s.playback.on_track_started(link);
        }
        Ok(())
    });

    bus.subscribe(EventKind::TrackEnd, |s, _| {
        s.playback.on_track_ended();
        Ok(())
    });

    bus.subscribe(EventKind::PlayTokenLost, |s, _| {
        s.playback.on_paused();
        s.notify("⏸ Playback taken over by another device");
        Ok(())
    });

    bus.subscribe(EventKind::PlayTrackFailed, |s, ev| {
        if let ServerEvent::PlayTrackFailed(link) = ev {
            s.notify(format!("❌ Failed to play {}", link.label()));
        }
        Ok(())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TrackLink;

    fn setup() -> (EventBus<Session>, Session) {
        let mut bus = EventBus::new();
        register(&mut bus);
        (bus, Session::new(0.1, TickMode::Fixed, 3))
    }

    #[test]
    fn test_log_ring_is_bounded() {
        let (mut bus, mut s) = setup();
        for i in 0..5 {
            let ev = ServerEvent::Log(LogEntry {
                level: None,
                module: None,
                message: format!("line {i}"),
            });
            bus.publish(&mut s, &ev);
        }
        let lines: Vec<&str> = s.logs.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_playback_events_drive_estimator() {
        let (mut bus, mut s) = setup();
        let start = ServerEvent::PlayTrack(TrackLink {
            uri: Some("spotify:track:x".into()),
            name: Some("X".into()),
            duration: Some(180.0),
        });
        bus.publish(&mut s, &start);
        assert!(s.playback.is_playing());

        bus.publish(&mut s, &ServerEvent::PlayTokenLost);
        assert!(!s.playback.is_playing());
        assert_eq!(s.take_notices().len(), 1);

        bus.publish(&mut s, &ServerEvent::TrackEnd);
        assert_eq!(s.playback.track_name(), None);
    }

    #[test]
    fn test_user_messages_accumulate() {
        let (mut bus, mut s) = setup();
        bus.publish(&mut s, &ServerEvent::UserMessage("one".into()));
        bus.publish(&mut s, &ServerEvent::UserMessage("two".into()));
        assert_eq!(s.messages, vec!["one", "two"]);
        assert_eq!(s.take_notices(), vec!["✉ one", "✉ two"]);
        assert!(s.take_notices().is_empty());
    }

    #[test]
    fn test_user_messages_are_bounded() {
        let (mut bus, mut s) = setup();
        for i in 0..MESSAGE_CAPACITY + 5 {
            bus.publish(&mut s, &ServerEvent::UserMessage(format!("msg {i}")));
        }
        assert_eq!(s.messages.len(), MESSAGE_CAPACITY);
        assert_eq!(s.messages.front().map(String::as_str), Some("msg 5"));
        assert_eq!(
            s.messages.back().map(String::as_str),
            Some(format!("msg {}", MESSAGE_CAPACITY + 4).as_str())
        );
    }
}
