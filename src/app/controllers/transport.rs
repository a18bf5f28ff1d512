use crate::api::{ApiError, LoadRequest};
use crate::player::ProgressEstimator;
use std::fmt;
use tracing::info;

/// A player command sent to the server. Play and pause carry the local
/// playing flag from before the command so a refusal can restore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play { was_playing: bool },
    Pause { was_playing: bool },
    Load(LoadRequest),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Play { .. } => f.write_str("play"),
            Command::Pause { .. } => f.write_str("pause"),
            Command::Load(req) => write!(f, "load {}", req),
        }
    }
}

/// Play/pause/load. Play and pause update the local estimator right away
/// and roll it back if the server refuses.
#[derive(Debug, Default)]
pub struct TransportController {
    /// Direction of the last play/pause sent. Toggling uses it until a
    /// track is known locally.
    requested_playing: bool,
}

impl TransportController {
    pub fn play(&mut self, playback: &mut ProgressEstimator) -> Command {
        let was_playing = playback.is_playing();
        self.requested_playing = true;
        playback.on_resumed();
        Command::Play { was_playing }
    }

    pub fn pause(&mut self, playback: &mut ProgressEstimator) -> Command {
        let was_playing = playback.is_playing();
        self.requested_playing = false;
        playback.on_paused();
        Command::Pause { was_playing }
    }

    pub fn requested_playing(&self) -> bool {
        self.requested_playing
    }

    pub fn toggle(&mut self, playback: &mut ProgressEstimator) -> Command {
        let playing = if playback.track_name().is_some() {
            playback.is_playing()
        } else {
            self.requested_playing
        };
        if playing {
            self.pause(playback)
        } else {
            self.play(playback)
        }
    }

    /// Returns the toast to show, if any. A refused play or pause is only
    /// undone while the estimator still shows what that command set; a later
    /// command in the other direction wins.
    pub fn complete(
        &mut self,
        command: &Command,
        result: Result<(), ApiError>,
        playback: &mut ProgressEstimator,
    ) -> Option<String> {
        match (command, result) {
            (Command::Load(req), Ok(())) => {
                info!("changed track to {}", req.uri);
                None
            }
            (_, Ok(())) => None,
            (Command::Load(_), Err(e)) => Some(format!("❌ Could not load track: {}", e)),
            (Command::Play { was_playing }, Err(e)) => {
                if playback.is_playing() && !*was_playing {
                    playback.on_paused();
                }
                Some(format!("❌ {} failed: {}", command, e))
            }
            (Command::Pause { was_playing }, Err(e)) => {
                if !playback.is_playing() && *was_playing {
                    playback.on_resumed();
                }
                Some(format!("❌ {} failed: {}", command, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TrackLink;

    fn playing() -> ProgressEstimator {
        let mut est = ProgressEstimator::default();
        est.on_track_started(&TrackLink {
            name: Some("X".into()),
            duration: Some(100.0),
            ..Default::default()
        });
        est
    }

    #[test]
    fn test_toggle_is_optimistic() {
        let mut t = TransportController::default();
        let mut est = playing();
        assert_eq!(t.toggle(&mut est), Command::Pause { was_playing: true });
        assert!(!est.is_playing());
        assert_eq!(t.toggle(&mut est), Command::Play { was_playing: false });
        assert!(est.is_playing());
    }

    #[test]
    fn test_failed_pause_after_later_play_keeps_playing() {
        let mut t = TransportController::default();
        let mut est = playing();
        let pause = t.pause(&mut est);
        let play = t.play(&mut est);
        assert!(est.is_playing());

        // The pause was refused, but the play sent after it stands
        let toast = t.complete(&pause, Err(ApiError::InvalidUrl("x".into())), &mut est);
        assert!(toast.unwrap().contains("pause failed"));
        assert!(est.is_playing());

        assert!(t.complete(&play, Ok(()), &mut est).is_none());
        assert!(est.is_playing());
    }

    #[test]
    fn test_failed_play_after_failed_pause_restores_pause() {
        let mut t = TransportController::default();
        let mut est = playing();
        let pause = t.pause(&mut est);
        let play = t.play(&mut est);
        t.complete(&pause, Err(ApiError::InvalidUrl("x".into())), &mut est);
        t.complete(&play, Err(ApiError::InvalidUrl("x".into())), &mut est);
        assert!(!est.is_playing());
    }

    #[test]
    fn test_toggle_without_known_track_alternates() {
        let mut t = TransportController::default();
        let mut est = ProgressEstimator::default();
        assert_eq!(t.toggle(&mut est), Command::Play { was_playing: false });
        assert!(!est.is_playing());
        assert!(t.requested_playing());
        assert_eq!(t.toggle(&mut est), Command::Pause { was_playing: false });
        assert!(!t.requested_playing());
        assert_eq!(t.toggle(&mut est), Command::Play { was_playing: false });
        assert!(t
            .complete(&Command::Play { was_playing: false }, Err(ApiError::InvalidUrl("x".into())), &mut est)
            .is_some());
        assert!(!est.is_playing());
    }

    #[test]
    fn test_failed_pause_rolls_back() {
        let mut t = TransportController::default();
        let mut est = playing();
        let cmd = t.pause(&mut est);
        let toast = t.complete(&cmd, Err(ApiError::InvalidUrl("x".into())), &mut est);
        assert!(toast.unwrap().contains("pause failed"));
        assert!(est.is_playing());
    }

    #[test]
    fn test_successful_command_is_silent() {
        let mut t = TransportController::default();
        let mut est = playing();
        let cmd = t.pause(&mut est);
        assert!(t.complete(&cmd, Ok(()), &mut est).is_none());
        assert!(!est.is_playing());
    }
}
