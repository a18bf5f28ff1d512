//! Client-side playback progress interpolation.
//!
//! The server only pushes discrete playback events (`play-track`,
//! `track-end`, `play-token-lost`). Between them the estimator advances a
//! local offset on every timer tick so the progress bar keeps moving without
//! asking the server for the position.

use super::PlayerState;
use crate::events::TrackLink;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_TICK: Duration = Duration::from_millis(100);
pub const DEFAULT_INCREMENT_SECS: f64 = 0.1;

/// How a tick advances the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickMode {
    /// Fixed increment per tick regardless of how late the tick fired.
    /// Drifts when the timer is not honored exactly, but matches the
    /// server-side web client step for step.
    #[default]
    Fixed,
    /// Advance by the measured time since the previous tick.
    WallClock,
}

#[derive(Debug, Clone)]
pub struct ProgressEstimator {
    track_name: Option<String>,
    track_uri: Option<String>,
    duration_secs: f64,
    offset_secs: f64,
    playing: bool,
    increment_secs: f64,
    mode: TickMode,
}

impl Default for ProgressEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_INCREMENT_SECS, TickMode::Fixed)
    }
}

impl ProgressEstimator {
    pub fn new(increment_secs: f64, mode: TickMode) -> Self {
        Self {
            track_name: None,
            track_uri: None,
            duration_secs: 0.0,
            offset_secs: 0.0,
            playing: false,
            increment_secs,
            mode,
        }
    }

    /// `play-track`: always restarts from zero.
    pub fn on_track_started(&mut self, link: &TrackLink) {
        self.track_name = Some(link.label().to_string());
        self.track_uri = link.uri.clone();
        self.duration_secs = link.duration.filter(|d| d.is_finite() && *d > 0.0).unwrap_or(0.0);
        self.offset_secs = 0.0;
        self.playing = true;
    }

    /// `track-end`: nothing is loaded any more.
    pub fn on_track_ended(&mut self) {
        self.track_name = None;
        self.track_uri = None;
        self.playing = false;
    }

    /// `play-token-lost` or a local pause. The offset is kept.
    pub fn on_paused(&mut self) {
        self.playing = false;
    }

    /// Local play command. Resumes from the kept offset.
    pub fn on_resumed(&mut self) {
        if self.track_name.is_some() {
            self.playing = true;
        }
    }

    /// Advance one timer tick. `elapsed` is only consulted in
    /// [`TickMode::WallClock`]. Returns whether the offset moved.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.playing || self.duration_secs <= 0.0 {
            return false;
        }
        self.offset_secs += match self.mode {
            TickMode::Fixed => self.increment_secs,
            TickMode::WallClock => elapsed.as_secs_f64(),
        };
        true
    }

    /// Offset over duration, in percent, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        if self.duration_secs <= 0.0 || !self.duration_secs.is_finite() {
            return 0.0;
        }
        (self.offset_secs / self.duration_secs * 100.0).clamp(0.0, 100.0)
    }

    /// Progress for display; `None` hides the bar.
    pub fn display_progress(&self) -> Option<f64> {
        self.track_name.as_ref().map(|_| self.progress_percent())
    }

    pub fn track_name(&self) -> Option<&str> {
        self.track_name.as_deref()
    }

    pub fn track_uri(&self) -> Option<&str> {
        self.track_uri.as_deref()
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn offset_secs(&self) -> f64 {
        self.offset_secs
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn mode(&self) -> TickMode {
        self.mode
    }

    pub fn state(&self) -> PlayerState {
        match (&self.track_name, self.playing) {
            (None, _) => PlayerState::Stopped,
            (Some(_), true) => PlayerState::Playing,
            (Some(_), false) => PlayerState::Paused,
        }
    }
}

/// Periodic tick source for the estimator.
///
/// Sends `make(elapsed)` into the app channel every `period`. Cancelling is
/// idempotent and dropping the timer cancels it, so the task never outlives
/// its owner.
pub struct ProgressTimer {
    handle: Option<JoinHandle<()>>,
}

impl ProgressTimer {
    pub fn start<T, F>(period: Duration, tx: mpsc::Sender<T>, make: F) -> Self
    where
        T: Send + 'static,
        F: Fn(Duration) -> T + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last = Instant::now();
            loop {
                interval.tick().await;
                let now = Instant::now();
                let elapsed = now.duration_since(last);
                last = now;
                if tx.send(make(elapsed)).await.is_err() {
                    break;
                }
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Returns true only for the call that actually stopped the task.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for ProgressTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str, duration: f64) -> TrackLink {
        TrackLink {
            uri: Some(format!("spotify:track:{name}")),
            name: Some(name.to_string()),
            duration: Some(duration),
        }
    }

    fn ticks(est: &mut ProgressEstimator, n: usize) {
        for _ in 0..n {
            est.tick(DEFAULT_TICK);
        }
    }

    #[test]
    fn test_offset_is_ticks_times_increment() {
        let mut est = ProgressEstimator::default();
        est.on_track_started(&track("X", 180.0));
        assert_eq!(est.progress_percent(), 0.0);

        ticks(&mut est, 50);
        assert!((est.offset_secs() - 5.0).abs() < 1e-9);
        assert!((est.progress_percent() - 2.777_777).abs() < 1e-3);

        est.on_track_ended();
        assert_eq!(est.track_name(), None);
        assert_eq!(est.display_progress(), None);
    }

    #[test]
    fn test_progress_caps_at_hundred() {
        let mut est = ProgressEstimator::default();
        est.on_track_started(&track("short", 1.0));
        ticks(&mut est, 25);
        assert!(est.offset_secs() > 2.4);
        assert_eq!(est.progress_percent(), 100.0);
    }

    #[test]
    fn test_zero_duration_never_advances() {
        let mut est = ProgressEstimator::default();
        est.on_track_started(&TrackLink {
            name: Some("stream".into()),
            ..Default::default()
        });
        assert!(!est.tick(DEFAULT_TICK));
        assert_eq!(est.progress_percent(), 0.0);
        assert_eq!(est.display_progress(), Some(0.0));
    }

    #[test]
    fn test_track_start_resets_offset() {
        let mut est = ProgressEstimator::default();
        est.on_track_started(&track("a", 100.0));
        ticks(&mut est, 30);
        est.on_paused();
        est.on_track_started(&track("b", 200.0));
        assert_eq!(est.offset_secs(), 0.0);
        assert!(est.is_playing());
        assert_eq!(est.track_name(), Some("b"));
    }

    #[test]
    fn test_pause_keeps_offset_and_resume_continues() {
        let mut est = ProgressEstimator::default();
        est.on_track_started(&track("a", 100.0));
        ticks(&mut est, 10);
        est.on_paused();
        let held = est.offset_secs();
        ticks(&mut est, 10);
        assert_eq!(est.offset_secs(), held);
        assert_eq!(est.state(), PlayerState::Paused);

        est.on_resumed();
        ticks(&mut est, 10);
        assert!((est.offset_secs() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_resume_without_track_stays_stopped() {
        let mut est = ProgressEstimator::default();
        est.on_resumed();
        assert_eq!(est.state(), PlayerState::Stopped);
    }

    #[test]
    fn test_wall_clock_mode_uses_elapsed() {
        let mut est = ProgressEstimator::new(DEFAULT_INCREMENT_SECS, TickMode::WallClock);
        est.on_track_started(&track("a", 10.0));
        est.tick(Duration::from_millis(250));
        est.tick(Duration::from_millis(250));
        assert!((est.offset_secs() - 0.5).abs() < 1e-9);
        assert!((est.progress_percent() - 5.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_timer_ticks_and_cancels_once() {
        let (tx, mut rx) = mpsc::channel::<Duration>(64);
        let mut timer = ProgressTimer::start(Duration::from_millis(5), tx, |elapsed| elapsed);

        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_some());
        assert!(timer.is_active());

        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.is_active());

        // The task owned the only sender; once aborted the channel closes.
        let drained = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }

    #[tokio::test]
    async fn test_timer_stops_on_drop() {
        let (tx, mut rx) = mpsc::channel::<()>(64);
        let timer = ProgressTimer::start(Duration::from_millis(5), tx, |_| ());
        assert!(rx.recv().await.is_some());
        drop(timer);

        let drained = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }
}
