pub mod progress;

use serde::{Deserialize, Serialize};

pub use progress::{ProgressEstimator, ProgressTimer, TickMode, DEFAULT_INCREMENT_SECS, DEFAULT_TICK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Playing,
    Paused,
    Stopped,
}
