//! Core types for playback management

use crate::selector::SmartQueueWeights;
use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the queue ends
    #[default]
    None,

    /// Loop the entire queue
    All,

    /// Loop the current song only
    One,
}

impl RepeatMode {
    /// Next mode in the UI cycle: none → all → one → none
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::None,
        }
    }
}

/// Configuration for the player store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: none)
    pub repeat: RepeatMode,

    /// Smart queue enabled (default: true)
    pub smart_queue: bool,

    /// Seconds into a song after which "previous" restarts it (default: 3.0)
    pub restart_threshold_secs: f64,

    /// Smart queue signal weights
    pub weights: SmartQueueWeights,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            shuffle: false,
            repeat: RepeatMode::None,
            smart_queue: true,
            restart_threshold_secs: 3.0,
            weights: SmartQueueWeights::default(),
        }
    }
}
