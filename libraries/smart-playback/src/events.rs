//! Player Events
//!
//! Discrete notifications emitted by the store on state transitions.
//! The engine integration reacts to them (load on song change, transport
//! follows `is_playing`) and observers such as the mini-player sync use
//! them to push snapshots without polling.
//!
//! Progress changes are continuous and have no event.

use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};
use smart_core::SongId;

/// Events emitted by the player store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// A different song (or none) became current
    SongChanged {
        /// ID of the new current song
        song_id: Option<SongId>,
        /// ID of the previous current song
        previous_song_id: Option<SongId>,
    },

    /// The current song was reset to position 0 without changing
    Restarted {
        /// ID of the current song
        song_id: SongId,
    },

    /// Transport flag changed
    PlayingChanged {
        /// New transport flag
        is_playing: bool,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume (0.0-1.0)
        volume: f32,
    },

    /// Duration of the current song changed
    DurationChanged {
        /// Duration in seconds, 0 when unknown
        duration: f64,
    },

    /// Queue contents changed
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Shuffle, repeat or smart-queue toggled
    ModeChanged {
        shuffle: bool,
        repeat: RepeatMode,
        smart_queue: bool,
    },

    /// User-facing error message set or cleared
    ErrorChanged {
        /// Current message, if any
        error: Option<String>,
    },
}
