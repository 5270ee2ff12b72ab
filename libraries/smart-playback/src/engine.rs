//! Playback engine adapter
//!
//! The engine wraps a lower-level decode/play primitive. Commands go in
//! synchronously; lifecycle notifications come back later as
//! [`EngineEvent`]s tagged with the [`LoadTicket`] of the load they belong
//! to, so results of superseded loads can be recognized and dropped.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one `load` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadTicket(pub u64);

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Audio engine commands
pub trait PlaybackEngine: Send {
    /// Start loading `source`; completion is reported as an event with `ticket`
    fn load(&mut self, ticket: LoadTicket, source: &str) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Seek to `position` seconds
    fn seek(&mut self, position: f64) -> Result<()>;

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Set playback rate (1.0 = normal)
    fn set_rate(&mut self, rate: f32) -> Result<()>;

    /// Drop the loaded source
    fn unload(&mut self) -> Result<()> {
        self.pause()
    }
}

/// Engine lifecycle notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Source decoded and ready
    Loaded { ticket: LoadTicket, duration: f64 },

    /// Playback actually started
    PlayStarted { ticket: LoadTicket },

    /// Periodic position report
    Progress { ticket: LoadTicket, position: f64 },

    /// Source played to the end
    Ended { ticket: LoadTicket },

    /// Source could not be loaded
    LoadError { ticket: LoadTicket, message: String },

    /// Engine refused to start playback (e.g. autoplay lock)
    PlayError { ticket: LoadTicket, message: String },

    /// Engine may start playback again after a play error
    Unlocked { ticket: LoadTicket },
}

impl EngineEvent {
    /// Load this event belongs to
    pub fn ticket(&self) -> LoadTicket {
        match self {
            EngineEvent::Loaded { ticket, .. }
            | EngineEvent::PlayStarted { ticket }
            | EngineEvent::Progress { ticket, .. }
            | EngineEvent::Ended { ticket }
            | EngineEvent::LoadError { ticket, .. }
            | EngineEvent::PlayError { ticket, .. }
            | EngineEvent::Unlocked { ticket } => *ticket,
        }
    }
}
