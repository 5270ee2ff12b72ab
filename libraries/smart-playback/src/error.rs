//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// The store itself never fails; these come from the engine integration
/// and from catalog lookups.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The playback engine rejected a command
    #[error("Engine error: {0}")]
    Engine(String),

    /// No song is loaded and ready in the engine
    #[error("No song loaded")]
    NoSongLoaded,

    /// Catalog or domain error
    #[error(transparent)]
    Core(#[from] smart_core::SmartError),
}

impl PlaybackError {
    /// Create an engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
