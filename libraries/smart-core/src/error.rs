/// Core error types for Smart Player
use crate::types::SongId;
use thiserror::Error;

/// Result type alias using `SmartError`
pub type Result<T> = std::result::Result<T, SmartError>;

/// Core error type for Smart Player
#[derive(Error, Debug)]
pub enum SmartError {
    /// Catalog (song library) errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Song not found
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SmartError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
