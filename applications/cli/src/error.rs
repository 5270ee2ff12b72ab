use thiserror::Error;

/// CLI errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Library error: {0}")]
    Library(String),

    #[error("Song not found: {0}")]
    SongNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] smart_core::SmartError),

    #[error(transparent)]
    Sync(#[from] smart_sync::SyncError),
}

pub type Result<T> = std::result::Result<T, CliError>;
