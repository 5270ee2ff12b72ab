use thiserror::Error;

/// Errors on the mini-player channel
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sync channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, SyncError>;
