//! Smart Player - Mini Player Sync
//!
//! Keeps a secondary playback surface (the mini player window) informed of
//! the main player's state and turns its commands into player actions.
//!
//! The channel gives no delivery guarantees. Snapshots are complete, so a
//! lost push is repaired by the next one, and every command is either
//! idempotent or superseded by the following snapshot.

pub mod config;
pub mod error;
pub mod mini_player;
pub mod protocol;
pub mod sink;
pub mod snapshot;

pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use mini_player::{apply_command, MiniPlayerSync};
pub use protocol::{
    Envelope, InboundMessage, RemoteCommand, COMMAND_EVENT, REQUEST_STATE_EVENT, STATE_SYNC_EVENT,
};
pub use sink::{ChannelSink, JsonLinesSink, SnapshotSink};
pub use snapshot::{SongSummary, SyncSnapshot};
