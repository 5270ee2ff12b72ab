/// Core traits for Smart Player
use crate::error::Result;
use crate::types::{Song, SongId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Song catalog trait
///
/// The song library collaborator. Backed by a document store in the desktop
/// shell, by a JSON file in the CLI and by [`crate::MemoryCatalog`] in tests.
///
/// All methods are async to support various storage backends.
#[async_trait]
pub trait SongCatalog: Send + Sync {
    /// List every song in the library
    async fn list(&self) -> Result<Vec<Song>>;

    /// Get a song by ID, `None` if it is not in the library
    async fn get(&self, id: &SongId) -> Result<Option<Song>>;

    /// Record a play start: `play_count += 1`, `last_played = at`
    ///
    /// # Errors
    /// Returns `SmartError::SongNotFound` if the song is not in the library
    async fn record_play(&self, id: &SongId, at: DateTime<Utc>) -> Result<()>;
}
