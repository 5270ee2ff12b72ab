//! Persisted playback session
//!
//! A periodic save routine outside the player stores the last song,
//! position and volume; at startup the values are fed back once.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smart_core::{Song, SongCatalog, SongId};

/// Saved playback position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Song that was current, if any
    pub song_id: Option<SongId>,

    /// Position in seconds
    pub progress: f64,

    /// Volume (0.0-1.0)
    pub volume: f32,

    /// When the snapshot was taken
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Look up the snapshot's song in the catalog
///
/// Returns `Ok(None)` when the snapshot has no song or the song has since
/// been removed from the library.
pub async fn resolve_session_song(
    catalog: &dyn SongCatalog,
    snapshot: &SessionSnapshot,
) -> Result<Option<Song>> {
    let Some(id) = &snapshot.song_id else {
        return Ok(None);
    };

    let song = catalog.get(id).await?;
    if song.is_none() {
        tracing::info!(song_id = %id, "Saved session song no longer in library");
    }
    Ok(song)
}
