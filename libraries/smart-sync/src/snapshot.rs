//! State pushed to the mini player

use serde::{Deserialize, Serialize};
use smart_core::{Song, SongId};
use smart_playback::PlayerStore;

/// What the mini player shows about a song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongSummary {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl From<&Song> for SongSummary {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id.clone(),
            title: song.title.clone(),
            artist: song.artist.clone(),
            cover_url: song.cover_url.clone(),
        }
    }
}

/// Externally relevant subset of the player state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    pub current_song: Option<SongSummary>,
    pub is_playing: bool,
    pub volume: f32,
    pub progress: f64,
    pub duration: f64,
}

impl SyncSnapshot {
    /// Read the snapshot fields from a store
    pub fn capture(store: &PlayerStore) -> Self {
        Self {
            current_song: store.current_song().map(SongSummary::from),
            is_playing: store.is_playing(),
            volume: store.volume(),
            progress: store.progress(),
            duration: store.duration(),
        }
    }
}
