/// Song domain type
use crate::types::SongId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A song in the library
///
/// Owned by the catalog. Playback code holds clones and must re-read the
/// catalog when it needs fresh `play_count`/`last_played` values.
///
/// Serialized in camelCase with epoch-millisecond timestamps, which is the
/// shape of the library export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Genre
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Duration in seconds, 0 when unknown
    #[serde(default)]
    pub duration: f64,

    /// Playable source reference (local path or URL)
    pub file_path: String,

    /// Cover art reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,

    /// Number of play starts
    #[serde(default)]
    pub play_count: u32,

    /// Most recent play start
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_played: Option<DateTime<Utc>>,

    /// When the song was added to the library
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,

    /// Loudness/intensity descriptor in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,

    /// User marked the song as favorite
    #[serde(default)]
    pub is_favorite: bool,
}

impl Song {
    /// Create a new song with minimal metadata, added now
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            id: SongId::generate(),
            title: title.into(),
            artist: artist.into(),
            album: None,
            genre: None,
            duration: 0.0,
            file_path: file_path.into(),
            cover_url: None,
            play_count: 0,
            last_played: None,
            added_at: Utc::now(),
            energy: None,
            is_favorite: false,
        }
    }

    /// Whether the song has never been started
    pub fn never_played(&self) -> bool {
        self.play_count == 0
    }

    /// Register a play start at `at`
    pub fn mark_played(&mut self, at: DateTime<Utc>) {
        self.play_count = self.play_count.saturating_add(1);
        self.last_played = Some(at);
    }
}
