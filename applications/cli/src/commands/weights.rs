//! Smart-queue weight inspection

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::library::find_song;
use chrono::{DateTime, Utc};
use serde::Serialize;
use smart_core::{Song, SongId};
use smart_playback::{SmartSelector, WeightBreakdown};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateWeight {
    pub song_id: SongId,
    pub title: String,
    pub artist: String,
    pub breakdown: WeightBreakdown,
    /// Probability of being picked next
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightReport {
    pub current: SongId,
    pub candidates: Vec<CandidateWeight>,
}

/// Weigh every queue entry against `current` (the first song by default)
pub fn weights(
    config: &CliConfig,
    songs: &[Song],
    current: Option<&str>,
    now: DateTime<Utc>,
) -> Result<WeightReport> {
    let (index, current) = match current {
        Some(id) => find_song(songs, id)?,
        None => songs
            .first()
            .map(|song| (0, song))
            .ok_or_else(|| CliError::Library("library is empty".to_string()))?,
    };

    let selector = SmartSelector::new(config.playback.weights);
    let scored = selector.breakdown(songs, current, Some(index), now);
    let total: f64 = scored.iter().map(|(_, b)| b.weight).sum();

    let candidates = scored
        .into_iter()
        .map(|(song, breakdown)| CandidateWeight {
            song_id: song.id.clone(),
            title: song.title.clone(),
            artist: song.artist.clone(),
            breakdown,
            share: if total > 0.0 {
                breakdown.weight / total
            } else {
                0.0
            },
        })
        .collect();

    Ok(WeightReport {
        current: current.id.clone(),
        candidates,
    })
}
