//! Smart-next selection
//!
//! Weighted-random pick of the next song, biased toward what the listener
//! likes (favorites, frequently played) and what fits the current song
//! (genre, artist, album, energy), with variety and discovery signals.
//!
//! Every candidate starts at `base` and collects additive contributions:
//!
//! | Signal | Contribution |
//! |--------|--------------|
//! | favorite | `+favorite` |
//! | play count | `+play_count * count / max_count` |
//! | same genre | `+genre_match` |
//! | same artist | `+artist_match` |
//! | same album | `+album_match` |
//! | energy | `+(1 - |Δenergy|) * energy_similarity` |
//! | played < 2 h ago | `-recent_2h_penalty` |
//! | played < 24 h ago | `-recent_24h_penalty` |
//! | added < 7 days ago | `+freshness * (1 - days / 7)` |
//! | never played | `+never_played` |
//!
//! The sum is floored at `floor`, so every candidate keeps a chance.

use crate::random::RandomSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smart_core::Song;

const MILLIS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;
const MILLIS_PER_DAY: f64 = 24.0 * MILLIS_PER_HOUR;

/// Signal weights for smart-next selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartQueueWeights {
    /// Starting weight of every candidate
    pub base: f64,
    /// Bonus for favorites
    pub favorite: f64,
    /// Bonus for the most-played candidate, scaled down for the rest
    pub play_count: f64,
    /// Bonus when genres match
    pub genre_match: f64,
    /// Bonus when artists match
    pub artist_match: f64,
    /// Bonus when albums match
    pub album_match: f64,
    /// Bonus for identical energy, scaled down with the difference
    pub energy_similarity: f64,
    /// Penalty for songs played within the last 2 hours
    pub recent_2h_penalty: f64,
    /// Penalty for songs played within the last 24 hours
    pub recent_24h_penalty: f64,
    /// Bonus for songs added today, decaying to zero over the window
    pub freshness: f64,
    /// Length of the freshness window in days
    pub freshness_window_days: f64,
    /// Bonus for songs never played
    pub never_played: f64,
    /// Lowest weight any candidate can have
    pub floor: f64,
}

impl Default for SmartQueueWeights {
    fn default() -> Self {
        Self {
            base: 1.0,
            favorite: 4.0,
            play_count: 5.0,
            genre_match: 2.0,
            artist_match: 1.5,
            album_match: 1.0,
            energy_similarity: 2.0,
            recent_2h_penalty: 1.0,
            recent_24h_penalty: 0.5,
            freshness: 2.0,
            freshness_window_days: 7.0,
            never_played: 1.0,
            floor: 0.1,
        }
    }
}

/// Per-signal contributions to one candidate's weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WeightBreakdown {
    pub base: f64,
    pub favorite: f64,
    pub play_count: f64,
    pub genre: f64,
    pub artist: f64,
    pub album: f64,
    pub energy: f64,
    /// Zero or negative
    pub recency: f64,
    pub freshness: f64,
    pub never_played: f64,
    /// Final weight after the floor
    pub weight: f64,
}

impl WeightBreakdown {
    /// Sum of all contributions before the floor is applied
    pub fn raw(&self) -> f64 {
        self.base
            + self.favorite
            + self.play_count
            + self.genre
            + self.artist
            + self.album
            + self.energy
            + self.recency
            + self.freshness
            + self.never_played
    }
}

/// Smart-next selector
///
/// Pure computation: all randomness comes from the `RandomSource` passed in,
/// all time from the `now` argument.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmartSelector {
    weights: SmartQueueWeights,
}

impl SmartSelector {
    /// Create a selector with custom weights
    pub fn new(weights: SmartQueueWeights) -> Self {
        Self { weights }
    }

    /// Active weights
    pub fn weights(&self) -> &SmartQueueWeights {
        &self.weights
    }

    /// Pick the next song from `queue`
    ///
    /// The entry at `exclude_index` (the playing position) is not a
    /// candidate; duplicates of it elsewhere in the queue are.
    ///
    /// Returns `None` when there is no current song, the queue has at most
    /// one entry, or no candidate is left.
    pub fn select_next<'a>(
        &self,
        queue: &'a [Song],
        current: Option<&Song>,
        exclude_index: Option<usize>,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Option<&'a Song> {
        let current = current?;
        if queue.len() <= 1 {
            return None;
        }

        let candidates: Vec<&Song> = queue
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != exclude_index)
            .map(|(_, song)| song)
            .collect();
        let first = *candidates.first()?;

        let max_play_count = max_play_count(&candidates);
        let weights: Vec<f64> = candidates
            .iter()
            .map(|song| self.score(song, current, max_play_count, now).weight)
            .collect();
        let total: f64 = weights.iter().sum();

        // Inverse CDF by linear scan in queue order
        let mut remaining = rng.next_f64() * total;
        for (song, weight) in candidates.iter().zip(&weights) {
            remaining -= weight;
            if remaining <= 0.0 {
                return Some(song);
            }
        }

        Some(first)
    }

    /// Weight breakdown of every candidate, in queue order
    ///
    /// Same candidate set and normalization as [`Self::select_next`].
    pub fn breakdown<'a>(
        &self,
        queue: &'a [Song],
        current: &Song,
        exclude_index: Option<usize>,
        now: DateTime<Utc>,
    ) -> Vec<(&'a Song, WeightBreakdown)> {
        let candidates: Vec<&Song> = queue
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != exclude_index)
            .map(|(_, song)| song)
            .collect();
        let max_play_count = max_play_count(&candidates);

        candidates
            .into_iter()
            .map(|song| (song, self.score(song, current, max_play_count, now)))
            .collect()
    }

    /// Score one candidate against the current song
    ///
    /// `max_play_count` is the normalizer for the play-count signal and
    /// must be at least 1.
    pub fn score(
        &self,
        candidate: &Song,
        current: &Song,
        max_play_count: f64,
        now: DateTime<Utc>,
    ) -> WeightBreakdown {
        let w = &self.weights;
        let mut b = WeightBreakdown {
            base: w.base,
            ..WeightBreakdown::default()
        };

        if candidate.is_favorite {
            b.favorite = w.favorite;
        }

        b.play_count = w.play_count * (f64::from(candidate.play_count) / max_play_count);

        if same_label(candidate.genre.as_deref(), current.genre.as_deref()) {
            b.genre = w.genre_match;
        }

        if candidate.artist == current.artist {
            b.artist = w.artist_match;
        }

        if same_label(candidate.album.as_deref(), current.album.as_deref()) {
            b.album = w.album_match;
        }

        if let (Some(a), Some(c)) = (candidate.energy, current.energy) {
            b.energy = (1.0 - (a - c).abs()) * w.energy_similarity;
        }

        if let Some(last_played) = candidate.last_played {
            let hours = elapsed_millis(last_played, now) / MILLIS_PER_HOUR;
            if hours < 2.0 {
                b.recency = -w.recent_2h_penalty;
            } else if hours < 24.0 {
                b.recency = -w.recent_24h_penalty;
            }
        }

        // Future-dated additions count as added right now
        let days = (elapsed_millis(candidate.added_at, now) / MILLIS_PER_DAY).max(0.0);
        if days < w.freshness_window_days {
            b.freshness = w.freshness * (1.0 - days / w.freshness_window_days);
        }

        if candidate.never_played() {
            b.never_played = w.never_played;
        }

        b.weight = b.raw().max(w.floor);
        b
    }
}

fn max_play_count(candidates: &[&Song]) -> f64 {
    let max = candidates.iter().map(|s| s.play_count).max().unwrap_or(0);
    f64::from(max.max(1))
}

/// Both labels present, non-empty and equal
fn same_label(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => !a.is_empty() && a == b,
        _ => false,
    }
}

fn elapsed_millis(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - since).num_milliseconds() as f64
}
