//! In-memory song catalog

use crate::error::{Result, SmartError};
use crate::traits::SongCatalog;
use crate::types::{Song, SongId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Song catalog held in memory
///
/// Keeps library order. Used by the CLI (loaded from a JSON export) and as
/// the catalog double in tests.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    songs: RwLock<Vec<Song>>,
}

impl MemoryCatalog {
    /// Create a catalog from existing songs
    pub fn new(songs: Vec<Song>) -> Self {
        Self {
            songs: RwLock::new(songs),
        }
    }

    /// Number of songs in the catalog
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of every song, in library order
    pub fn snapshot(&self) -> Vec<Song> {
        self.read().clone()
    }

    /// Insert a song, replacing any song with the same ID
    pub fn upsert(&self, song: Song) {
        let mut songs = self.write();
        match songs.iter_mut().find(|s| s.id == song.id) {
            Some(existing) => *existing = song,
            None => songs.push(song),
        }
    }

    // The lock only guards plain data, so a poisoned lock still holds a
    // consistent song list.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Song>> {
        self.songs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Song>> {
        self.songs.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SongCatalog for MemoryCatalog {
    async fn list(&self) -> Result<Vec<Song>> {
        Ok(self.snapshot())
    }

    async fn get(&self, id: &SongId) -> Result<Option<Song>> {
        Ok(self.read().iter().find(|s| &s.id == id).cloned())
    }

    async fn record_play(&self, id: &SongId, at: DateTime<Utc>) -> Result<()> {
        let mut songs = self.write();
        let song = songs
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| SmartError::SongNotFound(id.clone()))?;
        song.mark_played(at);
        tracing::debug!(song_id = %id, play_count = song.play_count, "Recorded play");
        Ok(())
    }
}
