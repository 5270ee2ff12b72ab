//! Library export loading
//!
//! Accepts the app's JSON export: either a bare array of songs or an
//! object with a `songs` array.

use crate::error::{CliError, Result};
use serde::Deserialize;
use smart_core::{MemoryCatalog, Song, SongId};
use std::collections::HashSet;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum LibraryFile {
    Songs(Vec<Song>),
    Export { songs: Vec<Song> },
}

/// Parse a library export
pub fn parse_library(json: &str) -> Result<Vec<Song>> {
    let songs = match serde_json::from_str::<LibraryFile>(json)? {
        LibraryFile::Songs(songs) | LibraryFile::Export { songs } => songs,
    };

    let mut seen = HashSet::new();
    for song in &songs {
        if !seen.insert(&song.id) {
            return Err(CliError::Library(format!("duplicate song id {}", song.id)));
        }
    }

    Ok(songs)
}

/// Read a library export from disk
pub fn load_library(path: &Path) -> Result<Vec<Song>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| CliError::Library(format!("{}: {e}", path.display())))?;
    let songs = parse_library(&json)?;
    tracing::info!(path = %path.display(), songs = songs.len(), "Library loaded");
    Ok(songs)
}

/// Load a library into an in-memory catalog
pub fn load_catalog(path: &Path) -> Result<MemoryCatalog> {
    Ok(MemoryCatalog::new(load_library(path)?))
}

/// Find a song by ID
pub fn find_song<'a>(songs: &'a [Song], id: &str) -> Result<(usize, &'a Song)> {
    let id = SongId::new(id);
    songs
        .iter()
        .enumerate()
        .find(|(_, s)| s.id == id)
        .ok_or_else(|| CliError::SongNotFound(id.to_string()))
}
