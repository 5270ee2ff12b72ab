//! Ordered play queue with a bounded cursor
//!
//! The cursor is `None` while the queue is empty or unset, otherwise it
//! always points inside the queue. Every mutation keeps that invariant.

use smart_core::{Song, SongId};
use std::collections::HashMap;

/// Result of removing an entry
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    /// The removed song
    pub song: Song,

    /// The removed entry was under the cursor
    pub was_current: bool,
}

/// Play queue
#[derive(Debug, Clone, Default)]
pub struct Queue {
    songs: Vec<Song>,
    index: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue wholesale
    ///
    /// The cursor value is kept but clamped into the new queue.
    pub fn replace(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        self.index = self.clamp(self.index);
    }

    /// Append a song; the cursor is unaffected
    pub fn push(&mut self, song: Song) {
        self.songs.push(song);
    }

    /// Remove the entry at `index`
    ///
    /// A cursor after the removed entry moves back one so it keeps pointing
    /// at the same song. A cursor on the removed entry stays in place and is
    /// clamped. Returns `None` when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Option<Removed> {
        if index >= self.songs.len() {
            return None;
        }

        let song = self.songs.remove(index);
        let was_current = self.index == Some(index);

        self.index = match self.index {
            Some(i) if i > index => Some(i - 1),
            other => self.clamp(other),
        };

        Some(Removed { song, was_current })
    }

    /// Move the cursor; returns `false` and leaves it untouched when out of range
    pub fn set_index(&mut self, index: usize) -> bool {
        if index < self.songs.len() {
            self.index = Some(index);
            true
        } else {
            false
        }
    }

    /// Cursor position
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Song under the cursor
    pub fn current(&self) -> Option<&Song> {
        self.index.and_then(|i| self.songs.get(i))
    }

    /// Song at `index`
    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    /// First position holding `id`
    pub fn position_of(&self, id: &SongId) -> Option<usize> {
        self.songs.iter().position(|s| &s.id == id)
    }

    /// Queue contents in order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Queue length
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Swap in fresh copies of songs by ID, keeping order and cursor
    pub fn refresh(&mut self, latest: &HashMap<&SongId, &Song>) {
        for song in &mut self.songs {
            if let Some(fresh) = latest.get(&song.id) {
                song.clone_from(fresh);
            }
        }
    }

    fn clamp(&self, index: Option<usize>) -> Option<usize> {
        match self.songs.len() {
            0 => None,
            len => index.map(|i| i.min(len - 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str) -> Song {
        Song {
            id: SongId::new(id),
            ..Song::new(id, "Artist", format!("/music/{id}.mp3"))
        }
    }

    fn queue_of(ids: &[&str]) -> Queue {
        let mut queue = Queue::new();
        queue.replace(ids.iter().map(|id| song(id)).collect());
        queue
    }

    #[test]
    fn new_queue_has_no_cursor() {
        let queue = queue_of(&["a", "b"]);
        assert_eq!(queue.index(), None);
        assert!(queue.current().is_none());
    }

    #[test]
    fn set_index_rejects_out_of_range() {
        let mut queue = queue_of(&["a", "b"]);
        assert!(queue.set_index(1));
        assert!(!queue.set_index(2));
        assert_eq!(queue.index(), Some(1));
    }

    #[test]
    fn remove_before_cursor_shifts_it_back() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_index(2);

        let removed = queue.remove(0).unwrap();
        assert!(!removed.was_current);
        assert_eq!(queue.index(), Some(1));
        assert_eq!(queue.current().unwrap().id.as_str(), "c");
    }

    #[test]
    fn remove_after_cursor_keeps_it() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_index(0);
        queue.remove(2);
        assert_eq!(queue.index(), Some(0));
    }

    #[test]
    fn remove_current_last_entry_clamps() {
        let mut queue = queue_of(&["a", "b"]);
        queue.set_index(1);

        let removed = queue.remove(1).unwrap();
        assert!(removed.was_current);
        assert_eq!(queue.index(), Some(0));
    }

    #[test]
    fn remove_only_entry_clears_cursor() {
        let mut queue = queue_of(&["a"]);
        queue.set_index(0);
        queue.remove(0);
        assert_eq!(queue.index(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut queue = queue_of(&["a"]);
        assert!(queue.remove(3).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn replace_clamps_cursor() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_index(2);

        queue.replace(vec![song("x")]);
        assert_eq!(queue.index(), Some(0));

        queue.replace(Vec::new());
        assert_eq!(queue.index(), None);
    }

    #[test]
    fn refresh_replaces_matching_entries() {
        let mut queue = queue_of(&["a", "b"]);
        queue.set_index(1);
        let mut fresh = song("b");
        fresh.play_count = 9;
        let latest = HashMap::from([(&fresh.id, &fresh)]);

        queue.refresh(&latest);
        assert_eq!(queue.get(1).unwrap().play_count, 9);
        assert_eq!(queue.get(0).unwrap().play_count, 0);
        assert_eq!(queue.index(), Some(1));
    }

    #[test]
    fn position_of_returns_first_match() {
        let queue = queue_of(&["a", "b", "a"]);
        assert_eq!(queue.position_of(&SongId::new("a")), Some(0));
        assert_eq!(queue.position_of(&SongId::new("z")), None);
    }
}
