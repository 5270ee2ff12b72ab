//! Queue & playback state store
//!
//! Single-writer state machine for the current song, the queue and its
//! cursor, transport flags and the user-facing error. Every action is a
//! synchronous, atomic transition; none of them fail. Side effects (loading
//! audio, pushing snapshots) happen elsewhere, driven by the [`PlayerEvent`]s
//! collected here and handed out by [`PlayerStore::drain_events`].

use crate::{
    events::PlayerEvent,
    queue::Queue,
    random::{default_random, random_index, Clock, RandomSource, SystemClock},
    selector::SmartSelector,
    session::SessionSnapshot,
    types::{PlaybackConfig, RepeatMode},
    volume::Volume,
};
use chrono::{DateTime, Utc};
use smart_core::{Song, SongId};
use std::collections::HashMap;

/// Player state store
pub struct PlayerStore {
    current_song: Option<Song>,
    queue: Queue,
    is_playing: bool,
    volume: Volume,
    progress: f64,
    duration: f64,
    shuffle: bool,
    repeat: RepeatMode,
    smart_queue: bool,
    error: Option<String>,
    restart_threshold: f64,
    selector: SmartSelector,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
    pending_events: Vec<PlayerEvent>,
}

impl PlayerStore {
    /// Create an empty store
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            current_song: None,
            queue: Queue::new(),
            is_playing: false,
            volume: Volume::new(config.volume),
            progress: 0.0,
            duration: 0.0,
            shuffle: config.shuffle,
            repeat: config.repeat,
            smart_queue: config.smart_queue,
            error: None,
            restart_threshold: config.restart_threshold_secs,
            selector: SmartSelector::new(config.weights),
            rng: default_random(),
            clock: Box::new(SystemClock),
            pending_events: Vec::new(),
        }
    }

    /// Replace the random source used by shuffle and smart-next
    #[must_use]
    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Replace the clock used for recency and freshness
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ===== Song & Queue =====

    /// Replace the current song and reset progress
    ///
    /// The cursor is not touched; pair with [`Self::set_queue_index`] to keep
    /// them consistent.
    pub fn set_song(&mut self, song: Option<Song>) {
        self.progress = 0.0;
        self.replace_current(song);
    }

    /// Replace the queue wholesale
    ///
    /// The current song is kept; the cursor is clamped into the new queue.
    pub fn set_queue(&mut self, songs: Vec<Song>) {
        self.queue.replace(songs);
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Append a song to the queue
    pub fn add_to_queue(&mut self, song: Song) {
        self.queue.push(song);
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Remove the queue entry at `index`
    ///
    /// Removing the playing entry makes the song at the clamped cursor
    /// current (none once the queue is empty).
    pub fn remove_from_queue(&mut self, index: usize) {
        let Some(removed) = self.queue.remove(index) else {
            tracing::warn!(index, len = self.queue.len(), "Queue removal out of range");
            return;
        };

        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });

        if removed.was_current {
            let next = self.queue.current().cloned();
            self.progress = 0.0;
            self.replace_current(next);
        }
    }

    /// Move the queue cursor
    ///
    /// Out-of-range indices are ignored. Returns whether the cursor moved.
    pub fn set_queue_index(&mut self, index: usize) -> bool {
        if self.queue.set_index(index) {
            true
        } else {
            tracing::warn!(index, len = self.queue.len(), "Queue index out of range");
            false
        }
    }

    /// Replace the queue, start at `start` and play
    pub fn play_queue(&mut self, songs: Vec<Song>, start: usize) {
        self.set_queue(songs);
        if self.set_queue_index(start) {
            self.transition_to(start);
            self.set_playing(true);
        }
    }

    /// Re-read song metadata (play counts, favorites, ...) from `latest`
    ///
    /// Queue order, cursor and the current song identity are unchanged and
    /// no event is emitted.
    pub fn refresh_songs(&mut self, latest: &[Song]) {
        let by_id: HashMap<&SongId, &Song> = latest.iter().map(|s| (&s.id, s)).collect();
        self.queue.refresh(&by_id);
        if let Some(current) = &mut self.current_song {
            if let Some(fresh) = by_id.get(&current.id) {
                current.clone_from(fresh);
            }
        }
    }

    // ===== Transport =====

    /// Flip the transport flag
    pub fn toggle_play(&mut self) {
        self.set_playing(!self.is_playing);
    }

    /// Set the transport flag
    pub fn set_playing(&mut self, is_playing: bool) {
        if self.is_playing != is_playing {
            self.is_playing = is_playing;
            self.emit(PlayerEvent::PlayingChanged { is_playing });
        }
    }

    /// Set volume, clamped to `[0, 1]`
    pub fn set_volume(&mut self, volume: f32) {
        if self.volume.set(volume) {
            self.emit(PlayerEvent::VolumeChanged {
                volume: self.volume.level(),
            });
        }
    }

    /// Set the playback position in seconds
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
    }

    /// Set the current song's duration in seconds
    pub fn set_duration(&mut self, duration: f64) {
        if self.duration != duration {
            self.duration = duration;
            self.emit(PlayerEvent::DurationChanged { duration });
        }
    }

    /// Set or clear the user-facing error
    pub fn set_error(&mut self, error: Option<String>) {
        if self.error != error {
            self.error.clone_from(&error);
            self.emit(PlayerEvent::ErrorChanged { error });
        }
    }

    // ===== Modes =====

    /// Toggle shuffle
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.emit_mode();
    }

    /// Advance repeat: none → all → one → none
    pub fn cycle_repeat(&mut self) {
        self.repeat = self.repeat.cycle();
        self.emit_mode();
    }

    /// Set repeat mode directly
    pub fn set_repeat(&mut self, repeat: RepeatMode) {
        if self.repeat != repeat {
            self.repeat = repeat;
            self.emit_mode();
        }
    }

    /// Toggle smart queue
    pub fn toggle_smart_queue(&mut self) {
        self.smart_queue = !self.smart_queue;
        self.emit_mode();
    }

    // ===== Navigation =====

    /// Advance to the next song
    ///
    /// Repeat-one restarts the current song. Otherwise smart queue wins over
    /// shuffle, and linear order either wraps (repeat-all) or stops at the
    /// end with the cursor parked on the first entry.
    pub fn next_song(&mut self) {
        let len = self.queue.len();
        if len == 0 {
            return;
        }

        if self.repeat == RepeatMode::One {
            self.restart();
            return;
        }

        let target = if self.smart_queue {
            self.smart_target(len)
        } else if self.shuffle {
            random_index(self.rng.as_mut(), len)
        } else {
            let next = self.queue.index().map_or(0, |i| i + 1);
            if next < len {
                next
            } else if self.repeat == RepeatMode::All {
                0
            } else {
                tracing::debug!("End of queue reached");
                self.transition_to(0);
                self.set_playing(false);
                return;
            }
        };

        self.transition_to(target);
    }

    /// Go back one song, or restart when past the restart threshold
    pub fn prev_song(&mut self) {
        if self.progress > self.restart_threshold {
            self.restart();
            return;
        }

        let len = self.queue.len();
        if len == 0 {
            return;
        }

        let target = match self.queue.index() {
            None | Some(0) => len - 1,
            Some(i) => i - 1,
        };
        self.transition_to(target);
    }

    // ===== Session =====

    /// Values an external save routine persists
    pub fn session_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            song_id: self.current_song.as_ref().map(|s| s.id.clone()),
            progress: self.progress,
            volume: self.volume.level(),
            timestamp: self.clock.now(),
        }
    }

    /// Re-seed song, position and volume from a saved session
    ///
    /// `song` is the snapshot's song as resolved by the catalog; a missing
    /// or mismatched song only restores the volume.
    pub fn restore_session(&mut self, snapshot: &SessionSnapshot, song: Option<Song>) {
        self.set_volume(snapshot.volume);

        let song = song.filter(|s| Some(&s.id) == snapshot.song_id.as_ref());
        if let Some(song) = song {
            tracing::info!(
                song_id = %song.id,
                progress = snapshot.progress,
                "Restoring saved session"
            );
            self.replace_current(Some(song));
            self.progress = snapshot.progress.max(0.0);
        }
    }

    // ===== Getters =====

    /// Current song
    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    /// Queue contents in order
    pub fn queue(&self) -> &[Song] {
        self.queue.songs()
    }

    /// Queue cursor
    pub fn queue_index(&self) -> Option<usize> {
        self.queue.index()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn smart_queue(&self) -> bool {
        self.smart_queue
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Smart-next selector in use
    pub fn selector(&self) -> &SmartSelector {
        &self.selector
    }

    /// Current time according to the store's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    fn smart_target(&mut self, len: usize) -> usize {
        let now = self.clock.now();
        let picked: Option<SongId> = self
            .selector
            .select_next(
                self.queue.songs(),
                self.current_song.as_ref(),
                self.queue.index(),
                now,
                self.rng.as_mut(),
            )
            .map(|song| song.id.clone());

        picked
            .and_then(|id| self.queue.position_of(&id))
            .unwrap_or_else(|| self.queue.index().map_or(0, |i| (i + 1) % len))
    }

    /// Point the cursor at `index` and make that entry current
    fn transition_to(&mut self, index: usize) {
        if !self.queue.set_index(index) {
            return;
        }
        let song = self.queue.current().cloned();
        tracing::debug!(
            index,
            song_id = song.as_ref().map(|s| s.id.as_str()),
            "Queue transition"
        );
        self.progress = 0.0;
        self.replace_current(song);
    }

    fn restart(&mut self) {
        self.progress = 0.0;
        if let Some(song_id) = self.current_song.as_ref().map(|s| s.id.clone()) {
            self.emit(PlayerEvent::Restarted { song_id });
        }
    }

    /// Swap the current song, emitting a change or a restart
    fn replace_current(&mut self, song: Option<Song>) {
        let previous_song_id = self.current_song.as_ref().map(|s| s.id.clone());
        let song_id = song.as_ref().map(|s| s.id.clone());
        self.current_song = song;

        match song_id {
            Some(id) if Some(&id) == previous_song_id.as_ref() => {
                self.emit(PlayerEvent::Restarted { song_id: id });
            }
            song_id => self.emit(PlayerEvent::SongChanged {
                song_id,
                previous_song_id,
            }),
        }
    }

    fn emit_mode(&mut self) {
        self.emit(PlayerEvent::ModeChanged {
            shuffle: self.shuffle,
            repeat: self.repeat,
            smart_queue: self.smart_queue,
        });
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
