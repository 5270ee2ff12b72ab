//! Engine integration
//!
//! Drives a [`PlaybackEngine`] from store events and feeds engine events
//! back into the store:
//!
//! - a song change starts a new load (clearing the error), a restart seeks
//!   the loaded song back to 0
//! - once loaded, the engine seeks to the stored progress and plays if the
//!   store says so
//! - transport and volume follow the store
//! - the end of a song advances the queue
//! - a load failure pauses and shows a message; a play failure shows a
//!   retry message and plays again once the engine reports it is unlocked
//!
//! Every engine event carries the ticket of its load. Events for any load
//! other than the latest, or for a song that is no longer current, are
//! dropped without touching the store.

use crate::{
    engine::{EngineEvent, LoadTicket, PlaybackEngine},
    error::{PlaybackError, Result},
    events::PlayerEvent,
    recorder::PlayRecorder,
    store::PlayerStore,
};
use smart_core::{Song, SongId};

/// Message shown when a song cannot be loaded
pub const LOAD_ERROR_MESSAGE: &str = "לא ניתן לטעון את הקובץ. ייתכן שהקובץ פגום או בפורמט לא נתמך.";

/// Message shown while waiting to retry a refused play
pub const PLAY_ERROR_MESSAGE: &str = "שגיאה בהפעלת השיר. מנסה שוב...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Loading,
    Ready,
    AwaitingUnlock,
    Failed,
}

#[derive(Debug)]
struct ActiveLoad {
    ticket: LoadTicket,
    song_id: SongId,
    state: LoadState,
}

/// Connects the store to a playback engine
pub struct EngineBridge {
    engine: Box<dyn PlaybackEngine>,
    next_ticket: u64,
    active: Option<ActiveLoad>,
    recorder: Option<PlayRecorder>,
}

impl EngineBridge {
    /// Create a bridge around `engine`
    pub fn new(engine: Box<dyn PlaybackEngine>) -> Self {
        Self {
            engine,
            next_ticket: 0,
            active: None,
            recorder: None,
        }
    }

    /// Record play starts through `recorder`
    #[must_use]
    pub fn with_recorder(mut self, recorder: PlayRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Ticket of the latest load, if any
    pub fn active_ticket(&self) -> Option<LoadTicket> {
        self.active.as_ref().map(|a| a.ticket)
    }

    /// A song is loaded and accepts transport commands
    pub fn is_ready(&self) -> bool {
        matches!(
            self.active.as_ref().map(|a| a.state),
            Some(LoadState::Ready | LoadState::AwaitingUnlock)
        )
    }

    /// React to a store event
    pub fn apply(&mut self, store: &mut PlayerStore, event: &PlayerEvent) {
        match event {
            PlayerEvent::SongChanged { song_id: Some(_), .. } => {
                if let Some(song) = store.current_song().cloned() {
                    self.load(store, &song);
                }
            }
            PlayerEvent::SongChanged { song_id: None, .. } => {
                self.active = None;
                if let Err(e) = self.engine.unload() {
                    tracing::warn!(error = %e, "Engine unload failed");
                }
            }
            PlayerEvent::Restarted { .. } => self.restart(store),
            PlayerEvent::PlayingChanged { is_playing } => {
                if self.is_ready() {
                    self.transport(*is_playing);
                }
            }
            PlayerEvent::VolumeChanged { volume } => {
                if let Err(e) = self.engine.set_volume(*volume) {
                    tracing::warn!(error = %e, "Engine volume change failed");
                }
            }
            PlayerEvent::DurationChanged { .. }
            | PlayerEvent::QueueChanged { .. }
            | PlayerEvent::ModeChanged { .. }
            | PlayerEvent::ErrorChanged { .. } => {}
        }
    }

    /// React to an engine event
    pub fn handle_engine_event(&mut self, store: &mut PlayerStore, event: EngineEvent) {
        let Some(active) = self.active.as_mut() else {
            tracing::debug!(?event, "Engine event with no active load");
            return;
        };

        let current_id = store.current_song().map(|s| &s.id);
        if event.ticket() != active.ticket || current_id != Some(&active.song_id) {
            tracing::debug!(
                ticket = %event.ticket(),
                active = %active.ticket,
                "Ignoring stale engine event"
            );
            return;
        }

        match event {
            EngineEvent::Loaded { duration, .. } => {
                active.state = LoadState::Ready;
                tracing::debug!(song_id = %active.song_id, duration, "Song loaded");
                store.set_duration(duration);

                let progress = store.progress();
                if progress > 0.0 {
                    if let Err(e) = self.engine.seek(progress) {
                        tracing::warn!(error = %e, "Engine seek failed");
                    }
                }
                if store.is_playing() {
                    self.transport(true);
                }
            }
            EngineEvent::PlayStarted { .. } => {
                if let Some(recorder) = &self.recorder {
                    recorder.record(active.song_id.clone(), store.now());
                }
            }
            EngineEvent::Progress { position, .. } => store.set_progress(position),
            EngineEvent::Ended { .. } => store.next_song(),
            EngineEvent::LoadError { message, .. } => {
                tracing::warn!(song_id = %active.song_id, %message, "Load failed");
                active.state = LoadState::Failed;
                store.set_playing(false);
                store.set_error(Some(LOAD_ERROR_MESSAGE.to_string()));
            }
            EngineEvent::PlayError { message, .. } => {
                tracing::warn!(song_id = %active.song_id, %message, "Play failed, waiting for unlock");
                active.state = LoadState::AwaitingUnlock;
                store.set_error(Some(PLAY_ERROR_MESSAGE.to_string()));
            }
            EngineEvent::Unlocked { .. } => {
                if active.state == LoadState::AwaitingUnlock {
                    active.state = LoadState::Ready;
                    store.set_error(None);
                    if store.is_playing() {
                        self.transport(true);
                    }
                }
            }
        }
    }

    /// Seek the loaded song and move the stored progress with it
    pub fn seek(&mut self, store: &mut PlayerStore, position: f64) -> Result<()> {
        if !self.is_ready() {
            return Err(PlaybackError::NoSongLoaded);
        }
        if !position.is_finite() {
            return Err(smart_core::SmartError::invalid_input("seek position must be finite").into());
        }

        let position = position.max(0.0);
        self.engine.seek(position)?;
        store.set_progress(position);
        Ok(())
    }

    /// Change playback rate
    pub fn set_rate(&mut self, rate: f32) -> Result<()> {
        self.engine.set_rate(rate)
    }

    fn load(&mut self, store: &mut PlayerStore, song: &Song) {
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        tracing::debug!(%ticket, song_id = %song.id, source = %song.file_path, "Loading song");

        store.set_error(None);
        store.set_duration(0.0);

        let state = match self.engine.load(ticket, &song.file_path) {
            Ok(()) => LoadState::Loading,
            Err(e) => {
                tracing::warn!(song_id = %song.id, error = %e, "Engine rejected load");
                store.set_playing(false);
                store.set_error(Some(LOAD_ERROR_MESSAGE.to_string()));
                LoadState::Failed
            }
        };

        self.active = Some(ActiveLoad {
            ticket,
            song_id: song.id.clone(),
            state,
        });
    }

    fn restart(&mut self, store: &mut PlayerStore) {
        match self.active.as_ref().map(|a| a.state) {
            Some(LoadState::Ready | LoadState::AwaitingUnlock) => {
                if let Err(e) = self.engine.seek(0.0) {
                    tracing::warn!(error = %e, "Engine seek failed");
                }
                if store.is_playing() {
                    self.transport(true);
                }
            }
            Some(LoadState::Failed) => {
                if let Some(song) = store.current_song().cloned() {
                    self.load(store, &song);
                }
            }
            Some(LoadState::Loading) | None => {}
        }
    }

    fn transport(&mut self, play: bool) {
        let result = if play {
            self.engine.play()
        } else {
            self.engine.pause()
        };
        if let Err(e) = result {
            tracing::warn!(play, error = %e, "Engine transport command failed");
        }
    }
}
