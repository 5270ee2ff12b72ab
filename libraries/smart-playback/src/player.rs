//! Player facade
//!
//! Owns the store and the engine bridge and keeps them in step: after every
//! action the store's events are pumped through the bridge (which may emit
//! more events) until the store is quiet, then observers are notified once
//! with everything that happened.

use crate::{
    bridge::EngineBridge,
    engine::{EngineEvent, PlaybackEngine},
    error::Result,
    events::PlayerEvent,
    session::SessionSnapshot,
    store::PlayerStore,
};
use smart_core::Song;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Listener = Box<dyn Fn(&[PlayerEvent]) + Send>;

/// Store plus engine integration
pub struct Player {
    store: PlayerStore,
    bridge: EngineBridge,
    listeners: Vec<Listener>,
}

/// Player shared between the UI, the engine callbacks and the sync loop
pub type SharedPlayer = Arc<Mutex<Player>>;

/// Lock a shared player
///
/// Every action leaves the player consistent, so a poisoned lock is
/// recovered rather than propagated.
pub fn lock_player(player: &SharedPlayer) -> MutexGuard<'_, Player> {
    player.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Player {
    /// Create a player
    pub fn new(store: PlayerStore, bridge: EngineBridge) -> Self {
        Self {
            store,
            bridge,
            listeners: Vec::new(),
        }
    }

    /// Create a player with a bare engine
    pub fn with_engine(store: PlayerStore, engine: Box<dyn PlaybackEngine>) -> Self {
        Self::new(store, EngineBridge::new(engine))
    }

    /// Wrap into a [`SharedPlayer`]
    pub fn into_shared(self) -> SharedPlayer {
        Arc::new(Mutex::new(self))
    }

    /// Read-only view of the store
    pub fn store(&self) -> &PlayerStore {
        &self.store
    }

    /// Engine integration state
    pub fn bridge(&self) -> &EngineBridge {
        &self.bridge
    }

    /// Observe events after each action
    pub fn subscribe(&mut self, listener: impl Fn(&[PlayerEvent]) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Run a store action and propagate its effects
    pub fn update<R>(&mut self, action: impl FnOnce(&mut PlayerStore) -> R) -> R {
        let result = action(&mut self.store);
        self.pump();
        result
    }

    pub fn toggle_play(&mut self) {
        self.update(PlayerStore::toggle_play);
    }

    pub fn next_song(&mut self) {
        self.update(PlayerStore::next_song);
    }

    pub fn prev_song(&mut self) {
        self.update(PlayerStore::prev_song);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.update(|store| store.set_volume(volume));
    }

    /// Replace the queue and start playing at `start`
    pub fn play_queue(&mut self, songs: Vec<Song>, start: usize) {
        self.update(|store| store.play_queue(songs, start));
    }

    /// Seek the current song
    ///
    /// Fails with [`crate::PlaybackError::NoSongLoaded`] while nothing is
    /// loaded or a load is still in flight.
    pub fn seek(&mut self, position: f64) -> Result<()> {
        let result = self.bridge.seek(&mut self.store, position);
        self.pump();
        result
    }

    /// Change playback rate
    pub fn set_rate(&mut self, rate: f32) -> Result<()> {
        self.bridge.set_rate(rate)
    }

    /// Feed an engine notification
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        self.bridge.handle_engine_event(&mut self.store, event);
        self.pump();
    }

    /// Re-seed from a saved session
    pub fn restore_session(&mut self, snapshot: &SessionSnapshot, song: Option<Song>) {
        self.update(|store| store.restore_session(snapshot, song));
    }

    fn pump(&mut self) {
        let mut all = Vec::new();
        loop {
            let events = self.store.drain_events();
            if events.is_empty() {
                break;
            }
            for event in &events {
                self.bridge.apply(&mut self.store, event);
            }
            all.extend(events);
        }

        if !all.is_empty() {
            for listener in &self.listeners {
                listener(&all);
            }
        }
    }
}
