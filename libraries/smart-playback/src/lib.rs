//! Smart Player - Playback State
//!
//! Platform-agnostic playback state for Smart Player.
//!
//! This crate provides:
//! - The queue & playback state store (current song, queue cursor,
//!   transport, volume, progress, shuffle/repeat/smart-queue, last error)
//! - Smart-next selection (weighted random over the queue)
//! - Repeat modes (None, All, One)
//! - The playback engine adapter trait and its integration with the store
//! - Play-start bookkeeping and the persisted session snapshot
//!
//! # Architecture
//!
//! The store is a plain single-writer struct. It never talks to the audio
//! engine; it records [`PlayerEvent`]s instead. [`Player`] pumps those
//! events through the [`EngineBridge`], which issues engine commands and
//! feeds engine notifications back into the store. Randomness and time
//! are injected ([`RandomSource`], [`Clock`]) so selection is reproducible.
//!
//! # Example
//!
//! ```rust
//! use smart_playback::{PlaybackConfig, PlayerStore, RepeatMode};
//! use smart_core::Song;
//!
//! let mut store = PlayerStore::new(PlaybackConfig {
//!     smart_queue: false,
//!     repeat: RepeatMode::All,
//!     ..PlaybackConfig::default()
//! });
//!
//! let songs = vec![
//!     Song::new("שיר ראשון", "אמן", "/music/1.mp3"),
//!     Song::new("שיר שני", "אמן", "/music/2.mp3"),
//! ];
//! store.play_queue(songs, 1);
//! store.next_song();
//!
//! assert_eq!(store.queue_index(), Some(0));
//! ```

pub mod bridge;
pub mod engine;
pub mod error;
pub mod events;
pub mod player;
pub mod queue;
pub mod random;
pub mod recorder;
pub mod selector;
pub mod session;
pub mod store;
pub mod types;
pub mod volume;

pub use bridge::{EngineBridge, LOAD_ERROR_MESSAGE, PLAY_ERROR_MESSAGE};
pub use engine::{EngineEvent, LoadTicket, PlaybackEngine};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use player::{lock_player, Player, SharedPlayer};
pub use random::{default_random, seeded_random, Clock, FixedClock, RandomSource, SystemClock};
pub use recorder::PlayRecorder;
pub use selector::{SmartQueueWeights, SmartSelector, WeightBreakdown};
pub use session::{resolve_session_song, SessionSnapshot};
pub use store::PlayerStore;
pub use types::{PlaybackConfig, RepeatMode};
