//! Simulated playback engine
//!
//! Stands in for the audio backend: sources "decode" instantly when they
//! belong to the library, position advances only when the session driver
//! says so, and lifecycle notifications go out on an unbounded channel.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use smart_core::Song;
use smart_playback::{Clock, EngineEvent, LoadTicket, PlaybackEngine, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

#[derive(Debug, Default)]
struct SimState {
    ticket: Option<LoadTicket>,
    duration: f64,
    position: f64,
    playing: bool,
    started: bool,
    rate: f32,
    volume: f32,
}

type Shared = Arc<Mutex<SimState>>;

fn lock(state: &Shared) -> MutexGuard<'_, SimState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Engine half handed to the player
pub struct SimulatedEngine {
    durations: HashMap<String, f64>,
    state: Shared,
    events: mpsc::UnboundedSender<EngineEvent>,
}

/// Driver half: moves simulated time forward
#[derive(Clone)]
pub struct SimControl {
    state: Shared,
    events: mpsc::UnboundedSender<EngineEvent>,
}

/// Create an engine that can play every song of `songs`
///
/// Songs with unknown duration play for `fallback_duration` seconds.
pub fn simulated_engine(
    songs: &[Song],
    fallback_duration: f64,
) -> (
    SimulatedEngine,
    SimControl,
    mpsc::UnboundedReceiver<EngineEvent>,
) {
    let durations = songs
        .iter()
        .map(|s| {
            let duration = if s.duration > 0.0 {
                s.duration
            } else {
                fallback_duration
            };
            (s.file_path.clone(), duration)
        })
        .collect();

    let state = Shared::new(Mutex::new(SimState {
        rate: 1.0,
        volume: 1.0,
        ..SimState::default()
    }));
    let (tx, rx) = mpsc::unbounded_channel();

    let engine = SimulatedEngine {
        durations,
        state: Arc::clone(&state),
        events: tx.clone(),
    };
    let control = SimControl { state, events: tx };
    (engine, control, rx)
}

fn send(events: &mpsc::UnboundedSender<EngineEvent>, event: EngineEvent) {
    // The receiver only goes away at shutdown
    let _ = events.send(event);
}

impl PlaybackEngine for SimulatedEngine {
    fn load(&mut self, ticket: LoadTicket, source: &str) -> Result<()> {
        let mut state = lock(&self.state);
        state.ticket = Some(ticket);
        state.position = 0.0;
        state.playing = false;
        state.started = false;

        match self.durations.get(source) {
            Some(&duration) => {
                state.duration = duration;
                send(&self.events, EngineEvent::Loaded { ticket, duration });
            }
            None => {
                state.duration = 0.0;
                send(
                    &self.events,
                    EngineEvent::LoadError {
                        ticket,
                        message: format!("no such source: {source}"),
                    },
                );
            }
        }
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        let Some(ticket) = state.ticket else {
            return Ok(());
        };
        state.playing = true;
        if !state.started {
            state.started = true;
            send(&self.events, EngineEvent::PlayStarted { ticket });
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        lock(&self.state).playing = false;
        Ok(())
    }

    fn seek(&mut self, position: f64) -> Result<()> {
        let mut state = lock(&self.state);
        state.position = position.clamp(0.0, state.duration);
        // Replaying from the top counts as a new start
        if state.position == 0.0 {
            state.started = false;
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        lock(&self.state).volume = volume;
        Ok(())
    }

    fn set_rate(&mut self, rate: f32) -> Result<()> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(smart_playback::PlaybackError::engine(format!(
                "unsupported rate {rate}"
            )));
        }
        lock(&self.state).rate = rate;
        Ok(())
    }

    fn unload(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        state.ticket = None;
        state.playing = false;
        Ok(())
    }
}

impl SimControl {
    /// Advance playback by `secs` of wall time
    ///
    /// Emits a progress report, and the end of the song when reached.
    pub fn advance(&self, secs: f64) {
        let mut state = lock(&self.state);
        let Some(ticket) = state.ticket else {
            return;
        };
        if !state.playing {
            return;
        }

        state.position = (state.position + secs * f64::from(state.rate)).min(state.duration);
        send(
            &self.events,
            EngineEvent::Progress {
                ticket,
                position: state.position,
            },
        );

        if state.position >= state.duration {
            state.playing = false;
            send(&self.events, EngineEvent::Ended { ticket });
        }
    }

    /// Jump to the end of the loaded song; returns the seconds skipped
    pub fn finish(&self) -> f64 {
        let mut state = lock(&self.state);
        let Some(ticket) = state.ticket else {
            return 0.0;
        };
        let skipped = (state.duration - state.position).max(0.0);
        state.position = state.duration;
        state.playing = false;
        send(&self.events, EngineEvent::Ended { ticket });
        skipped
    }

    /// Engine-side volume
    pub fn volume(&self) -> f32 {
        lock(&self.state).volume
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, secs: f64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += ChronoDuration::milliseconds((secs * 1000.0) as i64);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
