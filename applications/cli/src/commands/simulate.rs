//! Headless listening session
//!
//! Plays the library through the real store and engine integration on a
//! simulated engine and a manual clock: every step lets the current song
//! play to the end, records the play in the catalog, and lets the queue
//! pick what comes next.

use crate::config::CliConfig;
use crate::engine::{simulated_engine, ManualClock};
use crate::error::Result;
use chrono::Utc;
use serde::Serialize;
use smart_core::{MemoryCatalog, Song, SongCatalog, SongId};
use smart_playback::{seeded_random, Clock, EngineBridge, EngineEvent, Player, PlayerStore};
use tokio::sync::mpsc;

/// Fallback length for songs without a known duration
const DEFAULT_SONG_SECS: f64 = 180.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedStep {
    pub step: usize,
    pub queue_index: Option<usize>,
    pub song_id: SongId,
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub steps: Vec<PlayedStep>,
    /// Final play counts, most played first
    pub play_counts: Vec<(SongId, u32)>,
}

pub async fn simulate(
    config: &CliConfig,
    songs: Vec<Song>,
    steps: usize,
    seed: Option<u64>,
) -> Result<SimulationReport> {
    let catalog = MemoryCatalog::new(songs.clone());
    let clock = ManualClock::new(Utc::now());
    let (engine, control, mut engine_events) = simulated_engine(&songs, DEFAULT_SONG_SECS);

    let mut store =
        PlayerStore::new(config.playback.clone()).with_clock(Box::new(clock.clone()));
    if let Some(seed) = seed {
        store = store.with_random(seeded_random(seed));
    }
    let mut player = Player::new(store, EngineBridge::new(Box::new(engine)));

    tracing::info!(songs = songs.len(), steps, ?seed, "Starting simulated session");
    player.play_queue(songs, 0);

    let mut played = Vec::with_capacity(steps);
    for step in 1..=steps {
        deliver(&mut player, &catalog, &clock, &mut engine_events).await?;

        let Some(song) = player.store().current_song().cloned() else {
            break;
        };
        if !player.store().is_playing() {
            tracing::info!(step, "Queue ended");
            break;
        }
        played.push(PlayedStep {
            step,
            queue_index: player.store().queue_index(),
            song_id: song.id.clone(),
            title: song.title.clone(),
            artist: song.artist.clone(),
        });

        player.update(|store| store.refresh_songs(&catalog.snapshot()));
        clock.advance(control.finish());
    }

    let mut play_counts: Vec<(SongId, u32)> = catalog
        .snapshot()
        .into_iter()
        .map(|s| (s.id, s.play_count))
        .collect();
    play_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(SimulationReport {
        steps: played,
        play_counts,
    })
}

/// Feed pending engine notifications into the player
///
/// Play starts are written to the catalog inline so the next pick sees them.
async fn deliver(
    player: &mut Player,
    catalog: &MemoryCatalog,
    clock: &ManualClock,
    events: &mut mpsc::UnboundedReceiver<EngineEvent>,
) -> Result<()> {
    while let Ok(event) = events.try_recv() {
        let play_started = matches!(event, EngineEvent::PlayStarted { .. })
            && Some(event.ticket()) == player.bridge().active_ticket();
        player.handle_engine_event(event);

        if play_started {
            if let Some(id) = player.store().current_song().map(|s| s.id.clone()) {
                catalog.record_play(&id, clock.now()).await?;
            }
        }
    }
    Ok(())
}
