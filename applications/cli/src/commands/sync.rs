//! Mini-player session over line-delimited JSON
//!
//! Inbound envelopes (`request-player-state`, `player-command`) arrive one
//! per line on the input; `player-state-sync` snapshots go out one per line.
//! Playback runs on the simulated engine in real time.

use crate::config::CliConfig;
use crate::engine::simulated_engine;
use crate::error::Result;
use smart_core::{MemoryCatalog, Song};
use smart_playback::{lock_player, EngineBridge, PlayRecorder, Player, PlayerStore, SharedPlayer};
use smart_sync::{InboundMessage, JsonLinesSink, MiniPlayerSync};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const DEFAULT_SONG_SECS: f64 = 180.0;

/// How often simulated playback advances
const ENGINE_TICK: Duration = Duration::from_millis(250);

/// Serve one mini player until its input ends or its output closes
///
/// The queue is loaded with the first song current and paused.
pub async fn sync<R, W>(config: &CliConfig, songs: Vec<Song>, input: R, output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send,
{
    let catalog = Arc::new(MemoryCatalog::new(songs.clone()));
    let (recorder, recorder_task) = PlayRecorder::spawn(catalog);
    let (engine, control, mut engine_events) = simulated_engine(&songs, DEFAULT_SONG_SECS);

    let store = PlayerStore::new(config.playback.clone());
    let bridge = EngineBridge::new(Box::new(engine)).with_recorder(recorder);
    let player: SharedPlayer = Player::new(store, bridge).into_shared();

    lock_player(&player).update(|store| {
        let first = songs.first().cloned();
        store.set_queue(songs);
        if store.set_queue_index(0) {
            store.set_song(first);
        }
    });

    let engine_task = {
        let player = Arc::clone(&player);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(ENGINE_TICK);
            loop {
                tokio::select! {
                    _ = ticker.tick() => control.advance(ENGINE_TICK.as_secs_f64()),
                    event = engine_events.recv() => match event {
                        Some(event) => lock_player(&player).handle_engine_event(event),
                        None => break,
                    },
                }
            }
        })
    };

    let (inbound_tx, inbound_rx) = mpsc::channel(config.sync.inbound_buffer);
    let reader_task = spawn_reader(input, inbound_tx);

    let result = MiniPlayerSync::new(player, JsonLinesSink::new(output), config.sync.clone())
        .run(inbound_rx)
        .await;

    reader_task.abort();
    engine_task.abort();
    recorder_task.abort();

    result.map_err(Into::into)
}

/// Forward decoded input lines; dropping the sender at EOF ends the session
fn spawn_reader<R>(input: R, tx: mpsc::Sender<InboundMessage>) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = input.lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read mini player input");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match InboundMessage::from_json(&line) {
                Ok(message) => {
                    if tx.send(message).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Ignoring mini player message"),
            }
        }
        tracing::debug!("Mini player input closed");
    })
}
