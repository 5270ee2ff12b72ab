//! Mini-player sync loop
//!
//! Pushes a [`SyncSnapshot`] to the sink:
//! - on every timer tick (progress moves without events),
//! - right after any player action that changed the snapshot,
//! - when the mini player asks for the state.
//!
//! Inbound commands run the same player actions the main UI uses.

use crate::config::SyncConfig;
use crate::error::Result;
use crate::protocol::{InboundMessage, RemoteCommand};
use crate::sink::SnapshotSink;
use crate::snapshot::SyncSnapshot;
use smart_playback::{lock_player, Player, SharedPlayer};
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Apply a remote command to the player
pub fn apply_command(player: &mut Player, command: RemoteCommand) {
    debug!(?command, "Remote command");
    match command {
        RemoteCommand::TogglePlay => player.toggle_play(),
        RemoteCommand::Next => player.next_song(),
        RemoteCommand::Prev => player.prev_song(),
        RemoteCommand::SetVolume(volume) => player.set_volume(volume),
        RemoteCommand::Seek(position) => {
            if let Err(e) = player.seek(position) {
                debug!(position, error = %e, "Remote seek ignored");
            }
        }
    }
}

/// Keeps a mini player in step with a shared player
pub struct MiniPlayerSync<S> {
    player: SharedPlayer,
    sink: S,
    config: SyncConfig,
    last_pushed: Option<SyncSnapshot>,
}

impl<S: SnapshotSink> MiniPlayerSync<S> {
    pub fn new(player: SharedPlayer, sink: S, config: SyncConfig) -> Self {
        Self {
            player,
            sink,
            config,
            last_pushed: None,
        }
    }

    /// Run until the inbound channel closes or the sink goes away
    pub async fn run(mut self, mut inbound: mpsc::Receiver<InboundMessage>) -> Result<()> {
        let changed = Arc::new(Notify::new());
        {
            let changed = Arc::clone(&changed);
            lock_player(&self.player).subscribe(move |_| changed.notify_one());
        }

        let mut ticker = tokio::time::interval(self.config.push_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = self.config.push_interval_ms,
            "Mini player sync started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => self.push(true).await?,
                () = changed.notified() => self.push(false).await?,
                message = inbound.recv() => match message {
                    Some(InboundMessage::StateRequested) => self.push(true).await?,
                    Some(InboundMessage::Command(command)) => {
                        apply_command(&mut lock_player(&self.player), command);
                    }
                    None => break,
                },
            }
        }

        info!("Mini player sync stopped");
        Ok(())
    }

    /// Push the current snapshot; unforced pushes skip unchanged state
    async fn push(&mut self, force: bool) -> Result<()> {
        let snapshot = {
            let player = lock_player(&self.player);
            SyncSnapshot::capture(player.store())
        };

        if !force && self.last_pushed.as_ref() == Some(&snapshot) {
            return Ok(());
        }

        self.sink.push(&snapshot).await?;
        self.last_pushed = Some(snapshot);
        Ok(())
    }
}
