//! Background play-start bookkeeping
//!
//! Play starts are recorded in the catalog fire-and-forget: the player
//! queues them on a channel and a tokio task writes them out.

use chrono::{DateTime, Utc};
use smart_core::{SongCatalog, SongId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle for recording play starts
#[derive(Debug, Clone)]
pub struct PlayRecorder {
    tx: mpsc::UnboundedSender<(SongId, DateTime<Utc>)>,
}

impl PlayRecorder {
    /// Spawn the writer task on the current tokio runtime
    ///
    /// The task ends once every recorder handle is dropped.
    pub fn spawn(catalog: Arc<dyn SongCatalog>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<(SongId, DateTime<Utc>)>();

        let handle = tokio::spawn(async move {
            while let Some((song_id, at)) = rx.recv().await {
                if let Err(e) = catalog.record_play(&song_id, at).await {
                    tracing::warn!(song_id = %song_id, error = %e, "Failed to record play");
                }
            }
        });

        (Self { tx }, handle)
    }

    /// Queue a play start
    pub fn record(&self, song_id: SongId, at: DateTime<Utc>) {
        if self.tx.send((song_id, at)).is_err() {
            tracing::warn!("Play recorder stopped, dropping play start");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smart_core::{MemoryCatalog, Song};

    #[tokio::test]
    async fn records_in_background() {
        let song = Song {
            id: SongId::new("s1"),
            ..Song::new("Title", "Artist", "/music/s1.mp3")
        };
        let catalog = Arc::new(MemoryCatalog::new(vec![song]));
        let (recorder, handle) = PlayRecorder::spawn(catalog.clone());

        recorder.record(SongId::new("s1"), Utc::now());
        recorder.record(SongId::new("unknown"), Utc::now());
        drop(recorder);
        handle.await.unwrap();

        assert_eq!(catalog.snapshot()[0].play_count, 1);
    }
}
