//! Outbound snapshot transports

use crate::error::{Result, SyncError};
use crate::protocol::{Envelope, STATE_SYNC_EVENT};
use crate::snapshot::SyncSnapshot;
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// Destination for snapshot pushes
///
/// Delivery is best effort. An error means the surface is gone for good
/// and the sync loop should stop.
#[async_trait]
pub trait SnapshotSink: Send {
    async fn push(&mut self, snapshot: &SyncSnapshot) -> Result<()>;
}

/// In-process sink backed by a bounded channel
///
/// When the channel is full the snapshot is dropped; the next push
/// supersedes it anyway.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<SyncSnapshot>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<SyncSnapshot>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl SnapshotSink for ChannelSink {
    async fn push(&mut self, snapshot: &SyncSnapshot) -> Result<()> {
        match self.tx.try_send(snapshot.clone()) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::debug!("Mini player lagging, snapshot dropped");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SyncError::ChannelClosed),
        }
    }
}

/// Writes each snapshot as one `player-state-sync` JSON line
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> SnapshotSink for JsonLinesSink<W> {
    async fn push(&mut self, snapshot: &SyncSnapshot) -> Result<()> {
        let envelope = Envelope::new(STATE_SYNC_EVENT, serde_json::to_value(snapshot)?);
        let mut line = serde_json::to_vec(&envelope)?;
        line.push(b'\n');

        self.writer.write_all(&line).await.map_err(closed_or_io)?;
        self.writer.flush().await.map_err(closed_or_io)?;
        Ok(())
    }
}

fn closed_or_io(e: std::io::Error) -> SyncError {
    if e.kind() == std::io::ErrorKind::BrokenPipe {
        SyncError::ChannelClosed
    } else {
        SyncError::Io(e)
    }
}
