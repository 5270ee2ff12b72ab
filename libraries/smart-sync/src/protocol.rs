//! Mini-player message protocol
//!
//! Messages travel as named events with a JSON payload:
//!
//! | Event | Direction | Payload |
//! |-------|-----------|---------|
//! | `player-state-sync` | to mini player | [`SyncSnapshot`](crate::SyncSnapshot) |
//! | `request-player-state` | from mini player | none |
//! | `player-command` | from mini player | `{"command": name, "data"?: number}` |
//!
//! Inbound payloads are validated here; nothing past this module sees an
//! untyped command.

use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot push
pub const STATE_SYNC_EVENT: &str = "player-state-sync";

/// Mini player asks for an immediate snapshot
pub const REQUEST_STATE_EVENT: &str = "request-player-state";

/// Mini player command
pub const COMMAND_EVENT: &str = "player-command";

/// Named event with a JSON payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl Envelope {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }
}

/// Commands the mini player may send
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "data", rename_all = "camelCase")]
pub enum RemoteCommand {
    TogglePlay,
    Next,
    Prev,
    /// Volume (0.0-1.0), clamped by the store
    SetVolume(f32),
    /// Position in seconds
    Seek(f64),
}

impl RemoteCommand {
    /// Decode and validate a `player-command` payload
    pub fn decode(payload: &Value) -> Result<Self> {
        let command =
            Self::deserialize(payload).map_err(|e| SyncError::InvalidCommand(e.to_string()))?;

        match command {
            RemoteCommand::SetVolume(v) if !v.is_finite() => Err(SyncError::InvalidCommand(
                format!("setVolume needs a finite number, got {v}"),
            )),
            RemoteCommand::Seek(p) if !p.is_finite() => Err(SyncError::InvalidCommand(format!(
                "seek needs a finite number, got {p}"
            ))),
            command => Ok(command),
        }
    }
}

/// Decoded inbound message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InboundMessage {
    StateRequested,
    Command(RemoteCommand),
}

impl InboundMessage {
    /// Decode an inbound event
    pub fn from_event(event: &str, payload: &Value) -> Result<Self> {
        match event {
            REQUEST_STATE_EVENT => Ok(Self::StateRequested),
            COMMAND_EVENT => RemoteCommand::decode(payload).map(Self::Command),
            other => Err(SyncError::UnknownEvent(other.to_string())),
        }
    }

    /// Decode one JSON-encoded envelope
    pub fn from_json(line: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(line)?;
        Self::from_event(&envelope.event, &envelope.payload)
    }
}
