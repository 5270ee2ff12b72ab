//! Sync configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Mini-player sync settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Periodic push interval in milliseconds (default: 500)
    pub push_interval_ms: u64,

    /// Capacity of the inbound command channel (default: 32)
    pub inbound_buffer: usize,
}

impl SyncConfig {
    pub fn push_interval(&self) -> Duration {
        Duration::from_millis(self.push_interval_ms.max(1))
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            push_interval_ms: 500,
            inbound_buffer: 32,
        }
    }
}
