/// ID types for Smart Player entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Song identifier
///
/// Opaque and stable across sessions; the catalog owns its format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Create a song ID from an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random song ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SongId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SongId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
