//! Smart Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Smart Player.
//!
//! This crate provides the foundational building blocks shared by the
//! playback core, the mini-player sync bridge and the binaries.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `SongId`
//! - **Core Traits**: `SongCatalog` (the song library collaborator)
//! - **Error Handling**: Unified `SmartError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use smart_core::{MemoryCatalog, Song};
//!
//! let song = Song::new("שיר לדוגמה", "אמן", "/music/song.mp3");
//! let catalog = MemoryCatalog::new(vec![song]);
//! assert_eq!(catalog.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::MemoryCatalog;
pub use error::{Result, SmartError};
pub use traits::SongCatalog;
pub use types::{Song, SongId};
