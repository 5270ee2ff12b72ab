//! Smart Player - Headless CLI
//!
//! Drives the playback store without a UI:
//! - `simulate` plays a library export end to end on a simulated engine
//! - `weights` shows how the smart queue scores each candidate
//! - `sync` serves a mini player over line-delimited JSON on stdio

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod library;

pub use config::CliConfig;
pub use error::{CliError, Result};
