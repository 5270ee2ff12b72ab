/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use smart_playback::PlaybackConfig;
use smart_sync::SyncConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default configuration file, read from the working directory if present
pub const DEFAULT_CONFIG_FILE: &str = "smart-player.toml";

/// Environment prefix; nesting uses `__` (e.g. `SMART_PLAYBACK__VOLUME=0.5`)
pub const ENV_PREFIX: &str = "SMART";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Library export used when `--library` is not given
    pub library: Option<PathBuf>,

    pub playback: PlaybackConfig,

    pub sync: SyncConfig,
}

impl CliConfig {
    /// Load configuration from file and process environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration with an explicit environment map
    ///
    /// `None` reads the process environment.
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path).required(true)),
            None => settings.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        // Override with environment variables (prefixed with SMART_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.playback.restart_threshold_secs.is_finite()
            || self.playback.restart_threshold_secs < 0.0
        {
            return Err(CliError::Config(
                "playback.restart_threshold_secs must be a non-negative number".to_string(),
            ));
        }

        if self.sync.inbound_buffer == 0 {
            return Err(CliError::Config(
                "sync.inbound_buffer must be at least 1".to_string(),
            ));
        }

        let w = &self.playback.weights;
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(w.freshness_window_days) || !positive(w.floor) {
            return Err(CliError::Config(
                "playback.weights.freshness_window_days and floor must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Library path from the command line or the configuration
    pub fn library_path(&self, cli: Option<PathBuf>) -> Result<PathBuf> {
        cli.or_else(|| self.library.clone()).ok_or_else(|| {
            CliError::Config(
                "no library given (use --library or set `library` in the config)".to_string(),
            )
        })
    }
}
