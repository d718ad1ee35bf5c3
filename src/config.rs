//! Session configuration loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Letters already bound to generate, save, load and quit.
const RESERVED_KEYS: [char; 4] = ['g', 's', 'l', 'q'];

/// What a failed load does to the game that was already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LoadFailurePolicy {
    /// Drop the running game; the session becomes empty.
    #[default]
    Invalidate,
    /// Keep the running game and only report the error.
    Preserve,
}

/// Settings for a Greed session and its terminal front end.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct SessionConfig {
    /// Board width requested on generate.
    #[serde(default = "default_width")]
    width: i64,

    /// Board height requested on generate.
    #[serde(default = "default_height")]
    height: i64,

    /// Seed requested on generate. Empty lets the engine choose.
    #[serde(default)]
    seed: String,

    /// How long transient messages stay up, in milliseconds.
    #[serde(default = "default_message_delay_ms")]
    message_delay_ms: u64,

    /// File name offered for saved games.
    #[serde(default = "default_save_file_name")]
    save_file_name: String,

    /// Content type attached to saved games.
    #[serde(default = "default_save_content_type")]
    save_content_type: String,

    /// Directory saved games are written to and loaded from.
    #[serde(default = "default_save_dir")]
    save_dir: PathBuf,

    /// Key that takes back the last move.
    #[serde(default = "default_undo_key")]
    undo_key: char,

    /// Behavior when loading a saved game fails.
    #[serde(default)]
    load_failure: LoadFailurePolicy,

    /// Log file used while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_width() -> i64 {
    20
}

#[instrument]
fn default_height() -> i64 {
    10
}

#[instrument]
fn default_message_delay_ms() -> u64 {
    2000
}

#[instrument]
fn default_save_file_name() -> String {
    "greed.json".to_string()
}

#[instrument]
fn default_save_content_type() -> String {
    "application/json".to_string()
}

#[instrument]
fn default_save_dir() -> PathBuf {
    PathBuf::from(".")
}

#[instrument]
fn default_undo_key() -> char {
    'u'
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("greed_session.log")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            seed: String::new(),
            message_delay_ms: default_message_delay_ms(),
            save_file_name: default_save_file_name(),
            save_content_type: default_save_content_type(),
            save_dir: default_save_dir(),
            undo_key: default_undo_key(),
            load_failure: LoadFailurePolicy::default(),
            log_file: default_log_file(),
        }
    }
}

impl SessionConfig {
    /// How long transient messages stay up.
    pub fn message_delay(&self) -> Duration {
        Duration::from_millis(self.message_delay_ms)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        debug!(?config, "Parsed session config");
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            width = config.width,
            height = config.height,
            load_failure = %config.load_failure,
            "Config loaded successfully"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.save_file_name.trim().is_empty() {
            return Err(ConfigError::new("save_file_name must not be empty"));
        }
        if self.undo_key.is_ascii_digit() {
            return Err(ConfigError::new(format!(
                "undo_key '{}' collides with the movement keys",
                self.undo_key
            )));
        }
        if RESERVED_KEYS.contains(&self.undo_key.to_ascii_lowercase()) {
            return Err(ConfigError::new(format!(
                "undo_key '{}' collides with a command key",
                self.undo_key
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
