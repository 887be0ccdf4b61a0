//! Configuration for the terminal front-end.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};
use unbeatable_tictactoe::Player;

/// Settings for an interactive game.
///
/// Loaded from a TOML file; every field is optional there.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Mark the human plays. X always moves first.
    #[serde(default = "default_human_mark")]
    human_mark: Player,

    /// Pause before the computer's move, in milliseconds.
    #[serde(default = "default_thinking_delay_ms")]
    thinking_delay_ms: u64,

    /// Print the score and node count behind each computer move.
    #[serde(default)]
    show_search: bool,
}

fn default_human_mark() -> Player {
    Player::X
}

fn default_thinking_delay_ms() -> u64 {
    500
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            human_mark: default_human_mark(),
            thinking_delay_ms: default_thinking_delay_ms(),
            show_search: false,
        }
    }
}

impl PlayConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(human_mark = %config.human_mark, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Sets the human's mark.
    pub fn with_human_mark(mut self, mark: Player) -> Self {
        self.human_mark = mark;
        self
    }

    /// Sets the thinking delay.
    pub fn with_thinking_delay_ms(mut self, delay_ms: u64) -> Self {
        self.thinking_delay_ms = delay_ms;
        self
    }

    /// Turns search reporting on or off.
    pub fn with_show_search(mut self, show: bool) -> Self {
        self.show_search = show;
        self
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: PlayConfig = toml::from_str("").unwrap();
        assert_eq!(config, PlayConfig::default());
        assert_eq!(*config.human_mark(), Player::X);
        assert_eq!(*config.thinking_delay_ms(), 500);
        assert!(!*config.show_search());
    }

    #[test]
    fn test_partial_file() {
        let text = "human_mark = \"O\"\nshow_search = true";
        let config: PlayConfig = toml::from_str(text).unwrap();
        assert_eq!(*config.human_mark(), Player::O);
        assert_eq!(*config.thinking_delay_ms(), 500);
        assert!(*config.show_search());
    }

    #[test]
    fn test_overrides() {
        let config = PlayConfig::default()
            .with_human_mark(Player::O)
            .with_thinking_delay_ms(0)
            .with_show_search(true);
        assert_eq!(*config.human_mark(), Player::O);
        assert_eq!(*config.thinking_delay_ms(), 0);
        assert!(*config.show_search());
    }
}
