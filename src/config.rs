//! Presentation settings for the terminal game.
//!
//! The game engine never reads these; they are handed to the TUI as a value.

use crate::games::tictactoe::Player;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings for a terminal game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TuiConfig {
    /// The side the human plays. X always moves first.
    #[serde(default = "default_human_player")]
    human_player: Player,

    /// How long the final board stays visible before the end screen.
    #[serde(default = "default_end_screen_delay_ms")]
    end_screen_delay_ms: u64,

    /// File the TUI writes its logs to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_human_player() -> Player {
    Player::X
}

fn default_end_screen_delay_ms() -> u64 {
    2000
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictactoe_tui.log")
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            human_player: default_human_player(),
            end_screen_delay_ms: default_end_screen_delay_ms(),
            log_file: default_log_file(),
        }
    }
}

impl TuiConfig {
    /// Loads configuration from TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(human = %config.human_player, "Config loaded successfully");
        Ok(config)
    }

    /// Overrides the human's side.
    pub fn with_human_player(mut self, player: Player) -> Self {
        self.human_player = player;
        self
    }

    /// Overrides the end-screen delay.
    pub fn with_end_screen_delay_ms(mut self, delay_ms: u64) -> Self {
        self.end_screen_delay_ms = delay_ms;
        self
    }

    /// The AI plays whichever side the human does not.
    pub fn ai_player(&self) -> Player {
        self.human_player.opponent()
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
