//! Configuration file loading for a play session.
//!
//! Settings come from an optional TOML file; command-line flags override
//! individual keys afterwards.

use chess_core::{Color, STARTPOS};
use chess_engine::{EngineError, Position};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The starting position is not a valid FEN.
    #[error("Invalid starting position: {0}")]
    InvalidPosition(#[from] EngineError),
    /// The player side is neither "w" nor "b".
    #[error("Invalid player side: {0:?} (expected \"w\" or \"b\")")]
    InvalidSide(String),
}

/// Settings for one game against the bot.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayConfig {
    /// Starting position in FEN. Defaults to the standard start.
    #[serde(default = "default_start_fen")]
    pub start_fen: String,
    /// Side the human plays, "w" or "b". Defaults to "w".
    #[serde(default = "default_player_side")]
    pub player_side: String,
    /// Seed for the bot's random choices; unseeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Log filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_start_fen() -> String {
    STARTPOS.to_string()
}

fn default_player_side() -> String {
    "w".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            start_fen: default_start_fen(),
            player_side: default_player_side(),
            seed: None,
            log_level: default_log_level(),
        }
    }
}

impl PlayConfig {
    /// Loads the configuration from `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration file path, `bot-random.toml` in the
    /// current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("bot-random.toml")
    }

    /// Parses the starting position.
    pub fn start_position(&self) -> Result<Position, ConfigError> {
        Ok(Position::from_fen(&self.start_fen)?)
    }

    /// Parses the human's side.
    pub fn player_color(&self) -> Result<Color, ConfigError> {
        Color::from_fen_token(&self.player_side)
            .ok_or_else(|| ConfigError::InvalidSide(self.player_side.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
start_fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1"
player_side = "b"
seed = 42
log_level = "debug"
"#;

        let config: PlayConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.start_fen, "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(config.player_color().unwrap(), Color::Black);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: PlayConfig = toml::from_str("").unwrap();

        assert_eq!(config, PlayConfig::default());
        assert_eq!(config.start_fen, STARTPOS);
        assert_eq!(config.player_color().unwrap(), Color::White);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_side_is_rejected() {
        let config = PlayConfig {
            player_side: "white".to_string(),
            ..PlayConfig::default()
        };

        match config.player_color() {
            Err(ConfigError::InvalidSide(side)) => assert_eq!(side, "white"),
            other => panic!("Expected InvalidSide error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_fen_is_rejected() {
        let config = PlayConfig {
            start_fen: "not a fen".to_string(),
            ..PlayConfig::default()
        };

        assert!(matches!(
            config.start_position(),
            Err(ConfigError::InvalidPosition(EngineError::MalformedFen(_)))
        ));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let result: Result<PlayConfig, _> = toml::from_str("seed = \"many\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_returns_default_when_file_does_not_exist() {
        let path = Path::new("definitely-missing-bot-random.toml");
        let config = PlayConfig::load(path).unwrap();
        assert_eq!(config, PlayConfig::default());
    }

    #[test]
    fn test_config_path_returns_expected_path() {
        assert_eq!(PlayConfig::config_path(), PathBuf::from("bot-random.toml"));
    }
}
