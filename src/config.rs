use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{Marker, Roster};

/// Largest grid dimension or run length the terminal front-end accepts.
/// Column labels stay single digits up to this size.
pub const MAX_DIMENSION: usize = 9;

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerConfig {
    pub marker: char,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PlayerConfig {
    pub fn new(marker: char) -> Self {
        PlayerConfig { marker, name: None }
    }
}

/// Grid size, win target, and players for each game.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub run_length: usize,
    pub players: Vec<PlayerConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 7,
            height: 6,
            run_length: 4,
            players: vec![PlayerConfig::new('X'), PlayerConfig::new('O')],
        }
    }
}

impl GameConfig {
    /// Replace the player list with one player per character in `markers`.
    pub fn set_markers(&mut self, markers: &str) {
        self.players = markers.chars().map(PlayerConfig::new).collect();
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let game = &self.game;
        for (field, value) in [
            ("width", game.width),
            ("height", game.height),
            ("run_length", game.run_length),
        ] {
            if !(1..=MAX_DIMENSION).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "game.{field} must be in 1..={MAX_DIMENSION} (got {value})"
                )));
            }
        }

        if game.players.is_empty() {
            return Err(ConfigError::Validation(
                "game.players must list at least one player".into(),
            ));
        }

        // Same marker rules as a live session
        let mut roster = Roster::new();
        for player in &game.players {
            roster.register(Marker::new(player.marker), "")?;
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
