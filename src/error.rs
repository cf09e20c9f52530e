use std::path::PathBuf;

use crate::game::Marker;

/// Errors that prevent a game session from being created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("invalid grid dimensions {width}x{height} (both must be >= 1)")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid run length {0} (must be >= 1)")]
    InvalidRunLength(usize),

    #[error("marker '{0}' is already taken")]
    DuplicateMarker(Marker),

    #[error("marker '{0}' is reserved for empty cells")]
    ReservedMarker(Marker),

    #[error("a game needs at least one player")]
    NoPlayers,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid game setup: {0}")]
    Setup(#[from] SetupError),
}
