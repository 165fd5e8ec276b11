// error.rs - error types for ranges, the player capability, the tracker and config loading

use std::path::PathBuf;

/// Raised synchronously when a [`crate::range::BoundedRange`] cannot be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RangeError {
    #[error("min must be less than max, received min={min} max={max}")]
    InvertedBounds { min: f64, max: f64 },

    #[error("current must be within range, received current={current} min={min} max={max}")]
    CurrentOutOfRange { current: f64, min: f64, max: f64 },
}

/// Failure reported by the external video player.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayerError {
    #[error("current video is not a 360 video")]
    Not360Video,

    #[error("player rejected the camera call: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Player(#[from] PlayerError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{name} must be a non-negative integer, received {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}
