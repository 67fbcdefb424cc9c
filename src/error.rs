//! Error types
//!
//! The tick path never fails. Errors only come from startup: level data that
//! does not hold together, or a settings file that cannot be read.

use std::io;

/// Top-level error returned when building an [`Engine`](crate::Engine).
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Level geometry that cannot be simulated.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LevelError {
    #[error("Segment '{0}' has no platforms")]
    NoPlatforms(&'static str),

    #[error("Segment '{segment}' platform {index} has invalid geometry")]
    InvalidPlatform { segment: &'static str, index: usize },

    #[error("Segment '{segment}' is {width}px wide, narrower than the viewport")]
    NarrowerThanViewport { segment: &'static str, width: f32 },

    #[error("Segment '{0}' spawn point lies outside the level")]
    SpawnOutOfBounds(&'static str),

    #[error("Segment '{0}' exit trigger lies outside the level")]
    ExitOutOfBounds(&'static str),
}

/// Settings file problems.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("max_frame_ms must be a positive number of milliseconds, got {0}")]
    InvalidFrameCap(f64),
}
