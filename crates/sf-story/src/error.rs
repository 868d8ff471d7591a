//! Error types for the story engine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while running the story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A scene identifier has no registered handler or is not a known scene.
    #[error("no scene named '{0}'")]
    UnknownScene(String),

    /// There is no save file at the given path.
    #[error("no save file at {}", .0.display())]
    SaveNotFound(PathBuf),

    /// A save file could not be parsed or written as JSON.
    #[error("save file is malformed: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Combat failed to run.
    #[error(transparent)]
    Mechanics(#[from] sf_mechanics::MechError),

    /// Input from the player could not be obtained.
    #[error(transparent)]
    Core(#[from] sf_core::CoreError),
}
