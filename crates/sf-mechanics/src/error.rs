//! Error types for the combat engine.

/// Errors that can occur during combat.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// An encounter was started without enemies.
    #[error("encounter has no enemies")]
    NoEnemies,

    /// Input from the player could not be obtained.
    #[error(transparent)]
    Core(#[from] sf_core::CoreError),
}

/// Convenience result type for combat operations.
pub type MechResult<T> = Result<T, MechError>;
