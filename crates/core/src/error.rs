/// Error types for the engine
use thiserror::Error;

use crate::types::{InvalidRotation, PieceKind};

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Internal-invariant violations surfaced by the engine.
///
/// Gameplay failures (blocked moves, rotations without a legal kick) are not
/// errors; they leave the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A piece was committed to the board where it does not fit
    #[error("{kind:?} piece does not fit at row {row}, col {col}")]
    PieceDoesNotFit {
        kind: PieceKind,
        row: isize,
        col: isize,
    },

    /// Rotation value outside 0..=3
    #[error(transparent)]
    InvalidRotation(#[from] InvalidRotation),
}
