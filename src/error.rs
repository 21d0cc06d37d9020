//! Error type for reading puzzle definitions.
//!
//! The search itself never fails: a rejected placement is a `false`, a
//! missing free cell is a `None`. Only input handling produces errors.

use thiserror::Error;

/// Failure while turning textual input into a [`Puzzle`](crate::pieces::Puzzle).
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// A token that is not a non-negative integer fitting in a cell.
    #[error("line {line}: invalid cell value '{token}'")]
    InvalidToken { line: usize, token: String },

    /// The input ended before any grid row was read.
    #[error("no grid rows were given")]
    EmptyGrid,

    /// The grid was read but no shape followed it.
    #[error("no shapes were given")]
    NoShapes,

    /// A shape block whose cells are all zero.
    #[error("shape {index} has no occupied cells")]
    EmptyShape { index: usize },

    /// A shape cell other than 0 or 1.
    #[error("shape {index} contains value {value}, expected 0 or 1")]
    InvalidShapeCell { index: usize, value: u8 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, PuzzleError>;
