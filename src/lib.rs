//! Exact-cover Tiling Solver Library
//!
//! Finds every way to cover the free cells of a rectangular grid with copies
//! of a set of flat shapes, each usable any number of times in any
//! quarter-turn rotation. Blocked cells ("holes") are never covered.
//!
//! ```
//! use tiler::{Grid, Puzzle};
//!
//! let board = Grid::new(2, 3);
//! let domino = Grid::from_rows(&[vec![1, 1]]);
//! let puzzle = Puzzle::new(board, vec![domino]);
//! assert_eq!(puzzle.count_solutions(None), 3);
//! ```

pub mod error;
pub mod geometry;
pub mod grid;
pub mod parse;
pub mod pieces;
pub mod solver;
pub mod visualization;

pub use error::{PuzzleError, Result};
pub use grid::Grid;
pub use pieces::{Orientation, OrientationSet, Placement, Puzzle};
pub use solver::{solve, Solutions};
