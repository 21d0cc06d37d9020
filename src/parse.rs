//! Reading puzzles from text.
//!
//! Input is a sequence of blocks separated by blank lines. Each block is one
//! or more rows of whitespace-separated integers; short rows are padded with
//! 0 to the widest row. The first block is the grid (0 free, nonzero hole),
//! the following blocks are shapes (0/1), and an empty block or the end of
//! input closes the shape list.

use std::io::BufRead;

use crate::error::{PuzzleError, Result};
use crate::geometry::trim_to_bounds;
use crate::grid::Grid;
use crate::pieces::Puzzle;

/// Pulls blank-line separated blocks from a line source, tracking line
/// numbers for error messages.
pub struct BlockReader<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> BlockReader<R> {
    pub const fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    /// Reads rows until a blank line or end of input.
    ///
    /// Returns `Ok(None)` when the block is empty.
    pub fn next_block(&mut self) -> Result<Option<Grid>> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        let mut buffer = String::new();

        loop {
            buffer.clear();
            if self.reader.read_line(&mut buffer)? == 0 {
                break;
            }
            self.line += 1;

            let text = buffer.trim();
            if text.is_empty() {
                break;
            }
            rows.push(parse_row(text, self.line)?);
        }

        Ok((!rows.is_empty()).then(|| Grid::from_rows(&rows)))
    }

    /// Number of lines consumed so far.
    pub const fn line(&self) -> usize {
        self.line
    }
}

/// Parses one row of whitespace-separated cell values.
fn parse_row(text: &str, line: usize) -> Result<Vec<u8>> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<u8>().map_err(|_| PuzzleError::InvalidToken {
                line,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Checks a shape block and crops it to its occupied bounding box.
///
/// `index` is 1-based and only used for error messages.
pub fn validate_shape(block: &Grid, index: usize) -> Result<Grid> {
    if let Some(&value) = block.cells().iter().find(|&&cell| cell > 1) {
        return Err(PuzzleError::InvalidShapeCell { index, value });
    }
    trim_to_bounds(block).ok_or(PuzzleError::EmptyShape { index })
}

/// Reads a whole puzzle, calling `prompt` before each block is read.
///
/// `prompt` receives `None` before the grid and `Some(k)` before the k-th
/// shape (1-based).
pub fn read_puzzle<R: BufRead>(reader: R, mut prompt: impl FnMut(Option<usize>)) -> Result<Puzzle> {
    let mut blocks = BlockReader::new(reader);

    prompt(None);
    let grid = blocks.next_block()?.ok_or(PuzzleError::EmptyGrid)?;

    let mut shapes = Vec::new();
    loop {
        prompt(Some(shapes.len() + 1));
        let Some(block) = blocks.next_block()? else {
            break;
        };
        shapes.push(validate_shape(&block, shapes.len() + 1)?);
    }

    if shapes.is_empty() {
        return Err(PuzzleError::NoShapes);
    }

    Ok(Puzzle::new(grid, shapes))
}

/// Parses a puzzle from a string.
pub fn parse_puzzle(text: &str) -> Result<Puzzle> {
    read_puzzle(text.as_bytes(), |_| {})
}
