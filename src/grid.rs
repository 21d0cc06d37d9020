//! Grid representation and in-place placement operations.
//!
//! A grid is a rectangular array of small integers stored flat in row-major
//! order, so cell `(row, col)` lives at index `row * cols + col`. A value of
//! 0 marks a free cell; anything else is occupied, either by a hole given in
//! the input or by a placed piece. Shape masks use the same representation
//! with 0/1 cells.

use crate::pieces::{OrientationSet, Placement};

/// A rectangular cell array addressed by flattened row-major index.
///
/// Equality and hashing include the dimensions, so a 1x4 and a 4x1 mask with
/// the same flattened bits are never considered equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Creates an all-free grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Builds a grid from rows, right-padding short rows with 0.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let cols = rows.iter().map(|row| row.as_ref().len()).max().unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            cells.extend_from_slice(row);
            cells.resize(cells.len() + cols - row.len(), 0);
        }
        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    /// Wraps an existing flat buffer. `cells.len()` must equal `rows * cols`.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols, "cell buffer is not {rows}x{cols}");
        Self { rows, cols, cells }
    }

    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat row-major view of the cells.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Returns the cell at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Iterates over the rows as slices.
    pub fn row_slices(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact rejects a zero chunk size; a zero-width grid has no rows to yield
        self.cells.chunks_exact(self.cols.max(1))
    }

    /// Converts a flat index to `(row, col)`.
    #[inline(always)]
    pub const fn idx_to_coord(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Converts `(row, col)` to a flat index.
    #[inline(always)]
    pub const fn coord_to_idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Finds the smallest row-major index `>= start` whose cell equals `value`.
    ///
    /// Returns `None` when no such cell exists, including when `start` is past
    /// the end of the grid.
    pub fn first_spot(&self, start: usize, value: u8) -> Option<usize> {
        self.cells
            .get(start..)?
            .iter()
            .position(|&cell| cell == value)
            .map(|offset| start + offset)
    }

    /// Whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != 0)
    }

    /// Number of free cells.
    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == 0).count()
    }

    /// Resolves the window a mask would cover when its top-left corner sits at
    /// flat index `top_left`. Returns `None` if any part falls outside the grid.
    fn window(&self, top_left: usize, mask: &Grid) -> Option<(usize, usize)> {
        if self.cols == 0 || mask.cols == 0 {
            return None;
        }
        let (top, left) = self.idx_to_coord(top_left);
        let fits_rows = top.checked_add(mask.rows)? <= self.rows;
        let fits_cols = left.checked_add(mask.cols)? <= self.cols;
        (fits_rows && fits_cols).then_some((top, left))
    }

    /// Iterates over the grid row segments under a window, paired with the
    /// matching mask rows.
    fn window_rows(
        cols: usize,
        top: usize,
        left: usize,
        mask: &Grid,
    ) -> impl Iterator<Item = (std::ops::Range<usize>, &[u8])> {
        mask.row_slices().enumerate().map(move |(r, mask_row)| {
            let start = (top + r) * cols + left;
            (start..start + mask_row.len(), mask_row)
        })
    }

    /// Overlays `mask` with its top-left corner at `top_left`.
    ///
    /// Fails without touching the grid when the window leaves the grid or an
    /// occupied mask cell lands on an occupied grid cell. On success every
    /// occupied mask cell is OR-ed into the grid.
    pub fn try_insert(&mut self, top_left: usize, mask: &Grid) -> bool {
        let Some((top, left)) = self.window(top_left, mask) else {
            return false;
        };

        let collides = Self::window_rows(self.cols, top, left, mask).any(|(range, mask_row)| {
            self.cells[range]
                .iter()
                .zip(mask_row)
                .any(|(&cell, &bit)| bit != 0 && cell != 0)
        });
        if collides {
            return false;
        }

        for (range, mask_row) in Self::window_rows(self.cols, top, left, mask) {
            for (cell, &bit) in self.cells[range].iter_mut().zip(mask_row) {
                *cell |= bit;
            }
        }
        true
    }

    /// XORs `mask` back out of the window at `top_left`.
    ///
    /// Only valid as the inverse of a successful [`Grid::try_insert`] with the
    /// same arguments; it flips bits without checking anything.
    pub fn remove(&mut self, top_left: usize, mask: &Grid) {
        let Some((top, left)) = self.window(top_left, mask) else {
            return;
        };
        for (range, mask_row) in Self::window_rows(self.cols, top, left, mask) {
            for (cell, &bit) in self.cells[range].iter_mut().zip(mask_row) {
                *cell ^= bit;
            }
        }
    }
}

/// Converts a solution to a label grid.
///
/// Cells covered by orientation `i` hold `i + 1`; holes and anything left
/// uncovered hold 0. Placements whose window does not fit are skipped.
pub fn solution_to_grid(
    grid: &Grid,
    orientations: &OrientationSet,
    solution: &[Placement],
) -> Grid {
    let mut labels = Grid::new(grid.rows(), grid.cols());

    for placement in solution {
        let Some(orientation) = orientations.get(placement.orientation) else {
            continue;
        };
        let Some(top_left) = orientation.origin(placement.position, grid.cols()) else {
            continue;
        };
        let Some((top, left)) = labels.window(top_left, orientation.mask()) else {
            continue;
        };
        let label = (placement.orientation + 1).min(usize::from(u8::MAX)) as u8;
        for (range, mask_row) in Grid::window_rows(labels.cols, top, left, orientation.mask()) {
            for (cell, &bit) in labels.cells[range].iter_mut().zip(mask_row) {
                if bit != 0 {
                    *cell = label;
                }
            }
        }
    }

    labels
}
