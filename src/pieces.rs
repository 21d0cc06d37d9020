//! Puzzle definitions, piece orientations and placements.
//!
//! Base shapes are expanded once into an [`OrientationSet`]: every quarter-turn
//! rotation of every shape, with repeats removed, each paired with the anchor
//! offset that aligns it onto a target cell.

use crate::geometry::{anchor_offset, dedupe, rotations};
use crate::grid::Grid;
use crate::solver;

/// A committed shape: the target cell it was aligned to and which
/// orientation was used.
///
/// `position` is the free cell the search was covering, not the mask's
/// top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub position: usize,
    pub orientation: usize,
}

impl Placement {
    #[inline]
    pub const fn new(position: usize, orientation: usize) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

/// One rotation of a base shape with its anchor offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Orientation {
    mask: Grid,
    anchor: usize,
}

impl Orientation {
    /// Wraps a mask, or returns `None` if it has no occupied cell.
    pub fn new(mask: Grid) -> Option<Self> {
        let anchor = anchor_offset(&mask)?;
        Some(Self { mask, anchor })
    }

    #[inline]
    pub const fn mask(&self) -> &Grid {
        &self.mask
    }

    /// Flat local index of the mask's first occupied cell.
    #[inline]
    pub const fn anchor_offset(&self) -> usize {
        self.anchor
    }

    /// Flat grid index of the mask's top-left corner when its anchor cell
    /// covers `target`.
    ///
    /// The anchor is split into a local `(row, col)` and subtracted per axis,
    /// so a window that would start above or left of the grid yields `None`
    /// instead of wrapping onto the previous row.
    pub fn origin(&self, target: usize, grid_cols: usize) -> Option<usize> {
        if grid_cols == 0 {
            return None;
        }
        let (row, col) = (target / grid_cols, target % grid_cols);
        let (anchor_row, anchor_col) = self.mask.idx_to_coord(self.anchor);
        let top = row.checked_sub(anchor_row)?;
        let left = col.checked_sub(anchor_col)?;
        Some(top * grid_cols + left)
    }
}

/// The deduplicated orientations of all base shapes, in generation order.
///
/// Built once before a search and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrientationSet {
    orientations: Vec<Orientation>,
}

impl OrientationSet {
    /// Expands every shape into its rotations and drops repeats across the
    /// combined list. Shapes without occupied cells contribute nothing.
    pub fn from_shapes(shapes: &[Grid]) -> Self {
        let mut masks: Vec<Grid> = shapes.iter().flat_map(rotations).collect();
        dedupe(&mut masks);

        Self {
            orientations: masks.into_iter().filter_map(Orientation::new).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.orientations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orientations.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Orientation> {
        self.orientations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Orientation> {
        self.orientations.iter()
    }
}

impl<'a> IntoIterator for &'a OrientationSet {
    type Item = &'a Orientation;
    type IntoIter = std::slice::Iter<'a, Orientation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A tiling puzzle: the board and the base shapes that may cover it.
///
/// Every shape may be used any number of times, in any rotation.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub grid: Grid,
    pub shapes: Vec<Grid>,
    orientations: OrientationSet,
}

impl Puzzle {
    pub fn new(grid: Grid, shapes: Vec<Grid>) -> Self {
        let orientations = OrientationSet::from_shapes(&shapes);
        Self {
            grid,
            shapes,
            orientations,
        }
    }

    #[inline]
    pub const fn orientations(&self) -> &OrientationSet {
        &self.orientations
    }

    /// Lazily enumerates solutions on a private copy of the grid.
    pub fn solutions(&self) -> solver::Solutions<'_> {
        solver::solve(self.grid.clone(), &self.orientations)
    }

    /// Collects solutions, stopping after `max_solutions` when given.
    pub fn solve(&self, max_solutions: Option<usize>) -> Vec<Vec<Placement>> {
        self.solutions()
            .take(max_solutions.unwrap_or(usize::MAX))
            .collect()
    }

    /// Counts solutions, stopping after `max_solutions` when given.
    pub fn count_solutions(&self, max_solutions: Option<usize>) -> usize {
        self.solutions()
            .take(max_solutions.unwrap_or(usize::MAX))
            .count()
    }

    /// Renders a solution as a label grid, see [`crate::grid::solution_to_grid`].
    pub fn solution_to_grid(&self, solution: &[Placement]) -> Grid {
        crate::grid::solution_to_grid(&self.grid, &self.orientations, solution)
    }
}
