//! Iterative backtracking search for exact tilings.
//!
//! The search always covers the first free cell in row-major order. Every
//! orientation is tried there, and a successful placement moves the frontier
//! forward. Instead of recursion it keeps two stacks:
//! - candidates: pending `(target cell, orientation)` attempts
//! - trace: committed placements, with non-decreasing target cells
//!
//! Popping a candidate for cell `p` first retracts every committed placement
//! whose target is `>= p`. Those were made deeper in a branch that has now
//! been exhausted, so the grid returns to the state the candidate was
//! pushed from.

use crate::grid::Grid;
use crate::pieces::{Orientation, OrientationSet, Placement};

/// Lazy sequence of complete tilings.
///
/// Each item lists placements in commit order. The iterator owns its grid
/// and stacks, so dropping it mid-way is all it takes to stop searching.
pub struct Solutions<'a> {
    grid: Grid,
    orientations: &'a OrientationSet,
    candidates: Vec<Placement>,
    trace: Vec<Placement>,
    /// Set when the grid starts with no free cell; the empty cover is
    /// yielded once.
    already_covered: bool,
}

/// Starts a search over `grid`, which is mutated in place while iterating.
pub fn solve(grid: Grid, orientations: &OrientationSet) -> Solutions<'_> {
    let mut solutions = Solutions {
        grid,
        orientations,
        candidates: Vec::new(),
        trace: Vec::new(),
        already_covered: false,
    };

    match solutions.grid.first_spot(0, 0) {
        Some(target) => solutions.push_candidates(target),
        None => solutions.already_covered = true,
    }

    solutions
}

impl<'a> Solutions<'a> {
    /// Queues one attempt per orientation at `target`.
    fn push_candidates(&mut self, target: usize) {
        self.candidates.extend(
            (0..self.orientations.len()).map(|orientation| Placement::new(target, orientation)),
        );
    }

    /// Retracts committed placements at or beyond `position`.
    fn unwind_to(&mut self, position: usize) {
        while let Some(&last) = self.trace.last() {
            if last.position < position {
                break;
            }
            self.trace.pop();
            if let Some((top_left, orientation)) = self.locate(last) {
                self.grid.remove(top_left, orientation.mask());
            }
        }
    }

    /// Resolves a placement to the top-left index of its mask.
    fn locate(&self, placement: Placement) -> Option<(usize, &'a Orientation)> {
        let orientations: &'a OrientationSet = self.orientations;
        let orientation = orientations.get(placement.orientation)?;
        let top_left = orientation.origin(placement.position, self.grid.cols())?;
        Some((top_left, orientation))
    }

    /// Attempts a placement, committing it to the trace on success.
    fn try_place(&mut self, placement: Placement) -> bool {
        let Some((top_left, orientation)) = self.locate(placement) else {
            return false;
        };
        let mask = orientation.mask();
        if self.grid.try_insert(top_left, mask) {
            self.trace.push(placement);
            true
        } else {
            false
        }
    }

    /// Current partial solution in commit order.
    pub fn trace(&self) -> &[Placement] {
        &self.trace
    }

    /// Pending attempts not yet tried.
    pub fn pending(&self) -> usize {
        self.candidates.len()
    }
}

impl Iterator for Solutions<'_> {
    type Item = Vec<Placement>;

    fn next(&mut self) -> Option<Self::Item> {
        if std::mem::take(&mut self.already_covered) {
            return Some(Vec::new());
        }

        while let Some(candidate) = self.candidates.pop() {
            self.unwind_to(candidate.position);

            if !self.try_place(candidate) {
                continue;
            }

            // the cell just covered is occupied now, so scanning from it is safe
            match self.grid.first_spot(candidate.position, 0) {
                Some(target) => self.push_candidates(target),
                // every cell before the frontier was already occupied
                None if self.grid.is_full() => return Some(self.trace.clone()),
                None => {}
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows)
    }

    fn orientations(shapes: &[&[&[u8]]]) -> OrientationSet {
        let shapes: Vec<Grid> = shapes.iter().map(|rows| grid(rows)).collect();
        OrientationSet::from_shapes(&shapes)
    }

    /// Replays a solution on a fresh copy of the board, checking that each
    /// placement lands on free cells only and the result is fully covered.
    fn assert_exact_cover(board: &Grid, set: &OrientationSet, solution: &[Placement]) {
        let mut replay = board.clone();
        for placement in solution {
            let orientation = set.get(placement.orientation).unwrap();
            let top_left = orientation.origin(placement.position, board.cols()).unwrap();
            assert!(
                replay.try_insert(top_left, orientation.mask()),
                "placement {placement:?} overlaps or leaves the board"
            );
        }
        assert!(replay.is_full(), "solution leaves free cells: {replay:?}");
    }

    #[test]
    fn test_single_square_fills_square_board() {
        let board = Grid::new(2, 2);
        let set = orientations(&[&[&[1, 1], &[1, 1]]]);
        let solutions: Vec<_> = solve(board.clone(), &set).collect();
        assert_eq!(solutions, vec![vec![Placement::new(0, 0)]]);
        assert_exact_cover(&board, &set, &solutions[0]);
    }

    #[test]
    fn test_monomino_on_two_cells() {
        let board = Grid::new(2, 1);
        let set = orientations(&[&[&[1]]]);
        assert_eq!(set.len(), 1);
        let solutions: Vec<_> = solve(board, &set).collect();
        assert_eq!(
            solutions,
            vec![vec![Placement::new(0, 0), Placement::new(1, 0)]]
        );
    }

    #[test]
    fn test_hole_is_never_touched() {
        let board = grid(&[&[0, 1, 0]]);
        let set = orientations(&[&[&[1]]]);
        let mut search = solve(board.clone(), &set);
        let solution = search.next().unwrap();
        assert_eq!(solution, vec![Placement::new(0, 0), Placement::new(2, 0)]);
        assert!(search.next().is_none());
        assert!(search.trace().iter().all(|p| p.position != 1));
        assert_eq!(search.grid.get(0, 1), Some(1));
        assert_exact_cover(&board, &set, &solution);
    }

    #[test]
    fn test_isolated_region_smaller_than_every_shape() {
        // the top-left cell is walled in by holes
        let board = grid(&[&[0, 1, 0, 0], &[1, 1, 0, 0]]);
        let set = orientations(&[&[&[1, 1]]]);
        let mut search = solve(board, &set);
        assert!(search.next().is_none());
        assert_eq!(search.pending(), 0);
    }

    #[test]
    fn test_domino_tilings_of_two_by_three() {
        let board = Grid::new(2, 3);
        let set = orientations(&[&[&[1, 1]]]);
        let solutions: Vec<_> = solve(board.clone(), &set).collect();
        assert_eq!(solutions.len(), 3);
        for solution in &solutions {
            assert_eq!(solution.len(), 3);
            assert_exact_cover(&board, &set, solution);
        }
    }

    #[test]
    fn test_domino_tilings_of_four_by_four() {
        let board = Grid::new(4, 4);
        let set = orientations(&[&[&[1, 1]]]);
        let solutions: Vec<_> = solve(board.clone(), &set).collect();
        assert_eq!(solutions.len(), 36);
        for solution in &solutions {
            assert_exact_cover(&board, &set, solution);
        }
        let mut distinct = solutions.clone();
        distinct.sort_by_key(|s| s.iter().map(|p| (p.position, p.orientation)).collect::<Vec<_>>());
        distinct.dedup();
        assert_eq!(distinct.len(), solutions.len());
    }

    #[test]
    fn test_l_trominoes_on_two_by_three() {
        let board = Grid::new(2, 3);
        let set = orientations(&[&[&[1, 0], &[1, 1]]]);
        assert_eq!(set.len(), 4);
        let solutions: Vec<_> = solve(board.clone(), &set).collect();
        // the left piece takes column 0 plus either cell of column 1
        assert_eq!(solutions.len(), 2);
        for solution in &solutions {
            assert_eq!(solution.len(), 2);
            assert_exact_cover(&board, &set, solution);
        }
    }

    #[test]
    fn test_placements_are_in_commit_order_with_rising_targets() {
        let board = Grid::new(3, 4);
        let set = orientations(&[&[&[1, 1]], &[&[1, 1], &[1, 1]]]);
        let solutions: Vec<_> = solve(board.clone(), &set).collect();
        assert!(!solutions.is_empty());
        for solution in &solutions {
            assert!(solution.windows(2).all(|w| w[0].position < w[1].position));
            assert_exact_cover(&board, &set, solution);
        }
    }

    #[test]
    fn test_search_restores_grid_after_exhaustion() {
        let board = grid(&[&[0, 0, 0, 0], &[0, 2, 0, 0], &[0, 0, 0, 0]]);
        let set = orientations(&[&[&[1, 1]], &[&[1, 1, 1]]]);
        let mut search = solve(board.clone(), &set);
        while search.next().is_some() {}
        // flush the remaining trace by unwinding to the very first cell
        search.unwind_to(0);
        assert_eq!(search.grid, board);
    }

    #[test]
    fn test_already_covered_board_yields_empty_solution_once() {
        let board = grid(&[&[1, 1], &[1, 1]]);
        let set = orientations(&[&[&[1]]]);
        let solutions: Vec<_> = solve(board, &set).collect();
        assert_eq!(solutions, vec![Vec::<Placement>::new()]);
    }

    #[test]
    fn test_no_orientations_means_no_solutions() {
        let set = OrientationSet::default();
        assert_eq!(solve(Grid::new(1, 2), &set).count(), 0);
    }

    #[test]
    fn test_early_stop_leaves_remaining_work() {
        let set = orientations(&[&[&[1, 1]]]);
        let mut search = solve(Grid::new(4, 4), &set);
        assert!(search.next().is_some());
        assert!(search.pending() > 0);
        drop(search);
    }
}
