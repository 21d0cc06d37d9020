//! Rotation and normalization of shape masks.
//!
//! A flat piece has 4 rotational orientations. Each is produced by rotating
//! the previous one a quarter turn counter-clockwise, which swaps the row and
//! column extents of a non-square mask. Symmetric pieces repeat themselves
//! and are collapsed by [`dedupe`].

use rustc_hash::FxHashSet;

use crate::grid::Grid;

/// Number of quarter-turn orientations of a flat piece.
pub const NUM_ROTATIONS: usize = 4;

/// Rotates a mask a quarter turn counter-clockwise.
///
/// Output cell `(i, j)` takes input cell `(j, cols - 1 - i)`; the result has
/// `cols` rows and `rows` columns.
pub fn rotate_quarter(mask: &Grid) -> Grid {
    let (rows, cols) = (mask.rows(), mask.cols());
    let mut cells = Vec::with_capacity(mask.len());

    for i in 0..cols {
        for j in 0..rows {
            cells.push(mask.get(j, cols - 1 - i).unwrap_or(0));
        }
    }

    Grid::from_cells(cols, rows, cells)
}

/// Returns the original mask followed by its 90, 180 and 270 degree rotations.
pub fn rotations(mask: &Grid) -> Vec<Grid> {
    let mut rotated = Vec::with_capacity(NUM_ROTATIONS);
    rotated.push(mask.clone());

    for _ in 1..NUM_ROTATIONS {
        let next = rotate_quarter(rotated.last().unwrap_or(mask));
        rotated.push(next);
    }

    rotated
}

/// Removes repeated masks in place, keeping the first occurrence of each.
///
/// Masks compare by dimensions and content. Survivors keep their relative
/// order.
pub fn dedupe(masks: &mut Vec<Grid>) {
    let mut seen: FxHashSet<Grid> = FxHashSet::default();
    masks.retain(|mask| seen.insert(mask.clone()));
}

/// Flat local index of the first occupied cell, in row-major order.
///
/// `None` only for a mask with no occupied cell.
#[inline]
pub fn anchor_offset(mask: &Grid) -> Option<usize> {
    mask.first_spot(0, 1)
}

/// Crops a mask to the bounding box of its nonzero cells.
///
/// Returns `None` when no cell is set.
pub fn trim_to_bounds(mask: &Grid) -> Option<Grid> {
    let occupied = || {
        (0..mask.len())
            .filter(|&idx| mask.cells().get(idx).is_some_and(|&cell| cell != 0))
            .map(|idx| mask.idx_to_coord(idx))
    };

    let min_row = occupied().map(|(row, _)| row).min()?;
    let max_row = occupied().map(|(row, _)| row).max()?;
    let min_col = occupied().map(|(_, col)| col).min()?;
    let max_col = occupied().map(|(_, col)| col).max()?;

    let rows: Vec<Vec<u8>> = (min_row..=max_row)
        .map(|row| {
            (min_col..=max_col)
                .map(|col| mask.get(row, col).unwrap_or(0))
                .collect()
        })
        .collect();

    Some(Grid::from_rows(&rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows)
    }

    #[test]
    fn test_rotate_quarter_is_counter_clockwise() {
        let l = mask(&[&[1, 0], &[1, 0], &[1, 1]]);
        let rotated = rotate_quarter(&l);
        assert_eq!((rotated.rows(), rotated.cols()), (2, 3));
        assert_eq!(rotated, mask(&[&[0, 0, 1], &[1, 1, 1]]));
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let shape = mask(&[&[1, 1, 0], &[0, 1, 1]]);
        let mut current = shape.clone();
        for _ in 0..NUM_ROTATIONS {
            current = rotate_quarter(&current);
        }
        assert_eq!(current, shape);
    }

    #[test]
    fn test_rotations_yield_four_including_original() {
        let bar = mask(&[&[1, 1, 1]]);
        let all = rotations(&bar);
        assert_eq!(all.len(), NUM_ROTATIONS);
        assert_eq!(all[0], bar);
        assert_eq!((all[1].rows(), all[1].cols()), (3, 1));
        assert_eq!(all[2], bar);
    }

    #[test]
    fn test_dedupe_matches_symmetry_class() {
        let cases: [(Grid, usize); 5] = [
            (mask(&[&[1, 1], &[1, 1]]), 1),
            (mask(&[&[1]]), 1),
            (mask(&[&[1, 1]]), 2),
            (mask(&[&[1, 1, 0], &[0, 1, 1]]), 2),
            (mask(&[&[1, 0], &[1, 0], &[1, 1]]), 4),
        ];
        for (shape, expected) in cases {
            let mut all = rotations(&shape);
            dedupe(&mut all);
            assert_eq!(all.len(), expected, "shape {shape:?}");
            assert_eq!(all[0], shape);
        }
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_in_order() {
        let a = mask(&[&[1]]);
        let b = mask(&[&[1, 1]]);
        let c = mask(&[&[1], &[1]]);
        let mut masks = vec![a.clone(), b.clone(), a.clone(), c.clone(), b.clone(), a.clone()];
        dedupe(&mut masks);
        assert_eq!(masks, vec![a, b, c]);
    }

    #[test]
    fn test_dedupe_distinguishes_dimensions_with_equal_bits() {
        let wide = mask(&[&[1, 1, 1, 1]]);
        let square = mask(&[&[1, 1], &[1, 1]]);
        let tall = mask(&[&[1], &[1], &[1], &[1]]);
        let mut masks = vec![wide.clone(), square.clone(), tall.clone()];
        dedupe(&mut masks);
        assert_eq!(masks, vec![wide, square, tall]);
    }

    #[test]
    fn test_anchor_offset_is_first_occupied_cell() {
        assert_eq!(anchor_offset(&mask(&[&[1, 1], &[1, 0]])), Some(0));
        assert_eq!(anchor_offset(&mask(&[&[0, 1], &[1, 1]])), Some(1));
        assert_eq!(anchor_offset(&mask(&[&[0, 0, 1], &[1, 1, 1]])), Some(2));
        assert_eq!(anchor_offset(&mask(&[&[0, 0]])), None);
    }

    #[test]
    fn test_trim_to_bounds_crops_empty_border() {
        let padded = mask(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 0, 1, 0]]);
        assert_eq!(trim_to_bounds(&padded), Some(mask(&[&[1, 1], &[0, 1]])));
        assert_eq!(trim_to_bounds(&mask(&[&[0, 0], &[0, 0]])), None);
    }
}
