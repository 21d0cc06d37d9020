//! Terminal rendering of grids, shapes and solutions.
//!
//! Solutions are shown as label grids (see [`crate::grid::solution_to_grid`]):
//! each covered cell prints the 1-based index of the orientation covering it,
//! optionally colored so neighbouring pieces stand apart.

use std::fmt::Write;

use crossterm::style::{Color, Stylize};

use crate::grid::Grid;
use crate::pieces::{OrientationSet, Placement};

/// Foreground colors cycled through by label.
const PALETTE: [Color; 12] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::DarkRed,
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkCyan,
];

/// Whether rendered labels carry ANSI color codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Plain,
    Colored,
}

/// Returns the display color for a label (1-based).
///
/// The mapping is stable so a shape keeps its color across solutions.
pub fn label_color(label: u8) -> Color {
    let index = usize::from(label.saturating_sub(1)) % PALETTE.len();
    PALETTE.get(index).copied().unwrap_or(Color::Reset)
}

/// Single-character label: `1`-`9`, then `A`-`Z`, then `#`.
fn label_char(label: u8) -> char {
    match label {
        0 => ' ',
        1..=9 => char::from(b'0' + label),
        10..=35 => char::from(b'A' + label - 10),
        _ => '#',
    }
}

fn styled(text: char, color: Color, style: Style) -> String {
    match style {
        Style::Plain => text.to_string(),
        Style::Colored => text.to_string().with(color).to_string(),
    }
}

/// Formats rows of cells, mapping each cell to its printed form.
///
/// Trailing blanks are stripped from every row.
fn format_cells(grid: &Grid, mut cell: impl FnMut(u8) -> String) -> String {
    let mut output = String::new();
    for row in grid.row_slices() {
        let line: Vec<String> = row.iter().map(|&value| cell(value)).collect();
        let _ = writeln!(output, "{}", line.join(" ").trim_end());
    }
    output
}

/// Formats a label grid, leaving unlabeled cells blank.
pub fn format_labels(labels: &Grid, style: Style) -> String {
    format_cells(labels, |label| {
        if label == 0 {
            " ".to_string()
        } else {
            styled(label_char(label), label_color(label), style)
        }
    })
}

/// Formats a solution of `grid` as a label grid.
pub fn format_solution(
    grid: &Grid,
    orientations: &OrientationSet,
    solution: &[Placement],
    style: Style,
) -> String {
    let labels = crate::grid::solution_to_grid(grid, orientations, solution);
    format_labels(&labels, style)
}

/// Formats a shape mask with `1` for occupied cells and blanks elsewhere.
pub fn format_mask(mask: &Grid) -> String {
    format_cells(mask, |cell| if cell == 0 { " " } else { "1" }.to_string())
}

/// Formats an input grid with `.` for free cells and `#` for holes.
pub fn format_grid(grid: &Grid) -> String {
    format_cells(grid, |cell| if cell == 0 { "." } else { "#" }.to_string())
}
