//! Exact-cover Tiling Solver
//!
//! Reads a grid and a list of shapes, then prints every tiling of the grid's
//! free cells by rotated copies of those shapes.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;

use tiler::parse::read_puzzle;
use tiler::visualization::{self, Style};
use tiler::Puzzle;

/// Finds every exact tiling of a grid by a set of rotatable shapes.
#[derive(Parser)]
#[command(name = "tiler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Puzzle file; the puzzle is read from stdin when omitted.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Stop after this many solutions.
    #[arg(short = 'n', long)]
    max_solutions: Option<usize>,

    /// Print without ANSI colors.
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print every solution, then the shapes and grid (default).
    Solve,
    /// Print only the number of solutions.
    Count,
    /// Print the deduplicated orientations with their anchor offsets.
    Shapes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let style = if cli.no_color {
        Style::Plain
    } else {
        Style::Colored
    };

    let puzzle = load_puzzle(cli.input.as_ref(), style)?;

    match cli.command.unwrap_or(Command::Solve) {
        Command::Solve => {
            let mut stdout = io::stdout().lock();
            run_solve(&puzzle, cli.max_solutions, style, &mut stdout)?;
        }
        Command::Count => run_count(&puzzle, cli.max_solutions, style),
        Command::Shapes => print!("{}", format_shapes(&puzzle)),
    }

    Ok(())
}

/// Reads the puzzle from a file, or from stdin with prompts when interactive.
fn load_puzzle(input: Option<&PathBuf>, style: Style) -> Result<Puzzle> {
    if let Some(path) = input {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        return read_puzzle(BufReader::new(file), |_| {})
            .with_context(|| format!("reading {}", path.display()));
    }

    let interactive = io::stdin().is_terminal();
    read_puzzle(io::stdin().lock(), |block| {
        if interactive {
            eprintln!("{}", paint(&prompt_text(block), style));
        }
    })
    .context("reading puzzle from stdin")
}

fn prompt_text(block: Option<usize>) -> String {
    match block {
        None => "Enter 2d grid (0s empty spaces, 1 holes, empty line to finish)".to_string(),
        Some(index) => format!(
            "Enter shape {index} (0 for space, 1 for occupying space, empty line to finish)"
        ),
    }
}

/// Applies the status color unless output is plain.
fn paint(text: &str, style: Style) -> String {
    match style {
        Style::Plain => text.to_string(),
        Style::Colored => text.green().to_string(),
    }
}

/// Solves the puzzle, writing each solution as it is found, then a summary.
fn run_solve(
    puzzle: &Puzzle,
    max_solutions: Option<usize>,
    style: Style,
    out: &mut impl Write,
) -> io::Result<()> {
    let started = Instant::now();
    let mut found = 0;

    for solution in puzzle
        .solutions()
        .take(max_solutions.unwrap_or(usize::MAX))
    {
        found += 1;
        writeln!(out, "{}", paint(&format!("Solution {found}"), style))?;
        writeln!(
            out,
            "{}",
            visualization::format_solution(&puzzle.grid, puzzle.orientations(), &solution, style)
        )?;
    }

    let elapsed = started.elapsed().as_secs_f64();
    writeln!(out, "{}", paint(&format!("Elapsed time {elapsed} seconds"), style))?;
    writeln!(out, "{}\n", format_summary(found, style))?;
    write!(out, "{}", format_shapes_and_grid(puzzle, style))
}

fn format_summary(found: usize, style: Style) -> String {
    paint(&format!("Found {found} solutions"), style)
}

/// Lists every orientation in label order, then the input grid.
fn format_shapes_and_grid(puzzle: &Puzzle, style: Style) -> String {
    let mut output = String::new();
    for (index, orientation) in puzzle.orientations().iter().enumerate() {
        let title = format!("Shape {}", index + 1);
        match style {
            Style::Plain => output.push_str(&title),
            Style::Colored => {
                let color = visualization::label_color((index + 1).min(255) as u8);
                output.push_str(&title.with(color).to_string());
            }
        }
        output.push('\n');
        output.push_str(&visualization::format_mask(orientation.mask()));
        output.push('\n');
    }
    output.push_str(&paint("Grid", style));
    output.push('\n');
    output.push_str(&visualization::format_grid(&puzzle.grid));
    output
}

/// Counts solutions without rendering them.
fn run_count(puzzle: &Puzzle, max_solutions: Option<usize>, style: Style) {
    let started = Instant::now();
    let found = puzzle.count_solutions(max_solutions);
    let elapsed = started.elapsed().as_secs_f64();

    println!("{}", paint(&format!("Elapsed time {elapsed} seconds"), style));
    println!("{}", format_summary(found, style));
}

/// Lists orientations with their dimensions and anchor offsets.
fn format_shapes(puzzle: &Puzzle) -> String {
    let mut output = format!("{} orientations\n\n", puzzle.orientations().len());
    for (index, orientation) in puzzle.orientations().iter().enumerate() {
        let mask = orientation.mask();
        output.push_str(&format!(
            "Shape {} ({}x{}, anchor {})\n",
            index + 1,
            mask.rows(),
            mask.cols(),
            orientation.anchor_offset()
        ));
        output.push_str(&visualization::format_mask(mask));
        output.push('\n');
    }
    output
}
