use std::io;
use std::io::{BufRead, Write};

use log::debug;
use thiserror::Error;

use backtrack_sudoku::grid::{Grid, ParseError, SIZE};
use backtrack_sudoku::solver::{solve_grid, validate_grid};

// The two puzzles the program ships with. The easy one is the classic
// 30-clue puzzle with a unique solution; the hard one is nearly empty and
// makes the search sweat.
const EASY_PUZZLE: [[u8; SIZE]; SIZE] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

const HARD_PUZZLE: [[u8; SIZE]; SIZE] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 3, 0, 8, 5],
    [0, 0, 1, 0, 2, 0, 0, 0, 0],
    [0, 0, 0, 5, 0, 7, 0, 0, 0],
    [0, 0, 4, 0, 0, 0, 1, 0, 0],
    [0, 9, 0, 0, 0, 0, 0, 0, 0],
    [5, 0, 0, 0, 0, 0, 0, 7, 3],
    [0, 0, 2, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 4, 0, 0, 0, 9],
];

#[derive(Debug, Error)]
enum InputError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {}: {source}", .row + 1)]
    BadRow { row: usize, source: ParseError },
    #[error("puzzle file has more than 9 rows")]
    TooManyRows,
    #[error("unknown puzzle '{0}'; expected 'easy' or 'hard'")]
    UnknownPuzzle(String),
    #[error("input ended before the grid was complete")]
    UnexpectedEof,
}

fn main() {
    let mut debug = false;
    let mut puzzle = String::new();
    let mut filename: Option<String> = None;
    {
        // this block limits scope of borrows by ap.refer() method
        let mut ap = argparse::ArgumentParser::new();
        ap.set_description("Solve Sudoku puzzles with backtracking");
        ap.refer(&mut debug).add_option(
            &["--debug"],
            argparse::StoreTrue,
            "Log every placement and retraction of the search",
        );

        ap.refer(&mut puzzle).add_option(
            &["--puzzle"],
            argparse::Store,
            "Start from a built-in puzzle, 'easy' or 'hard'",
        );

        ap.refer(&mut filename).add_argument(
            "filename",
            argparse::StoreOption,
            "Optional path to a puzzle CSV file",
        );

        ap.parse_args_or_exit();
    }

    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Trace);
    }
    builder.init();

    let mut grid = match obtain_grid(&puzzle, filename.as_deref()) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error while reading grid: \"{}\"", e);
            std::process::exit(1);
        }
    };

    println!("Puzzle to solve:\n{}", grid);
    println!("Empty cells: {} / 81", grid.empty_count());

    if let Err(conflict) = validate_grid(&mut grid) {
        eprintln!("The starting grid is invalid: {}", conflict);
        std::process::exit(1);
    }
    debug!("Grid validated, starting search");

    println!("Solving...");
    if solve_grid(&mut grid) {
        println!("Solution found:\n{}", grid);
    } else {
        println!("No solution exists for this puzzle.");
    }
}

fn obtain_grid(puzzle: &str, filename: Option<&str>) -> Result<Grid, InputError> {
    if let Some(filename) = filename {
        return read_grid(filename);
    }

    match puzzle {
        "easy" => Ok(easy_puzzle()),
        "hard" => Ok(hard_puzzle()),
        "" => choose_grid(),
        other => Err(InputError::UnknownPuzzle(other.to_string())),
    }
}

fn easy_puzzle() -> Grid {
    Grid::from_rows(EASY_PUZZLE).expect("built-in puzzle cells are in range")
}

fn hard_puzzle() -> Grid {
    Grid::from_rows(HARD_PUZZLE).expect("built-in puzzle cells are in range")
}

fn choose_grid() -> Result<Grid, InputError> {
    println!("Choose input method:");
    println!("  1) predefined easy puzzle");
    println!("  2) predefined hard puzzle");
    println!("  3) enter a custom puzzle");
    print!("Enter choice (1, 2, or 3): ");
    io::stdout().flush()?;

    let mut choice = String::new();
    io::stdin().read_line(&mut choice)?;

    match choice.trim() {
        "1" => Ok(easy_puzzle()),
        "2" => Ok(hard_puzzle()),
        "3" => prompt_grid(),
        _ => {
            println!("Invalid choice, using the easy puzzle.");
            Ok(easy_puzzle())
        }
    }
}

/// Read the puzzle row by row from stdin. A malformed row is reported and
/// prompted for again; only running out of input is fatal.
fn prompt_grid() -> Result<Grid, InputError> {
    println!("Enter the puzzle one row at a time, using 0 for empty cells.");
    println!("Each row is 9 numbers separated by spaces.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut grid = Grid::new();
    let mut row = 0;
    while row < SIZE {
        print!("Row {}: ", row + 1);
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Err(InputError::UnexpectedEof),
        };

        match Grid::parse_row(&line) {
            Ok(cells) => {
                for (col, &digit) in cells.iter().enumerate() {
                    grid.set(row, col, digit);
                }
                row += 1;
            }
            Err(e) => println!("Invalid row: {}", e),
        }
    }

    Ok(grid)
}

/// Read a puzzle from a headerless CSV file, 9 values per row. A file with
/// fewer than 9 rows leaves the remaining rows empty.
fn read_grid(filename: &str) -> Result<Grid, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(filename)?;

    let mut grid = Grid::new();
    let mut row = 0;
    for record in reader.records() {
        if row > 8 {
            return Err(InputError::TooManyRows);
        }

        let record = record?;
        let fields: Vec<&str> = record.iter().collect();
        let cells = Grid::parse_cells(&fields).map_err(|source| InputError::BadRow { row, source })?;

        for (col, &digit) in cells.iter().enumerate() {
            grid.set(row, col, digit);
        }

        row += 1;
    }

    Ok(grid)
}
