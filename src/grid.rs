use std::fmt;
use std::fmt::Formatter;

use thiserror::Error;

/// Number of rows, columns, and digits in a standard puzzle.
pub const SIZE: usize = 9;

/// Errors produced while reading cell values from text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected 9 values in the row, found {0}")]
    WrongCellCount(usize),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{0} is outside the allowed range 0-9")]
    OutOfRange(u32),
}

/// A 9x9 puzzle. Cells hold 0 for "unassigned" or a placed digit 1-9.
///
/// This is the one piece of mutable state in the whole program; the solver
/// mutates it in place and, on success, the grid *is* the solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [[u8; SIZE]; SIZE],
}

impl Grid {
    /// An entirely empty grid.
    pub fn new() -> Grid {
        Grid {
            cells: [[0; SIZE]; SIZE],
        }
    }

    /// Build a grid from row-major cell values, rejecting anything above 9.
    pub fn from_rows(rows: [[u8; SIZE]; SIZE]) -> Result<Grid, ParseError> {
        for row in rows.iter() {
            for &cell in row.iter() {
                if cell > 9 {
                    return Err(ParseError::OutOfRange(u32::from(cell)));
                }
            }
        }

        Ok(Grid { cells: rows })
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, digit: u8) {
        debug_assert!(digit <= 9);
        self.cells[row][col] = digit;
    }

    /// The first unassigned cell in row-major order, if any.
    ///
    /// The solver always branches on this cell; the scan order is part of its
    /// contract because it decides which solution an under-constrained puzzle
    /// resolves to.
    pub fn first_empty(&self) -> Option<(usize, usize)> {
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.cells[row][col] == 0 {
                    return Some((row, col));
                }
            }
        }

        None
    }

    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == 0)
            .count()
    }

    /// Parse one row of the puzzle from whitespace-separated text.
    pub fn parse_row(line: &str) -> Result<[u8; SIZE], ParseError> {
        let cells: Vec<&str> = line.split_whitespace().collect();
        Grid::parse_cells(&cells)
    }

    /// Parse a row of the puzzle whose cells are already split apart, as the
    /// CSV reader hands them over.
    pub fn parse_cells(cells: &[&str]) -> Result<[u8; SIZE], ParseError> {
        if cells.len() != SIZE {
            return Err(ParseError::WrongCellCount(cells.len()));
        }

        let mut row = [0u8; SIZE];
        for (i, cell) in cells.iter().enumerate() {
            let cell = cell.trim();
            let value: u32 = cell
                .parse()
                .map_err(|_| ParseError::NotANumber(cell.to_string()))?;
            if value > 9 {
                return Err(ParseError::OutOfRange(value));
            }
            row[i] = value as u8;
        }

        Ok(row)
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔═══════╦═══════╦═══════╗")?;

        for row in 0..SIZE {
            if row == 3 || row == 6 {
                writeln!(f, "╠═══════╬═══════╬═══════╣")?;
            }

            write!(f, "║")?;
            for col in 0..SIZE {
                match self.cells[row][col] {
                    0 => write!(f, " .")?,
                    digit => write!(f, " {}", digit)?,
                }
                if col % 3 == 2 {
                    write!(f, " ║")?;
                }
            }
            writeln!(f)?;
        }

        write!(f, "╚═══════╩═══════╩═══════╝")
    }
}
