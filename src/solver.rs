//! Backtracking search over a partially filled grid.
//!
//! Everything here composes one pure predicate: [`is_safe`]. The solver runs
//! a depth-first search that branches on the first empty cell in row-major
//! order and tries candidate digits in ascending order. That ordering is
//! deliberate and load-bearing: it decides which solution is found first when
//! a puzzle admits more than one.

use log::trace;
use thiserror::Error;

use crate::grid::{Grid, SIZE};

/// A pre-existing contradiction in a puzzle.
///
/// Coordinates are stored 0-based; the message renders them 1-based because
/// that is how people read a printed grid.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("conflict at row {}, column {} with value {}", .row + 1, .col + 1, .digit)]
pub struct Conflict {
    pub row: usize,
    pub col: usize,
    pub digit: u8,
}

/// Whether `digit` can be placed at `(row, col)` without duplicating a value
/// already present in the same row, column, or 3x3 box.
///
/// Pure predicate, no side effects. The cell itself is treated as empty; a
/// caller checking an already-placed value must clear the cell first, the way
/// [`validate_grid`] does.
pub fn is_safe(grid: &Grid, row: usize, col: usize, digit: u8) -> bool {
    // Row and column
    for i in 0..SIZE {
        if grid.get(row, i) == digit || grid.get(i, col) == digit {
            return false;
        }
    }

    // 3x3 box containing (row, col)
    let box_row = row - row % 3;
    let box_col = col - col % 3;
    for r in box_row..box_row + 3 {
        for c in box_col..box_col + 3 {
            if grid.get(r, c) == digit {
                return false;
            }
        }
    }

    true
}

/// Solve the grid in place by depth-first backtracking.
///
/// Returns true once every cell is assigned, leaving the grid in its solved
/// state. Returns false if no assignment of the empty cells works; in that
/// case every trial placement has been retracted and the grid is exactly as
/// it was on entry.
pub fn solve_grid(grid: &mut Grid) -> bool {
    let (row, col) = match grid.first_empty() {
        Some(cell) => cell,
        None => return true, // every cell assigned
    };

    for digit in 1..=9 {
        if is_safe(grid, row, col, digit) {
            trace!("Placing {} at ({}, {})", digit, row, col);
            grid.set(row, col, digit);

            if solve_grid(grid) {
                return true;
            }

            trace!("Retracting {} at ({}, {})", digit, row, col);
            grid.set(row, col, 0);
        }
    }

    false
}

/// Check that no placed digit already breaks the puzzle, before any solving.
///
/// Scans in row-major order; each placed digit is temporarily cleared, tested
/// with [`is_safe`], and restored whichever way the test goes, so the grid is
/// identical before and after the call. Stops at the first conflicting cell
/// and reports it.
pub fn validate_grid(grid: &mut Grid) -> Result<(), Conflict> {
    for row in 0..SIZE {
        for col in 0..SIZE {
            let digit = grid.get(row, col);
            if digit == 0 {
                continue;
            }

            grid.set(row, col, 0);
            let safe = is_safe(grid, row, col, digit);
            grid.set(row, col, digit);

            if !safe {
                return Err(Conflict { row, col, digit });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::grid::{Grid, SIZE};
    use crate::solver::*;

    const EASY: [[u8; SIZE]; SIZE] = [
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

    const EASY_SOLUTION: [[u8; SIZE]; SIZE] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    // Full Sudoku validity: every cell assigned and every row, column, and
    // box holds each digit exactly once. Stronger than absence of conflicts.
    fn assert_fully_solved(grid: &Grid) {
        for unit in 0..SIZE {
            let mut row_seen = [false; 10];
            let mut col_seen = [false; 10];
            let mut box_seen = [false; 10];

            for i in 0..SIZE {
                let row_digit = grid.get(unit, i) as usize;
                let col_digit = grid.get(i, unit) as usize;
                let box_digit = grid.get((unit / 3) * 3 + i / 3, (unit % 3) * 3 + i % 3) as usize;

                assert!(row_digit >= 1 && row_digit <= 9);
                assert!(!row_seen[row_digit], "duplicate in row {}", unit);
                row_seen[row_digit] = true;

                assert!(!col_seen[col_digit], "duplicate in column {}", unit);
                col_seen[col_digit] = true;

                assert!(!box_seen[box_digit], "duplicate in box {}", unit);
                box_seen[box_digit] = true;
            }
        }
    }

    // A valid grid with no completion: row 0 needs a 9 at (0, 8), but the 9
    // already placed at (1, 8) blocks the column.
    fn unsolvable_grid() -> Grid {
        let mut grid = Grid::new();
        for col in 0..8 {
            grid.set(0, col, col as u8 + 1);
        }
        grid.set(1, 8, 9);
        grid
    }

    #[test]
    fn test_is_safe_on_empty_grid() {
        let grid = Grid::new();
        for digit in 1..=9 {
            assert!(is_safe(&grid, 4, 4, digit));
        }
    }

    #[test]
    fn test_is_safe_row_conflict() {
        let mut grid = Grid::new();
        grid.set(0, 7, 5);

        assert!(!is_safe(&grid, 0, 2, 5));
        assert!(is_safe(&grid, 0, 2, 6));
        // Other rows are unaffected
        assert!(is_safe(&grid, 3, 2, 5));
    }

    #[test]
    fn test_is_safe_column_conflict() {
        let mut grid = Grid::new();
        grid.set(6, 2, 8);

        assert!(!is_safe(&grid, 1, 2, 8));
        assert!(is_safe(&grid, 1, 2, 7));
        assert!(is_safe(&grid, 1, 3, 8));
    }

    #[test]
    fn test_is_safe_box_conflict() {
        let mut grid = Grid::new();
        grid.set(4, 4, 3);

        // Same box, different row and column
        assert!(!is_safe(&grid, 3, 5, 3));
        assert!(is_safe(&grid, 3, 5, 4));
        // Adjacent box is fine
        assert!(is_safe(&grid, 3, 6, 3));
    }

    #[test]
    fn test_is_safe_ignores_unrelated_duplicates() {
        let mut grid = Grid::new();
        grid.set(4, 4, 5);

        // (0, 0) shares no row, column, or box with (4, 4)
        assert!(is_safe(&grid, 0, 0, 5));
    }

    #[test]
    fn test_validate_accepts_easy_puzzle() {
        let mut grid = Grid::from_rows(EASY).unwrap();
        assert_eq!(validate_grid(&mut grid), Ok(()));
    }

    #[test]
    fn test_validate_reports_first_conflicting_cell() {
        let mut grid = Grid::new();
        grid.set(0, 1, 5);
        grid.set(0, 4, 5);

        // Scanning row-major, (0, 1) is the first cell whose value clashes
        let conflict = validate_grid(&mut grid).unwrap_err();
        assert_eq!(
            conflict,
            Conflict {
                row: 0,
                col: 1,
                digit: 5
            }
        );
        assert_eq!(
            conflict.to_string(),
            "conflict at row 1, column 2 with value 5"
        );
    }

    #[test]
    fn test_validate_detects_column_and_box_conflicts() {
        let mut grid = Grid::new();
        grid.set(2, 6, 4);
        grid.set(7, 6, 4);
        assert_eq!(
            validate_grid(&mut grid),
            Err(Conflict {
                row: 2,
                col: 6,
                digit: 4
            })
        );

        let mut grid = Grid::new();
        grid.set(3, 0, 1);
        grid.set(5, 2, 1);
        assert_eq!(
            validate_grid(&mut grid),
            Err(Conflict {
                row: 3,
                col: 0,
                digit: 1
            })
        );
    }

    #[test]
    fn test_validate_never_changes_the_grid() {
        let mut valid = Grid::from_rows(EASY).unwrap();
        let before = valid.clone();
        assert!(validate_grid(&mut valid).is_ok());
        assert_eq!(valid, before);

        let mut invalid = Grid::new();
        invalid.set(0, 1, 5);
        invalid.set(0, 4, 5);
        let before = invalid.clone();
        assert!(validate_grid(&mut invalid).is_err());
        assert_eq!(invalid, before);
    }

    #[test]
    fn test_solves_easy_puzzle() {
        let mut grid = Grid::from_rows(EASY).unwrap();
        assert!(solve_grid(&mut grid));
        assert_eq!(grid, Grid::from_rows(EASY_SOLUTION).unwrap());
    }

    #[test]
    fn test_solving_preserves_clues() {
        let mut grid = Grid::from_rows(EASY).unwrap();
        assert!(solve_grid(&mut grid));

        for row in 0..SIZE {
            for col in 0..SIZE {
                if EASY[row][col] != 0 {
                    assert_eq!(grid.get(row, col), EASY[row][col]);
                }
            }
        }
    }

    #[test]
    fn test_solves_empty_grid() {
        let mut grid = Grid::new();
        assert!(solve_grid(&mut grid));
        assert_fully_solved(&grid);

        // First-empty-cell scan plus ascending candidates makes row 0 of the
        // first-found solution 1 through 9 in order
        for col in 0..SIZE {
            assert_eq!(grid.get(0, col), col as u8 + 1);
        }
    }

    #[test]
    fn test_repeated_solves_find_the_same_solution() {
        let mut first = Grid::new();
        let mut second = Grid::new();

        assert!(solve_grid(&mut first));
        assert!(solve_grid(&mut second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_unsolvable_grid_is_still_valid() {
        let mut grid = unsolvable_grid();
        assert_eq!(validate_grid(&mut grid), Ok(()));
    }

    #[test]
    fn test_unsolvable_grid_returns_false_and_restores_state() {
        let mut grid = unsolvable_grid();
        let before = grid.clone();

        assert!(!solve_grid(&mut grid));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_solved_grid_is_already_solved() {
        let mut grid = Grid::from_rows(EASY_SOLUTION).unwrap();
        assert!(solve_grid(&mut grid));
        assert_eq!(grid, Grid::from_rows(EASY_SOLUTION).unwrap());
    }
}
