//! Solve standard 9x9 Sudoku puzzles with exhaustive backtracking.
//!
//! The interesting logic lives in [`solver`]: a safety predicate over rows,
//! columns, and 3x3 boxes, a pre-solve validity check built on it, and a
//! depth-first search that places and retracts trial digits. [`grid`] holds
//! the puzzle state plus the text parsing and rendering around it.

pub mod grid;
pub mod solver;
