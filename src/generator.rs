//! This module contains the logic for generating random Sudoku puzzles.
//!
//! Generation proceeds in two stages: a full solution grid is obtained by
//! seeding a single random digit on an empty board and handing it to the
//! solver (the seed breaks the symmetry of the solution space, so repeated
//! calls yield distinct grids), and afterwards random digits are erased as
//! long as the board remains solvable, until only the requested number of
//! clues is left.

use crate::{Board, DigitKind, CELL_COUNT, SIZE};
use crate::error::{SudokuError, SudokuResult};
use crate::solver::{ExactCoverSolver, Solver};

use rand::Rng;
use rand::rngs::ThreadRng;

/// The number of consecutive rejected erasures after which the generator
/// gives up. Picking an already empty cell counts as a rejection, so the
/// budget has to comfortably exceed the 81 cells of the board.
pub const ERASE_FAILURE_BUDGET: usize = 128;

/// A generator produces random Sudoku puzzles: boards whose clues are
/// tagged [DigitKind::Generated] and which the solver can complete. The
/// number of clues to leave on the board is chosen by the caller; the
/// [game](crate::game) module maps difficulty levels to clue counts.
///
/// The generator is parameterized over the [Solver] used to complete the
/// seeded board and to probe solvability during erasure, and over the
/// random number generator deciding the seed and the erasure order. For
/// most cases, sensible defaults are provided by [Generator::new_default].
pub struct Generator<S: Solver, R: Rng> {
    solver: S,
    rng: R
}

impl Generator<ExactCoverSolver, ThreadRng> {

    /// Creates a new generator that completes and probes boards with the
    /// [ExactCoverSolver] and draws randomness from [rand::thread_rng].
    pub fn new_default() -> Generator<ExactCoverSolver, ThreadRng> {
        Generator::new(ExactCoverSolver, rand::thread_rng())
    }
}

impl<S: Solver, R: Rng> Generator<S, R> {

    /// Creates a new generator with the given solver and random number
    /// generator.
    ///
    /// # Arguments
    ///
    /// * `solver`: A [Solver] used to complete the seeded board into a full
    /// solution and to check that erasing a digit keeps the board solvable.
    /// * `rng`: A random number generator that decides the seed digit and
    /// which cells are erased.
    pub fn new(solver: S, rng: R) -> Generator<S, R> {
        Generator {
            solver,
            rng
        }
    }

    /// Generates a new puzzle with exactly `clue_count` remaining digits,
    /// all tagged [DigitKind::Generated]. The resulting board is guaranteed
    /// to be solvable; with fewer than 81 clues it is never solved.
    ///
    /// # Errors
    ///
    /// * `SudokuError::UnsolvableBoard` if the solver cannot complete the
    /// seeded board. This cannot happen with a correct solver, since a
    /// single digit on an empty board always extends to a full grid, but
    /// the failure is surfaced rather than swallowed.
    /// * `SudokuError::ClueBudgetExhausted` if too many consecutive erasure
    /// attempts were rejected before the requested clue count was reached
    /// (see [ERASE_FAILURE_BUDGET]).
    pub fn generate(&mut self, clue_count: usize) -> SudokuResult<Board> {
        let mut board = Board::new();

        let seed_number = self.rng.gen_range(1..=SIZE);
        let seed_column = self.rng.gen_range(0..SIZE);
        let seed_row = self.rng.gen_range(0..SIZE);
        board.put(seed_column, seed_row, seed_number, DigitKind::Solved)
            .unwrap();

        let steps = self.solver.solve(&board)
            .ok_or(SudokuError::UnsolvableBoard)?;

        for step in steps {
            board.put(step.column, step.row, step.number, DigitKind::Solved)
                .unwrap();
        }

        self.erase(&mut board, CELL_COUNT.saturating_sub(clue_count))?;

        for row in 0..SIZE {
            for column in 0..SIZE {
                if let Some(digit) = board.get(column, row).unwrap() {
                    board.put(column, row, digit.number,
                        DigitKind::Generated).unwrap();
                }
            }
        }

        Ok(board)
    }

    /// Erases `count` random digits from the given full board, keeping it
    /// solvable throughout. An erasure is rejected, and the digit restored,
    /// if the solver no longer finds a completion without it; picking an
    /// already empty cell counts as a (cheap) rejection as well.
    fn erase(&mut self, board: &mut Board, count: usize) -> SudokuResult<()> {
        let mut remaining = count;
        let mut consecutive_failures = 0;

        while remaining > 0 {
            if consecutive_failures >= ERASE_FAILURE_BUDGET {
                return Err(SudokuError::ClueBudgetExhausted);
            }

            let column = self.rng.gen_range(0..SIZE);
            let row = self.rng.gen_range(0..SIZE);

            match board.get(column, row).unwrap() {
                None => consecutive_failures += 1,
                Some(digit) => {
                    board.put(column, row, 0, digit.kind).unwrap();

                    if self.solver.solvable(board) {
                        remaining -= 1;
                        consecutive_failures = 0;
                    }
                    else {
                        board.put(column, row, digit.number, digit.kind)
                            .unwrap();
                        consecutive_failures += 1;
                    }
                }
            }
        }

        Ok(())
    }
}
