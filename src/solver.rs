//! This module contains the logic for solving Sudoku.
//!
//! Most importantly, this module contains the definition of the
//! [Solver] trait and the [ExactCoverSolver] as the implementation used
//! throughout this crate. The exact-cover solver translates the board into
//! the 729x324 matrix built by the [matrix](crate::matrix) module and runs
//! Knuth's Algorithm X over it: repeatedly pick the constraint satisfiable
//! by the fewest remaining choices (the MRV heuristic), try each of those
//! choices, and backtrack when a constraint can no longer be satisfied.
//!
//! Instead of the classical dancing-links pointer mesh, the search state is
//! two index sets over the matrix (remaining choices and remaining
//! constraints) which are snapshotted by cloning before every branch. At
//! 9x9 scale the snapshots are two small buffer copies, which keeps the
//! algorithm identical to cover/uncover while avoiding all link surgery.

use crate::{Board, SIZE};
use crate::matrix::{self, ExactCoverMatrix, CHOICE_COUNT, CONSTRAINT_COUNT};
use crate::util::IndexSet;

use serde::{Deserialize, Serialize};

/// One step of a solution: the placement of a digit in a previously empty
/// cell. The solver returns the steps which complete a puzzle; applying
/// them all to the board it was given yields a solved board.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SolutionStep {

    /// The column (x-coordinate) of the filled cell, in the range `[0, 9[`.
    pub column: usize,

    /// The row (y-coordinate) of the filled cell, in the range `[0, 9[`.
    pub row: usize,

    /// The placed digit, in the range `[1, 9]`.
    pub number: usize
}

/// A trait for structs which have the ability to solve Sudoku boards. The
/// generator is parameterized over this trait, so a different solving
/// backend (or an instrumented wrapper around the default one) can be
/// injected there.
pub trait Solver {

    /// Solves, or attempts to solve, the provided board. On success, the
    /// returned vector holds one [SolutionStep] for every cell that was
    /// empty on the provided board, in the order the search placed them;
    /// every other cell is left untouched by the solution. A consistent
    /// board with no empty cells yields `Some` of an empty vector. If the
    /// board cannot be completed, `None` is returned.
    fn solve(&self, board: &Board) -> Option<Vec<SolutionStep>>;

    /// Indicates whether the provided board can be completed, without
    /// exposing the completion itself.
    fn solvable(&self, board: &Board) -> bool {
        self.solve(board).is_some()
    }
}

/// The exact-cover search state: the choices and constraints still in play,
/// plus the steps taken so far. Cloning the state is the branch snapshot.
#[derive(Clone)]
struct SearchState {
    choices: IndexSet,
    constraints: IndexSet,
    steps: Vec<SolutionStep>
}

impl SearchState {

    fn new() -> SearchState {
        SearchState {
            choices: IndexSet::full(CHOICE_COUNT),
            constraints: IndexSet::full(CONSTRAINT_COUNT),
            steps: Vec::new()
        }
    }

    /// Commits to the given choice: removes every constraint it satisfies,
    /// removes every choice that satisfies any of those constraints
    /// (including the given choice itself), and records the decoded
    /// placement.
    fn cover(&mut self, matrix: &ExactCoverMatrix, choice: usize) {
        for constraint in matrix.constraints_of(choice) {
            let conflicting: Vec<usize> = self.choices.iter()
                .filter(|&other| matrix.is_set(other, constraint))
                .collect();

            for other in conflicting {
                self.choices.remove(other);
            }

            self.constraints.remove(constraint);
        }

        self.steps.push(matrix.decode_choice(choice));
    }

    /// Selects the remaining constraint satisfiable by the fewest remaining
    /// choices, together with that count. Ties are broken towards the
    /// smallest constraint index. `None` is only returned once no
    /// constraints remain.
    fn most_constrained(&self, matrix: &ExactCoverMatrix)
            -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;

        for constraint in self.constraints.iter() {
            let count = self.choices.iter()
                .filter(|&choice| matrix.is_set(choice, constraint))
                .count();

            if count == 0 {
                // Nothing beats an unsatisfiable constraint; the caller
                // fails immediately.
                return Some((constraint, 0));
            }

            match best {
                Some((_, best_count)) if count >= best_count => { },
                _ => best = Some((constraint, count))
            }
        }

        best
    }
}

/// A [Solver] which reduces the board to an exact-cover problem and applies
/// Algorithm X with MRV constraint selection. It finds a solution for every
/// board that admits one.
///
/// The solver is deterministic: constraint selection ties and choice
/// ordering are resolved towards the smallest index, and the clues of the
/// provided board are committed in row-major order, so two calls on
/// identical boards return identical step sequences.
pub struct ExactCoverSolver;

impl ExactCoverSolver {

    fn search(state: &mut SearchState, matrix: &ExactCoverMatrix) -> bool {
        if state.constraints.is_empty() {
            return true;
        }

        let (constraint, count) = state.most_constrained(matrix).unwrap();

        if count == 0 {
            return false;
        }

        let candidates: Vec<usize> = state.choices.iter()
            .filter(|&choice| matrix.is_set(choice, constraint))
            .collect();

        for choice in candidates {
            let snapshot = state.clone();
            state.cover(matrix, choice);

            if ExactCoverSolver::search(state, matrix) {
                return true;
            }

            *state = snapshot;
        }

        false
    }
}

impl Solver for ExactCoverSolver {
    fn solve(&self, board: &Board) -> Option<Vec<SolutionStep>> {
        let matrix = ExactCoverMatrix::new();
        let mut state = SearchState::new();

        // Commit the clues in row-major order. Conflicting clues leave some
        // constraint without a satisfying choice, which the search below
        // reports as a failure.
        for row in 0..SIZE {
            for column in 0..SIZE {
                if let Some(digit) = board.get(column, row).unwrap() {
                    let choice =
                        matrix::choice_index(digit.number - 1, column, row);
                    state.cover(&matrix, choice);
                }
            }
        }

        let clue_steps = state.steps.len();

        if ExactCoverSolver::search(&mut state, &matrix) {
            Some(state.steps.split_off(clue_steps))
        }
        else {
            None
        }
    }
}
