//! This module contains the game facade tying the engine together.
//!
//! A [Game] owns a single [Board] and a [Difficulty]. It regenerates the
//! board through the [generator](crate::generator), validates user moves
//! against the board's constraints, fills in the remaining cells through
//! the [solver](crate::solver), and saves or loads the board through the
//! persistence format. Front-ends are expected to talk to this type only.

use crate::{Board, DigitKind};
use crate::constraint::ConstraintKind;
use crate::error::{PersistenceResult, SudokuError, SudokuResult};
use crate::generator::Generator;
use crate::solver::{ExactCoverSolver, Solver};

use serde::{Deserialize, Serialize};

use std::convert::Infallible;
use std::path::Path;
use std::str::FromStr;

/// The difficulty of a generated puzzle, determining how many clues the
/// generator leaves on the board.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Difficulty {

    /// An easy puzzle with 25 clues.
    Easy,

    /// A medium puzzle with 20 clues.
    Medium,

    /// A hard puzzle with 15 clues.
    Hard
}

impl Difficulty {

    /// The number of clues a generated puzzle of this difficulty has.
    pub fn clue_count(self) -> usize {
        match self {
            Difficulty::Medium => 20,
            Difficulty::Hard => 15,
            Difficulty::Easy => 25
        }
    }
}

impl Default for Difficulty {
    fn default() -> Difficulty {
        Difficulty::Easy
    }
}

impl FromStr for Difficulty {
    type Err = Infallible;

    /// Parses a difficulty from its (case-insensitive) name. Unknown names
    /// fall back to [Difficulty::Easy], so this never fails.
    fn from_str(s: &str) -> Result<Difficulty, Infallible> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy
        })
    }
}

/// A Sudoku game: one [Board] together with the [Difficulty] it was
/// generated at. The game mediates all user interaction with the board,
/// enforcing that generated clues stay fixed and that entered digits are
/// validated against the Sudoku constraints.
pub struct Game {
    board: Board,
    difficulty: Difficulty
}

impl Game {

    /// Creates a new game with a freshly generated puzzle of the given
    /// difficulty.
    ///
    /// # Errors
    ///
    /// If the generator fails; see [Generator::generate].
    pub fn new(difficulty: Difficulty) -> SudokuResult<Game> {
        let board = Generator::new_default()
            .generate(difficulty.clue_count())?;

        Ok(Game {
            board,
            difficulty
        })
    }

    /// Replaces the current board with a freshly generated puzzle of the
    /// given difficulty. On failure, the current board is left untouched.
    ///
    /// # Errors
    ///
    /// If the generator fails; see [Generator::generate].
    pub fn new_game(&mut self, difficulty: Difficulty) -> SudokuResult<()> {
        let board = Generator::new_default()
            .generate(difficulty.clue_count())?;

        self.board = board;
        self.difficulty = difficulty;
        Ok(())
    }

    /// Empties the board without generating a new puzzle.
    pub fn clear(&mut self) {
        self.board.reset();
    }

    /// Gets a reference to the board of this game.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Gets the difficulty at which the current puzzle was generated.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Performs a checked user move: places the given number at the
    /// specified position with kind [DigitKind::UserGenerated], or clears
    /// the cell if `number` is 0. `Ok(None)` means the move was applied;
    /// `Ok(Some(kind))` means the digit violates the Sudoku rules, with the
    /// first violated constraint reported, and the board is unchanged.
    ///
    /// Cells holding a generated clue are rejected outright; cells filled
    /// by the solver or by earlier user moves may be overwritten.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` if `column` or `row` is not in the
    /// range `[0, 9[`.
    /// * `SudokuError::InvalidDigit` if `number` is greater than 9.
    /// * `SudokuError::ProtectedCell` if the targeted cell holds a digit of
    /// kind [DigitKind::Generated].
    pub fn put(&mut self, column: usize, row: usize, number: usize)
            -> SudokuResult<Option<ConstraintKind>> {
        if let Some(digit) = self.board.get(column, row)? {
            if digit.kind == DigitKind::Generated {
                return Err(SudokuError::ProtectedCell);
            }
        }

        if number == 0 {
            self.board.put(column, row, 0, DigitKind::UserGenerated)?;
            return Ok(None);
        }

        if let Some(kind) = self.board.can_fit(column, row, number)? {
            return Ok(Some(kind));
        }

        self.board.put(column, row, number, DigitKind::UserGenerated)?;
        Ok(None)
    }

    /// Solves the current board and fills the empty cells with the solution
    /// digits, tagged [DigitKind::Solved]. The steps are applied in
    /// last-taken-first order. Returns whether a solution was found and
    /// applied; an unsolvable board is reported as `false` and left
    /// unchanged.
    pub fn solve(&mut self) -> bool {
        match ExactCoverSolver.solve(&self.board) {
            Some(steps) => {
                for step in steps.iter().rev() {
                    self.board.put(step.column, step.row, step.number,
                        DigitKind::Solved).unwrap();
                }

                true
            },
            None => false
        }
    }

    /// Indicates whether the given board is a valid solution to the current
    /// puzzle: it must contain every digit already on this game's board, it
    /// must be full, and it must satisfy the Sudoku rules.
    pub fn is_valid_solution(&self, solution: &Board) -> bool {
        self.board.is_subset_of(solution) && solution.solved()
    }

    /// Saves the board of this game to the file at the given path, in the
    /// format described by [Board::save].
    ///
    /// # Errors
    ///
    /// See [Board::save].
    pub fn save(&self, path: impl AsRef<Path>) -> PersistenceResult<()> {
        self.board.save(path)
    }

    /// Replaces the board of this game with the one loaded from the file at
    /// the given path. The current board is only replaced once the file has
    /// been read and validated completely; on failure it stays untouched.
    ///
    /// # Errors
    ///
    /// See [Board::load].
    pub fn load(&mut self, path: impl AsRef<Path>) -> PersistenceResult<()> {
        self.board = Board::load(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use tempfile::tempdir;

    fn game_with_board(board: Board) -> Game {
        Game {
            board,
            difficulty: Difficulty::Easy
        }
    }

    fn puzzle_game() -> Game {
        let board = Board::parse(
            "53..7....
             6..195...
             .98....6.
             8...6...3
             4..8.3..1
             7...2...6
             .6....28.
             ...419..5
             ....8..79").unwrap();
        game_with_board(board)
    }

    #[test]
    fn difficulty_clue_counts() {
        assert_eq!(25, Difficulty::Easy.clue_count());
        assert_eq!(20, Difficulty::Medium.clue_count());
        assert_eq!(15, Difficulty::Hard.clue_count());
    }

    #[test]
    fn default_difficulty_is_easy() {
        assert_eq!(Difficulty::Easy, Difficulty::default());
    }

    #[test]
    fn difficulty_from_str() {
        assert_eq!(Difficulty::Medium, "medium".parse().unwrap());
        assert_eq!(Difficulty::Hard, "Hard".parse().unwrap());
        assert_eq!(Difficulty::Easy, "easy".parse().unwrap());
        assert_eq!(Difficulty::Easy, "nightmare".parse().unwrap());
    }

    #[test]
    fn new_game_generates_requested_difficulty() {
        let game = Game::new(Difficulty::Medium).unwrap();

        assert_eq!(Difficulty::Medium, game.difficulty());
        assert_eq!(20, game.board().count_clues());
        assert!(!game.board().solved());
    }

    #[test]
    fn put_rejects_generated_clue() {
        let mut game = puzzle_game();

        assert_eq!(Err(SudokuError::ProtectedCell), game.put(0, 0, 1));
        assert_eq!(Err(SudokuError::ProtectedCell), game.put(0, 0, 0));
        assert_eq!(5, game.board().get(0, 0).unwrap().unwrap().number);
    }

    #[test]
    fn put_reports_constraint_violation() {
        let mut game = puzzle_game();

        // 7 is free in column 2 and the top-left box, but row 0 holds one.
        assert_eq!(Ok(Some(ConstraintKind::Row)), game.put(2, 0, 7));
        assert!(game.board().empty(2, 0).unwrap());

        // 3 is free in column 0 and row 2, but the top-left box holds one.
        assert_eq!(Ok(Some(ConstraintKind::Box)), game.put(0, 2, 3));
        assert!(game.board().empty(0, 2).unwrap());
    }

    #[test]
    fn put_applies_valid_move() {
        let mut game = puzzle_game();

        assert_eq!(Ok(None), game.put(2, 0, 1));

        let digit = game.board().get(2, 0).unwrap().unwrap();
        assert_eq!(1, digit.number);
        assert_eq!(DigitKind::UserGenerated, digit.kind);
    }

    #[test]
    fn put_zero_clears_user_digit() {
        let mut game = puzzle_game();
        game.put(2, 0, 1).unwrap();

        assert_eq!(Ok(None), game.put(2, 0, 0));
        assert!(game.board().empty(2, 0).unwrap());
    }

    #[test]
    fn put_overwrites_user_digit() {
        let mut game = puzzle_game();
        game.put(2, 0, 1).unwrap();

        assert_eq!(Ok(None), game.put(2, 0, 2));
        assert_eq!(2, game.board().get(2, 0).unwrap().unwrap().number);
    }

    #[test]
    fn put_validates_arguments() {
        let mut game = puzzle_game();

        assert_eq!(Err(SudokuError::OutOfBounds), game.put(9, 0, 1));
        assert_eq!(Err(SudokuError::InvalidDigit), game.put(2, 0, 10));
    }

    #[test]
    fn solve_fills_empty_cells_with_solved_kind() {
        let mut game = puzzle_game();

        assert!(game.solve());
        assert!(game.board().solved());

        let digit = game.board().get(2, 0).unwrap().unwrap();
        assert_eq!(4, digit.number);
        assert_eq!(DigitKind::Solved, digit.kind);

        // The clues keep their kind.
        assert_eq!(DigitKind::Generated,
            game.board().get(0, 0).unwrap().unwrap().kind);
    }

    #[test]
    fn solve_reports_unsolvable_board() {
        let mut board = Board::new();
        board.put(0, 0, 5, DigitKind::UserGenerated).unwrap();
        board.put(1, 0, 5, DigitKind::UserGenerated).unwrap();
        let snapshot = board.clone();
        let mut game = game_with_board(board);

        assert!(!game.solve());
        assert_eq!(&snapshot, game.board());
    }

    #[test]
    fn valid_solution_is_recognized() {
        let game = puzzle_game();
        let solution = Board::parse(
            "534678912
             672195348
             198342567
             859761423
             426853791
             713924856
             961537284
             287419635
             345286179").unwrap();

        assert!(game.is_valid_solution(&solution));
    }

    #[test]
    fn solution_not_covering_the_puzzle_is_rejected() {
        let game = puzzle_game();

        // A solved grid that does not extend the puzzle's clues.
        let unrelated = Board::parse(
            "123456789
             456789123
             789123456
             214365897
             365897214
             897214365
             531642978
             642978531
             978531642").unwrap();

        assert!(unrelated.solved());
        assert!(!game.is_valid_solution(&unrelated));
    }

    #[test]
    fn incomplete_solution_is_rejected() {
        let game = puzzle_game();

        assert!(!game.is_valid_solution(game.board()));
    }

    #[test]
    fn clear_empties_the_board() {
        let mut game = puzzle_game();

        game.clear();

        assert!(game.board().is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let directory = tempdir().unwrap();
        let path = directory.path().join("game.bin");
        let mut game = puzzle_game();
        game.put(2, 0, 1).unwrap();
        let saved = game.board().clone();

        game.save(&path).unwrap();
        game.clear();
        game.load(&path).unwrap();

        assert_eq!(&saved, game.board());
    }

    #[test]
    fn failed_load_leaves_board_untouched() {
        let directory = tempdir().unwrap();
        let path = directory.path().join("missing.bin");
        let mut game = puzzle_game();
        let before = game.board().clone();

        assert!(game.load(&path).is_err());
        assert_eq!(&before, game.board());
    }
}
