// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]

//! This crate implements a complete engine for classic 9x9 Sudoku. It
//! supports the following key features:
//!
//! * Editing a board whose cells remember where their digits came from
//! (generated clue, user entry, or solver output)
//! * Checking digits against the row, column, and box constraints, with the
//! violated constraint reported back
//! * Solving any consistent board by reduction to exact cover and Knuth's
//! Algorithm X
//! * Generating puzzles of a chosen difficulty by building a full solution
//! and erasing digits while the board stays solvable
//! * Saving and loading boards in a compact binary format
//!
//! # Editing a board
//!
//! A [Board] starts out empty. Digits are placed with [Board::put], which
//! records a [DigitKind] alongside every digit, and probed with
//! [Board::can_fit], which reports the first violated constraint if the
//! digit cannot be placed.
//!
//! ```
//! use sudoku_exact::{Board, DigitKind};
//! use sudoku_exact::constraint::ConstraintKind;
//!
//! let mut board = Board::new();
//! board.put(0, 0, 5, DigitKind::UserGenerated).unwrap();
//!
//! // 5 fits nowhere else in the first row, column, or box.
//! assert_eq!(Some(ConstraintKind::Row), board.can_fit(8, 0, 5).unwrap());
//! assert_eq!(Some(ConstraintKind::Column), board.can_fit(0, 8, 5).unwrap());
//! assert_eq!(Some(ConstraintKind::Box), board.can_fit(1, 1, 5).unwrap());
//! assert_eq!(None, board.can_fit(1, 1, 6).unwrap());
//! ```
//!
//! Cells whose kind is [DigitKind::Generated] are the clues of a puzzle and
//! cannot be changed by [Board::put] until the board is reset or replaced.
//!
//! # Parsing and printing boards
//!
//! [Board::parse] reads the usual nine-row notation, where a digit stands
//! for itself and `'.'` (or `'0'`) marks an empty cell. The [Display]
//! implementation emits the same notation.
//!
//! ```
//! use sudoku_exact::Board;
//!
//! let board = Board::parse(
//!     "53..7....
//!      6..195...
//!      .98....6.
//!      8...6...3
//!      4..8.3..1
//!      7...2...6
//!      .6....28.
//!      ...419..5
//!      ....8..79").unwrap();
//!
//! assert_eq!(30, board.count_clues());
//! ```
//!
//! # Solving Sudoku
//!
//! Solving is performed by the [ExactCoverSolver](solver::ExactCoverSolver),
//! which translates the board into a 729x324 exact-cover matrix and runs
//! Algorithm X over it. The solver returns the sequence of
//! [SolutionStep](solver::SolutionStep)s which fill the empty cells, or
//! `None` if the board admits no solution.
//!
//! ```
//! use sudoku_exact::Board;
//! use sudoku_exact::solver::{ExactCoverSolver, Solver};
//!
//! let board = Board::parse(
//!     "53..7....
//!      6..195...
//!      .98....6.
//!      8...6...3
//!      4..8.3..1
//!      7...2...6
//!      .6....28.
//!      ...419..5
//!      ....8..79").unwrap();
//!
//! let steps = ExactCoverSolver.solve(&board).unwrap();
//! assert_eq!(51, steps.len());
//! ```
//!
//! # Generating Sudoku
//!
//! The [Generator](generator::Generator) produces a fresh puzzle by seeding
//! a single random digit, solving the seeded board into a full grid, and
//! then erasing random digits while a solvability probe still succeeds. The
//! [Game](game::Game) facade maps a [Difficulty](game::Difficulty) to the
//! number of remaining clues and drives the generator.
//!
//! ```
//! use sudoku_exact::game::{Difficulty, Game};
//!
//! let game = Game::new(Difficulty::Easy).unwrap();
//! assert_eq!(25, game.board().count_clues());
//! ```
//!
//! # Persistence
//!
//! [Board::save] and [Board::load] exchange boards through a small binary
//! format: the two dimensions followed by one digit/kind record per cell,
//! all as little-endian 32-bit words.
//!
//! # Note regarding performance
//!
//! Solving and generating on 9x9 boards is fast, but the solver is a
//! backtracking search and the generator probes solvability once per erased
//! digit. It is recommended to use at least `opt-level = 2` in builds that
//! generate puzzles in a loop, including test builds.

pub mod constraint;
pub mod error;
pub mod game;
pub mod generator;
pub mod matrix;
pub mod solver;
pub mod util;


use constraint::ConstraintKind;
use error::{
    PersistenceError,
    PersistenceResult,
    SudokuError,
    SudokuParseError,
    SudokuParseResult,
    SudokuResult
};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// The side length of the board, in cells. The board is always square.
pub const SIZE: usize = 9;

/// The total number of cells on the board.
pub const CELL_COUNT: usize = SIZE * SIZE;

/// The origin of the digit held by a cell. The engine uses this tag to tell
/// puzzle clues apart from digits entered by the user or filled in by the
/// solver. Empty cells carry no kind.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DigitKind {

    /// The digit is a clue placed by the puzzle generator. Such cells are
    /// immutable: [Board::put] refuses to change or clear them.
    Generated,

    /// The digit was entered by the user. It can be overwritten or cleared
    /// freely.
    UserGenerated,

    /// The digit was filled in by the solver (or by the generator while it
    /// builds the full solution grid). Like user entries, these cells stay
    /// mutable.
    Solved
}

/// One occupied cell of the board: a digit from 1 to 9 together with the
/// [DigitKind] recording where it came from.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Digit {

    /// The digit itself, in the range `[1, 9]`.
    pub number: usize,

    /// The origin of the digit.
    pub kind: DigitKind
}

/// A 9x9 Sudoku board. Each of the 81 cells is either empty or holds a
/// [Digit]. Cells are addressed by `(column, row)` coordinates with the
/// origin in the top-left corner, both in the range `[0, 9[`.
///
/// The board itself only enforces structural validity (coordinates and
/// digit ranges, immutability of generated clues). Whether a digit may be
/// placed under Sudoku rules is a separate question answered by
/// [Board::can_fit]; [Board::put] writes unconditionally so that the solver
/// and generator can manipulate the board freely.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Board {
    cells: Vec<Option<Digit>>
}

pub(crate) fn index(column: usize, row: usize) -> usize {
    row * SIZE + column
}

fn check_coordinates(column: usize, row: usize) -> SudokuResult<()> {
    if column >= SIZE || row >= SIZE {
        Err(SudokuError::OutOfBounds)
    }
    else {
        Ok(())
    }
}

impl Board {

    /// Creates a new, empty board.
    pub fn new() -> Board {
        Board {
            cells: vec![None; CELL_COUNT]
        }
    }

    /// Parses a board from the nine-row notation. The code consists of nine
    /// whitespace-separated rows of nine characters each, where the digits
    /// `'1'` to `'9'` stand for themselves and `'.'` as well as `'0'` mark
    /// an empty cell. All parsed digits are tagged [DigitKind::Generated],
    /// that is, they are treated as the clues of a puzzle.
    ///
    /// As an example, the code below parses to a board whose first row
    /// contains a 5 and a 3 followed by two empty cells, a 7, and four more
    /// empty cells.
    ///
    /// ```
    /// use sudoku_exact::Board;
    ///
    /// let board = Board::parse(
    ///     "53..7....
    ///      6..195...
    ///      .98....6.
    ///      8...6...3
    ///      4..8.3..1
    ///      7...2...6
    ///      .6....28.
    ///      ...419..5
    ///      ....8..79").unwrap();
    ///
    /// assert_eq!(5, board.get(0, 0).unwrap().unwrap().number);
    /// assert!(board.empty(2, 0).unwrap());
    /// ```
    ///
    /// # Errors
    ///
    /// Any specialization of `SudokuParseError` (see that documentation).
    pub fn parse(code: &str) -> SudokuParseResult<Board> {
        let rows: Vec<&str> = code.split_whitespace().collect();

        if rows.len() != SIZE {
            return Err(SudokuParseError::WrongNumberOfRows);
        }

        let mut board = Board::new();

        for (row, row_code) in rows.iter().enumerate() {
            if row_code.chars().count() != SIZE {
                return Err(SudokuParseError::WrongNumberOfCells);
            }

            for (column, c) in row_code.chars().enumerate() {
                match c {
                    '.' | '0' => { },
                    '1'..='9' => {
                        let number = c as usize - '0' as usize;
                        board.cells[index(column, row)] = Some(Digit {
                            number,
                            kind: DigitKind::Generated
                        });
                    },
                    _ => return Err(SudokuParseError::InvalidCharacter)
                }
            }
        }

        Ok(board)
    }

    /// Gets the content of the cell at the specified position, or `None` if
    /// that cell is empty.
    ///
    /// # Errors
    ///
    /// If `column` or `row` is not in the range `[0, 9[`. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn get(&self, column: usize, row: usize)
            -> SudokuResult<Option<Digit>> {
        check_coordinates(column, row)?;
        Ok(self.cells[index(column, row)])
    }

    /// Indicates whether the cell at the specified position is empty.
    ///
    /// # Errors
    ///
    /// If `column` or `row` is not in the range `[0, 9[`. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn empty(&self, column: usize, row: usize) -> SudokuResult<bool> {
        Ok(self.get(column, row)?.is_none())
    }

    /// Indicates whether the cell at the specified position holds the given
    /// number. This returns `false` if the cell is empty, holds a different
    /// number, or `number` is not in the range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// If `column` or `row` is not in the range `[0, 9[`. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn has_digit(&self, column: usize, row: usize, number: usize)
            -> SudokuResult<bool> {
        Ok(self.get(column, row)?
            .map_or(false, |digit| digit.number == number))
    }

    /// Checks whether the given number could be placed at the specified
    /// position without repeating a digit in the cell's row, column, or
    /// box. `Ok(None)` means the digit fits; otherwise the first violated
    /// constraint is reported, where the column is checked first, then the
    /// row, then the box.
    ///
    /// The check runs against the current contents of the board, including
    /// the probed cell itself: probing a cell for the digit it already
    /// holds reports a violation. Callers that mean "can this digit replace
    /// the current one?" have to clear the cell first.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` if `column` or `row` is not in the
    /// range `[0, 9[`.
    /// * `SudokuError::InvalidDigit` if `number` is not in the range
    /// `[1, 9]`.
    pub fn can_fit(&self, column: usize, row: usize, number: usize)
            -> SudokuResult<Option<ConstraintKind>> {
        check_coordinates(column, row)?;

        if number == 0 || number > SIZE {
            return Err(SudokuError::InvalidDigit);
        }

        if !constraint::fits_in_column(self, column, row, number) {
            Ok(Some(ConstraintKind::Column))
        }
        else if !constraint::fits_in_row(self, column, row, number) {
            Ok(Some(ConstraintKind::Row))
        }
        else if !constraint::fits_in_box(self, column, row, number) {
            Ok(Some(ConstraintKind::Box))
        }
        else {
            Ok(None)
        }
    }

    /// Writes the given number to the cell at the specified position,
    /// tagged with the given kind. A `number` of 0 clears the cell instead,
    /// in which case the kind argument is ignored. Note that this method
    /// does *not* check the Sudoku constraints; use [Board::can_fit] for
    /// that.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` if `column` or `row` is not in the
    /// range `[0, 9[`.
    /// * `SudokuError::InvalidDigit` if `number` is greater than 9.
    /// * `SudokuError::ProtectedCell` if the targeted cell currently holds
    /// a digit of kind [DigitKind::Generated]. The board is left unchanged.
    pub fn put(&mut self, column: usize, row: usize, number: usize,
            kind: DigitKind) -> SudokuResult<()> {
        check_coordinates(column, row)?;

        if number > SIZE {
            return Err(SudokuError::InvalidDigit);
        }

        let cell = &mut self.cells[index(column, row)];

        if let Some(digit) = cell {
            if digit.kind == DigitKind::Generated {
                return Err(SudokuError::ProtectedCell);
            }
        }

        *cell = if number == 0 {
            None
        }
        else {
            Some(Digit {
                number,
                kind
            })
        };

        Ok(())
    }

    /// Resets the board, that is, empties every cell. This also discards
    /// generated clues; it is the only board operation besides replacing
    /// the whole board which does.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = None;
        }
    }

    fn unit_consistent(&self,
            cells: impl Iterator<Item = (usize, usize)>) -> bool {
        let mut seen = [false; SIZE + 1];

        for (column, row) in cells {
            if let Some(digit) = self.cells[index(column, row)] {
                if seen[digit.number] {
                    return false;
                }

                seen[digit.number] = true;
            }
        }

        true
    }

    /// Indicates whether the board is solved, that is, every cell holds a
    /// digit and no digit repeats within a row, a column, or a box.
    pub fn solved(&self) -> bool {
        if !self.is_full() {
            return false;
        }

        for i in 0..SIZE {
            if !self.unit_consistent((0..SIZE).map(|x| (x, i))) {
                return false;
            }

            if !self.unit_consistent((0..SIZE).map(|y| (i, y))) {
                return false;
            }

            let box_column = i % 3 * 3;
            let box_row = i / 3 * 3;
            let box_cells = (0..SIZE)
                .map(|j| (box_column + j % 3, box_row + j / 3));

            if !self.unit_consistent(box_cells) {
                return false;
            }
        }

        true
    }

    /// Counts the number of occupied cells on the board, regardless of
    /// their kind.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Indicates whether every cell of the board is occupied. In this case,
    /// [Board::count_clues] returns 81.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Indicates whether no cell of the board is occupied. In this case,
    /// [Board::count_clues] returns 0.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Indicates whether the digits of this board are a subset of another
    /// one's. That is, every occupied cell of this board must hold the same
    /// number in `other`; the digit kinds are not compared. A solution grid
    /// returned by the solver is a superset of the puzzle it solves, in
    /// this sense.
    pub fn is_subset_of(&self, other: &Board) -> bool {
        self.cells.iter()
            .zip(other.cells.iter())
            .all(|(own, others)| match own {
                Some(digit) => others
                    .map_or(false, |other_digit|
                        digit.number == other_digit.number),
                None => true
            })
    }

    /// Indicates whether the digits of another board are a subset of this
    /// one's. See [Board::is_subset_of].
    pub fn is_superset_of(&self, other: &Board) -> bool {
        other.is_subset_of(self)
    }

    /// Saves the board to the file at the given path. The format is binary:
    /// the board width and height (both always 9) followed by one record
    /// per cell in row-major order, each record being the cell's digit (0
    /// for an empty cell) and the discriminant of its kind (0 = empty,
    /// 1 = generated, 2 = user-generated, 3 = solved). All values are
    /// little-endian unsigned 32-bit words.
    ///
    /// # Errors
    ///
    /// `PersistenceError::Io` if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> PersistenceResult<()> {
        let mut out = BufWriter::new(File::create(path)?);

        write_u32(&mut out, SIZE as u32)?;
        write_u32(&mut out, SIZE as u32)?;

        for cell in self.cells.iter() {
            let (value, kind) = match cell {
                Some(digit) => (digit.number as u32, kind_code(digit.kind)),
                None => (0, 0)
            };

            write_u32(&mut out, value)?;
            write_u32(&mut out, kind)?;
        }

        out.flush()?;
        Ok(())
    }

    /// Loads a board from the file at the given path, expecting the format
    /// written by [Board::save]. The file is validated completely before a
    /// board is produced, so no partially loaded board can be observed.
    ///
    /// # Errors
    ///
    /// * `PersistenceError::Io` if the file cannot be opened or ends early.
    /// * `PersistenceError::InvalidHeader` if the header declares a zero
    /// width or height.
    /// * `PersistenceError::UnsupportedDimensions` if the header declares
    /// dimensions other than 9x9.
    /// * `PersistenceError::InvalidCell` if a cell record holds a digit
    /// greater than 9, an unknown kind discriminant, or an inconsistent
    /// digit/kind pair.
    pub fn load(path: impl AsRef<Path>) -> PersistenceResult<Board> {
        let mut input = BufReader::new(File::open(path)?);

        let width = read_u32(&mut input)?;
        let height = read_u32(&mut input)?;

        if width == 0 || height == 0 {
            return Err(PersistenceError::InvalidHeader {
                width,
                height
            });
        }

        if width != SIZE as u32 || height != SIZE as u32 {
            return Err(PersistenceError::UnsupportedDimensions {
                width,
                height
            });
        }

        let mut board = Board::new();

        for cell in board.cells.iter_mut() {
            let value = read_u32(&mut input)?;
            let kind = read_u32(&mut input)?;
            *cell = cell_from_codes(value, kind)?;
        }

        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            if row > 0 {
                writeln!(f)?;
            }

            for column in 0..SIZE {
                match self.cells[index(column, row)] {
                    Some(digit) => write!(f, "{}", digit.number)?,
                    None => write!(f, ".")?
                }
            }
        }

        Ok(())
    }
}

fn write_u32(out: &mut impl Write, value: u32) -> PersistenceResult<()> {
    out.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn read_u32(input: &mut impl Read) -> PersistenceResult<u32> {
    let mut buffer = [0u8; 4];
    input.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

fn kind_code(kind: DigitKind) -> u32 {
    match kind {
        DigitKind::Generated => 1,
        DigitKind::UserGenerated => 2,
        DigitKind::Solved => 3
    }
}

fn cell_from_codes(value: u32, kind: u32)
        -> PersistenceResult<Option<Digit>> {
    let invalid = PersistenceError::InvalidCell {
        value,
        kind
    };

    if value > SIZE as u32 {
        return Err(invalid);
    }

    let parsed_kind = match kind {
        0 => None,
        1 => Some(DigitKind::Generated),
        2 => Some(DigitKind::UserGenerated),
        3 => Some(DigitKind::Solved),
        _ => return Err(invalid)
    };

    match (value, parsed_kind) {
        (0, None) => Ok(None),
        (0, Some(_)) | (_, None) => Err(invalid),
        (number, Some(kind)) => Ok(Some(Digit {
            number: number as usize,
            kind
        }))
    }
}
