//! This module contains the error and result definitions used in this crate.

use std::io;

/// Miscellaneous errors that can occur on board operations and puzzle
/// generation. Errors raised while parsing a board code are covered by
/// [SudokuParseError] and errors of the binary persistence layer by
/// [PersistenceError] instead.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that the specified coordinates (column and row) lie outside
    /// the 9x9 board. This is the case if either of them is greater than or
    /// equal to 9.
    OutOfBounds,

    /// Indicates that some digit is invalid for the board. This is the case
    /// if it is greater than 9 (0 is permitted where it denotes clearing a
    /// cell).
    InvalidDigit,

    /// Indicates that it was attempted to change a cell whose digit was
    /// placed by the puzzle generator. Such cells are the clues of the
    /// puzzle and stay fixed until the whole board is reset or replaced.
    ProtectedCell,

    /// An error that is raised when the generator's seeded board cannot be
    /// completed by the solver. This cannot happen for a single seed on an
    /// empty board, but the failure path is surfaced rather than swallowed.
    UnsolvableBoard,

    /// Indicates that the generator exhausted its budget of consecutive
    /// rejected erasures before reaching the requested number of clues. The
    /// partially erased board is discarded.
    ClueBudgetExhausted
}

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing a board code.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuParseError {

    /// Indicates that the code does not consist of exactly nine rows, which
    /// are separated by whitespace.
    WrongNumberOfRows,

    /// Indicates that some row of the code does not consist of exactly nine
    /// characters.
    WrongNumberOfCells,

    /// Indicates that a cell is given by a character which is neither a
    /// digit from 1 to 9 nor one of the empty-cell markers `'.'` and `'0'`.
    InvalidCharacter
}

/// Syntactic sugar for `Result<V, SudokuParseError>`.
pub type SudokuParseResult<V> = Result<V, SudokuParseError>;

/// An enumeration of the errors that may occur when saving a board to a file
/// or loading one from a file.
#[derive(Debug)]
pub enum PersistenceError {

    /// An I/O error raised by the underlying file operations, including a
    /// file that ends before all 81 cells have been read.
    Io(io::Error),

    /// Indicates that the file header declares a board with zero width or
    /// zero height.
    InvalidHeader {

        /// The width declared by the file.
        width: u32,

        /// The height declared by the file.
        height: u32
    },

    /// Indicates that the file header declares dimensions other than 9x9,
    /// which is the only board shape this engine supports.
    UnsupportedDimensions {

        /// The width declared by the file.
        width: u32,

        /// The height declared by the file.
        height: u32
    },

    /// Indicates that some cell record of the file holds a digit greater
    /// than 9, an unknown kind discriminant, or a digit/kind pair that is
    /// inconsistent (an empty cell with a kind, or a digit without one).
    InvalidCell {

        /// The digit stored in the offending cell record.
        value: u32,

        /// The kind discriminant stored in the offending cell record.
        kind: u32
    }
}

impl From<io::Error> for PersistenceError {
    fn from(e: io::Error) -> Self {
        PersistenceError::Io(e)
    }
}

/// Syntactic sugar for `Result<V, PersistenceError>`.
pub type PersistenceResult<V> = Result<V, PersistenceError>;
