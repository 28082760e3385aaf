//! This module contains the construction of the exact-cover matrix to which
//! the engine reduces Sudoku.
//!
//! Every way of placing a digit in a cell is one *choice*, of which there
//! are 9 digits x 81 cells = 729. Every rule a solved board has to satisfy
//! is one *constraint*: each of the 9 rows, 9 columns, and 9 boxes has to
//! contain each digit once (3 x 81 constraints), and each of the 81 cells
//! has to be occupied (81 more), for a total of 324. The matrix records
//! which choices satisfy which constraints; solving the Sudoku then means
//! selecting choices such that every constraint is satisfied by exactly one
//! selected choice, which is the exact-cover problem handled by the
//! [solver](crate::solver).
//!
//! The matrix is tiny and fixed, so it is stored densely: one byte per
//! entry, 729 rows of 324 columns. The row and column encodings are pure
//! arithmetic and exposed through [choice_index], [ExactCoverMatrix::decode_choice],
//! and [ExactCoverMatrix::constraints_of].

use crate::{SIZE, CELL_COUNT};
use crate::constraint::BOX_SIZE;
use crate::error::PersistenceResult;
use crate::solver::SolutionStep;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The number of choices, that is, rows of the matrix: one for each way of
/// placing one of the 9 digits in one of the 81 cells.
pub const CHOICE_COUNT: usize = SIZE * CELL_COUNT;

/// The number of constraints, that is, columns of the matrix.
pub const CONSTRAINT_COUNT: usize = 4 * CELL_COUNT;

/// Offset of the row-digit constraint block: column `ROW_OFFSET + y * 9 + v`
/// expresses "row `y` contains digit `v + 1`".
const ROW_OFFSET: usize = 0;

/// Offset of the column-digit constraint block: column
/// `COLUMN_OFFSET + x * 9 + v` expresses "column `x` contains digit
/// `v + 1`".
const COLUMN_OFFSET: usize = CELL_COUNT;

/// Offset of the box-digit constraint block: column `BOX_OFFSET + b * 9 + v`
/// expresses "box `b` contains digit `v + 1`", where boxes are numbered
/// row-major.
const BOX_OFFSET: usize = 2 * CELL_COUNT;

/// Offset of the cell-occupancy constraint block: column
/// `CELL_OFFSET + y * 9 + x` expresses "the cell at `(x, y)` is occupied".
const CELL_OFFSET: usize = 3 * CELL_COUNT;

/// Computes the choice (matrix row) index encoding the placement of digit
/// `value + 1` at the cell in the given column and row, where `value` is in
/// the range `[0, 9[`.
pub fn choice_index(value: usize, column: usize, row: usize) -> usize {
    value * CELL_COUNT + row * SIZE + column
}

fn box_id(column: usize, row: usize) -> usize {
    row / BOX_SIZE * BOX_SIZE + column / BOX_SIZE
}

/// The dense 729x324 0/1 matrix linking placement choices to the
/// constraints they satisfy. Construction is deterministic and fully
/// determined by the 9x9 structure; each choice row holds exactly four
/// ones, one per constraint block.
///
/// A fresh matrix is built for every solver call and dropped afterwards;
/// nothing in it depends on any particular puzzle.
pub struct ExactCoverMatrix {
    entries: Vec<u8>
}

impl ExactCoverMatrix {

    /// Builds the full matrix.
    pub fn new() -> ExactCoverMatrix {
        let mut matrix = ExactCoverMatrix {
            entries: vec![0u8; CHOICE_COUNT * CONSTRAINT_COUNT]
        };

        for value in 0..SIZE {
            for row in 0..SIZE {
                for column in 0..SIZE {
                    let choice = choice_index(value, column, row);

                    for constraint in constraints_for(value, column, row) {
                        matrix.entries[choice * CONSTRAINT_COUNT + constraint]
                            = 1;
                    }
                }
            }
        }

        debug_assert!(matrix.verify());
        matrix
    }

    /// Indicates whether the given choice satisfies the given constraint,
    /// that is, whether the matrix holds a one at that position.
    pub fn is_set(&self, choice: usize, constraint: usize) -> bool {
        self.entries[choice * CONSTRAINT_COUNT + constraint] == 1
    }

    /// Lists the four constraints satisfied by the given choice, in block
    /// order: row-digit, column-digit, box-digit, cell-occupancy.
    pub fn constraints_of(&self, choice: usize) -> [usize; 4] {
        let step = self.decode_choice(choice);
        constraints_for(step.number - 1, step.column, step.row)
    }

    /// Decodes a choice index back into the placement it encodes. This is
    /// the inverse of [choice_index], with the digit translated from its
    /// zero-based `value` to the actual number.
    pub fn decode_choice(&self, choice: usize) -> SolutionStep {
        let value = choice / CELL_COUNT;
        let cell = choice % CELL_COUNT;

        SolutionStep {
            column: cell % SIZE,
            row: cell / SIZE,
            number: value + 1
        }
    }

    /// Verifies the two build invariants: every row of the matrix holds
    /// exactly four ones, and every column holds at least one (in fact
    /// nine, but at least one is the bound correctness depends on).
    pub fn verify(&self) -> bool {
        for choice in 0..CHOICE_COUNT {
            let ones = (0..CONSTRAINT_COUNT)
                .filter(|&constraint| self.is_set(choice, constraint))
                .count();

            if ones != 4 {
                return false;
            }
        }

        for constraint in 0..CONSTRAINT_COUNT {
            let ones = (0..CHOICE_COUNT)
                .filter(|&choice| self.is_set(choice, constraint))
                .count();

            if ones == 0 {
                return false;
            }
        }

        true
    }

    /// Writes the matrix to the file at the given path for debugging: 729
    /// newline-terminated lines of 324 `'0'`/`'1'` characters each, in
    /// row-major order.
    ///
    /// # Errors
    ///
    /// `PersistenceError::Io` if the file cannot be created or written.
    pub fn dump(&self, path: impl AsRef<Path>) -> PersistenceResult<()> {
        let mut out = BufWriter::new(File::create(path)?);
        let mut line = String::with_capacity(CONSTRAINT_COUNT + 1);

        for choice in 0..CHOICE_COUNT {
            line.clear();

            for constraint in 0..CONSTRAINT_COUNT {
                line.push(if self.is_set(choice, constraint) { '1' }
                    else { '0' });
            }

            line.push('\n');
            out.write_all(line.as_bytes())?;
        }

        out.flush()?;
        Ok(())
    }
}

impl Default for ExactCoverMatrix {
    fn default() -> ExactCoverMatrix {
        ExactCoverMatrix::new()
    }
}

fn constraints_for(value: usize, column: usize, row: usize) -> [usize; 4] {
    [
        ROW_OFFSET + row * SIZE + value,
        COLUMN_OFFSET + column * SIZE + value,
        BOX_OFFSET + box_id(column, row) * SIZE + value,
        CELL_OFFSET + row * SIZE + column
    ]
}

#[cfg(test)]
mod tests {

    use super::*;

    use tempfile::tempdir;

    use std::fs;

    #[test]
    fn every_row_has_four_ones() {
        let matrix = ExactCoverMatrix::new();

        for choice in 0..CHOICE_COUNT {
            let ones = (0..CONSTRAINT_COUNT)
                .filter(|&constraint| matrix.is_set(choice, constraint))
                .count();

            assert_eq!(4, ones, "Choice {} has {} ones.", choice, ones);
        }
    }

    #[test]
    fn every_column_has_nine_ones() {
        let matrix = ExactCoverMatrix::new();

        for constraint in 0..CONSTRAINT_COUNT {
            let ones = (0..CHOICE_COUNT)
                .filter(|&choice| matrix.is_set(choice, constraint))
                .count();

            assert_eq!(9, ones, "Constraint {} has {} ones.", constraint,
                ones);
        }
    }

    #[test]
    fn total_number_of_ones() {
        let matrix = ExactCoverMatrix::new();
        let ones: usize = (0..CHOICE_COUNT)
            .map(|choice| (0..CONSTRAINT_COUNT)
                .filter(|&constraint| matrix.is_set(choice, constraint))
                .count())
            .sum();

        assert_eq!(2916, ones);
    }

    #[test]
    fn matrix_verifies() {
        assert!(ExactCoverMatrix::new().verify());
    }

    #[test]
    fn choice_index_and_decode_are_inverse() {
        let matrix = ExactCoverMatrix::new();

        for choice in 0..CHOICE_COUNT {
            let step = matrix.decode_choice(choice);

            assert_eq!(choice,
                choice_index(step.number - 1, step.column, step.row));
        }
    }

    #[test]
    fn known_choice_encodings() {
        // Digit 1 at the top-left cell is choice 0; digit 9 at the
        // bottom-right cell is the last choice.
        assert_eq!(0, choice_index(0, 0, 0));
        assert_eq!(CHOICE_COUNT - 1, choice_index(8, 8, 8));

        // Digit 5 at (x = 3, y = 2): r = 4 * 81 + 2 * 9 + 3.
        assert_eq!(345, choice_index(4, 3, 2));
    }

    #[test]
    fn known_constraint_columns() {
        let matrix = ExactCoverMatrix::new();

        // Digit 5 at (x = 3, y = 2) lies in box 1 (top-middle). Its four
        // constraints: row 2 has a 5, column 3 has a 5, box 1 has a 5, and
        // cell (3, 2) is occupied.
        let choice = choice_index(4, 3, 2);
        let expected = [
            2 * 9 + 4,
            81 + 3 * 9 + 4,
            162 + 1 * 9 + 4,
            243 + 2 * 9 + 3
        ];

        assert_eq!(expected, matrix.constraints_of(choice));

        for &constraint in expected.iter() {
            assert!(matrix.is_set(choice, constraint));
        }
    }

    #[test]
    fn constraint_blocks_partition_the_columns() {
        let matrix = ExactCoverMatrix::new();
        let choice = choice_index(0, 0, 0);
        let [row, column, box_, cell] = matrix.constraints_of(choice);

        assert!(row < 81);
        assert!(column >= 81 && column < 162);
        assert!(box_ >= 162 && box_ < 243);
        assert!(cell >= 243 && cell < 324);
    }

    #[test]
    fn dump_writes_one_line_per_choice() {
        let directory = tempdir().unwrap();
        let path = directory.path().join("matrix.txt");
        let matrix = ExactCoverMatrix::new();

        matrix.dump(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(CHOICE_COUNT, lines.len());

        for line in lines {
            assert_eq!(CONSTRAINT_COUNT, line.len());
            assert_eq!(4, line.chars().filter(|&c| c == '1').count());
        }

        assert!(content.ends_with('\n'));
    }
}
