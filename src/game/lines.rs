//! Winning line detection
//!
//! A side wins by covering one of the 8 fixed three-cell lines with its
//! current marks. Because a history holds at most 3 marks, a win means the
//! history covers a line exactly.

use super::moves::{MoveList, MARK_LIMIT};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Find the first winning line fully covered by the history
    ///
    /// Lines are checked in the fixed order of [`WINNING_LINES`] (rows,
    /// columns, diagonals); when several lines are covered at once the
    /// earliest one is reported. A history shorter than 3 can never cover a
    /// line.
    pub fn find_line(moves: &MoveList) -> Option<[usize; 3]> {
        if moves.len() < MARK_LIMIT {
            return None;
        }
        WINNING_LINES
            .into_iter()
            .find(|line| line.iter().all(|&pos| moves.contains(pos)))
    }

    /// Check whether the history covers any winning line
    pub fn has_line(moves: &MoveList) -> bool {
        Self::find_line(moves).is_some()
    }
}
