//! Move histories and board occupancy
//!
//! In the infinite variant each side keeps at most [`MARK_LIMIT`] marks on the
//! board. A side's state is therefore not a set of cells but an ordered
//! history: when a fourth mark is placed, the oldest one is evicted. Board
//! occupancy is derived from the two histories and never stored separately.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of cells on the 3x3 board
pub const CELL_COUNT: usize = 9;

/// Maximum number of marks a side may have on the board at once
pub const MARK_LIMIT: usize = 3;

/// A side in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Human,
    Cpu,
}

impl Side {
    /// Get the opposing side
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Cpu,
            Side::Cpu => Side::Human,
        }
    }

    /// Mark character used when rendering the board
    pub fn to_char(self) -> char {
        match self {
            Side::Human => 'X',
            Side::Cpu => 'O',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Human => "Human",
            Side::Cpu => "CPU",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered move history of one side, oldest first
///
/// Invariants: at most [`MARK_LIMIT`] entries, every entry in `0..CELL_COUNT`,
/// no duplicates. Entries are additionally disjoint from the opposing side's
/// history; that cross-list invariant is enforced where two histories meet
/// (see [`ensure_disjoint`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveList(Vec<usize>);

impl MoveList {
    /// Create an empty history
    pub fn new() -> Self {
        MoveList(Vec::with_capacity(MARK_LIMIT))
    }

    /// Build a history from a slice of cell indices, oldest first
    ///
    /// # Errors
    ///
    /// Returns error if the slice is longer than [`MARK_LIMIT`], contains an
    /// out-of-range index, or contains a duplicate.
    pub fn try_from_slice(cells: &[usize]) -> Result<Self, crate::Error> {
        if cells.len() > MARK_LIMIT {
            return Err(crate::Error::MoveListTooLong { len: cells.len() });
        }

        let mut list = MoveList::new();
        for &pos in cells {
            if pos >= CELL_COUNT {
                return Err(crate::Error::InvalidPosition { position: pos });
            }
            if list.contains(pos) {
                return Err(crate::Error::DuplicateMove { position: pos });
            }
            list.0.push(pos);
        }
        Ok(list)
    }

    /// Append a mark, evicting the oldest one if the history is full
    ///
    /// This is the state-transition rule of the infinite variant. The input is
    /// unchanged; a new history is returned.
    #[must_use = "push_evict returns a new history; the original is unchanged"]
    pub fn push_evict(&self, pos: usize) -> MoveList {
        debug_assert!(pos < CELL_COUNT);
        debug_assert!(!self.contains(pos));

        let mut next = self.clone();
        next.0.push(pos);
        if next.0.len() > MARK_LIMIT {
            next.0.remove(0);
        }
        next
    }

    /// Check whether a cell is held by this side
    pub fn contains(&self, pos: usize) -> bool {
        self.0.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The mark that would be evicted by the next placement, if the history is
    /// full; otherwise the first-placed mark
    pub fn oldest(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// The most recently placed mark
    pub fn newest(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.0.iter().map(usize::to_string).collect();
        write!(f, "[{}]", cells.join(","))
    }
}

impl FromStr for MoveList {
    type Err = crate::Error;

    /// Parse a comma-separated history such as `"0,4,8"`, oldest first
    ///
    /// An empty (or all-whitespace) string parses as an empty history.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(MoveList::new());
        }

        let mut cells = Vec::new();
        for token in trimmed.split(',') {
            let pos = token
                .trim()
                .parse::<usize>()
                .map_err(|_| crate::Error::ParseMoveList {
                    input: s.to_string(),
                    reason: format!("'{}' is not a cell index", token.trim()),
                })?;
            cells.push(pos);
        }
        MoveList::try_from_slice(&cells)
    }
}

/// Check that no cell is claimed by both histories
///
/// # Errors
///
/// Returns error naming the first shared position, in `a`'s placement order.
pub fn ensure_disjoint(a: &MoveList, b: &MoveList) -> Result<(), crate::Error> {
    match a.iter().find(|&pos| b.contains(pos)) {
        Some(position) => Err(crate::Error::OverlappingMoves { position }),
        None => Ok(()),
    }
}

/// All currently unoccupied cells, ascending
pub fn empty_cells(a: &MoveList, b: &MoveList) -> Vec<usize> {
    (0..CELL_COUNT)
        .filter(|&pos| !a.contains(pos) && !b.contains(pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evict_below_limit_appends() {
        let list = MoveList::new().push_evict(4).push_evict(0);
        assert_eq!(list.as_slice(), &[4, 0]);
    }

    #[test]
    fn test_push_evict_at_limit_drops_oldest() {
        let list = MoveList::try_from_slice(&[4, 0, 8]).unwrap();
        let next = list.push_evict(2);

        assert_eq!(next.as_slice(), &[0, 8, 2]);
        assert_eq!(next.len(), MARK_LIMIT);
        // Original history is untouched
        assert_eq!(list.as_slice(), &[4, 0, 8]);
    }

    #[test]
    fn test_try_from_slice_rejects_long_history() {
        let result = MoveList::try_from_slice(&[0, 1, 2, 3]);
        assert!(matches!(
            result,
            Err(crate::Error::MoveListTooLong { len: 4 })
        ));
    }

    #[test]
    fn test_try_from_slice_rejects_out_of_range() {
        let result = MoveList::try_from_slice(&[0, 9]);
        assert!(matches!(
            result,
            Err(crate::Error::InvalidPosition { position: 9 })
        ));
    }

    #[test]
    fn test_try_from_slice_rejects_duplicates() {
        let result = MoveList::try_from_slice(&[3, 3]);
        assert!(matches!(
            result,
            Err(crate::Error::DuplicateMove { position: 3 })
        ));
    }

    #[test]
    fn test_parse_move_list() {
        let list: MoveList = "0, 4,8".parse().unwrap();
        assert_eq!(list.as_slice(), &[0, 4, 8]);

        let empty: MoveList = "".parse().unwrap();
        assert!(empty.is_empty());

        assert!("0,x".parse::<MoveList>().is_err());
        assert!("0,1,2,3".parse::<MoveList>().is_err());
    }

    #[test]
    fn test_ensure_disjoint() {
        let a = MoveList::try_from_slice(&[0, 4]).unwrap();
        let b = MoveList::try_from_slice(&[8, 2]).unwrap();
        assert!(ensure_disjoint(&a, &b).is_ok());

        let c = MoveList::try_from_slice(&[1, 4]).unwrap();
        assert!(matches!(
            ensure_disjoint(&a, &c),
            Err(crate::Error::OverlappingMoves { position: 4 })
        ));
    }

    #[test]
    fn test_empty_cells_ascending() {
        let a = MoveList::try_from_slice(&[4, 0]).unwrap();
        let b = MoveList::try_from_slice(&[8]).unwrap();
        assert_eq!(empty_cells(&a, &b), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_oldest_and_newest() {
        let list = MoveList::try_from_slice(&[6, 1, 5]).unwrap();
        assert_eq!(list.oldest(), Some(6));
        assert_eq!(list.newest(), Some(5));

        assert_eq!(MoveList::new().oldest(), None);
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Human.opponent(), Side::Cpu);
        assert_eq!(Side::Cpu.opponent(), Side::Human);
    }
}
