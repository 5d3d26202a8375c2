//! High-level game management
//!
//! [`Game`] is the authoritative state a front end drives: the two move
//! histories, whose turn it is, and the outcome once a line is completed. The
//! engine itself never holds this state; it is handed the histories and
//! returns a cell index.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use super::moves::{empty_cells, ensure_disjoint, MoveList, Side, CELL_COUNT, MARK_LIMIT};

/// A move applied to a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub side: Side,
    /// Mark removed by the eviction rule, when the side already held 3
    pub evicted: Option<usize>,
}

/// Outcome of a finished game
///
/// There is no draw variant: at most 6 of the 9 cells are ever occupied, so
/// the board cannot fill, and a game ends only when a line is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Side,
    pub line: [usize; 3],
}

/// A game in progress, with full move history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    human: MoveList,
    cpu: MoveList,
    turn: Side,
    outcome: Option<Outcome>,
    history: Vec<Move>,
}

impl Game {
    /// Start a new game with the given side to move first
    pub fn new(first: Side) -> Self {
        Game {
            human: MoveList::new(),
            cpu: MoveList::new(),
            turn: first,
            outcome: None,
            history: Vec::new(),
        }
    }

    /// Reconstruct a position from two histories
    ///
    /// Used to analyze positions supplied from outside a live game. The
    /// outcome is re-derived from the histories; the move log starts empty.
    ///
    /// # Errors
    ///
    /// Returns error if the histories share a cell.
    pub fn from_histories(human: MoveList, cpu: MoveList, turn: Side) -> Result<Self, crate::Error> {
        ensure_disjoint(&human, &cpu)?;

        let outcome = LineAnalyzer::find_line(&human)
            .map(|line| Outcome {
                winner: Side::Human,
                line,
            })
            .or_else(|| {
                LineAnalyzer::find_line(&cpu).map(|line| Outcome {
                    winner: Side::Cpu,
                    line,
                })
            });

        Ok(Game {
            human,
            cpu,
            turn,
            outcome,
            history: Vec::new(),
        })
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn winner(&self) -> Option<Side> {
        self.outcome.map(|o| o.winner)
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.outcome.map(|o| o.line)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// One side's move history, oldest first
    pub fn moves(&self, side: Side) -> &MoveList {
        match side {
            Side::Human => &self.human,
            Side::Cpu => &self.cpu,
        }
    }

    /// Every move applied to this game, in order
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Which side holds a cell, if any
    pub fn cell(&self, pos: usize) -> Option<Side> {
        if self.human.contains(pos) {
            Some(Side::Human)
        } else if self.cpu.contains(pos) {
            Some(Side::Cpu)
        } else {
            None
        }
    }

    /// All unoccupied cells, ascending
    pub fn empty_cells(&self) -> Vec<usize> {
        empty_cells(&self.human, &self.cpu)
    }

    /// The mark the side to move will lose with its next placement
    ///
    /// Present exactly when the game is live and the side to move already
    /// holds 3 marks. Front ends show this as the "about to vanish" cell.
    pub fn fading_mark(&self) -> Option<usize> {
        if self.is_over() {
            return None;
        }
        let moves = self.moves(self.turn);
        if moves.len() == MARK_LIMIT {
            moves.oldest()
        } else {
            None
        }
    }

    /// Apply a move for the side to move
    ///
    /// Applies the eviction rule, re-checks for a completed line, and passes
    /// the turn (the turn stays with the winner when the move ends the game).
    ///
    /// # Errors
    ///
    /// Returns error if the game is over, the position is out of range, or
    /// the cell is occupied.
    pub fn play(&mut self, pos: usize) -> Result<Move, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }
        if pos >= CELL_COUNT {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if self.cell(pos).is_some() {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let side = self.turn;
        let list = match side {
            Side::Human => &mut self.human,
            Side::Cpu => &mut self.cpu,
        };

        let evicted = if list.len() == MARK_LIMIT {
            list.oldest()
        } else {
            None
        };
        *list = list.push_evict(pos);

        let mv = Move {
            position: pos,
            side,
            evicted,
        };
        self.history.push(mv);

        if let Some(line) = LineAnalyzer::find_line(self.moves(side)) {
            self.outcome = Some(Outcome { winner: side, line });
        } else {
            self.turn = side.opponent();
        }

        Ok(mv)
    }

    /// Let the search engine play the CPU's turn
    ///
    /// # Errors
    ///
    /// Returns error if it is not the CPU's turn or the game is over, and
    /// propagates engine contract violations.
    pub fn play_engine(&mut self) -> Result<Move, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }
        if self.turn != Side::Cpu {
            return Err(crate::Error::OutOfTurn);
        }

        let pos = crate::engine::select_move(&self.human, &self.cpu)?;
        self.play(pos)
    }
}

impl fmt::Display for Game {
    /// Render the board as three rows of `X`, `O`, and `.` cells
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let c = match self.cell(pos) {
                    Some(side) => side.to_char(),
                    None => '.',
                };
                write!(f, "{c}")?;
                if col < 2 {
                    write!(f, " ")?;
                }
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = Game::new(Side::Human);
        assert_eq!(game.turn(), Side::Human);
        assert!(!game.is_over());
        assert_eq!(game.empty_cells().len(), 9);
        assert_eq!(game.history().len(), 0);
    }

    #[test]
    fn test_play_alternates_turns() {
        let mut game = Game::new(Side::Human);
        game.play(0).unwrap();
        assert_eq!(game.turn(), Side::Cpu);
        game.play(4).unwrap();
        assert_eq!(game.turn(), Side::Human);
    }

    #[test]
    fn test_play_rejects_occupied_cell() {
        let mut game = Game::new(Side::Human);
        game.play(4).unwrap();

        let result = game.play(4);
        assert!(matches!(
            result,
            Err(crate::Error::InvalidMove { position: 4 })
        ));
    }

    #[test]
    fn test_play_rejects_out_of_range() {
        let mut game = Game::new(Side::Human);
        assert!(matches!(
            game.play(9),
            Err(crate::Error::InvalidPosition { position: 9 })
        ));
    }

    #[test]
    fn test_win_ends_game_and_keeps_turn() {
        let mut game = Game::new(Side::Human);
        game.play(0).unwrap(); // X
        game.play(3).unwrap(); // O
        game.play(1).unwrap(); // X
        game.play(4).unwrap(); // O
        game.play(2).unwrap(); // X completes the top row

        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Side::Human));
        assert_eq!(game.winning_line(), Some([0, 1, 2]));
        assert_eq!(game.turn(), Side::Human);
        assert!(matches!(game.play(5), Err(crate::Error::GameOver)));
    }

    #[test]
    fn test_fourth_mark_evicts_oldest() {
        let mut game = Game::new(Side::Human);
        game.play(0).unwrap(); // X
        game.play(3).unwrap(); // O
        game.play(1).unwrap(); // X
        game.play(4).unwrap(); // O
        game.play(8).unwrap(); // X, now holds [0, 1, 8]
        game.play(7).unwrap(); // O

        // X's fourth placement evicts the mark at 0
        let mv = game.play(6).unwrap();
        assert_eq!(mv.evicted, Some(0));
        assert_eq!(game.moves(Side::Human).as_slice(), &[1, 8, 6]);
        assert_eq!(game.cell(0), None);
    }

    #[test]
    fn test_fading_mark() {
        let mut game = Game::new(Side::Human);
        assert_eq!(game.fading_mark(), None);

        game.play(0).unwrap(); // X
        game.play(3).unwrap(); // O
        game.play(1).unwrap(); // X
        game.play(4).unwrap(); // O
        game.play(8).unwrap(); // X holds 3 marks
        assert_eq!(game.fading_mark(), None); // O to move with 2 marks

        game.play(7).unwrap(); // O
        // X to move holding [0, 1, 8]: 0 is about to vanish
        assert_eq!(game.fading_mark(), Some(0));
    }

    #[test]
    fn test_reopened_cell_is_playable_again() {
        let mut game = Game::new(Side::Human);
        game.play(0).unwrap(); // X
        game.play(3).unwrap(); // O
        game.play(1).unwrap(); // X
        game.play(4).unwrap(); // O
        game.play(8).unwrap(); // X
        game.play(7).unwrap(); // O
        game.play(6).unwrap(); // X, evicts 0
        game.play(5).unwrap(); // O, evicts 3

        // Cell 0 is empty again and X may retake it
        assert_eq!(game.cell(0), None);
        let mv = game.play(0).unwrap();
        assert_eq!(mv.side, Side::Human);
        assert_eq!(mv.evicted, Some(1));
    }

    #[test]
    fn test_play_engine_requires_cpu_turn() {
        let mut game = Game::new(Side::Human);
        assert!(matches!(game.play_engine(), Err(crate::Error::OutOfTurn)));
    }

    #[test]
    fn test_play_engine_opens_center() {
        let mut game = Game::new(Side::Cpu);
        let mv = game.play_engine().unwrap();
        assert_eq!(mv.position, 4);
        assert_eq!(mv.side, Side::Cpu);
        assert_eq!(game.turn(), Side::Human);
    }

    #[test]
    fn test_from_histories_derives_outcome() {
        let human = MoveList::try_from_slice(&[0, 1, 2]).unwrap();
        let cpu = MoveList::try_from_slice(&[3, 4]).unwrap();
        let game = Game::from_histories(human, cpu, Side::Cpu).unwrap();

        assert_eq!(game.winner(), Some(Side::Human));
        assert_eq!(game.winning_line(), Some([0, 1, 2]));
    }

    #[test]
    fn test_from_histories_rejects_overlap() {
        let human = MoveList::try_from_slice(&[0, 4]).unwrap();
        let cpu = MoveList::try_from_slice(&[4]).unwrap();
        assert!(matches!(
            Game::from_histories(human, cpu, Side::Human),
            Err(crate::Error::OverlappingMoves { position: 4 })
        ));
    }

    #[test]
    fn test_display() {
        let mut game = Game::new(Side::Human);
        game.play(0).unwrap();
        game.play(4).unwrap();

        let rendered = format!("{game}");
        assert_eq!(rendered, "X . .\n. O .\n. . .");
    }
}
