//! Infinite Tic-Tac-Toe
//!
//! A Tic-Tac-Toe variant in which each side keeps at most 3 marks on the
//! board; a 4th placement evicts that side's oldest mark. Eviction makes the
//! game non-monotonic: the board never fills, there are no draws, and
//! positions can repeat.
//!
//! This crate provides:
//! - Move histories with the eviction rule and winning line detection
//! - A minimax CPU engine with alpha-beta pruning and fast-path heuristics
//! - A game session type front ends can drive
//! - A pluggable move-oracle seam with validation and a deterministic
//!   fallback

pub mod cli;
pub mod engine;
pub mod error;
pub mod game;
pub mod oracle;

pub use engine::{score_moves, select_move, select_move_explained, MoveReason};
pub use error::{Error, Result};
pub use game::{
    empty_cells, ensure_disjoint, Game, LineAnalyzer, Move, MoveList, Outcome, Side, CELL_COUNT,
    MARK_LIMIT, WINNING_LINES,
};
pub use oracle::{EngineOracle, MoveOracle, OracleKind, RandomOracle, Validated};
