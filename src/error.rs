//! Error types for the infinitoe crate

use thiserror::Error;

/// Main error type for the infinitoe crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: position {position} is already occupied")]
    InvalidMove { position: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("game already over")]
    GameOver,

    #[error("it is not the engine side's turn to move")]
    OutOfTurn,

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("move history has {len} entries (each side keeps at most 3 marks)")]
    MoveListTooLong { len: usize },

    #[error("position {position} appears more than once in a move history")]
    DuplicateMove { position: usize },

    #[error("position {position} is claimed by both sides")]
    OverlappingMoves { position: usize },

    #[error("invalid move list '{input}': {reason}")]
    ParseMoveList { input: String, reason: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
