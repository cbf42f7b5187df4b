//! Error type shared across the crate.

use thiserror::Error;

use super::side::Side;

/// Errors surfaced to callers of the rule engine, registry and session.
///
/// Invalid moves leave the state untouched and are never game-ending.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("pit index {pit} is out of range (expected 0..9)")]
    InvalidPit { pit: usize },

    #[error("{side} pit {pit} is empty")]
    EmptyPit { side: Side, pit: usize },

    #[error("it is not {side}'s turn")]
    NotYourTurn { side: Side },

    #[error("the game is already over")]
    GameOver,

    #[error("unknown difficulty tier: {0}")]
    UnknownDifficulty(String),

    #[error("background search ended without a result")]
    SearchFailed,
}

/// Convenience Result type for engine operations.
pub type Result<T> = std::result::Result<T, GameError>;
