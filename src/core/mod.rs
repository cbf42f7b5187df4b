//! Core types: sides, game state, RNG, errors.
//!
//! Everything here is game data; the rules that transform it live in
//! [`crate::rules`].

pub mod error;
pub mod rng;
pub mod side;
pub mod state;

pub use error::{GameError, Result};
pub use rng::GameRng;
pub use side::{Side, SideMap};
pub use state::{
    GameState, Row, INITIAL_STONES_PER_PIT, LAST_PIT, PITS_PER_SIDE, TOTAL_STONES, WIN_THRESHOLD,
};
