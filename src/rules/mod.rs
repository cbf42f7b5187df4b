//! Rules of Togyz Kumalak.
//!
//! Move generation, sowing, tuzdyk creation, captures and game
//! termination, all implemented as methods on [`GameState`].
//!
//! [`GameState`]: crate::core::GameState

pub mod engine;

pub use engine::{GameResult, MoveList, MoveOutcome, Slot};
