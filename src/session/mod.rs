//! Game orchestration: one authoritative position, human moves, background
//! AI searches and engine-vs-engine matches.
//!
//! ## Usage
//!
//! ```rust
//! use togyz_ai::core::Side;
//! use togyz_ai::difficulty::DifficultyRegistry;
//! use togyz_ai::session::GameSession;
//!
//! let mut session = GameSession::new();
//! session.apply_move(Side::White, 4).unwrap();
//!
//! let engine = DifficultyRegistry::standard().build("easy", 0).unwrap();
//! let pending = session.request_ai_move(engine, Side::Black);
//! let (_engine, result) = pending.wait().unwrap();
//! session.apply_search(Side::Black, &result).unwrap();
//!
//! assert_eq!(session.ply_count(), 2);
//! ```

pub mod game;
pub mod matches;

pub use game::{GameSession, PendingSearch};
pub use matches::{play_match, play_match_from, MatchSummary};
