//! Depth-limited minimax with alpha-beta pruning.
//!
//! ## Usage
//!
//! ```rust
//! use togyz_ai::core::{GameState, Side};
//! use togyz_ai::minimax::{MinimaxConfig, MinimaxSearch};
//!
//! let state = GameState::new();
//! let mut search = MinimaxSearch::new(MinimaxConfig::default().with_depth(2));
//!
//! let result = search.search(&state, Side::White);
//! assert!(result.best_move.is_some());
//! println!("nodes: {}", search.stats().nodes_evaluated);
//! ```

pub mod config;
pub mod ordering;
pub mod search;

pub use config::MinimaxConfig;
pub use ordering::{move_priority, ordered_moves};
pub use search::{MinimaxSearch, MinimaxStats};
