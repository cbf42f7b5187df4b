//! Monte Carlo Tree Search with UCT selection and kazan-greedy playouts.
//!
//! ## Usage
//!
//! ```rust
//! use togyz_ai::core::{GameState, Side};
//! use togyz_ai::mcts::{MCTSConfig, MCTSSearch};
//!
//! let state = GameState::new();
//! let config = MCTSConfig::default().with_simulations(200).with_seed(7);
//! let mut mcts = MCTSSearch::new(config);
//!
//! let result = mcts.search(&state, Side::White);
//! assert!(result.best_move.is_some());
//! println!("{:?}", mcts.root_visits());
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::MCTSConfig;
pub use node::{MCTSNode, NodeId};
pub use policy::{GreedyPlayout, PlayoutPolicy, RandomPlayout, SelectionPolicy, UCT};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
