//! # togyz-ai
//!
//! Rule engine and computer opponent for Togyz Kumalak, the two-row
//! mancala of Central Asia.
//!
//! ## Design Principles
//!
//! 1. **Value-Type State**: [`GameState`] is `Copy`. Every search branch
//!    works on its own copy; nothing is shared between tree nodes.
//!
//! 2. **One Capability, Two Algorithms**: Minimax and MCTS both implement
//!    [`SearchEngine`]. A difficulty tier picks one and its budget.
//!
//! 3. **Deterministic By Default**: Seeded `ChaCha8` randomness and stable
//!    move ordering make every search reproducible when no time budget is
//!    set.
//!
//! ## Modules
//!
//! - `core`: Sides, board state, RNG and errors
//! - `rules`: Sowing, captures, tuzdyk, terminal detection
//! - `eval`: Static heuristic evaluation
//! - `minimax`: Alpha-beta search with move ordering
//! - `mcts`: Monte Carlo Tree Search with greedy playouts
//! - `search`: The shared `SearchEngine` capability
//! - `difficulty`: Named tiers mapped to engines
//! - `session`: Live games, background searches and engine matches

pub mod core;
pub mod difficulty;
pub mod eval;
pub mod mcts;
pub mod minimax;
pub mod rules;
pub mod search;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    GameError, GameRng, GameState, Result, Side, SideMap, PITS_PER_SIDE, TOTAL_STONES,
    WIN_THRESHOLD,
};

pub use crate::rules::{GameResult, MoveList, MoveOutcome, Slot};

pub use crate::eval::{EvalWeights, Evaluator, HeuristicEvaluator};

pub use crate::minimax::{MinimaxConfig, MinimaxSearch, MinimaxStats};

pub use crate::mcts::{
    GreedyPlayout, MCTSConfig, MCTSNode, MCTSSearch, MCTSTree, NodeId, PlayoutPolicy,
    RandomPlayout, SearchStats, SelectionPolicy, TreeStats, UCT,
};

pub use crate::search::{Engine, SearchDiagnostics, SearchEngine, SearchResult};

pub use crate::difficulty::{DifficultyRegistry, EngineSpec};

pub use crate::session::{play_match, GameSession, MatchSummary, PendingSearch};
