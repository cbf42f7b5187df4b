//! The move-selection capability shared by every computer opponent.
//!
//! Both search algorithms implement [`SearchEngine`]; [`Engine`] bundles
//! them as the two variants a difficulty tier can resolve to.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Side};
use crate::mcts::MCTSSearch;
use crate::minimax::MinimaxSearch;

/// Counters reported by a search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDiagnostics {
    /// Positions visited by minimax, or tree nodes allocated by MCTS.
    pub nodes_evaluated: u64,

    /// Completed playouts (MCTS only).
    pub simulations: u32,

    /// Wall-clock time spent searching (microseconds).
    pub elapsed_us: u64,
}

/// Outcome of one search call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Pit to sow, or `None` when the position offers no move.
    pub best_move: Option<usize>,

    /// Minimax evaluation, or the chosen child's win rate for MCTS.
    pub score: f64,

    pub diagnostics: SearchDiagnostics,
}

impl SearchResult {
    /// A result carrying no move.
    #[must_use]
    pub fn no_move(score: f64, diagnostics: SearchDiagnostics) -> Self {
        Self {
            best_move: None,
            score,
            diagnostics,
        }
    }
}

/// Chooses a move for `side` in `state`.
///
/// Implementations read a copy of the state and never mutate the caller's.
pub trait SearchEngine: Send {
    fn best_move(&mut self, state: &GameState, side: Side) -> SearchResult;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// One of the two search algorithms.
pub enum Engine {
    Minimax(MinimaxSearch),
    Mcts(MCTSSearch),
}

impl SearchEngine for Engine {
    fn best_move(&mut self, state: &GameState, side: Side) -> SearchResult {
        match self {
            Engine::Minimax(search) => search.best_move(state, side),
            Engine::Mcts(search) => search.best_move(state, side),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Engine::Minimax(search) => search.name(),
            Engine::Mcts(search) => search.name(),
        }
    }
}

impl From<MinimaxSearch> for Engine {
    fn from(search: MinimaxSearch) -> Self {
        Engine::Minimax(search)
    }
}

impl From<MCTSSearch> for Engine {
    fn from(search: MCTSSearch) -> Self {
        Engine::Mcts(search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcts::MCTSConfig;
    use crate::minimax::MinimaxConfig;

    #[test]
    fn test_engine_dispatch() {
        let state = GameState::new();

        let mut minimax: Engine = MinimaxSearch::new(MinimaxConfig::default().with_depth(2)).into();
        let mut mcts: Engine = MCTSSearch::new(MCTSConfig::default().with_simulations(50)).into();

        assert_eq!(minimax.name(), "minimax");
        assert_eq!(mcts.name(), "mcts");

        let a = minimax.best_move(&state, Side::White);
        let b = mcts.best_move(&state, Side::White);
        assert!(a.best_move.is_some());
        assert!(b.best_move.is_some());
        assert!(a.diagnostics.nodes_evaluated > 0);
        assert_eq!(b.diagnostics.simulations, 50);
    }

    #[test]
    fn test_engines_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Engine>();
    }

    #[test]
    fn test_result_serialization() {
        let result = SearchResult {
            best_move: Some(3),
            score: 12.5,
            diagnostics: SearchDiagnostics { nodes_evaluated: 10, simulations: 0, elapsed_us: 5 },
        };
        let json = serde_json::to_string(&result).unwrap();
        let deserialized: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }
}
