//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCT exploration constant (default: sqrt(2) = 1.414).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Playouts to run per search.
    pub max_simulations: u32,

    /// Wall-clock budget in milliseconds (0 = unlimited).
    /// Checked once per completed playout.
    pub time_budget_ms: u64,

    /// Maximum nodes to allocate in the tree.
    /// Prevents memory exhaustion on large searches.
    pub max_nodes: usize,

    /// Random seed for expansion and playouts.
    /// Same seed and no time budget produce deterministic searches.
    pub seed: u64,

    /// Plies after which a playout is stopped and adjudicated by kazan count.
    pub playout_ply_limit: u32,

    /// Probability that a playout ply takes the greedy (largest kazan gain) move.
    pub greedy_probability: f64,

    /// Upper bound of the random jitter added to greedy gains to break ties.
    pub tie_jitter: f64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            max_simulations: 5_000,
            time_budget_ms: 0,
            max_nodes: 100_000,
            seed: 42,
            playout_ply_limit: 200,
            greedy_probability: 0.7,
            tie_jitter: 0.1,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom playout budget.
    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.max_simulations = simulations;
        self
    }

    /// Create a new config with a wall-clock budget.
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    /// Create a new config with a custom greedy playout probability.
    pub fn with_greedy_probability(mut self, p: f64) -> Self {
        self.greedy_probability = p;
        self
    }

    /// Create a new config with a custom playout ply cap.
    pub fn with_playout_limit(mut self, plies: u32) -> Self {
        self.playout_ply_limit = plies;
        self
    }
}
