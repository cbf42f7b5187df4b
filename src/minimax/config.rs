//! Minimax configuration parameters.

use serde::{Deserialize, Serialize};

/// Minimax configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimaxConfig {
    /// Search depth in plies. The difficulty tiers use 2, 4 and 6.
    pub depth: u32,

    /// Optional wall-clock budget in milliseconds (0 = none).
    /// Checked between root moves only, so alpha-beta results stay exact for
    /// every root move that was searched.
    pub time_budget_ms: u64,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            time_budget_ms: 0,
        }
    }
}

impl MinimaxConfig {
    /// Create a new config with custom depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Create a new config with a wall-clock budget.
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }
}
