//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during MCTS search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Playouts performed.
    pub simulations: u32,

    /// Nodes expanded (added to tree).
    pub nodes_expanded: u32,

    /// Maximum tree depth reached during search.
    pub max_depth: u16,

    /// Whether the wall-clock budget ended the search.
    pub hit_deadline: bool,

    /// Whether the node cap ended the search.
    pub hit_node_limit: bool,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate simulations per second.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Calculate average nodes added per playout.
    #[must_use]
    pub fn avg_nodes_per_simulation(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / self.simulations as f64
        }
    }
}
