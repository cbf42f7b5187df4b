//! Static position evaluation for minimax.
//!
//! Evaluators are trait-based so the search can be handed a different
//! scorer; [`HeuristicEvaluator`] is the standard one.

pub mod heuristic;

pub use heuristic::{EvalWeights, HeuristicEvaluator};

use crate::core::{GameState, Side};

/// Scores a position from one side's point of view. Higher is better for
/// `perspective`. Must be deterministic and total over legal states.
pub trait Evaluator: Send + Sync {
    fn score(&self, state: &GameState, perspective: Side) -> f64;
}
