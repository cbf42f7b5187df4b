//! Depth-limited alpha-beta search.
//!
//! Scores are always from the perspective of the side the search was asked
//! to move for: nodes where that side is to move maximize, the others
//! minimize. Leaves and terminal positions take the static evaluation.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{GameState, Side};
use crate::eval::{Evaluator, HeuristicEvaluator};
use crate::search::{SearchDiagnostics, SearchEngine, SearchResult};

use super::config::MinimaxConfig;
use super::ordering::ordered_moves;

/// Statistics collected during one minimax search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MinimaxStats {
    /// Positions visited, root included.
    pub nodes_evaluated: u64,

    /// Alpha-beta cutoffs taken.
    pub cutoffs: u64,

    /// Root moves searched to completion.
    pub root_moves_searched: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl MinimaxStats {
    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Alpha-beta minimax search context.
pub struct MinimaxSearch {
    config: MinimaxConfig,
    evaluator: Box<dyn Evaluator>,
    stats: MinimaxStats,
}

impl MinimaxSearch {
    /// Create a search using the standard heuristic evaluator.
    pub fn new(config: MinimaxConfig) -> Self {
        Self {
            config,
            evaluator: Box::new(HeuristicEvaluator::default()),
            stats: MinimaxStats::default(),
        }
    }

    /// Set a custom evaluator.
    pub fn with_evaluator<V: Evaluator + 'static>(mut self, evaluator: V) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Search `state` and return the best move for `perspective`.
    ///
    /// Ties between root moves keep the first one in search order, so a
    /// fixed state and depth always produce the same answer.
    pub fn search(&mut self, state: &GameState, perspective: Side) -> SearchResult {
        let start = Instant::now();
        self.stats.reset();

        let deadline = (self.config.time_budget_ms > 0)
            .then(|| start + Duration::from_millis(self.config.time_budget_ms));

        self.stats.nodes_evaluated += 1;
        if state.is_terminal() {
            let score = self.evaluator.score(state, perspective);
            return SearchResult::no_move(score, self.diagnostics(start));
        }

        // Depth 0 scores the root as it stands and plays the first ordered move.
        if self.config.depth == 0 {
            let score = self.evaluator.score(state, perspective);
            return SearchResult {
                best_move: ordered_moves(state).first().copied(),
                score,
                diagnostics: self.diagnostics(start),
            };
        }

        let maximizing = state.to_move == perspective;
        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut best_move = None;
        let mut best_score = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };

        for pit in ordered_moves(state) {
            if best_move.is_some() && deadline.is_some_and(|d| Instant::now() >= d) {
                debug!(searched = self.stats.root_moves_searched, "minimax deadline reached");
                break;
            }

            let Ok((child, _)) = state.after_move(pit) else {
                continue;
            };
            let score = self.alphabeta(&child, self.config.depth - 1, alpha, beta, perspective);
            self.stats.root_moves_searched += 1;
            trace!(pit, score, "root move");

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(pit);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(pit);
                }
                beta = beta.min(score);
            }
        }

        let diagnostics = self.diagnostics(start);
        debug!(
            nodes = diagnostics.nodes_evaluated,
            best_move = ?best_move,
            score = best_score,
            depth = self.config.depth,
            "minimax search finished"
        );

        SearchResult {
            best_move,
            score: best_score,
            diagnostics,
        }
    }

    fn alphabeta(
        &mut self,
        state: &GameState,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        perspective: Side,
    ) -> f64 {
        self.stats.nodes_evaluated += 1;

        if depth == 0 || state.is_terminal() {
            return self.evaluator.score(state, perspective);
        }

        let moves = ordered_moves(state);
        if moves.is_empty() {
            return self.evaluator.score(state, perspective);
        }

        if state.to_move == perspective {
            let mut best = f64::NEG_INFINITY;
            for pit in moves {
                let Ok((child, _)) = state.after_move(pit) else {
                    continue;
                };
                let score = self.alphabeta(&child, depth - 1, alpha, beta, perspective);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for pit in moves {
                let Ok((child, _)) = state.after_move(pit) else {
                    continue;
                };
                let score = self.alphabeta(&child, depth - 1, alpha, beta, perspective);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }

    fn diagnostics(&mut self, start: Instant) -> SearchDiagnostics {
        self.stats.time_us = start.elapsed().as_micros() as u64;
        SearchDiagnostics {
            nodes_evaluated: self.stats.nodes_evaluated,
            simulations: 0,
            elapsed_us: self.stats.time_us,
        }
    }

    /// Get statistics from the last search.
    #[must_use]
    pub fn stats(&self) -> &MinimaxStats {
        &self.stats
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }
}

impl SearchEngine for MinimaxSearch {
    fn best_move(&mut self, state: &GameState, side: Side) -> SearchResult {
        self.search(state, side)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}
