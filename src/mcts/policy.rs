//! MCTS policies for selection and playouts.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into (UCT)
//! - `PlayoutPolicy`: How to finish a game from a leaf (greedy, random)

use crate::core::{GameRng, GameState};
use crate::rules::GameResult;

use super::config::MCTSConfig;
use super::node::{MCTSNode, NodeId};
use super::tree::MCTSTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select a child of `parent`, or `None` if it has no children.
    fn select(&self, tree: &MCTSTree, parent: &MCTSNode, config: &MCTSConfig) -> Option<NodeId>;
}

/// UCT (UCB1 applied to trees) selection policy.
///
/// Formula: w/n + c * sqrt(ln(N) / n), with unvisited children first.
/// Ties keep the earliest child.
#[derive(Clone, Debug, Default)]
pub struct UCT;

impl SelectionPolicy for UCT {
    fn select(&self, tree: &MCTSTree, parent: &MCTSNode, config: &MCTSConfig) -> Option<NodeId> {
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;

        for &child in &parent.children {
            let score = tree
                .get(child)
                .uct(parent.visits, config.exploration_constant);
            if best.is_none() || score > best_score {
                best = Some(child);
                best_score = score;
            }
        }
        best
    }
}

// =============================================================================
// Playout Policy
// =============================================================================

/// Policy for finishing a game from a leaf position.
pub trait PlayoutPolicy: Send + Sync {
    /// Play from `state` until the game ends or the ply cap is hit.
    fn playout(&self, state: GameState, rng: &mut GameRng) -> GameResult;
}

/// Uniformly random playouts.
#[derive(Clone, Debug)]
pub struct RandomPlayout {
    /// Plies before the game is adjudicated by kazan count.
    pub ply_limit: u32,
}

impl Default for RandomPlayout {
    fn default() -> Self {
        Self { ply_limit: 200 }
    }
}

impl PlayoutPolicy for RandomPlayout {
    fn playout(&self, mut state: GameState, rng: &mut GameRng) -> GameResult {
        for _ in 0..self.ply_limit {
            if let Some(result) = state.winner() {
                return result;
            }
            let moves = state.legal_moves(state.to_move);
            let Some(&pit) = rng.choose(&moves) else {
                break;
            };
            if state.apply_move(pit).is_err() {
                break;
            }
        }
        finish(&state)
    }
}

/// Playouts biased toward immediate kazan gain.
///
/// Each ply takes the move with the largest kazan gain (plus a small random
/// jitter) with probability `greedy_probability`, otherwise a uniform move.
#[derive(Clone, Debug)]
pub struct GreedyPlayout {
    /// Probability of a greedy ply.
    pub greedy_probability: f64,

    /// Upper bound of the jitter added to each candidate's gain.
    pub tie_jitter: f64,

    /// Plies before the game is adjudicated by kazan count.
    pub ply_limit: u32,
}

impl Default for GreedyPlayout {
    fn default() -> Self {
        Self::from_config(&MCTSConfig::default())
    }
}

impl GreedyPlayout {
    /// Build a playout policy from the search configuration.
    pub fn from_config(config: &MCTSConfig) -> Self {
        Self {
            greedy_probability: config.greedy_probability,
            tie_jitter: config.tie_jitter,
            ply_limit: config.playout_ply_limit,
        }
    }

    /// Position after the highest-gain move among `moves`.
    fn greedy_step(
        &self,
        state: &GameState,
        moves: &[usize],
        rng: &mut GameRng,
    ) -> Option<GameState> {
        let mut best = None;
        let mut best_gain = f64::NEG_INFINITY;

        for &pit in moves {
            let Ok((next, outcome)) = state.after_move(pit) else {
                continue;
            };
            let gain = f64::from(outcome.kazan_gain()) + rng.gen_f64() * self.tie_jitter;
            if gain > best_gain {
                best_gain = gain;
                best = Some(next);
            }
        }
        best
    }
}

impl PlayoutPolicy for GreedyPlayout {
    fn playout(&self, mut state: GameState, rng: &mut GameRng) -> GameResult {
        for _ in 0..self.ply_limit {
            if let Some(result) = state.winner() {
                return result;
            }
            let moves = state.legal_moves(state.to_move);
            if moves.is_empty() {
                break;
            }

            if rng.gen_bool(self.greedy_probability) {
                match self.greedy_step(&state, &moves, rng) {
                    Some(next) => state = next,
                    None => break,
                }
            } else {
                let pit = moves[rng.gen_range_usize(0..moves.len())];
                if state.apply_move(pit).is_err() {
                    break;
                }
            }
        }
        finish(&state)
    }
}

/// Result of a finished or capped playout.
fn finish(state: &GameState) -> GameResult {
    state.winner().unwrap_or_else(|| state.adjudicate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Side, SideMap};

    fn tree_with_children(visits: &[(u32, f64)]) -> MCTSTree {
        let root_state = GameState::new();
        let mut tree = MCTSTree::new(root_state);
        for (pit, &(n, w)) in visits.iter().enumerate() {
            let (s, _) = root_state.after_move(pit).unwrap();
            let child = tree.add_child(tree.root(), pit, s);
            let node = tree.get_mut(child);
            node.visits = n;
            node.win_score = w;
        }
        tree.get_mut(tree.root()).visits = visits.iter().map(|v| v.0).sum();
        tree
    }

    #[test]
    fn test_uct_prefers_unvisited() {
        let tree = tree_with_children(&[(10, 9.0), (0, 0.0), (5, 1.0)]);
        let picked = UCT.select(&tree, tree.root_node(), &MCTSConfig::default());
        assert_eq!(picked.map(|id| tree.get(id).incoming_move), Some(Some(1)));
    }

    #[test]
    fn test_uct_ties_keep_first() {
        let tree = tree_with_children(&[(0, 0.0), (0, 0.0), (0, 0.0)]);
        let picked = UCT.select(&tree, tree.root_node(), &MCTSConfig::default()).unwrap();
        assert_eq!(tree.get(picked).incoming_move, Some(0));

        let tree = tree_with_children(&[(4, 2.0), (4, 2.0)]);
        let picked = UCT.select(&tree, tree.root_node(), &MCTSConfig::default()).unwrap();
        assert_eq!(tree.get(picked).incoming_move, Some(0));
    }

    #[test]
    fn test_uct_exploitation_without_exploration() {
        let tree = tree_with_children(&[(10, 2.0), (10, 8.0), (10, 5.0)]);
        let config = MCTSConfig::default().with_exploration(0.0);
        let picked = UCT.select(&tree, tree.root_node(), &config).unwrap();
        assert_eq!(tree.get(picked).incoming_move, Some(1));
    }

    #[test]
    fn test_uct_exploration_lifts_rare_child() {
        let tree = tree_with_children(&[(100, 60.0), (2, 1.0)]);
        let config = MCTSConfig::default().with_exploration(2.0);
        let picked = UCT.select(&tree, tree.root_node(), &config).unwrap();
        assert_eq!(tree.get(picked).incoming_move, Some(1));
    }

    #[test]
    fn test_uct_no_children() {
        let tree = MCTSTree::new(GameState::new());
        assert_eq!(UCT.select(&tree, tree.root_node(), &MCTSConfig::default()), None);
    }

    #[test]
    fn test_playout_on_terminal_state() {
        let state = GameState::from_rows([0; 9], [2; 9], SideMap::from_pair(60, 84), Side::White);
        let mut rng = GameRng::new(1);

        let black_wins = GameResult::Winner(Side::Black);
        assert_eq!(GreedyPlayout::default().playout(state, &mut rng), black_wins);
        assert_eq!(RandomPlayout::default().playout(state, &mut rng), black_wins);
    }

    #[test]
    fn test_zero_ply_limit_adjudicates() {
        let state = GameState::from_rows([9; 9], [9; 9], SideMap::from_pair(0, 0), Side::White);
        let policy = RandomPlayout { ply_limit: 0 };
        assert_eq!(policy.playout(state, &mut GameRng::new(3)), GameResult::Draw);
    }

    #[test]
    fn test_playouts_finish() {
        let mut rng = GameRng::new(7);
        for _ in 0..20 {
            let mut fork = rng.fork();
            let result = GreedyPlayout::default().playout(GameState::new(), &mut fork);
            assert!(matches!(result, GameResult::Winner(_) | GameResult::Draw));
        }
    }

    #[test]
    fn test_fully_greedy_takes_winning_capture() {
        // Pit 8 captures 6 and crosses 82; every other move gains nothing.
        let state = GameState::from_rows(
            [0, 0, 0, 0, 2, 0, 0, 0, 1],
            [5, 1, 1, 1, 1, 1, 1, 1, 1],
            SideMap::from_pair(76, 70),
            Side::White,
        );
        let policy = GreedyPlayout {
            greedy_probability: 1.0,
            tie_jitter: 0.1,
            ply_limit: 200,
        };
        let result = policy.playout(state, &mut GameRng::new(11));
        assert_eq!(result, GameResult::Winner(Side::White));
    }

    #[test]
    fn test_playout_seeded_determinism() {
        let a = GreedyPlayout::default().playout(GameState::new(), &mut GameRng::new(99));
        let b = GreedyPlayout::default().playout(GameState::new(), &mut GameRng::new(99));
        assert_eq!(a, b);
    }
}
