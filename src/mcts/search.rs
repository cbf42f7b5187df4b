//! Core MCTS search algorithm.
//!
//! Every node stores its own position. Playout rewards are always scored
//! for the side the search was started for, and every node on the path
//! accumulates that same reward, whichever side is to move there.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::core::{GameRng, GameState, Side};
use crate::minimax::ordered_moves;
use crate::search::{SearchDiagnostics, SearchEngine, SearchResult};

use super::config::MCTSConfig;
use super::node::NodeId;
use super::policy::{GreedyPlayout, PlayoutPolicy, SelectionPolicy, UCT};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Owns the search tree and configuration, and provides methods to run
/// searches. The tree is rebuilt from scratch for every search.
pub struct MCTSSearch {
    /// Search configuration.
    config: MCTSConfig,

    /// The search tree.
    tree: MCTSTree,

    /// RNG for expansion order and playouts.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Playout policy.
    playout: Box<dyn PlayoutPolicy>,

    /// Search statistics.
    stats: SearchStats,
}

impl MCTSSearch {
    /// Create a new MCTS search context.
    pub fn new(config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let playout = GreedyPlayout::from_config(&config);
        let capacity = (config.max_simulations as usize).saturating_add(1).min(config.max_nodes);

        Self {
            tree: MCTSTree::with_capacity(GameState::new(), capacity),
            config,
            rng,
            selection: Box::new(UCT),
            playout: Box::new(playout),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom playout policy.
    pub fn with_playout<P: PlayoutPolicy + 'static>(mut self, playout: P) -> Self {
        self.playout = Box::new(playout);
        self
    }

    /// Run MCTS from `state` and return the most visited root move.
    ///
    /// Stops after `max_simulations` playouts, when the time budget runs out
    /// (checked between playouts), or when the tree reaches `max_nodes`.
    /// A budget too small to expand any root move still answers with the
    /// first move in minimax ordering, scored 0.5.
    pub fn search(&mut self, state: &GameState, ai_side: Side) -> SearchResult {
        let start = Instant::now();
        self.stats.reset();
        self.tree.reset(*state);

        let root = self.tree.root();
        if self.tree.get(root).is_terminal {
            return SearchResult::no_move(0.0, self.diagnostics(start));
        }

        // Only one legal move: nothing to search.
        if self.tree.get(root).untried.len() == 1 {
            let pit = self.tree.get(root).untried[0];
            return SearchResult {
                best_move: Some(pit),
                score: 0.5,
                diagnostics: self.diagnostics(start),
            };
        }

        let deadline = (self.config.time_budget_ms > 0)
            .then(|| start + Duration::from_millis(self.config.time_budget_ms));

        while self.stats.simulations < self.config.max_simulations {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                self.stats.hit_deadline = true;
                break;
            }
            if self.tree.len() >= self.config.max_nodes {
                self.stats.hit_node_limit = true;
                break;
            }
            self.iteration(ai_side);
        }

        let (best_move, score) = match self.best_child() {
            Some(child) => {
                let node = self.tree.get(child);
                (node.incoming_move, node.win_rate())
            }
            None => (ordered_moves(state).first().copied(), 0.5),
        };

        let diagnostics = self.diagnostics(start);
        debug!(
            simulations = self.stats.simulations,
            nodes = self.tree.len(),
            best_move = ?best_move,
            win_rate = score,
            hit_deadline = self.stats.hit_deadline,
            "mcts search finished"
        );

        SearchResult {
            best_move,
            score,
            diagnostics,
        }
    }

    /// Single MCTS iteration: select, expand, play out, backpropagate.
    fn iteration(&mut self, ai_side: Side) {
        let mut current = self.tree.root();

        // === SELECTION ===
        loop {
            let node = self.tree.get(current);
            if node.is_terminal || node.has_untried() {
                break;
            }
            match self.selection.select(&self.tree, node, &self.config) {
                Some(child) => current = child,
                None => break,
            }
        }

        // === EXPANSION ===
        if self.tree.get(current).has_untried() {
            let count = self.tree.get(current).untried.len();
            let index = self.rng.gen_range_usize(0..count);
            let pit = self.tree.get_mut(current).untried.swap_remove(index);
            let parent_state = self.tree.get(current).state;

            if let Ok((child_state, _)) = parent_state.after_move(pit) {
                current = self.tree.add_child(current, pit, child_state);
                self.stats.nodes_expanded += 1;
                self.stats.max_depth = self.stats.max_depth.max(self.tree.get(current).depth);
            }
        }

        // === PLAYOUT ===
        let mut playout_rng = self.rng.fork();
        let result = self.playout.playout(self.tree.get(current).state, &mut playout_rng);
        self.stats.simulations += 1;
        let reward = result.reward_for(ai_side);
        trace!(node = %current, %result, reward, "playout");

        // === BACKPROPAGATION ===
        self.backpropagate(current, reward);
    }

    /// Add one visit and `reward` to `leaf` and every ancestor.
    fn backpropagate(&mut self, leaf: NodeId, reward: f64) {
        let mut id = leaf;
        while !id.is_none() {
            let node = self.tree.get_mut(id);
            node.visits += 1;
            node.win_score += reward;
            id = node.parent;
        }
    }

    /// Most visited root child. Ties keep the earliest expanded child.
    fn best_child(&self) -> Option<NodeId> {
        let mut best = None;
        let mut best_visits = 0;
        for &child in &self.tree.root_node().children {
            let visits = self.tree.get(child).visits;
            if best.is_none() || visits > best_visits {
                best = Some(child);
                best_visits = visits;
            }
        }
        best
    }

    fn diagnostics(&mut self, start: Instant) -> SearchDiagnostics {
        self.stats.time_us = start.elapsed().as_micros() as u64;
        SearchDiagnostics {
            nodes_evaluated: self.tree.len() as u64,
            simulations: self.stats.simulations,
            elapsed_us: self.stats.time_us,
        }
    }

    /// Visit counts of the root's children from the last search, as `(pit, visits)`.
    #[must_use]
    pub fn root_visits(&self) -> Vec<(usize, u32)> {
        self.tree
            .root_node()
            .children
            .iter()
            .filter_map(|&id| {
                let node = self.tree.get(id);
                node.incoming_move.map(|pit| (pit, node.visits))
            })
            .collect()
    }

    /// Get the search tree (for debugging/visualization).
    #[must_use]
    pub fn tree(&self) -> &MCTSTree {
        &self.tree
    }

    /// Get statistics from the last search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

impl SearchEngine for MCTSSearch {
    fn best_move(&mut self, state: &GameState, side: Side) -> SearchResult {
        self.search(state, side)
    }

    fn name(&self) -> &'static str {
        "mcts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SideMap;
    use crate::mcts::policy::RandomPlayout;
    use crate::rules::GameResult;

    /// Playout stub that reports the same result every time.
    struct FixedResult(GameResult);

    impl PlayoutPolicy for FixedResult {
        fn playout(&self, _state: GameState, _rng: &mut GameRng) -> GameResult {
            self.0
        }
    }

    fn mcts(simulations: u32, seed: u64) -> MCTSSearch {
        MCTSSearch::new(MCTSConfig::default().with_simulations(simulations).with_seed(seed))
    }

    #[test]
    fn test_runs_exact_simulation_count() {
        let mut search = mcts(200, 1);
        let result = search.search(&GameState::new(), Side::White);

        assert!(result.best_move.is_some());
        assert_eq!(search.stats().simulations, 200);
        assert_eq!(result.diagnostics.simulations, 200);
        assert_eq!(search.tree().root_node().visits, 200);
    }

    #[test]
    fn test_best_move_is_most_visited() {
        let mut search = mcts(300, 5);
        let result = search.search(&GameState::new(), Side::White);

        let visits = search.root_visits();
        let max = visits.iter().map(|&(_, v)| v).max().unwrap();
        let first_max = visits.iter().find(|&&(_, v)| v == max).unwrap().0;
        assert_eq!(result.best_move, Some(first_max));
        assert_eq!(visits.iter().map(|&(_, v)| v).sum::<u32>(), 300);
    }

    #[test]
    fn test_root_children_cover_all_moves() {
        let mut search = mcts(100, 3);
        search.search(&GameState::new(), Side::White);

        let mut pits: Vec<usize> = search.root_visits().iter().map(|&(p, _)| p).collect();
        pits.sort_unstable();
        assert_eq!(pits, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_search_is_deterministic() {
        let mut state = GameState::new();
        state.apply_move(6).unwrap();

        let a = mcts(250, 17).search(&state, Side::Black);
        let b = mcts(250, 17).search(&state, Side::Black);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_terminal_root() {
        let state = GameState::from_rows([0; 9], [2; 9], SideMap::from_pair(60, 84), Side::White);
        let mut search = mcts(100, 1);
        let result = search.search(&state, Side::White);

        assert_eq!(result.best_move, None);
        assert_eq!(search.stats().simulations, 0);
    }

    #[test]
    fn test_single_legal_move_returns_immediately() {
        let state = GameState::from_rows(
            [0, 0, 0, 0, 0, 3, 0, 0, 0],
            [1, 1, 1, 1, 1, 1, 1, 1, 1],
            SideMap::from_pair(70, 80),
            Side::White,
        );
        let mut search = mcts(1000, 1);
        let result = search.search(&state, Side::White);

        assert_eq!(result.best_move, Some(5));
        assert_eq!(search.stats().simulations, 0);
    }

    #[test]
    fn test_finds_winning_capture() {
        // Pit 8 captures 6 and reaches 82 on the spot.
        let state = GameState::from_rows(
            [0, 0, 0, 0, 2, 0, 0, 2, 1],
            [5, 1, 1, 1, 1, 1, 1, 1, 1],
            SideMap::from_pair(76, 68),
            Side::White,
        );
        let mut search = mcts(400, 2);
        let result = search.search(&state, Side::White);

        assert_eq!(result.best_move, Some(8));
        assert!(result.score > 0.9);
    }

    #[test]
    fn test_rewards_scored_for_ai_side() {
        // Black is to move but the search runs for White; the root win rate is White's.
        let state = GameState::from_rows(
            [1, 1, 1, 1, 1, 1, 1, 1, 1],
            [0, 0, 0, 0, 0, 0, 0, 1, 2],
            SideMap::from_pair(81, 69),
            Side::Black,
        );
        let mut search = mcts(200, 4);
        search.search(&state, Side::White);

        let root = search.tree().root_node();
        assert!(root.win_rate() > 0.5);
    }

    #[test]
    fn test_every_node_scores_for_ai_side() {
        let mut search = mcts(300, 6).with_playout(FixedResult(GameResult::Winner(Side::White)));
        search.search(&GameState::new(), Side::White);

        let mut black_to_move = 0;
        let mut deep = 0;
        for (_, node) in search.tree().iter().filter(|(_, n)| n.visits > 0) {
            assert_eq!(node.win_score, f64::from(node.visits), "depth {}", node.depth);
            if node.state.to_move == Side::Black {
                black_to_move += 1;
            }
            if node.depth >= 2 {
                deep += 1;
            }
        }
        assert!(black_to_move > 0);
        assert!(deep > 0);
    }

    #[test]
    fn test_opponent_wins_score_zero_everywhere() {
        let mut search = mcts(300, 6).with_playout(FixedResult(GameResult::Winner(Side::White)));
        search.search(&GameState::new(), Side::Black);

        assert!(search.tree().stats().max_depth >= 2);
        for (_, node) in search.tree().iter() {
            assert_eq!(node.win_score, 0.0, "depth {}", node.depth);
        }
    }

    #[test]
    fn test_zero_simulations_still_answers() {
        let mut search = mcts(0, 1);
        let result = search.search(&GameState::new(), Side::White);

        assert_eq!(result.best_move, Some(1));
        assert_eq!(result.score, 0.5);
        assert_eq!(search.stats().simulations, 0);
    }

    #[test]
    fn test_single_node_budget_still_answers() {
        let mut config = MCTSConfig::default().with_simulations(500);
        config.max_nodes = 1;
        let mut search = MCTSSearch::new(config);
        let result = search.search(&GameState::new(), Side::White);

        assert!(search.stats().hit_node_limit);
        assert_eq!(result.best_move, Some(1));
        assert_eq!(search.tree().len(), 1);
    }

    #[test]
    fn test_time_budget_stops_search() {
        let config = MCTSConfig::default()
            .with_simulations(u32::MAX)
            .with_time_budget_ms(30);
        let mut search = MCTSSearch::new(config);
        let result = search.search(&GameState::new(), Side::White);

        assert!(result.best_move.is_some());
        assert!(search.stats().hit_deadline);
        assert!(search.stats().simulations > 0);
    }

    #[test]
    fn test_node_limit_stops_search() {
        let mut config = MCTSConfig::default().with_simulations(10_000);
        config.max_nodes = 50;
        let mut search = MCTSSearch::new(config);
        search.search(&GameState::new(), Side::White);

        assert!(search.stats().hit_node_limit);
        assert_eq!(search.tree().len(), 50);
    }

    #[test]
    fn test_custom_playout_policy() {
        let mut search = mcts(100, 8).with_playout(RandomPlayout::default());
        let result = search.search(&GameState::new(), Side::White);
        assert!(result.best_move.is_some());
        assert_eq!(search.stats().simulations, 100);
    }

    #[test]
    fn test_tree_rebuilt_for_each_search() {
        let mut search = mcts(50, 1);
        search.search(&GameState::new(), Side::White);
        assert_eq!(search.tree().root_node().visits, 50);

        let mut state = GameState::new();
        state.apply_move(0).unwrap();
        search.search(&state, Side::Black);

        assert_eq!(search.tree().root_node().state, state);
        assert_eq!(search.tree().root_node().visits, 50);
    }
}
