//! Engine-vs-engine games.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{GameState, Side};
use crate::rules::GameResult;
use crate::search::SearchEngine;

/// How an engine-vs-engine game went.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Winner, or kazan adjudication if the ply cap was hit first.
    pub result: GameResult,

    /// Plies played.
    pub plies: u32,

    /// Pits sown, in order.
    pub moves: Vec<usize>,

    /// Whether the game reached a terminal position on its own.
    pub completed: bool,

    pub final_state: GameState,
}

/// Play `white` against `black` from the opening position.
///
/// Stops at a terminal position, after `max_plies`, or if an engine
/// returns no move.
pub fn play_match(
    white: &mut dyn SearchEngine,
    black: &mut dyn SearchEngine,
    max_plies: u32,
) -> MatchSummary {
    play_match_from(GameState::new(), white, black, max_plies)
}

/// Play `white` against `black` starting from `state`.
pub fn play_match_from(
    mut state: GameState,
    white: &mut dyn SearchEngine,
    black: &mut dyn SearchEngine,
    max_plies: u32,
) -> MatchSummary {
    let mut moves = Vec::new();

    while !state.is_terminal() && (moves.len() as u32) < max_plies {
        let side = state.to_move;
        let engine: &mut dyn SearchEngine = match side {
            Side::White => &mut *white,
            Side::Black => &mut *black,
        };

        let Some(pit) = engine.best_move(&state, side).best_move else {
            debug!(engine = engine.name(), %side, "engine returned no move");
            break;
        };
        if state.apply_move(pit).is_err() {
            debug!(engine = engine.name(), %side, pit, "engine returned an illegal move");
            break;
        }
        moves.push(pit);
    }

    let completed = state.is_terminal();
    let result = state.winner().unwrap_or_else(|| state.adjudicate());
    info!(
        %result,
        white = white.name(),
        black = black.name(),
        plies = moves.len(),
        completed,
        "match finished"
    );

    MatchSummary {
        result,
        plies: moves.len() as u32,
        moves,
        completed,
        final_state: state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SideMap, TOTAL_STONES};
    use crate::mcts::{MCTSConfig, MCTSSearch};
    use crate::minimax::{MinimaxConfig, MinimaxSearch};

    fn minimax(depth: u32) -> MinimaxSearch {
        MinimaxSearch::new(MinimaxConfig::default().with_depth(depth))
    }

    #[test]
    fn test_minimax_match_finishes() {
        let summary = play_match(&mut minimax(2), &mut minimax(1), 1_000);

        assert_eq!(summary.completed, summary.final_state.is_terminal());
        assert!(summary.completed || summary.plies == 1_000);
        assert_eq!(summary.final_state.total_stones(), TOTAL_STONES);
        assert_eq!(summary.moves.len() as u32, summary.plies);
        if summary.completed {
            assert_eq!(Some(summary.result), summary.final_state.winner());
        }
    }

    #[test]
    fn test_ply_cap_adjudicates() {
        let summary = play_match(&mut minimax(1), &mut minimax(1), 4);

        assert_eq!(summary.plies, 4);
        assert!(!summary.completed);
        assert_eq!(summary.result, summary.final_state.adjudicate());
    }

    #[test]
    fn test_mcts_vs_minimax() {
        let mut mcts = MCTSSearch::new(MCTSConfig::default().with_simulations(100));
        let summary = play_match(&mut mcts, &mut minimax(1), 10);

        assert!(summary.plies == 10 || summary.completed);
        assert_eq!(summary.final_state.total_stones(), TOTAL_STONES);
    }

    #[test]
    fn test_terminal_start_plays_nothing() {
        let state = GameState::from_rows([0; 9], [2; 9], SideMap::from_pair(60, 84), Side::White);
        let summary = play_match_from(state, &mut minimax(2), &mut minimax(2), 100);

        assert_eq!(summary.plies, 0);
        assert!(summary.completed);
        assert_eq!(summary.result, GameResult::Winner(Side::Black));
    }

    #[test]
    fn test_deterministic_matches() {
        let a = play_match(&mut minimax(2), &mut minimax(2), 60);
        let b = play_match(&mut minimax(2), &mut minimax(2), 60);
        assert_eq!(a, b);
    }
}
