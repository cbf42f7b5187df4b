//! Static move ordering for alpha-beta.
//!
//! Each candidate is played on a copy of the state and ranked by what it
//! immediately wins: tuzdyk claims first, then captures by size, then
//! quiet moves. Stones routed through the mover's own tuzdyk add a little.

use std::cmp::Reverse;

use smallvec::SmallVec;

use crate::core::{GameState, PITS_PER_SIDE};
use crate::rules::MoveList;

/// Priority of a move that claims a tuzdyk.
pub const TUZDYK_PRIORITY: i32 = 1000;

/// Priority per captured stone.
pub const CAPTURE_WEIGHT: i32 = 2;

/// Priority per stone routed into the mover's kazan through its tuzdyk.
pub const ROUTED_WEIGHT: i32 = 2;

/// Cheap priority of sowing `pit` for the side to move. Higher is searched first.
#[must_use]
pub fn move_priority(state: &GameState, pit: usize) -> i32 {
    let Ok((_, outcome)) = state.after_move(pit) else {
        return i32::MIN;
    };

    let mut priority = i32::from(outcome.routed[outcome.side]) * ROUTED_WEIGHT;
    if outcome.tuzdyk_created.is_some() {
        priority += TUZDYK_PRIORITY;
    } else {
        priority += i32::from(outcome.captured) * CAPTURE_WEIGHT;
    }
    priority
}

/// Legal moves for the side to move, best-looking first.
///
/// The sort is stable: equal priorities keep ascending pit order.
#[must_use]
pub fn ordered_moves(state: &GameState) -> MoveList {
    let mut scored: SmallVec<[(usize, i32); PITS_PER_SIDE]> = state
        .legal_moves(state.to_move)
        .into_iter()
        .map(|pit| (pit, move_priority(state, pit)))
        .collect();

    scored.sort_by_key(|&(_, priority)| Reverse(priority));
    scored.into_iter().map(|(pit, _)| pit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Side, SideMap};

    #[test]
    fn test_equal_priorities_keep_pit_order() {
        // From the start every pit but 0 ends on a Black pit of 10 and captures it.
        let moves = ordered_moves(&GameState::new());
        assert_eq!(moves.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
    }

    #[test]
    fn test_tuzdyk_outranks_big_capture() {
        // Pit 6 (9 stones) lands on Black pit 5 holding 2 -> tuzdyk.
        // Pit 8 (1 stone) lands on Black pit 0 holding 49 -> capture 50.
        let state = GameState::from_rows(
            [0, 0, 0, 0, 0, 0, 9, 0, 1],
            [49, 1, 1, 1, 1, 2, 1, 1, 1],
            SideMap::from_pair(0, 0),
            Side::White,
        );

        assert_eq!(move_priority(&state, 6), TUZDYK_PRIORITY);
        assert_eq!(move_priority(&state, 8), 50 * CAPTURE_WEIGHT);
        assert_eq!(ordered_moves(&state).as_slice(), &[6, 8]);
    }

    #[test]
    fn test_capture_outranks_quiet() {
        let state = GameState::from_rows(
            [0, 0, 2, 0, 0, 0, 0, 0, 1],
            [3, 1, 1, 1, 1, 1, 1, 1, 1],
            SideMap::from_pair(0, 0),
            Side::White,
        );

        assert_eq!(move_priority(&state, 2), 0);
        assert_eq!(move_priority(&state, 8), 4 * CAPTURE_WEIGHT);
        assert_eq!(ordered_moves(&state).as_slice(), &[8, 2]);
    }

    #[test]
    fn test_routed_stones_add_priority() {
        let state = GameState::from_rows(
            [0, 0, 0, 0, 0, 0, 0, 4, 0],
            [1, 0, 2, 1, 1, 1, 1, 1, 1],
            SideMap::from_pair(0, 0),
            Side::White,
        )
        .with_tuzdyk(Side::White, 1);

        // 7, 8, B0, B1 (routed): lands on the tuzdyk itself.
        assert_eq!(move_priority(&state, 7), ROUTED_WEIGHT);
    }

    #[test]
    fn test_illegal_move_sorts_last() {
        assert_eq!(move_priority(&GameState::new(), 9), i32::MIN);
    }
}
