//! Move generation, sowing, captures and game termination.
//!
//! ## Sowing
//!
//! The 18 slots form a loop: the mover's row 0..8, then the opponent's row
//! 0..8, then back. A move empties one pit and drops its stones one per
//! slot along that loop. A multi-stone pit re-seeds itself with its first
//! stone; a single stone simply advances one slot.
//!
//! Any stone dropped on a tuzdyk goes straight to the tuzdyk owner's kazan.
//!
//! ## Landing
//!
//! Only the final slot is inspected. On the opponent's row a count of
//! exactly 3 claims a tuzdyk when the rules allow it, otherwise an even
//! count is captured.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    GameError, GameState, Result, Side, SideMap, LAST_PIT, PITS_PER_SIDE, WIN_THRESHOLD,
};

/// Legal pit indices for one side, in ascending order.
pub type MoveList = SmallVec<[usize; PITS_PER_SIDE]>;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Side),
    /// Equal kazans on an empty-row finish.
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }

    /// Playout reward from `side`'s point of view: 1 win, 0.5 draw, 0 loss.
    #[must_use]
    pub fn reward_for(&self, side: Side) -> f64 {
        match self {
            GameResult::Winner(s) if *s == side => 1.0,
            GameResult::Winner(_) => 0.0,
            GameResult::Draw => 0.5,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(side) => write!(f, "{side} wins"),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}

/// A position on the 18-slot sowing loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Row the slot belongs to.
    pub side: Side,
    /// Pit index within the row.
    pub pit: usize,
}

impl Slot {
    #[must_use]
    pub const fn new(side: Side, pit: usize) -> Self {
        Self { side, pit }
    }

    /// The next slot in sowing order; wraps onto the other row after pit 8.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        if self.pit == LAST_PIT {
            Self::new(self.side.opponent(), 0)
        } else {
            Self::new(self.side, self.pit + 1)
        }
    }
}

/// What a single move did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Side that moved.
    pub side: Side,
    /// Source pit.
    pub pit: usize,
    /// Stones lifted from the source pit.
    pub stones: u8,
    /// Slot that received the last stone.
    pub landing: Slot,
    /// Stones that fell on a tuzdyk, keyed by the kazan that received them.
    pub routed: SideMap<u8>,
    /// Stones captured from the landing pit (including a tuzdyk claim).
    pub captured: u8,
    /// Opponent pit claimed as a tuzdyk by this move.
    pub tuzdyk_created: Option<usize>,
}

impl MoveOutcome {
    fn new(side: Side, pit: usize, stones: u8) -> Self {
        Self {
            side,
            pit,
            stones,
            landing: Slot::new(side, pit),
            routed: SideMap::with_value(0),
            captured: 0,
            tuzdyk_created: None,
        }
    }

    /// Stones the mover's kazan gained from this move.
    #[must_use]
    pub fn kazan_gain(&self) -> u32 {
        u32::from(self.routed[self.side]) + u32::from(self.captured)
    }

    /// True for an even capture (a tuzdyk claim is not counted here).
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured > 0 && self.tuzdyk_created.is_none()
    }
}

impl GameState {
    /// Pits `side` may sow from: every non-empty pit, ascending.
    #[must_use]
    pub fn legal_moves(&self, side: Side) -> MoveList {
        self.pits[side]
            .iter()
            .enumerate()
            .filter(|(_, &stones)| stones > 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether `side` has at least one stone to sow.
    #[must_use]
    pub fn has_moves(&self, side: Side) -> bool {
        self.pits[side].iter().any(|&p| p > 0)
    }

    /// Whether `side` may claim opponent pit `target` as a tuzdyk.
    ///
    /// Refused when `side` already owns one, when `target` is the last pit,
    /// or when the opponent's tuzdyk already uses the same index.
    #[must_use]
    pub fn can_create_tuzdyk(&self, side: Side, target: usize) -> bool {
        self.tuzdyk[side].is_none()
            && target < LAST_PIT
            && self.tuzdyk[side.opponent()] != Some(target)
    }

    /// Sow from `pit` for `side`, rejecting the move if it is not `side`'s turn.
    pub fn apply_move_for(&mut self, side: Side, pit: usize) -> Result<MoveOutcome> {
        if side != self.to_move {
            return Err(GameError::NotYourTurn { side });
        }
        self.apply_move(pit)
    }

    /// Sow from `pit` of the side to move.
    ///
    /// On error the state is left untouched. On success the turn always
    /// passes to the other side.
    pub fn apply_move(&mut self, pit: usize) -> Result<MoveOutcome> {
        if pit >= PITS_PER_SIDE {
            return Err(GameError::InvalidPit { pit });
        }
        let mover = self.to_move;
        let stones = self.pits[mover][pit];
        if stones == 0 {
            return Err(GameError::EmptyPit { side: mover, pit });
        }

        #[cfg(debug_assertions)]
        let total_before = self.total_stones();

        let mut outcome = MoveOutcome::new(mover, pit, stones);
        self.pits[mover][pit] = 0;

        let mut slot = Slot::new(mover, pit);
        if stones == 1 {
            slot = slot.next();
            self.drop_stone(slot, &mut outcome);
        } else {
            // The source pit is the mover's own and was non-empty, so it is never a tuzdyk.
            self.pits[mover][pit] += 1;
            for _ in 1..stones {
                slot = slot.next();
                self.drop_stone(slot, &mut outcome);
            }
        }

        outcome.landing = slot;
        self.resolve_landing(slot, &mut outcome);
        self.to_move = mover.opponent();

        #[cfg(debug_assertions)]
        debug_assert_eq!(total_before, self.total_stones(), "stone count changed during a move");

        Ok(outcome)
    }

    /// Copy the state, apply `pit` to the copy and return it.
    pub fn after_move(&self, pit: usize) -> Result<(GameState, MoveOutcome)> {
        let mut next = *self;
        let outcome = next.apply_move(pit)?;
        Ok((next, outcome))
    }

    fn drop_stone(&mut self, slot: Slot, outcome: &mut MoveOutcome) {
        match self.tuzdyk_owner(slot.side, slot.pit) {
            Some(owner) => {
                self.kazan[owner] += 1;
                outcome.routed[owner] += 1;
            }
            None => self.pits[slot.side][slot.pit] += 1,
        }
    }

    fn resolve_landing(&mut self, landing: Slot, outcome: &mut MoveOutcome) {
        let mover = outcome.side;
        let opponent = mover.opponent();

        if landing.side != opponent || self.tuzdyk[opponent] == Some(landing.pit) {
            return;
        }

        let count = self.pits[opponent][landing.pit];
        if count == 3 && self.can_create_tuzdyk(mover, landing.pit) {
            self.tuzdyk[mover] = Some(landing.pit);
            outcome.tuzdyk_created = Some(landing.pit);
        } else if count == 0 || count % 2 != 0 {
            return;
        }

        self.pits[opponent][landing.pit] = 0;
        self.kazan[mover] += count;
        outcome.captured = count;
    }

    /// The game is over once a kazan reaches 82 or either row is empty.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        Side::ALL.iter().any(|&s| self.kazan[s] >= WIN_THRESHOLD || !self.has_moves(s))
    }

    /// Final result, or `None` while the game continues.
    #[must_use]
    pub fn winner(&self) -> Option<GameResult> {
        for side in Side::ALL {
            if self.kazan[side] >= WIN_THRESHOLD {
                return Some(GameResult::Winner(side));
            }
        }
        if self.is_terminal() {
            Some(self.adjudicate())
        } else {
            None
        }
    }

    /// Higher kazan wins, equal kazans draw. Applies to any position.
    #[must_use]
    pub fn adjudicate(&self) -> GameResult {
        let white = self.kazan[Side::White];
        let black = self.kazan[Side::Black];
        match white.cmp(&black) {
            std::cmp::Ordering::Greater => GameResult::Winner(Side::White),
            std::cmp::Ordering::Less => GameResult::Winner(Side::Black),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }
}
