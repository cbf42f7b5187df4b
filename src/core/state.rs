//! Canonical game state.
//!
//! ## Layout
//!
//! Each side owns a row of nine pits, indexed 0..8 in sowing order, and a
//! kazan (store) holding captured stones. A side may own one tuzdyk: an
//! index into the *opponent's* row whose stones are routed to the owner's
//! kazan.
//!
//! `GameState` is `Copy`. Search code copies it per branch, so no board
//! data is ever shared between branches.

use serde::{Deserialize, Serialize};

use super::side::{Side, SideMap};

/// Pits in each side's row.
pub const PITS_PER_SIDE: usize = 9;

/// Stones placed in every pit at the start of a game.
pub const INITIAL_STONES_PER_PIT: u8 = 9;

/// Stones in play for the whole game.
pub const TOTAL_STONES: u32 = 162;

/// Kazan count that wins the game outright.
pub const WIN_THRESHOLD: u8 = 82;

/// The last pit of a row; a tuzdyk may never be claimed here.
pub const LAST_PIT: usize = PITS_PER_SIDE - 1;

/// One side's row of pits.
pub type Row = [u8; PITS_PER_SIDE];

/// Complete game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Stones in each pit, per side.
    pub pits: SideMap<Row>,

    /// Captured stones, per side.
    pub kazan: SideMap<u8>,

    /// Tuzdyk owned by each side, as an index into the opponent's row.
    pub tuzdyk: SideMap<Option<usize>>,

    /// Side whose turn it is.
    pub to_move: Side,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Starting position: nine stones per pit, empty kazans, White to move.
    #[must_use]
    pub fn new() -> Self {
        Self::with_first_player(Side::White)
    }

    /// Starting position with a chosen first player.
    #[must_use]
    pub fn with_first_player(first: Side) -> Self {
        Self {
            pits: SideMap::with_value([INITIAL_STONES_PER_PIT; PITS_PER_SIDE]),
            kazan: SideMap::with_value(0),
            tuzdyk: SideMap::with_value(None),
            to_move: first,
        }
    }

    /// Build an arbitrary position. Used for puzzles and tests; the caller is
    /// responsible for keeping the stone total at 162 if it matters.
    #[must_use]
    pub fn from_rows(white: Row, black: Row, kazan: SideMap<u8>, to_move: Side) -> Self {
        Self {
            pits: SideMap::from_pair(white, black),
            kazan,
            tuzdyk: SideMap::with_value(None),
            to_move,
        }
    }

    /// Set a side's tuzdyk (builder style).
    #[must_use]
    pub fn with_tuzdyk(mut self, owner: Side, index: usize) -> Self {
        debug_assert!(index < LAST_PIT, "tuzdyk can never sit on the last pit");
        self.tuzdyk[owner] = Some(index);
        self
    }

    /// Stones in one side's row.
    #[must_use]
    pub fn row_sum(&self, side: Side) -> u32 {
        self.pits[side].iter().map(|&p| u32::from(p)).sum()
    }

    /// Stones still on the board (both rows).
    #[must_use]
    pub fn stones_on_board(&self) -> u32 {
        self.row_sum(Side::White) + self.row_sum(Side::Black)
    }

    /// Board stones plus both kazans. Always 162 for positions reached by play.
    #[must_use]
    pub fn total_stones(&self) -> u32 {
        self.stones_on_board()
            + u32::from(self.kazan[Side::White])
            + u32::from(self.kazan[Side::Black])
    }

    /// Kazan difference from `side`'s point of view.
    #[must_use]
    pub fn kazan_lead(&self, side: Side) -> i32 {
        i32::from(self.kazan[side]) - i32::from(self.kazan[side.opponent()])
    }

    /// The side owning a tuzdyk on `(row, pit)`, if any.
    ///
    /// A tuzdyk on `row` belongs to the opponent of `row`'s owner.
    #[inline]
    #[must_use]
    pub fn tuzdyk_owner(&self, row: Side, pit: usize) -> Option<Side> {
        let owner = row.opponent();
        (self.tuzdyk[owner] == Some(pit)).then_some(owner)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = |side: Side| match self.tuzdyk[side] {
            Some(i) => format!("{}", i + 1),
            None => "-".to_string(),
        };

        // Black's row is printed right-to-left so the board reads as a loop.
        writeln!(f, "Black kazan {:>3}  tuzdyk {}", self.kazan[Side::Black], mark(Side::Black))?;
        for (i, pit) in self.pits[Side::Black].iter().enumerate().rev() {
            let flag = if self.tuzdyk_owner(Side::Black, i).is_some() { '*' } else { ' ' };
            write!(f, "{pit:>4}{flag}")?;
        }
        writeln!(f)?;
        for (i, pit) in self.pits[Side::White].iter().enumerate() {
            let flag = if self.tuzdyk_owner(Side::White, i).is_some() { '*' } else { ' ' };
            write!(f, "{pit:>4}{flag}")?;
        }
        writeln!(f)?;
        write!(f, "White kazan {:>3}  tuzdyk {}", self.kazan[Side::White], mark(Side::White))?;
        write!(f, "  ({} to move)", self.to_move)
    }
}
