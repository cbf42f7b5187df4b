//! The session that owns the live game.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, info};

use crate::core::{GameError, GameState, Result, Side};
use crate::rules::{GameResult, MoveList, MoveOutcome};
use crate::search::{SearchEngine, SearchResult};

/// A game in progress.
///
/// The session's [`GameState`] is the single source of truth. Searches
/// only ever see copies of it; their answers come back through
/// [`GameSession::apply_search`] and are validated like any human move.
#[derive(Clone, Debug, Default)]
pub struct GameSession {
    state: GameState,
    history: Vec<MoveOutcome>,
}

impl GameSession {
    /// Start from the standard opening position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from an arbitrary position.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn to_move(&self) -> Side {
        self.state.to_move
    }

    /// Legal pits for the side to move; empty once the game is over.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        if self.is_over() {
            MoveList::new()
        } else {
            self.state.legal_moves(self.state.to_move)
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Final result, or `None` while the game continues.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.state.winner()
    }

    /// The most recent move, if any.
    #[must_use]
    pub fn last_move(&self) -> Option<&MoveOutcome> {
        self.history.last()
    }

    /// Every move played in this session, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveOutcome] {
        &self.history
    }

    #[must_use]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Play `pit` for `side`.
    ///
    /// Rejected moves leave the session untouched.
    pub fn apply_move(&mut self, side: Side, pit: usize) -> Result<MoveOutcome> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let outcome = self.state.apply_move_for(side, pit)?;
        self.history.push(outcome);
        debug!(%side, pit, gain = outcome.kazan_gain(), "move applied");

        if let Some(result) = self.result() {
            info!(
                %result,
                white = self.state.kazan[Side::White],
                black = self.state.kazan[Side::Black],
                plies = self.history.len(),
                "game over"
            );
        }
        Ok(outcome)
    }

    /// Start a search for `side` on a background thread.
    ///
    /// The engine is moved into the worker and handed back with the result,
    /// so the caller can reuse it for the next turn.
    pub fn request_ai_move<E>(&self, mut engine: E, side: Side) -> PendingSearch<E>
    where
        E: SearchEngine + 'static,
    {
        let state = self.state;
        let (sender, receiver) = mpsc::channel();
        debug!(engine = engine.name(), %side, "search requested");

        thread::spawn(move || {
            let result = engine.best_move(&state, side);
            // The receiver may have been dropped; the result is simply discarded.
            let _ = sender.send((engine, result));
        });

        PendingSearch { receiver, side }
    }

    /// Play the move a search returned for `side`.
    pub fn apply_search(&mut self, side: Side, result: &SearchResult) -> Result<MoveOutcome> {
        match result.best_move {
            Some(pit) => self.apply_move(side, pit),
            None if self.is_over() => Err(GameError::GameOver),
            None => Err(GameError::SearchFailed),
        }
    }
}

/// A search running on a background thread.
pub struct PendingSearch<E> {
    receiver: Receiver<(E, SearchResult)>,
    side: Side,
}

impl<E> PendingSearch<E> {
    /// Side the search is choosing a move for.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Non-blocking poll. `None` while the search is still running.
    pub fn try_finish(&self) -> Option<Result<(E, SearchResult)>> {
        match self.receiver.try_recv() {
            Ok(done) => Some(Ok(done)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(GameError::SearchFailed)),
        }
    }

    /// Block until the search finishes.
    pub fn wait(self) -> Result<(E, SearchResult)> {
        self.receiver.recv().map_err(|_| GameError::SearchFailed)
    }
}
