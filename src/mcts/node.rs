//! MCTS node structure.
//!
//! Uses arena-based allocation with index references (NodeId) for efficiency
//! and serializability. A node owns its position, so every branch of the
//! tree works on its own copy of the game state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameState, PITS_PER_SIDE};
use crate::rules::MoveList;

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode {
    /// Position at this node.
    pub state: GameState,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Pit sown to reach this node from its parent (None for root).
    pub incoming_move: Option<usize>,

    /// Expanded children.
    pub children: SmallVec<[NodeId; PITS_PER_SIDE]>,

    /// Total visits to this node.
    pub visits: u32,

    /// Accumulated playout reward, always scored for the searching side.
    pub win_score: f64,

    /// Legal moves not yet expanded into children.
    pub untried: MoveList,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Is this a terminal game state?
    pub is_terminal: bool,
}

impl MCTSNode {
    /// Create a new node for `state`.
    pub fn new(state: GameState, parent: NodeId, incoming_move: Option<usize>, depth: u16) -> Self {
        let is_terminal = state.is_terminal();
        let untried = if is_terminal {
            MoveList::new()
        } else {
            state.legal_moves(state.to_move)
        };

        Self {
            state,
            parent,
            incoming_move,
            children: SmallVec::new(),
            visits: 0,
            win_score: 0.0,
            untried,
            depth,
            is_terminal,
        }
    }

    /// Create a root node.
    pub fn root(state: GameState) -> Self {
        Self::new(state, NodeId::NONE, None, 0)
    }

    /// Check if any legal moves are still unexpanded.
    #[must_use]
    pub fn has_untried(&self) -> bool {
        !self.untried.is_empty()
    }

    /// Check if every legal move has a child.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty() && !self.children.is_empty()
    }

    /// Mean reward, or 0 for an unvisited node.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.win_score / self.visits as f64
        }
    }

    /// UCT priority of this node under a parent with `parent_visits` visits.
    ///
    /// Unvisited nodes get infinite priority.
    #[must_use]
    pub fn uct(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let ln_parent = (parent_visits.max(1) as f64).ln();
        self.win_rate() + exploration * (ln_parent / self.visits as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Side, SideMap};

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.raw(), 5);
        assert!(!id.is_none());
        assert_eq!(format!("{}", id), "NodeId(5)");

        assert!(NodeId::NONE.is_none());
        assert_eq!(format!("{}", NodeId::NONE), "NodeId(NONE)");
    }

    #[test]
    fn test_node_root() {
        let node = MCTSNode::root(GameState::new());

        assert!(node.parent.is_none());
        assert_eq!(node.incoming_move, None);
        assert_eq!(node.depth, 0);
        assert_eq!(node.visits, 0);
        assert!(!node.is_terminal);
        assert_eq!(node.untried.len(), 9);
        assert!(node.has_untried());
        assert!(!node.is_fully_expanded());
    }

    #[test]
    fn test_terminal_node_has_no_moves() {
        let state = GameState::from_rows([0; 9], [2; 9], SideMap::from_pair(60, 84), Side::White);
        let node = MCTSNode::root(state);

        assert!(node.is_terminal);
        assert!(!node.has_untried());
    }

    #[test]
    fn test_untried_follows_side_to_move() {
        let state = GameState::from_rows(
            [1, 0, 0, 0, 0, 0, 0, 0, 0],
            [0, 2, 0, 3, 0, 0, 0, 0, 0],
            SideMap::from_pair(78, 78),
            Side::Black,
        );
        let node = MCTSNode::root(state);
        assert_eq!(node.untried.as_slice(), &[1, 3]);
    }

    #[test]
    fn test_win_rate_and_uct() {
        let mut node = MCTSNode::root(GameState::new());
        assert_eq!(node.win_rate(), 0.0);
        assert_eq!(node.uct(10, 1.4), f64::INFINITY);

        node.visits = 4;
        node.win_score = 3.0;
        assert_eq!(node.win_rate(), 0.75);

        let expected = 0.75 + 2.0 * ((16.0f64).ln() / 4.0).sqrt();
        assert!((node.uct(16, 2.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_fully_expanded() {
        let mut node = MCTSNode::root(GameState::new());
        node.untried.clear();
        assert!(!node.is_fully_expanded());

        node.children.push(NodeId::new(1));
        assert!(node.is_fully_expanded());
    }
}
