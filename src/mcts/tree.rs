//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<MCTSNode>` with index-based references, so parent links
//! need no shared ownership and the whole tree can be serialized.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::core::GameState;

/// Arena-based MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode>,

    /// The root node ID (always 0 after initialization).
    root: NodeId,
}

impl MCTSTree {
    /// Create a new tree rooted at `state`.
    pub fn new(state: GameState) -> Self {
        Self::with_capacity(state, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(state: GameState, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MCTSNode::root(state));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: MCTSNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate the child reached from `parent` by sowing `pit`, and link it.
    pub fn add_child(&mut self, parent: NodeId, pit: usize, state: GameState) -> NodeId {
        let depth = self.get(parent).depth + 1;
        let child = self.alloc(MCTSNode::new(state, parent, Some(pit), depth));
        self.get_mut(parent).children.push(child);
        child
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal).count();
        let expanded_moves: usize = self.nodes.iter().map(|n| n.children.len()).sum();
        let untried_moves: usize = self.nodes.iter().map(|n| n.untried.len()).sum();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            expanded_moves,
            untried_moves,
        }
    }

    /// Clear the tree and reset with a new root.
    pub fn reset(&mut self, state: GameState) {
        self.nodes.clear();
        self.nodes.push(MCTSNode::root(state));
        self.root = NodeId::new(0);
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode {
        self.get(self.root)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Moves that have a child node.
    pub expanded_moves: usize,

    /// Legal moves still waiting for expansion.
    pub untried_moves: usize,
}

impl TreeStats {
    /// Average number of children per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.expanded_moves as f64 / self.node_count as f64
        }
    }

    /// Share of known legal moves that have been expanded.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        let total = self.expanded_moves + self.untried_moves;
        if total == 0 {
            0.0
        } else {
            self.expanded_moves as f64 / total as f64
        }
    }
}
