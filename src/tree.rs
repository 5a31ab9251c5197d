//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes live in an arena owned by [`SearchTree`] and refer to each other by
//! [`NodeId`]. A lookup table maps every [`Position`] to its unique node, so
//! two move orders reaching the same board share statistics. The tree is
//! meant to outlive a single search: statistics keep accumulating across
//! every recommendation made with it.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::board::{apply_move, legal_moves, Position, BOARD_CELLS};

/// Stable index of a node inside a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena slot of this node
    pub fn index(self) -> usize {
        self.0
    }
}

/// Statistics for one position in the search tree
#[derive(Debug, Clone)]
pub struct MCTSNode {
    /// The position this node stands for
    pub position: Position,

    /// Number of simulations backpropagated through this node
    visits: u64,

    /// Sum of rewards backpropagated through this node; may be negative
    total_reward: f64,

    /// The node that first expanded into this one (None for roots)
    parent: Option<NodeId>,

    /// Nodes for the positions reachable in one move, in expansion order
    children: Vec<NodeId>,
}

impl MCTSNode {
    fn new(position: Position, parent: Option<NodeId>) -> Self {
        MCTSNode {
            position,
            visits: 0,
            total_reward: 0.0,
            parent,
            children: Vec::new(),
        }
    }

    /// Returns the number of visits to this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Returns the total reward accumulated at this node
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Returns the average reward (value) of this node
    pub fn value(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.total_reward / self.visits as f64
    }

    /// Returns the parent link, if any
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the child links
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if this node has not been expanded
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of moves played to reach this node's position
    pub fn depth(&self) -> usize {
        self.position.moves_played()
    }

    /// The cell of the most recent move, if any
    pub fn last_move(&self) -> Option<usize> {
        (0..BOARD_CELLS)
            .filter_map(|cell| self.position.cell(cell).map(|order| (order, cell)))
            .max()
            .map(|(_, cell)| cell)
    }

    fn record_visit(&mut self, reward: f64) {
        self.visits += 1;
        self.total_reward += reward;
    }
}

/// Arena of nodes plus a position-keyed lookup table
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<MCTSNode>,
    index: HashMap<Position, NodeId>,
    root: NodeId,
}

impl SearchTree {
    /// Creates a tree whose root is the empty board
    pub fn new() -> Self {
        Self::with_root(Position::new())
    }

    /// Creates a tree rooted at an arbitrary position
    pub fn with_root(position: Position) -> Self {
        let mut tree = SearchTree {
            nodes: Vec::new(),
            index: HashMap::new(),
            root: NodeId(0),
        };
        tree.root = tree.insert_node(position, None);
        tree
    }

    /// Returns the designated root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node with the given id
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.0]
    }

    /// Looks up the node for a position
    pub fn node_id(&self, position: &Position) -> Option<NodeId> {
        self.index.get(position).copied()
    }

    /// Looks up the node for a position
    pub fn node_for(&self, position: &Position) -> Option<&MCTSNode> {
        self.node_id(position).map(|id| self.node(id))
    }

    /// Looks up the node reached by playing `cell` from `position`
    pub fn child_for_move(&self, position: &Position, cell: usize) -> Option<&MCTSNode> {
        self.node_for(&apply_move(position, cell))
    }

    /// Returns true if the position has a node
    pub fn contains(&self, position: &Position) -> bool {
        self.index.contains_key(position)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node for `position`, creating a parentless one if missing
    pub fn get_or_insert(&mut self, position: Position) -> NodeId {
        match self.node_id(&position) {
            Some(id) => id,
            None => self.insert_node(position, None),
        }
    }

    fn insert_node(&mut self, position: Position, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MCTSNode::new(position, parent));
        self.index.insert(position, id);
        id
    }

    /// Makes sure every legal move from `position` has a child node.
    ///
    /// Positions already present elsewhere in the tree are reused and linked
    /// as children; they only adopt this node as parent if they had none.
    /// Calling this again on an expanded position changes nothing. Returns
    /// the node of `position` itself.
    pub fn ensure_expanded(&mut self, position: &Position) -> NodeId {
        let id = self.get_or_insert(*position);

        for cell in legal_moves(position) {
            let next = apply_move(position, cell);
            let child = match self.node_id(&next) {
                Some(existing) => {
                    let node = &mut self.nodes[existing.0];
                    if node.parent.is_none() && existing != self.root {
                        node.parent = Some(id);
                    }
                    existing
                }
                None => self.insert_node(next, Some(id)),
            };

            let children = &mut self.nodes[id.0].children;
            if !children.contains(&child) {
                children.push(child);
            }
        }

        id
    }

    /// Adds one visit and `reward` to `id` and to every ancestor up to the
    /// node without a parent. Returns the number of nodes updated.
    pub fn backpropagate(&mut self, id: NodeId, reward: f64) -> usize {
        let mut current = Some(id);
        let mut updated = 0;

        while let Some(node_id) = current {
            let node = &mut self.nodes[node_id.0];
            node.record_visit(reward);
            updated += 1;
            current = node.parent;
        }

        updated
    }

    /// Returns a textual dump of the tree below the root, following children
    /// whose parent link points back to the node being printed.
    pub fn visualize(&self, max_depth: usize) -> String {
        let mut result = String::new();
        self.visualize_node(self.root, 0, max_depth, &mut result);
        result
    }

    fn visualize_node(&self, id: NodeId, depth: usize, max_depth: usize, output: &mut String) {
        let node = self.node(id);
        let indent = "  ".repeat(depth);
        let last_move = node
            .last_move()
            .and_then(|cell| node.position.owner(cell).map(|player| (player, cell)));
        let label = match last_move {
            Some((player, cell)) if depth > 0 => format!("{}@{}", player, cell),
            _ => "Root".to_string(),
        };

        let _ = writeln!(
            output,
            "{}{} (visits: {}, value: {:.3})",
            indent,
            label,
            node.visits(),
            node.value()
        );

        if depth >= max_depth {
            return;
        }

        for &child in &node.children {
            if self.node(child).parent == Some(id) {
                self.visualize_node(child, depth + 1, max_depth, output);
            }
        }
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}
