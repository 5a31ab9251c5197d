//! Selection policies for the MCTS algorithm
//!
//! Selection policies decide which move to follow from an expanded position,
//! balancing exploration and exploitation.

use crate::{
    board::{apply_move, legal_moves, Position},
    tree::{MCTSNode, SearchTree},
    utils::{uct_score, UctScore},
    MCTSError, Result,
};

/// Trait for policies that pick a move from an expanded position
pub trait SelectionPolicy: Send + Sync {
    /// Scores a child node. `parent` is the child's recorded parent, if any.
    fn score(&self, child: &MCTSNode, parent: Option<&MCTSNode>) -> UctScore;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy>;

    /// Returns the legal move whose child scores highest.
    ///
    /// Moves are scanned in ascending cell order and a later move only wins
    /// with a strictly greater score, so ties go to the lowest cell. Every
    /// legal move must already have a node; a missing one is reported as
    /// [`MCTSError::NotExpanded`].
    fn select_move(&self, position: &Position, tree: &SearchTree) -> Result<usize> {
        let mut best: Option<(usize, UctScore)> = None;

        for cell in legal_moves(position) {
            let child = tree
                .node_for(&apply_move(position, cell))
                .ok_or_else(|| MCTSError::NotExpanded {
                    position: *position,
                    cell,
                })?;
            let parent = child.parent().map(|id| tree.node(id));
            let score = self.score(child, parent);

            match &best {
                Some((_, best_score)) if !score.beats(best_score) => {}
                _ => best = Some((cell, score)),
            }
        }

        best.map(|(cell, _)| cell).ok_or(MCTSError::NoLegalActions)
    }
}

/// Upper Confidence bounds applied to Trees
///
/// ```text
/// UCT = total_reward / visits + exploration_constant * sqrt(ln(parent_visits) / visits)
/// ```
///
/// Unvisited children score [`UctScore::Unvisited`], which outranks every
/// visited child. The parent is the node recorded as the child's parent in
/// the tree, which for a shared position can differ from the position the
/// selection is made from.
#[derive(Debug, Clone)]
pub struct UCTPolicy {
    /// Exploration constant that controls the balance between exploration and exploitation.
    /// Higher values favor exploration of less-visited nodes.
    pub exploration_constant: f64,
}

impl UCTPolicy {
    /// Creates a new UCT policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCTPolicy {
            exploration_constant,
        }
    }
}

impl Default for UCTPolicy {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}

impl SelectionPolicy for UCTPolicy {
    fn score(&self, child: &MCTSNode, parent: Option<&MCTSNode>) -> UctScore {
        let parent_visits = parent.map_or(child.visits(), MCTSNode::visits);
        uct_score(
            child.total_reward(),
            child.visits(),
            parent_visits,
            self.exploration_constant,
        )
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        Box::new(self.clone())
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl SelectionPolicy for Box<dyn SelectionPolicy> {
    fn score(&self, child: &MCTSNode, parent: Option<&MCTSNode>) -> UctScore {
        (**self).score(child, parent)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        (**self).clone_box()
    }

    fn select_move(&self, position: &Position, tree: &SearchTree) -> Result<usize> {
        (**self).select_move(position, tree)
    }
}
