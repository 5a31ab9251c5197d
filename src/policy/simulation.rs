//! Simulation (rollout) policies for the MCTS algorithm
//!
//! During a simulation cycle the searching player follows the tree policy,
//! while every other move is picked by a simulation policy.

use rand::{seq::IteratorRandom, RngCore};

use crate::board::{legal_moves, Position};

/// Trait for policies that choose rollout moves
pub trait SimulationPolicy: Send + Sync {
    /// Picks a legal move from `position`, or `None` if there is none
    fn choose_move(&self, position: &Position, rng: &mut dyn RngCore) -> Option<usize>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy>;
}

/// Random simulation policy
///
/// Picks uniformly among the legal moves.
#[derive(Debug, Clone)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationPolicy for RandomPolicy {
    fn choose_move(&self, position: &Position, rng: &mut dyn RngCore) -> Option<usize> {
        legal_moves(position).choose(rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy> {
        Box::new(self.clone())
    }
}

/// First-legal-move policy
///
/// Always plays the lowest empty cell. Deterministic, which makes it useful
/// as a predictable opponent in tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct FirstMovePolicy;

impl FirstMovePolicy {
    /// Creates a new first-move policy
    pub fn new() -> Self {
        FirstMovePolicy
    }
}

impl SimulationPolicy for FirstMovePolicy {
    fn choose_move(&self, position: &Position, _rng: &mut dyn RngCore) -> Option<usize> {
        legal_moves(position).next()
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy> {
        Box::new(self.clone())
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl SimulationPolicy for Box<dyn SimulationPolicy> {
    fn choose_move(&self, position: &Position, rng: &mut dyn RngCore) -> Option<usize> {
        (**self).choose_move(position, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy> {
        (**self).clone_box()
    }
}
