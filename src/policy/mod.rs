//! Policies for the move choices made during a search
//!
//! - Selection policies: how to pick a move from an expanded position
//! - Simulation policies: how the rollout side picks its moves

pub mod selection;
pub mod simulation;

pub use selection::{SelectionPolicy, UCTPolicy};
pub use simulation::{FirstMovePolicy, RandomPolicy, SimulationPolicy};
