//! Configuration options for the MCTS algorithm
//!
//! This module defines the configuration parameters that control the
//! behavior of the MCTS algorithm.

use crate::{MCTSError, Result};

/// Criteria for selecting the move to play once the simulation cycles finish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Pick the child with the highest UCT score, the same rule used while
    /// descending the tree. This is the default.
    UctScore,

    /// Select the child with the most visits
    ///
    /// More robust against noisy value estimates once the tree is large.
    MostVisits,

    /// Select the child with the highest average reward
    HighestValue,
}

/// Configuration for the MCTS algorithm
///
/// # Example
///
/// ```
/// use ttt_mcts::{MCTSConfig, config::BestChildCriteria};
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.0)
///     .with_iterations(500)
///     .with_seed(7)
///     .with_best_child_criteria(BestChildCriteria::MostVisits);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant `c` in `mean + c * sqrt(ln(N) / n)`.
    /// The default sqrt(2) gives the classic `sqrt(2 ln(N) / n)` bonus.
    pub exploration_constant: f64,

    /// Number of simulation cycles run for every recommendation
    pub iterations: usize,

    /// Seed for the rollout RNG; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Determines how the final move is chosen
    pub best_child_criteria: BestChildCriteria,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: std::f64::consts::SQRT_2,
            iterations: 100,
            seed: None,
            best_child_criteria: BestChildCriteria::UctScore,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the number of simulation cycles per recommendation
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Fixes the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Checks that the configuration can drive a search
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(MCTSError::InvalidConfiguration(
                "iterations must be at least 1".to_string(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
