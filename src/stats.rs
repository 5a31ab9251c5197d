//! Statistics collection for MCTS searches
//!
//! This module provides structures for collecting and reporting statistics
//! about MCTS search processes.

use std::time::Duration;

use crate::board::Player;
use crate::outcome::GameStatus;

/// Statistics collected during one MCTS search
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of simulation cycles performed
    pub iterations: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Total number of nodes in the shared tree after the search
    pub tree_size: usize,

    /// Nodes created by this search
    pub nodes_created: usize,

    /// Deepest ply (moves on the board) reached by any cycle
    pub max_depth: usize,

    /// Cycles that ended in a win for the searching player
    pub wins: usize,

    /// Cycles that ended in a loss for the searching player
    pub losses: usize,

    /// Cycles that ended in a draw
    pub draws: usize,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1, // Start with root node
            nodes_created: 0,
            max_depth: 0,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    /// Records the terminal status of one cycle
    pub fn record_outcome(&mut self, status: GameStatus, perspective: Player) {
        match status.winner() {
            Some(winner) if winner == perspective => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.draws += 1,
        }
    }

    /// Returns the average time per iteration in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Returns the number of iterations per second
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "MCTS Search Statistics:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes ({} new)\n\
             - Max depth: {}\n\
             - Rollouts won/lost/drawn: {}/{}/{}\n\
             - Avg time per iteration: {:.3} µs\n\
             - Iterations per second: {:.1}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.nodes_created,
            self.max_depth,
            self.wins,
            self.losses,
            self.draws,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
