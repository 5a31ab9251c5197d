//! Utility functions for UCT scoring
//!
//! This module contains the pieces of the UCT formula used by the selection
//! policy. Unvisited nodes are represented by an explicit sentinel instead of
//! floating-point infinity.

use std::cmp::Ordering;

/// Selection score of a child node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UctScore {
    /// The child has never been visited and must be tried before any revisit
    Unvisited,
    /// Exploitation plus exploration for a visited child
    Value(f64),
}

impl UctScore {
    /// Returns true if `self` is strictly better than `other`.
    ///
    /// Equal scores never beat each other, which keeps the first candidate
    /// on ties.
    pub fn beats(&self, other: &UctScore) -> bool {
        self.partial_cmp(other) == Some(Ordering::Greater)
    }

    /// Returns the numeric value, if the child has been visited
    pub fn value(&self) -> Option<f64> {
        match self {
            UctScore::Unvisited => None,
            UctScore::Value(v) => Some(*v),
        }
    }
}

impl PartialOrd for UctScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (UctScore::Unvisited, UctScore::Unvisited) => Some(Ordering::Equal),
            (UctScore::Unvisited, UctScore::Value(_)) => Some(Ordering::Greater),
            (UctScore::Value(_), UctScore::Unvisited) => Some(Ordering::Less),
            (UctScore::Value(a), UctScore::Value(b)) => a.partial_cmp(b),
        }
    }
}

/// Calculates the exploitation term: the mean reward of a node
pub fn exploitation_term(total_reward: f64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    total_reward / visits as f64
}

/// Calculates the exploration term `c * sqrt(ln(N) / n)`.
///
/// With `c = sqrt(2)` this equals `sqrt(2 ln(N) / n)`. A parent without
/// visits contributes no exploration bonus.
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 || parent_visits == 0 {
        return 0.0;
    }

    exploration_constant * ((parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// Calculates the UCT score of a child
pub fn uct_score(
    total_reward: f64,
    visits: u64,
    parent_visits: u64,
    exploration_constant: f64,
) -> UctScore {
    if visits == 0 {
        return UctScore::Unvisited;
    }

    UctScore::Value(
        exploitation_term(total_reward, visits)
            + exploration_term(parent_visits, visits, exploration_constant),
    )
}

