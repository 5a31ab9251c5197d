//! Main implementation of the Monte Carlo Tree Search driver
//!
//! Each simulation cycle walks a single path from the start position to the
//! end of the game. Every position on the way is expanded; the searching
//! player's moves follow the selection policy and all other moves follow the
//! simulation policy. The terminal reward is then backpropagated through the
//! parent links of the final node.

use std::time::Instant;

use log::{debug, trace, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    board::{apply_move, legal_moves, Player, Position},
    config::{BestChildCriteria, MCTSConfig},
    outcome::{evaluate, reward_for, GameStatus},
    policy::{
        selection::{SelectionPolicy, UCTPolicy},
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{MCTSNode, SearchTree},
    MCTSError, Result,
};

/// The Monte Carlo Tree Search driver
///
/// Owns the shared [`SearchTree`], so statistics accumulate over every
/// recommendation made through the same instance.
pub struct MCTS {
    /// Shared search tree
    tree: SearchTree,

    /// Configuration for the search
    config: MCTSConfig,

    /// Statistics gathered during the last search
    statistics: SearchStatistics,

    /// Policy used for the searching player's moves
    selection_policy: Box<dyn SelectionPolicy>,

    /// Policy used for every other move
    simulation_policy: Box<dyn SimulationPolicy>,

    /// Source of randomness for the simulation policy
    rng: StdRng,
}

impl MCTS {
    /// Creates a driver with a fresh tree rooted at the empty board
    pub fn new(config: MCTSConfig) -> Self {
        Self::with_tree(SearchTree::new(), config)
    }

    /// Creates a driver around an existing tree
    pub fn with_tree(tree: SearchTree, config: MCTSConfig) -> Self {
        let selection_policy: Box<dyn SelectionPolicy> =
            Box::new(UCTPolicy::new(config.exploration_constant));

        let simulation_policy: Box<dyn SimulationPolicy> = Box::new(RandomPolicy::new());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        MCTS {
            tree,
            config,
            statistics: SearchStatistics::new(),
            selection_policy,
            simulation_policy,
            rng,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Returns the shared search tree
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Consumes the driver, handing back its tree
    pub fn into_tree(self) -> SearchTree {
        self.tree
    }

    /// Returns the statistics of the last search
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Runs the configured number of simulation cycles from `position` on
    /// behalf of `perspective` and returns the position after the chosen move.
    ///
    /// A configuration with zero iterations is rejected with
    /// [`MCTSError::InvalidConfiguration`], even when `position` already has
    /// children in the tree.
    pub fn recommend_move(&mut self, position: &Position, perspective: Player) -> Result<Position> {
        self.search_for_iterations(position, perspective, self.config.iterations)
    }

    /// Same as [`MCTS::recommend_move`] with an explicit cycle count
    pub fn search_for_iterations(
        &mut self,
        position: &Position,
        perspective: Player,
        iterations: usize,
    ) -> Result<Position> {
        let cell = self.best_move(position, perspective, iterations)?;
        Ok(apply_move(position, cell))
    }

    /// Runs `iterations` simulation cycles and returns the chosen cell
    pub fn best_move(
        &mut self,
        position: &Position,
        perspective: Player,
        iterations: usize,
    ) -> Result<usize> {
        self.config.validate()?;
        if iterations == 0 {
            return Err(MCTSError::InvalidConfiguration(
                "iterations must be at least 1".to_string(),
            ));
        }
        if evaluate(position).is_terminal() {
            return Err(MCTSError::NoLegalActions);
        }
        if !self.tree.contains(position) {
            warn!(
                "searching from a position outside the tree; it becomes a new root:\n{}",
                position
            );
        }

        self.statistics = SearchStatistics::new();
        let nodes_before = self.tree.len();
        let start_time = Instant::now();

        for i in 0..iterations {
            let terminal = self.simulate(position, perspective)?;
            self.statistics.max_depth = self.statistics.max_depth.max(terminal.moves_played());
            self.statistics.iterations = i + 1;
        }

        self.statistics.total_time = start_time.elapsed();
        self.statistics.tree_size = self.tree.len();
        self.statistics.nodes_created = self.tree.len() - nodes_before;

        let cell = self.select_final_move(position)?;
        debug!(
            "{} cycles for {} over {} nodes ({} new), chose cell {}",
            iterations,
            perspective,
            self.statistics.tree_size,
            self.statistics.nodes_created,
            cell
        );
        Ok(cell)
    }

    /// Runs one simulation cycle from `start` and returns the terminal
    /// position it reached.
    ///
    /// The turn counter starts at `perspective` whatever the board says, and
    /// the selection policy is used whenever the counter equals
    /// `perspective`.
    pub fn simulate(&mut self, start: &Position, perspective: Player) -> Result<Position> {
        let mut turn = perspective;
        let mut current = *start;
        let mut status = evaluate(&current);

        while status == GameStatus::InProgress {
            self.tree.ensure_expanded(&current);

            let cell = if turn == perspective {
                self.selection_policy.select_move(&current, &self.tree)?
            } else {
                self.simulation_policy
                    .choose_move(&current, &mut self.rng)
                    .ok_or(MCTSError::NoLegalActions)?
            };

            current = apply_move(&current, cell);
            turn = turn.opponent();
            status = evaluate(&current);
        }

        let reward = reward_for(status, perspective);
        self.statistics.record_outcome(status, perspective);

        let leaf = self.tree.get_or_insert(current);
        let updated = self.tree.backpropagate(leaf, reward);
        trace!(
            "cycle ended {:?} after {} moves, reward {} over {} nodes",
            status,
            current.moves_played(),
            reward,
            updated
        );

        Ok(current)
    }

    fn child_for_move(&self, position: &Position, cell: usize) -> Result<&MCTSNode> {
        self.tree
            .child_for_move(position, cell)
            .ok_or_else(|| MCTSError::NotExpanded {
                position: *position,
                cell,
            })
    }

    /// Selects the move to play based on configured criteria
    fn select_final_move(&self, position: &Position) -> Result<usize> {
        match self.config.best_child_criteria {
            BestChildCriteria::UctScore => self.selection_policy.select_move(position, &self.tree),

            BestChildCriteria::MostVisits => {
                let mut best: Option<(usize, u64)> = None;
                for cell in legal_moves(position) {
                    let visits = self.child_for_move(position, cell)?.visits();
                    if best.map_or(true, |(_, best_visits)| visits > best_visits) {
                        best = Some((cell, visits));
                    }
                }
                best.map(|(cell, _)| cell).ok_or(MCTSError::NoLegalActions)
            }

            BestChildCriteria::HighestValue => {
                let mut best: Option<(usize, f64)> = None;
                for cell in legal_moves(position) {
                    let value = self.child_for_move(position, cell)?.value();
                    if best.map_or(true, |(_, best_value)| value > best_value) {
                        best = Some((cell, value));
                    }
                }
                best.map(|(cell, _)| cell).ok_or(MCTSError::NoLegalActions)
            }
        }
    }

    /// Returns a visualization of the shared tree down to `max_depth`
    pub fn visualize_tree(&self, max_depth: usize) -> String {
        self.tree.visualize(max_depth)
    }
}

/// Runs `iterations` simulation cycles from `position` against `tree` with
/// the default policies and returns the position after the recommended move.
///
/// `tree` is updated in place, so repeated calls keep refining the same
/// statistics. Zero `iterations` is rejected like in [`MCTS::recommend_move`].
pub fn recommend_move(
    position: &Position,
    tree: &mut SearchTree,
    perspective: Player,
    iterations: usize,
) -> Result<Position> {
    let config = MCTSConfig::default().with_iterations(iterations);
    let mut mcts = MCTS::with_tree(std::mem::take(tree), config);
    let result = mcts.recommend_move(position, perspective);
    *tree = mcts.into_tree();
    result
}
