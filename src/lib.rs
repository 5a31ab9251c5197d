//! # ttt-mcts
//!
//! Tic-tac-toe played by Monte Carlo Tree Search with UCT selection.
//!
//! Positions are stored as nine cells holding the move-order number of the
//! move that filled them, so the parity of a cell tells who played it. The
//! search tree keeps exactly one node per position and survives between
//! searches, which lets statistics accumulate over many games (for instance a
//! batch of training games before playing a human).
//!
//! ## Basic Usage
//!
//! ```
//! use ttt_mcts::{MCTSConfig, Player, Position, MCTS};
//!
//! fn main() -> Result<(), ttt_mcts::MCTSError> {
//!     let config = MCTSConfig::default().with_iterations(100).with_seed(1);
//!     let mut mcts = MCTS::new(config);
//!
//!     let empty = Position::new();
//!     let next = mcts.recommend_move(&empty, Player::X)?;
//!
//!     assert_eq!(next.moves_played(), 1);
//!     println!("{}", next);
//!     println!("{}", mcts.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Every simulation cycle walks one path from the start position to the end
//! of the game:
//!
//! 1. **Expansion**: each position on the path gets a node for every legal
//!    move, reusing nodes for positions already in the tree.
//! 2. **Selection**: moves of the searching player pick the child with the
//!    highest UCT score; unvisited children always come first.
//! 3. **Simulation**: all other moves are played by the simulation policy,
//!    uniformly at random by default.
//! 4. **Backpropagation**: the final node and its ancestors receive one
//!    visit and a reward of +1, -1 or 0 for the searching player.
//!
//! After the configured number of cycles the best child of the start
//! position is played.

pub mod agent;
pub mod board;
pub mod config;
pub mod mcts;
pub mod outcome;
pub mod policy;
pub mod session;
pub mod stats;
pub mod tree;
pub mod utils;

pub use board::{Player, Position};
pub use config::MCTSConfig;
pub use mcts::{recommend_move, MCTS};
pub use outcome::GameStatus;
pub use policy::{SelectionPolicy, SimulationPolicy};
pub use stats::SearchStatistics;
pub use tree::{MCTSNode, NodeId, SearchTree};

/// Error types for the MCTS algorithm
#[derive(thiserror::Error, Debug)]
pub enum MCTSError {
    /// No legal actions are available from the current state
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// A move was selected from a position whose children are missing
    #[error("Position is not expanded: no node for cell {cell} from\n{position}")]
    NotExpanded {
        /// Position the selection was made from
        position: Position,
        /// Legal cell without a child node
        cell: usize,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A move source produced something that is not a move
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// Reading or writing an interactive stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for MCTS operations
pub type Result<T> = std::result::Result<T, MCTSError>;
