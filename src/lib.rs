//! # uct-agent
//!
//! A time-budgeted Monte Carlo Tree Search (MCTS) agent with Upper Confidence
//! Bound for Trees (UCT) selection, for two-player perfect-information board
//! games.
//!
//! Given a position and the player to move, the agent runs randomized
//! playouts for a fixed wall-clock budget and returns the move with the best
//! observed win ratio.
//!
//! ## Features
//!
//! - Works with any game implementing the [`Board`] trait
//! - Sequential mode, or parallel mode fanning each iteration out over a
//!   reusable worker pool
//! - Seedable random source for reproducible decisions
//! - Verbose narration of every phase through the `log` facade
//! - Per-decision statistics
//! - A ready-made [`hex::HexBoard`]
//!
//! ## Basic Usage
//!
//! ```
//! use std::time::Duration;
//! use uct_agent::{hex::{HexBoard, HexPlayer}, AgentConfig, UctAgent};
//!
//! fn main() -> Result<(), uct_agent::MctsError> {
//!     // Blue to move on a small board
//!     let board = HexBoard::new(4);
//!
//!     let config = AgentConfig::default()
//!         .with_exploration_factor(1.414)
//!         .with_max_decision_time(Duration::from_millis(50));
//!
//!     let mut agent = UctAgent::new(config)?;
//!     let mv = agent.choose_move(&board, HexPlayer::Blue)?;
//!
//!     println!("Chosen move: {}", mv);
//!     println!("{}", agent.statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Each decision follows the same steps:
//!
//! 1. **Expansion**: the root, representing the player to move, is expanded
//!    once into one child per legal move. Children are never expanded further.
//!
//! 2. **Selection**: every iteration picks the root child with the highest
//!    UCT score. Unvisited children score infinity, so each is tried once.
//!
//! 3. **Simulation**: the child's move is played on a private copy of the
//!    board and the game is finished with uniformly random moves. In parallel
//!    mode one playout runs per worker, all from the same child.
//!
//! 4. **Backpropagation**: each playout's winner is recorded on the child and
//!    the root.
//!
//! When the budget runs out the child with the highest win ratio is chosen.
//! The deadline is checked between iterations only, so a decision can
//! overrun by the length of one iteration.
//!
//! ## Configuration
//!
//! Verbose narration and parallel playouts are mutually exclusive:
//!
//! ```
//! use uct_agent::{hex::HexBoard, AgentConfig, MctsError, UctAgent};
//!
//! let config = AgentConfig::default()
//!     .with_parallelization(true)
//!     .with_verbose(true);
//!
//! let result = UctAgent::<HexBoard>::new(config);
//! assert!(matches!(result, Err(MctsError::InvalidConfiguration(_))));
//! ```

pub mod agent;
pub mod board;
pub mod config;
pub mod hex;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod utils;

pub use agent::{best_move, UctAgent};
pub use board::{Board, Move, Player};
pub use config::AgentConfig;
pub use policy::{BackpropagationPolicy, SelectionPolicy, SimulationPolicy};
pub use stats::{ChildStatistics, SearchStatistics};
pub use tree::{Node, NodeId, NodeStats, SearchTree};

/// Error types for the agent
#[derive(thiserror::Error, Debug)]
pub enum MctsError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No root child accumulated any visits, so no move can be justified
    #[error("Statistics are not sufficient to choose among {children} root children")]
    InsufficientStatistics {
        /// Number of root children that were available
        children: usize,
    },

    /// No legal moves are available from the root position
    #[error("No legal moves available from the current position")]
    NoLegalMoves,

    /// The parallel worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for agent operations
pub type Result<T> = std::result::Result<T, MctsError>;
