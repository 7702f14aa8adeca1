//! Statistics collection for decisions
//!
//! This module provides structures for collecting and reporting statistics
//! about one `choose_move` call.

use std::time::Duration;

use crate::{board::Move, utils};

/// Counters of one root child at the end of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildStatistics {
    /// The move the child represents
    pub mv: Move,

    /// Playouts that went through this child
    pub visits: u32,

    /// Playouts won by the deciding player
    pub wins: u32,
}

impl ChildStatistics {
    /// Returns the win ratio, or `None` if the child was never visited
    pub fn win_ratio(&self) -> Option<f64> {
        utils::win_rate(self.wins, self.visits)
    }
}

/// Statistics collected during a decision
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of iterations performed
    pub iterations: usize,

    /// Number of playouts backpropagated
    pub playouts: usize,

    /// Playouts run per iteration
    pub workers: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Time spent past the decision budget
    ///
    /// The deadline is only checked between iterations, so this is bounded
    /// by the length of one iteration.
    pub overrun: Duration,

    /// Whether the iteration cap, rather than the clock, ended the search
    pub hit_iteration_cap: bool,

    /// Counters of every root child, in expansion order
    pub children: Vec<ChildStatistics>,

    /// The move that was chosen, if any
    pub chosen: Option<Move>,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            playouts: 0,
            workers: 1,
            total_time: Duration::from_secs(0),
            overrun: Duration::from_secs(0),
            hit_iteration_cap: false,
            children: Vec::new(),
            chosen: None,
        }
    }

    /// Sum of visits over all root children
    ///
    /// Equals `playouts` after every decision.
    pub fn total_child_visits(&self) -> u64 {
        self.children.iter().map(|child| child.visits as u64).sum()
    }

    /// Returns the average time per iteration in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Returns the number of playouts per second
    pub fn playouts_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.playouts as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        let chosen = match self.chosen {
            Some(mv) => mv.to_string(),
            None => "none".to_string(),
        };
        format!(
            "Search Statistics:\n\
             - Iterations: {}\n\
             - Playouts: {} ({} per iteration)\n\
             - Total time: {:.3} seconds\n\
             - Overrun: {:.3} ms\n\
             - Avg time per iteration: {:.3} µs\n\
             - Playouts per second: {:.1}\n\
             - Root children: {}\n\
             - Chosen move: {}",
            self.iterations,
            self.playouts,
            self.workers,
            self.total_time.as_secs_f64(),
            self.overrun.as_secs_f64() * 1000.0,
            self.avg_time_per_iteration_us(),
            self.playouts_per_second(),
            self.children.len(),
            chosen
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
