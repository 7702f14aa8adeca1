//! Configuration options for the agent
//!
//! This module defines the construction-time parameters that control the
//! behavior of [`crate::UctAgent`]. A configuration is fixed for the
//! lifetime of the agent built from it.

use std::time::Duration;

use crate::{MctsError, Result};

/// Default UCT exploration factor, approximately sqrt(2)
pub const DEFAULT_EXPLORATION_FACTOR: f64 = 1.414;

/// Default wall-clock budget for one decision
pub const DEFAULT_MAX_DECISION_TIME: Duration = Duration::from_secs(1);

/// Configuration for the agent
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use uct_agent::AgentConfig;
/// use std::time::Duration;
///
/// let config = AgentConfig::default()
///     .with_exploration_factor(0.8)
///     .with_max_decision_time(Duration::from_millis(250))
///     .with_parallelization(true);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Exploration factor `C` of the UCT score
    ///
    /// Higher values favor under-explored moves. Must be finite and
    /// non-negative.
    pub exploration_factor: f64,

    /// Wall-clock budget for each decision
    ///
    /// The deadline is checked between iterations, so a decision may overrun
    /// by the cost of the iteration in flight.
    pub max_decision_time: Duration,

    /// Whether each iteration fans out one playout per worker thread
    pub is_parallelized: bool,

    /// Whether every search phase is narrated through the log
    ///
    /// Mutually exclusive with `is_parallelized`.
    pub is_verbose: bool,

    /// Seed for the agent's random source
    ///
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Number of parallel playouts per iteration
    ///
    /// `None` uses the available hardware parallelism. Ignored in
    /// sequential mode.
    pub num_workers: Option<usize>,

    /// Optional cap on iterations per decision
    ///
    /// The search stops at whichever of the cap or the deadline comes first.
    pub max_iterations: Option<usize>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            exploration_factor: DEFAULT_EXPLORATION_FACTOR,
            max_decision_time: DEFAULT_MAX_DECISION_TIME,
            is_parallelized: false,
            is_verbose: false,
            seed: None,
            num_workers: None,
            max_iterations: None,
        }
    }
}

impl AgentConfig {
    /// Sets the UCT exploration factor
    pub fn with_exploration_factor(mut self, factor: f64) -> Self {
        self.exploration_factor = factor;
        self
    }

    /// Sets the wall-clock budget per decision
    pub fn with_max_decision_time(mut self, duration: Duration) -> Self {
        self.max_decision_time = duration;
        self
    }

    /// Enables or disables parallel playouts
    pub fn with_parallelization(mut self, is_parallelized: bool) -> Self {
        self.is_parallelized = is_parallelized;
        self
    }

    /// Enables or disables verbose narration
    pub fn with_verbose(mut self, is_verbose: bool) -> Self {
        self.is_verbose = is_verbose;
        self
    }

    /// Seeds the agent's random source
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of parallel playouts per iteration
    pub fn with_num_workers(mut self, workers: usize) -> Self {
        self.num_workers = Some(workers);
        self
    }

    /// Caps the number of iterations per decision
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Resolves the parallel fan-out width
    ///
    /// Always 1 in sequential mode.
    pub fn workers(&self) -> usize {
        if !self.is_parallelized {
            return 1;
        }
        self.num_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Checks the configuration for contradictory or out-of-range options
    pub fn validate(&self) -> Result<()> {
        if self.is_parallelized && self.is_verbose {
            return Err(MctsError::InvalidConfiguration(
                "parallel playouts and verbose narration cannot be combined".to_string(),
            ));
        }
        if !self.exploration_factor.is_finite() || self.exploration_factor < 0.0 {
            return Err(MctsError::InvalidConfiguration(format!(
                "exploration factor must be finite and non-negative, got {}",
                self.exploration_factor
            )));
        }
        if self.num_workers == Some(0) {
            return Err(MctsError::InvalidConfiguration(
                "number of workers must be at least 1".to_string(),
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(MctsError::InvalidConfiguration(
                "iteration cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_mode_uses_one_worker() {
        let config = AgentConfig::default().with_num_workers(8);
        assert_eq!(config.workers(), 1);
    }

    #[test]
    fn parallel_mode_honours_explicit_workers() {
        let config = AgentConfig::default()
            .with_parallelization(true)
            .with_num_workers(3);
        assert_eq!(config.workers(), 3);
    }

    #[test]
    fn parallel_mode_defaults_to_hardware_parallelism() {
        let config = AgentConfig::default().with_parallelization(true);
        assert!(config.workers() >= 1);
    }

    #[test]
    fn nan_exploration_factor_is_rejected() {
        let config = AgentConfig::default().with_exploration_factor(f64::NAN);
        assert!(config.validate().is_err());
    }
}
