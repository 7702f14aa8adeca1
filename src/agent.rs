//! The time-budgeted UCT agent
//!
//! This module orchestrates one decision: expand the root once, then repeat
//! select, simulate and backpropagate until the clock runs out, and finally
//! pick the root child with the best win ratio.
//!
//! Selection only ever operates on the root's direct children. All
//! look-ahead beyond the candidate move comes from the random playout.

use std::time::Instant;

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::{
    board::{Board, Move, Player},
    config::AgentConfig,
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        expansion,
        selection::{SelectionPolicy, UctPolicy},
        simulation::{RandomPlayout, SimulationPolicy},
    },
    stats::{ChildStatistics, SearchStatistics},
    tree::{NodeId, SearchTree},
    MctsError, Result,
};

/// Monte Carlo Tree Search agent with UCT selection
///
/// The agent holds its configuration, its random source and, in parallel
/// mode, a worker pool reused by every decision. No search state survives
/// between decisions: each [`UctAgent::choose_move`] builds and discards its
/// own tree.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use uct_agent::{hex::{HexBoard, HexPlayer}, AgentConfig, Board, UctAgent};
///
/// let board = HexBoard::new(3);
/// let config = AgentConfig::default()
///     .with_max_decision_time(Duration::from_millis(20))
///     .with_seed(7);
///
/// let mut agent = UctAgent::new(config)?;
/// let mv = agent.choose_move(&board, HexPlayer::Blue)?;
/// assert!(board.get_valid_moves().contains(&mv));
/// # Ok::<(), uct_agent::MctsError>(())
/// ```
pub struct UctAgent<B: Board> {
    /// Configuration fixed at construction
    config: AgentConfig,

    /// Random source consumed by every playout
    rng: StdRng,

    /// Worker pool for parallel playouts
    pool: Option<rayon::ThreadPool>,

    /// Playouts per iteration
    workers: usize,

    /// Policy for picking the root child to simulate
    selection_policy: Box<dyn SelectionPolicy<B::Player>>,

    /// Policy for playing games out
    simulation_policy: Box<dyn SimulationPolicy<B>>,

    /// Policy for updating node statistics
    backpropagation_policy: Box<dyn BackpropagationPolicy<B::Player>>,

    /// Statistics of the most recent decision
    statistics: SearchStatistics,
}

impl<B: Board + 'static> UctAgent<B> {
    /// Creates an agent from a validated configuration
    ///
    /// Fails with [`MctsError::InvalidConfiguration`] if the configuration is
    /// contradictory, for example verbose narration combined with parallel
    /// playouts.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let workers = config.workers();
        let pool = if config.is_parallelized {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|index| format!("uct-playout-{}", index))
                .build()?;
            Some(pool)
        } else {
            None
        };

        let verbose = config.is_verbose;
        let selection_policy: Box<dyn SelectionPolicy<B::Player>> =
            Box::new(UctPolicy::new(config.exploration_factor).verbose(verbose));
        let simulation_policy: Box<dyn SimulationPolicy<B>> =
            Box::new(RandomPlayout::new().verbose(verbose));
        let backpropagation_policy: Box<dyn BackpropagationPolicy<B::Player>> =
            Box::new(StandardPolicy::new().verbose(verbose));

        Ok(UctAgent {
            config,
            rng,
            pool,
            workers,
            selection_policy,
            simulation_policy,
            backpropagation_policy,
            statistics: SearchStatistics::new(),
        })
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<B::Player> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<B> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy<B::Player> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Returns the configuration the agent was built with
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Returns the number of playouts run per iteration
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the statistics of the most recent decision
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Chooses a move for `player` on `board`
    ///
    /// Runs iterations until the decision budget (or the optional iteration
    /// cap) is exhausted. At least one iteration always runs, and the
    /// iteration in flight when the deadline passes is completed. `board` is
    /// never modified.
    ///
    /// # Errors
    ///
    /// - [`MctsError::NoLegalMoves`] if `board` has no legal moves
    /// - [`MctsError::InsufficientStatistics`] if no root child was visited
    pub fn choose_move(&mut self, board: &B, player: B::Player) -> Result<Move> {
        let verbose = self.config.is_verbose;
        if verbose {
            info!("---------- UCT search start: {:?} to move ----------", player);
        }

        self.statistics = SearchStatistics::new();
        self.statistics.workers = self.workers;

        let mut tree = SearchTree::new(player);
        let expanded = expansion::expand(&mut tree, NodeId::ROOT, board, verbose);
        if expanded == 0 {
            return Err(MctsError::NoLegalMoves);
        }

        let start = Instant::now();
        let deadline = start + self.config.max_decision_time;
        loop {
            if verbose {
                info!(
                    "---------- Starting iteration {} ----------",
                    self.statistics.iterations + 1
                );
            }

            let playouts = self.run_iteration(&tree, board)?;
            self.statistics.iterations += 1;
            self.statistics.playouts += playouts;

            if verbose {
                log_root_children(&tree);
            }

            if let Some(cap) = self.config.max_iterations {
                if self.statistics.iterations >= cap {
                    self.statistics.hit_iteration_cap = true;
                    break;
                }
            }
            if Instant::now() >= deadline {
                break;
            }
        }

        let finished = Instant::now();
        self.statistics.total_time = finished - start;
        self.statistics.overrun = finished.saturating_duration_since(deadline);
        self.statistics.children = root_child_statistics(&tree);

        if verbose {
            info!(
                "Search finished after {} iterations; choosing among root children",
                self.statistics.iterations
            );
            for child in &self.statistics.children {
                match child.win_ratio() {
                    Some(ratio) => info!("Child {} has a win ratio of {:.2}", child.mv, ratio),
                    None => info!("Child {} has a win ratio of n/a (no visits)", child.mv),
                }
            }
        }

        let chosen = best_move(&tree)?;
        self.statistics.chosen = Some(chosen);

        if verbose {
            info!("Chose {} after {} iterations", chosen, self.statistics.iterations);
            info!("---------- UCT search end ----------");
        } else {
            debug!(
                "Chose {} after {} iterations and {} playouts in {:?}",
                chosen,
                self.statistics.iterations,
                self.statistics.playouts,
                self.statistics.total_time
            );
        }

        Ok(chosen)
    }

    /// Runs one select, simulate, backpropagate cycle
    ///
    /// Returns the number of playouts backpropagated.
    fn run_iteration(&mut self, tree: &SearchTree<B::Player>, board: &B) -> Result<usize> {
        let chosen = self
            .selection_policy
            .select_child(tree, NodeId::ROOT)
            .ok_or(MctsError::NoLegalMoves)?;
        let node = tree.node(chosen);
        let player = node.player;
        let mv = node.mv.ok_or(MctsError::NoLegalMoves)?;

        match &self.pool {
            Some(pool) => {
                // Seeds are drawn in worker order so a seeded agent is
                // reproducible regardless of thread scheduling.
                let seeds: Vec<u64> = (0..self.workers).map(|_| self.rng.gen()).collect();
                let policy = &self.simulation_policy;
                let winners: Vec<Option<B::Player>> = pool.install(|| {
                    seeds
                        .into_par_iter()
                        .map(|seed| {
                            let mut rng = StdRng::seed_from_u64(seed);
                            policy.simulate(player, mv, board.clone(), &mut rng)
                        })
                        .collect()
                });

                for winner in &winners {
                    self.backpropagation_policy
                        .backpropagate(tree, chosen, *winner);
                }
                Ok(winners.len())
            }
            None => {
                let winner = self
                    .simulation_policy
                    .simulate(player, mv, board.clone(), &mut self.rng);
                self.backpropagation_policy
                    .backpropagate(tree, chosen, winner);
                Ok(1)
            }
        }
    }
}

/// Picks the root child with the highest win ratio
///
/// Unvisited children are skipped. Ties go to the first child in expansion
/// order.
///
/// # Errors
///
/// [`MctsError::InsufficientStatistics`] if no root child has been visited.
pub fn best_move<P: Player>(tree: &SearchTree<P>) -> Result<Move> {
    let mut best: Option<(Move, f64)> = None;

    for &child in tree.children(NodeId::ROOT) {
        let node = tree.node(child);
        let (Some(mv), Some(ratio)) = (node.mv, node.stats().win_ratio()) else {
            continue;
        };
        match best {
            Some((_, best_ratio)) if ratio <= best_ratio => {}
            _ => best = Some((mv, ratio)),
        }
    }

    best.map(|(mv, _)| mv)
        .ok_or(MctsError::InsufficientStatistics {
            children: tree.children(NodeId::ROOT).len(),
        })
}

/// Snapshots the counters of every root child
pub fn root_child_statistics<P: Player>(tree: &SearchTree<P>) -> Vec<ChildStatistics> {
    tree.children(NodeId::ROOT)
        .iter()
        .filter_map(|&child| {
            let node = tree.node(child);
            let stats = node.stats();
            node.mv.map(|mv| ChildStatistics {
                mv,
                visits: stats.visit_count,
                wins: stats.win_count,
            })
        })
        .collect()
}

fn log_root_children<P: Player>(tree: &SearchTree<P>) {
    let root = tree.root().stats();
    info!(
        "After backpropagation the root has {} visits, {} wins and {} children:",
        root.visit_count,
        root.win_count,
        tree.children(NodeId::ROOT).len()
    );
    for child in root_child_statistics(tree) {
        match child.win_ratio() {
            Some(ratio) => info!(
                "Child {}: wins {}, visits {}, win ratio {:.2}",
                child.mv, child.wins, child.visits, ratio
            ),
            None => info!(
                "Child {}: wins {}, visits {}, win ratio n/a (no visits yet)",
                child.mv, child.wins, child.visits
            ),
        }
    }
}

impl<B: Board> std::fmt::Debug for UctAgent<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UctAgent")
            .field("config", &self.config)
            .field("workers", &self.workers)
            .finish()
    }
}
