//! Simulation policies for the search
//!
//! Simulation policies play a game out from a candidate move to estimate how
//! good that move is.

use log::{debug, info, trace};
use rand::{rngs::StdRng, seq::SliceRandom};

use crate::board::{Board, Move, Player};

/// Trait for policies that simulate games
pub trait SimulationPolicy<B: Board>: Send + Sync {
    /// Plays `mv` for `player` on `board`, then plays the game out
    ///
    /// `board` is the policy's private copy. Returns the winner, or `None`
    /// if the game stopped without one.
    fn simulate(
        &self,
        player: B::Player,
        mv: Move,
        board: B,
        rng: &mut StdRng,
    ) -> Option<B::Player>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy<B>>;
}

/// Uniform random playout
///
/// After the candidate move, the players alternate uniformly random legal
/// moves until the board reports a winner. The winner is the player who made
/// the terminal move, even on boards whose `check_winner` names someone
/// else. If the board runs out of legal moves without a winner
/// the playout ends with no winner.
#[derive(Debug, Clone, Default)]
pub struct RandomPlayout {
    /// Whether to narrate every playout move through the log
    pub verbose: bool,
}

impl RandomPlayout {
    /// Creates a new random playout policy
    pub fn new() -> Self {
        RandomPlayout { verbose: false }
    }

    /// Enables narration of every playout move
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl<B: Board> SimulationPolicy<B> for RandomPlayout {
    fn simulate(
        &self,
        player: B::Player,
        mv: Move,
        mut board: B,
        rng: &mut StdRng,
    ) -> Option<B::Player> {
        let mut current_player = player;
        board.make_move(mv, current_player);
        if self.verbose {
            info!("Simulating a random playout from {}. Board:\n{}", mv, board);
        }

        loop {
            // The terminal move's maker is credited, whatever side the
            // board names.
            if board.check_winner().is_some() {
                if self.verbose {
                    info!("Detected win for {:?}. Board:\n{}", current_player, board);
                }
                return Some(current_player);
            }

            current_player = current_player.opponent();
            let moves = board.get_valid_moves();
            let Some(&random_move) = moves.choose(rng) else {
                trace!("Playout stalled with no legal moves and no winner");
                return None;
            };

            if self.verbose {
                debug!("{:?} to move in simulation. Board:\n{}", current_player, board);
                info!("{:?} plays random move {}", current_player, random_move);
            }
            board.make_move(random_move, current_player);
        }
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<B>> {
        Box::new(self.clone())
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl<B: Board> SimulationPolicy<B> for Box<dyn SimulationPolicy<B>> {
    fn simulate(
        &self,
        player: B::Player,
        mv: Move,
        board: B,
        rng: &mut StdRng,
    ) -> Option<B::Player> {
        (**self).simulate(player, mv, board, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<B>> {
        (**self).clone_box()
    }
}
