//! Traits defining the board collaborator the agent searches over.
//!
//! The [`Board`] trait is the only interface the search needs from a game.
//! Legality, move application and terminal-state detection all live behind
//! it; the agent never inspects a position directly.

use std::fmt::{self, Debug, Display};

/// A board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    /// Zero-based row index
    pub row: usize,

    /// Zero-based column index
    pub column: usize,
}

impl Move {
    /// Creates a move at the given coordinate
    pub fn new(row: usize, column: usize) -> Self {
        Move { row, column }
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, column): (usize, usize)) -> Self {
        Move { row, column }
    }
}

impl From<Move> for (usize, usize) {
    fn from(mv: Move) -> Self {
        (mv.row, mv.column)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

/// Trait for the two sides of a game
///
/// Players are small copyable identities. The playout alternates turns with
/// [`Player::opponent`], so the game must be strictly two-sided.
pub trait Player: Copy + Debug + Eq + Send + Sync {
    /// Returns the side that moves after this one
    fn opponent(&self) -> Self;
}

/// Trait defining the board interface required by the agent
///
/// Implementations must uphold a few contracts the search relies on:
///
/// - `Clone` produces a fully independent copy. Playouts mutate their own
///   copy and never the board handed to [`crate::UctAgent::choose_move`].
/// - [`Board::check_winner`] returns `None` for every non-terminal position
///   and `Some(winner)` for every terminal one reachable by legal play.
///   Random playouts loop until it reports a winner or no legal move is left.
/// - `Display` renders the position; it is only used by verbose narration.
///
/// # Example
///
/// ```
/// use std::fmt;
/// use uct_agent::{Board, Move, Player};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Side { A, B }
///
/// impl Player for Side {
///     fn opponent(&self) -> Self {
///         match self { Side::A => Side::B, Side::B => Side::A }
///     }
/// }
///
/// // First player to take a cell of a one-row strip wins.
/// #[derive(Clone)]
/// struct Strip { taken: Option<Side>, width: usize }
///
/// impl fmt::Display for Strip {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{:?}", self.taken)
///     }
/// }
///
/// impl Board for Strip {
///     type Player = Side;
///
///     fn get_valid_moves(&self) -> Vec<Move> {
///         if self.taken.is_some() { return vec![]; }
///         (0..self.width).map(|c| Move::new(0, c)).collect()
///     }
///
///     fn make_move(&mut self, _mv: Move, player: Side) {
///         self.taken = Some(player);
///     }
///
///     fn check_winner(&self) -> Option<Side> {
///         self.taken
///     }
/// }
/// ```
pub trait Board: Clone + Send + Sync + Display {
    /// The type identifying the two sides
    type Player: Player;

    /// Returns every legal move from the current position
    ///
    /// Returns an empty list for terminal positions.
    fn get_valid_moves(&self) -> Vec<Move>;

    /// Applies a move for the given player
    ///
    /// Behaviour is unspecified if the move is not currently legal.
    fn make_move(&mut self, mv: Move, player: Self::Player);

    /// Returns the winner if the position is terminal
    fn check_winner(&self) -> Option<Self::Player>;
}
