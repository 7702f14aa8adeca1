//! Utility functions for the search
//!
//! Pure numeric helpers shared by the selection policy and the final move
//! choice.

/// Calculates the exploitation term of UCT
///
/// This is the plain win rate of a node.
pub fn exploitation_term(wins: u32, visits: u32) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    wins as f64 / visits as f64
}

/// Calculates the exploration term of UCT
///
/// Returns infinity for unvisited children.
pub fn exploration_term(parent_visits: u32, child_visits: u32, exploration_factor: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }

    exploration_factor * ((parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// Calculates the UCT score of a child given its parent's visit count
///
/// ```text
/// UCT = wins / visits + C * sqrt(ln(parent_visits) / visits)
/// ```
///
/// An unvisited child scores positive infinity so that every child is
/// sampled once before any comparison between win rates.
pub fn uct_score(wins: u32, visits: u32, parent_visits: u32, exploration_factor: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    exploitation_term(wins, visits) + exploration_term(parent_visits, visits, exploration_factor)
}

/// Safely calculates the win rate from wins and visits
///
/// Returns `None` if no visits have occurred.
pub fn win_rate(wins: u32, visits: u32) -> Option<f64> {
    if visits == 0 {
        return None;
    }
    Some(wins as f64 / visits as f64)
}
