//! Backpropagation of playout results
//!
//! After a playout, every node from the simulated one up to the root records
//! one visit, plus a win when the playout's winner is the node's player.

use log::info;

use crate::{
    board::Player,
    tree::{NodeId, NodeStats, SearchTree},
};

/// Trait for policies that update node statistics after a playout
pub trait BackpropagationPolicy<P: Player>: Send + Sync {
    /// Propagates `winner` from `node` to the root, inclusive
    fn backpropagate(&self, tree: &SearchTree<P>, node: NodeId, winner: Option<P>);

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<P>>;
}

/// Standard win/visit backpropagation
///
/// Each node on the path is updated with a single atomic operation, so
/// concurrent calls sharing nodes never lose an update. Only a shared
/// reference to the tree is needed.
#[derive(Debug, Clone, Default)]
pub struct StandardPolicy {
    /// Whether to narrate every node update through the log
    pub verbose: bool,
}

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy { verbose: false }
    }

    /// Enables narration of every node update
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl<P: Player> BackpropagationPolicy<P> for StandardPolicy {
    fn backpropagate(&self, tree: &SearchTree<P>, node: NodeId, winner: Option<P>) {
        for (_, current) in tree.path_to_root(node) {
            let won = winner == Some(current.player);
            let NodeStats {
                visit_count,
                win_count,
            } = current.record(won);

            if self.verbose {
                info!(
                    "Backpropagated result to node {:?}. It has {} wins and {} visits",
                    current.mv, win_count, visit_count
                );
            }
        }
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<P>> {
        Box::new(self.clone())
    }
}

// Implement BackpropagationPolicy for Box<dyn BackpropagationPolicy>
impl<P: Player> BackpropagationPolicy<P> for Box<dyn BackpropagationPolicy<P>> {
    fn backpropagate(&self, tree: &SearchTree<P>, node: NodeId, winner: Option<P>) {
        (**self).backpropagate(tree, node, winner)
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<P>> {
        (**self).clone_box()
    }
}
