//! Selection policies for the search
//!
//! Selection policies decide which child of a node receives the next
//! playout, balancing exploration and exploitation.

use log::info;

use crate::{
    board::Player,
    tree::{Node, NodeId, SearchTree},
    utils,
};

/// Trait for policies that pick the child to simulate next
pub trait SelectionPolicy<P: Player>: Send + Sync {
    /// Selects a child of `parent`, or `None` if it has no children
    fn select_child(&self, tree: &SearchTree<P>, parent: NodeId) -> Option<NodeId>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy<P>>;
}

/// Upper Confidence Bound for Trees (UCT) selection policy
///
/// Scores each child with
///
/// ```text
/// UCT = wins / visits + C * sqrt(ln(parent_visits) / visits)
/// ```
///
/// where `C` is the exploration factor. Unvisited children score infinity.
/// Ties go to the first child in expansion order.
#[derive(Debug, Clone)]
pub struct UctPolicy {
    /// Exploration factor `C`. Higher values favor under-explored children.
    pub exploration_factor: f64,

    /// Whether to narrate each selection through the log
    pub verbose: bool,
}

impl UctPolicy {
    /// Creates a new UCT policy with the given exploration factor
    pub fn new(exploration_factor: f64) -> Self {
        UctPolicy {
            exploration_factor,
            verbose: false,
        }
    }

    /// Enables narration of every selection
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Calculates the UCT score of `child` relative to `parent`
    pub fn score<P: Player>(&self, child: &Node<P>, parent: &Node<P>) -> f64 {
        let stats = child.stats();
        utils::uct_score(
            stats.win_count,
            stats.visit_count,
            parent.visit_count(),
            self.exploration_factor,
        )
    }
}

impl Default for UctPolicy {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EXPLORATION_FACTOR)
    }
}

impl<P: Player> SelectionPolicy<P> for UctPolicy {
    fn select_child(&self, tree: &SearchTree<P>, parent: NodeId) -> Option<NodeId> {
        let parent_node = tree.node(parent);
        let mut best: Option<(NodeId, f64)> = None;

        for &child in tree.children(parent) {
            let score = self.score(tree.node(child), parent_node);
            // Strict comparison keeps the first maximum.
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child, score)),
            }
        }

        if self.verbose {
            if let Some((child, score)) = best {
                let mv = tree.node(child).mv;
                if score.is_infinite() {
                    info!("Selected child {:?} with UCT of infinity", mv);
                } else {
                    info!("Selected child {:?} with UCT of {:.4}", mv, score);
                }
            }
        }

        best.map(|(child, _)| child)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<P>> {
        Box::new(self.clone())
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl<P: Player> SelectionPolicy<P> for Box<dyn SelectionPolicy<P>> {
    fn select_child(&self, tree: &SearchTree<P>, parent: NodeId) -> Option<NodeId> {
        (**self).select_child(tree, parent)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<P>> {
        (**self).clone_box()
    }
}
