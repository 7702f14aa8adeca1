//! Expansion of a node into all of its legal continuations.

use log::info;

use crate::{
    board::Board,
    tree::{NodeId, SearchTree},
};

/// Creates one child of `node` per legal move on `board`
///
/// Children carry the same player as `node`: they are alternative moves by
/// that player, and turn alternation happens inside the playout. Returns the
/// number of children created. A board with no legal moves leaves the node
/// childless.
///
/// The node must not already be expanded; expanding twice would duplicate
/// its children.
pub fn expand<B: Board>(
    tree: &mut SearchTree<B::Player>,
    node: NodeId,
    board: &B,
    verbose: bool,
) -> usize {
    debug_assert!(tree.node(node).is_leaf(), "node {} already expanded", node);

    let player = tree.node(node).player;
    let moves = board.get_valid_moves();
    for &mv in &moves {
        tree.add_child(node, player, mv);
        if verbose {
            info!("Expanded child {} of node {}", mv, node);
        }
    }
    moves.len()
}
