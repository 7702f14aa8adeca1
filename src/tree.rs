//! Tree data structures for the search
//!
//! The tree is an arena of [`Node`]s addressed by [`NodeId`]. Each node owns
//! its children through the arena and keeps a non-owning parent index used
//! only when backpropagating. A tree lives for exactly one decision.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::board::{Move, Player};

/// Index of a node in its [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root of every tree
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visits live in the high half of the packed counter, wins in the low half.
const VISIT_SHIFT: u32 = 32;
const WIN_MASK: u64 = (1 << VISIT_SHIFT) - 1;

/// A consistent snapshot of a node's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeStats {
    /// Completed simulations that passed through the node
    pub visit_count: u32,

    /// Those simulations won by the node's player
    pub win_count: u32,
}

impl NodeStats {
    fn unpack(packed: u64) -> Self {
        NodeStats {
            visit_count: (packed >> VISIT_SHIFT) as u32,
            win_count: (packed & WIN_MASK) as u32,
        }
    }

    /// Returns the win ratio, or `None` for an unvisited node
    pub fn win_ratio(&self) -> Option<f64> {
        if self.visit_count == 0 {
            return None;
        }
        Some(self.win_count as f64 / self.visit_count as f64)
    }
}

/// Represents a node in the search tree
///
/// `player` is the side that makes `mv`, not necessarily the side to move
/// next. Both counters are packed into a single atomic word so one
/// `fetch_add` updates them together and no reader ever observes
/// `win_count > visit_count`.
pub struct Node<P: Player> {
    /// The side whose move this node represents
    pub player: P,

    /// The move this node represents (`None` for the root)
    pub mv: Option<Move>,

    children: Vec<NodeId>,

    /// Non-owning back-reference to the parent (`None` for the root)
    pub parent: Option<NodeId>,

    stats: AtomicU64,
}

impl<P: Player> Node<P> {
    /// Creates a node with zeroed statistics
    pub fn new(player: P, mv: Option<Move>, parent: Option<NodeId>) -> Self {
        Node {
            player,
            mv,
            children: Vec::new(),
            parent,
            stats: AtomicU64::new(0),
        }
    }

    /// Returns a snapshot of both counters
    pub fn stats(&self) -> NodeStats {
        NodeStats::unpack(self.stats.load(Ordering::Acquire))
    }

    /// Returns the number of visits to this node
    pub fn visit_count(&self) -> u32 {
        self.stats().visit_count
    }

    /// Returns the number of wins recorded for this node's player
    pub fn win_count(&self) -> u32 {
        self.stats().win_count
    }

    /// Records one completed simulation, counting a win if `won`
    ///
    /// The read-modify-write is a single atomic operation, so concurrent
    /// callers never lose updates. Each counter holds at most `u32::MAX`
    /// simulations; past that the visit count wraps to zero.
    pub fn record(&self, won: bool) -> NodeStats {
        let delta = (1u64 << VISIT_SHIFT) | won as u64;
        let previous = self.stats.fetch_add(delta, Ordering::AcqRel);
        NodeStats::unpack(previous.wrapping_add(delta))
    }

    /// Returns the children in expansion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if the node has not been expanded
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl<P: Player> fmt::Debug for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("Node")
            .field("player", &self.player)
            .field("mv", &self.mv)
            .field("visit_count", &stats.visit_count)
            .field("win_count", &stats.win_count)
            .field("children", &self.children.len())
            .finish()
    }
}

/// Arena holding every node of one decision's tree
///
/// Node 0 is always the root. Nodes are only ever appended, so a
/// [`NodeId`] stays valid for the lifetime of the tree.
#[derive(Debug)]
pub struct SearchTree<P: Player> {
    nodes: Vec<Node<P>>,
}

impl<P: Player> SearchTree<P> {
    /// Creates a tree holding only a root for `player`
    pub fn new(player: P) -> Self {
        SearchTree {
            nodes: vec![Node::new(player, None, None)],
        }
    }

    /// Returns the root node
    pub fn root(&self) -> &Node<P> {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Returns the node with the given id
    ///
    /// Panics if the id did not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id.index()]
    }

    /// Appends a child under `parent` and returns its id
    ///
    /// No uniqueness check is made; that is the expander's job.
    pub fn add_child(&mut self, parent: NodeId, player: P, mv: Move) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(player, Some(mv), Some(parent)));
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Returns the children of a node in expansion order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// Total number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates from `id` up to the root, inclusive
    pub fn path_to_root(&self, id: NodeId) -> PathToRoot<'_, P> {
        PathToRoot {
            tree: self,
            next: Some(id),
        }
    }

    /// Renders the tree as indented text
    pub fn visualize(&self) -> String {
        let mut output = String::new();
        self.visualize_node(NodeId::ROOT, 0, &mut output);
        output
    }

    fn visualize_node(&self, id: NodeId, depth: usize, output: &mut String) {
        let node = self.node(id);
        let stats = node.stats();
        let label = match node.mv {
            Some(mv) => mv.to_string(),
            None => "Root".to_string(),
        };
        let ratio = match stats.win_ratio() {
            Some(ratio) => format!("{:.3}", ratio),
            None => "n/a".to_string(),
        };

        output.push_str(&format!(
            "{}{} {:?} (visits: {}, wins: {}, ratio: {})\n",
            "  ".repeat(depth),
            label,
            node.player,
            stats.visit_count,
            stats.win_count,
            ratio
        ));

        for &child in &node.children {
            self.visualize_node(child, depth + 1, output);
        }
    }
}

/// Iterator over a node and its ancestors
pub struct PathToRoot<'a, P: Player> {
    tree: &'a SearchTree<P>,
    next: Option<NodeId>,
}

impl<'a, P: Player> Iterator for PathToRoot<'a, P> {
    type Item = (NodeId, &'a Node<P>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.node(id);
        self.next = node.parent;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Side {
        Left,
        Right,
    }

    impl Player for Side {
        fn opponent(&self) -> Self {
            match self {
                Side::Left => Side::Right,
                Side::Right => Side::Left,
            }
        }
    }

    #[test]
    fn new_tree_has_childless_root() {
        let tree = SearchTree::new(Side::Left);
        assert_eq!(tree.len(), 1);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().mv, None);
        assert_eq!(tree.root().parent, None);
        assert_eq!(tree.root().stats(), NodeStats::default());
    }

    #[test]
    fn children_link_back_to_parent() {
        let mut tree = SearchTree::new(Side::Left);
        let a = tree.add_child(NodeId::ROOT, Side::Left, Move::new(0, 1));
        let b = tree.add_child(NodeId::ROOT, Side::Left, Move::new(1, 0));

        assert_eq!(tree.children(NodeId::ROOT), &[a, b]);
        assert_eq!(tree.node(b).parent, Some(NodeId::ROOT));
        assert_eq!(tree.node(a).mv, Some(Move::new(0, 1)));

        let path: Vec<NodeId> = tree.path_to_root(b).map(|(id, _)| id).collect();
        assert_eq!(path, vec![b, NodeId::ROOT]);
    }

    #[test]
    fn record_updates_both_counters() {
        let node = Node::new(Side::Right, None, None);
        node.record(true);
        node.record(false);
        let stats = node.record(true);

        assert_eq!(stats.visit_count, 3);
        assert_eq!(stats.win_count, 2);
        assert_eq!(node.stats(), stats);
    }

    #[test]
    fn concurrent_records_are_not_lost() {
        let node = Arc::new(Node::new(Side::Left, None, None));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let node = Arc::clone(&node);
                thread::spawn(move || {
                    for i in 0..1000 {
                        let stats = node.record((i + t) % 2 == 0);
                        assert!(stats.win_count <= stats.visit_count);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = node.stats();
        assert_eq!(stats.visit_count, 8000);
        assert_eq!(stats.win_count, 4000);
    }

    #[test]
    fn win_ratio_is_undefined_without_visits() {
        assert_eq!(NodeStats::default().win_ratio(), None);
        let stats = NodeStats {
            visit_count: 4,
            win_count: 1,
        };
        assert_eq!(stats.win_ratio(), Some(0.25));
    }

    #[test]
    fn visualize_indents_children() {
        let mut tree = SearchTree::new(Side::Left);
        let child = tree.add_child(NodeId::ROOT, Side::Left, Move::new(2, 3));
        tree.node(child).record(true);

        let text = tree.visualize();
        assert!(text.starts_with("Root"));
        assert!(text.contains("  2,3 Left (visits: 1, wins: 1, ratio: 1.000)"));
    }

    #[test]
    fn record_wraps_visits_at_the_counter_ceiling() {
        let node = Node::new(Side::Left, None, None);
        node.stats
            .store((u64::from(u32::MAX) << VISIT_SHIFT) | 7, Ordering::Release);

        let stats = node.record(false);
        assert_eq!(stats.visit_count, 0);
        assert_eq!(stats.win_count, 7);
        assert_eq!(node.stats(), stats);
    }

    #[test]
    fn node_children_match_tree_view() {
        let mut tree = SearchTree::new(Side::Right);
        let a = tree.add_child(NodeId::ROOT, Side::Right, Move::new(0, 0));
        assert_eq!(tree.root().children(), &[a]);
        assert!(tree.node(a).children().is_empty());
    }
}
