use uct_agent::{
    policy::selection::{SelectionPolicy, UctPolicy},
    tree::{Node, NodeId, SearchTree},
    Move, Player,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TestPlayer(u8);

impl Player for TestPlayer {
    fn opponent(&self) -> Self {
        TestPlayer(1 - self.0)
    }
}

fn record_many(node: &Node<TestPlayer>, visits: u32, wins: u32) {
    for i in 0..visits {
        node.record(i < wins);
    }
}

// Create a root with two visited children and one unvisited child
fn create_test_tree() -> (SearchTree<TestPlayer>, Vec<NodeId>) {
    let player = TestPlayer(0);
    let mut tree = SearchTree::new(player);
    let children = vec![
        tree.add_child(NodeId::ROOT, player, Move::new(0, 0)),
        tree.add_child(NodeId::ROOT, player, Move::new(0, 1)),
    ];

    record_many(tree.root(), 60, 0);

    // Child 0: high win rate (0.9), many visits
    record_many(tree.node(children[0]), 50, 45);

    // Child 1: low win rate (0.4), few visits
    record_many(tree.node(children[1]), 10, 4);

    (tree, children)
}

#[test]
fn test_uct_exploration_exploitation_balance() {
    let (tree, children) = create_test_tree();

    // With low exploration factor, exploitation dominates
    let exploitative = UctPolicy::new(0.1);
    assert_eq!(
        exploitative.select_child(&tree, NodeId::ROOT),
        Some(children[0]),
        "With low exploration factor, should prefer child with higher win rate"
    );

    // With very high exploration factor, the less-visited child wins
    let explorative = UctPolicy::new(100.0);
    assert_eq!(
        explorative.select_child(&tree, NodeId::ROOT),
        Some(children[1]),
        "With very high exploration factor, should prefer less-visited child"
    );
}

#[test]
fn test_unvisited_child_is_always_preferred() {
    let (mut tree, _) = create_test_tree();
    let fresh = tree.add_child(NodeId::ROOT, TestPlayer(0), Move::new(1, 1));

    let policy = UctPolicy::new(0.0);
    assert_eq!(policy.score(tree.node(fresh), tree.root()), f64::INFINITY);
    assert_eq!(policy.select_child(&tree, NodeId::ROOT), Some(fresh));
}

#[test]
fn test_uct_score_decreases_with_child_visits() {
    let parent = Node::new(TestPlayer(0), None, None);
    record_many(&parent, 100, 0);
    let policy = UctPolicy::new(1.414);

    let mut previous = f64::INFINITY;
    for visits in 5..60 {
        let child = Node::new(TestPlayer(0), Some(Move::new(0, 0)), Some(NodeId::ROOT));
        record_many(&child, visits, 5);

        let score = policy.score(&child, &parent);
        assert!(score.is_finite());
        assert!(
            score < previous,
            "score should strictly decrease, got {} after {}",
            score,
            previous
        );
        previous = score;
    }
}

#[test]
fn test_uct_score_formula() {
    let parent = Node::new(TestPlayer(0), None, None);
    record_many(&parent, 20, 0);
    let child = Node::new(TestPlayer(0), Some(Move::new(0, 0)), Some(NodeId::ROOT));
    record_many(&child, 10, 5);

    let expected = 0.5 + 2.0 * ((20f64).ln() / 10.0).sqrt();
    let score = UctPolicy::new(2.0).score(&child, &parent);
    assert!((score - expected).abs() < 1e-12);
}

#[test]
fn test_ties_resolve_to_first_child() {
    let player = TestPlayer(1);
    let mut tree = SearchTree::new(player);
    let first = tree.add_child(NodeId::ROOT, player, Move::new(2, 0));
    let second = tree.add_child(NodeId::ROOT, player, Move::new(2, 1));

    // Both unvisited: both infinite
    let policy = UctPolicy::new(1.0);
    assert_eq!(policy.select_child(&tree, NodeId::ROOT), Some(first));

    // Identical statistics: equal finite scores
    record_many(tree.root(), 8, 0);
    record_many(tree.node(first), 4, 2);
    record_many(tree.node(second), 4, 2);
    assert_eq!(policy.select_child(&tree, NodeId::ROOT), Some(first));
}

#[test]
fn test_childless_node_selects_nothing() {
    let tree = SearchTree::new(TestPlayer(0));
    assert_eq!(UctPolicy::default().select_child(&tree, NodeId::ROOT), None);
}

#[test]
fn test_clone_box() {
    let policy = UctPolicy::new(1.414);
    let boxed: Box<dyn SelectionPolicy<TestPlayer>> = Box::new(policy);
    let cloned = boxed.clone_box();

    let (tree, children) = create_test_tree();
    assert_eq!(
        cloned.select_child(&tree, NodeId::ROOT),
        boxed.select_child(&tree, NodeId::ROOT)
    );
    assert!(children.contains(&cloned.select_child(&tree, NodeId::ROOT).unwrap()));
}
