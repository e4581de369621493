use exprevo::data::Dataset;
use exprevo::engines::generation::{Grammar, GrammarPreset, GrowTreeCreator};
use exprevo::tree::{Node, Tree};
use exprevo::types::{hash_name, NodeType};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn dataset() -> Dataset {
    Dataset::new(vec![
        ("x".to_string(), vec![1.0, 2.0]),
        ("y".to_string(), vec![3.0, 4.0]),
    ])
    .unwrap()
}

#[test]
fn test_grown_trees_are_post_order() {
    let ds = dataset();
    let mut rng = StdRng::seed_from_u64(2024);
    let grammar = Grammar::from_preset(GrammarPreset::Full);
    let creator = GrowTreeCreator::new(8, 64);

    for _ in 0..200 {
        let tree = creator.create(&mut rng, &grammar, ds.variables()).unwrap();
        for i in 0..tree.len() {
            let length = tree[i].length as usize;
            assert!(length <= i + 1);
            assert_eq!(tree.subtree(i).len(), length);
            let operands: usize = tree.children(i).map(|c| tree[c].length as usize).sum();
            assert_eq!(length, 1 + operands);
            assert_eq!(tree.children(i).count(), tree[i].arity as usize);
        }
        assert_eq!(tree[tree.len() - 1].length as usize, tree.len());
    }
}

#[test]
fn test_update_nodes_after_manual_edit() {
    // sin(x) becomes sin(x + 1)
    let mut nodes = Tree::from_nodes(vec![
        Node::variable(hash_name("x"), 1.0),
        Node::function(NodeType::Sin),
    ])
    .into_nodes();
    nodes.insert(1, Node::constant(1.0));
    nodes.insert(2, Node::function(NodeType::Add));

    let tree = Tree::from_nodes(nodes);
    tree.validate().unwrap();
    assert_eq!(tree[3].length, 4);
    assert_eq!(tree.depth(3), 2);
    assert_eq!(tree.level(0), 2);
}

#[test]
fn test_json_round_trip_keeps_structure() {
    let tree = Tree::from_nodes(vec![
        Node::variable(hash_name("x"), 0.5),
        Node::constant(2.0),
        Node::function(NodeType::Div),
        Node::function(NodeType::Exp),
    ]);
    let json = serde_json::to_string(&tree).unwrap();
    let back: Tree = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);
    assert_eq!(back.hash_value(), tree.hash_value());
}

#[test]
fn test_infix_uses_column_names() {
    let ds = dataset();
    let tree = Tree::from_nodes(vec![
        Node::variable(hash_name("y"), 2.0),
        Node::constant(0.5),
        Node::function(NodeType::Add),
    ]);
    assert_eq!(tree.to_infix(&ds, 1), "((2.0 * y) + 0.5)");
}
