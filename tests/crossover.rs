use exprevo::data::Variable;
use exprevo::engines::generation::{Crossover, Grammar, GrammarPreset, GrowTreeCreator, SubtreeCrossover};
use exprevo::tree::{Node, Tree};
use exprevo::types::{hash_name, NodeType};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn inputs() -> Vec<Variable> {
    ["x", "y", "z"]
        .iter()
        .enumerate()
        .map(|(index, name)| Variable {
            name: name.to_string(),
            hash: hash_name(name),
            index,
        })
        .collect()
}

fn x_times_two() -> Tree {
    Tree::from_nodes(vec![
        Node::variable(hash_name("x"), 1.0),
        Node::constant(2.0),
        Node::function(NodeType::Mul),
    ])
}

fn assert_post_order(tree: &Tree) {
    for i in 0..tree.len() {
        let length = tree[i].length as usize;
        assert!(length >= 1 && length <= i + 1, "node {} has length {}", i, length);
        let children: usize = tree.children(i).map(|c| tree[c].length as usize).sum();
        assert_eq!(length, 1 + children, "node {}", i);
    }
}

#[test]
fn test_offspring_stay_within_limits() {
    let mut rng = StdRng::seed_from_u64(1234);
    let grammar = Grammar::from_preset(GrammarPreset::Full);
    let vars = inputs();
    let (max_depth, max_length) = (7, 40);
    let creator = GrowTreeCreator::new(max_depth, max_length);
    let crossover = SubtreeCrossover::new(0.9, max_depth, max_length);

    for _ in 0..300 {
        let lhs = creator.create(&mut rng, &grammar, &vars).unwrap();
        let rhs = creator.create(&mut rng, &grammar, &vars).unwrap();
        let child = crossover.cross(&mut rng, &lhs, &rhs);

        assert!(child.len() <= max_length);
        assert!(child.max_depth() <= max_depth);
        child.validate().unwrap();
        assert_post_order(&child);
    }
}

#[test]
fn test_no_donor_returns_first_parent() {
    let mut rng = StdRng::seed_from_u64(8);
    let lhs = x_times_two();

    // only function nodes qualify, and the donor has none
    let crossover = SubtreeCrossover::new(1.0, 5, 10);
    let donor = Tree::from_nodes(vec![Node::constant(3.0)]);
    for _ in 0..20 {
        assert_eq!(crossover.cross(&mut rng, &lhs, &donor), lhs);
    }

    // a length budget smaller than any function subtree
    let crossover = SubtreeCrossover::new(1.0, 5, 1);
    for _ in 0..20 {
        assert_eq!(crossover.cross(&mut rng, &lhs, &x_times_two()), lhs);
    }
}

#[test]
fn test_leaf_swap_scenario() {
    let lhs = x_times_two();
    let donor = Tree::from_nodes(vec![Node::constant(3.0)]);
    let crossover = SubtreeCrossover::new(0.0, 2, 3);

    let mut saw_constant_swap = false;
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let child = crossover.cross(&mut rng, &lhs, &donor);

        assert_eq!(child.len(), 3);
        assert_eq!(child[2].node_type, NodeType::Mul);
        if child[0].is_variable() {
            assert_eq!(child[1].value, 3.0);
            saw_constant_swap = true;
        } else {
            assert_eq!(child[0].value, 3.0);
            assert_eq!(child[1].value, 2.0);
        }
    }
    assert!(saw_constant_swap);

    let spliced = SubtreeCrossover::splice(&lhs, 1, &donor, 0);
    assert!(spliced[0].is_variable());
    assert_eq!(spliced[1].value, 3.0);
    assert_eq!(spliced[2].length, 3);
}

#[test]
fn test_crossover_is_reproducible() {
    let grammar = Grammar::from_preset(GrammarPreset::TypeCoherent);
    let vars = inputs();
    let creator = GrowTreeCreator::new(5, 25);
    let crossover = SubtreeCrossover::new(0.9, 5, 25);

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let lhs = creator.create(&mut rng, &grammar, &vars).unwrap();
        let rhs = creator.create(&mut rng, &grammar, &vars).unwrap();
        crossover.cross(&mut rng, &lhs, &rhs)
    };
    assert_eq!(run(99), run(99));
}
