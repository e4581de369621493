use exprevo::data::Dataset;
use exprevo::engines::evaluation::Interpreter;
use exprevo::engines::generation::{
    BasicOffspringGenerator, ChangeVariableMutation, Grammar, GrammarPreset, GrowTreeCreator,
    Individual, SubtreeCrossover, TournamentSelector,
};
use exprevo::tree::Tree;
use exprevo::types::Scalar;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn dataset() -> Dataset {
    let x: Vec<Scalar> = (0..50).map(|i| i as Scalar / 10.0).collect();
    let y: Vec<Scalar> = x.iter().map(|v| 3.0 * v + 1.0).collect();
    Dataset::new(vec![("x".to_string(), x), ("y".to_string(), y)]).unwrap()
}

#[test]
fn test_offspring_loop_keeps_limits_and_scores() {
    let ds = dataset();
    let interpreter = Interpreter::default();
    let inputs: Vec<_> = ds
        .variables()
        .iter()
        .filter(|v| v.name == "x")
        .cloned()
        .collect();
    let target = ds.variable("y").unwrap().hash;
    let range = ds.full_range();

    let mse = |tree: &Tree| {
        let out = interpreter.evaluate_batched::<Scalar>(tree, &ds, range, 16, None);
        out.iter()
            .zip(ds.get_values(target))
            .map(|(p, t)| (p - t) * (p - t))
            .sum::<Scalar>()
            / range.size() as Scalar
    };

    let mut rng = StdRng::seed_from_u64(31);
    let grammar = Grammar::from_preset(GrammarPreset::TypeCoherent);
    let creator = GrowTreeCreator::new(5, 20);
    let population: Vec<Individual> = (0..40)
        .map(|_| {
            let tree = creator.create(&mut rng, &grammar, &inputs).unwrap();
            let fitness = mse(&tree);
            Individual::new(tree, if fitness.is_finite() { fitness } else { Scalar::MAX })
        })
        .collect();

    let generator = BasicOffspringGenerator::new(
        SubtreeCrossover::new(0.9, 5, 20),
        ChangeVariableMutation::new(inputs.clone()),
        TournamentSelector::new(3),
        mse,
    );

    for _ in 0..100 {
        let child = generator
            .generate(&mut rng, &population, 1.0, 0.3)
            .expect("crossover probability is non-zero");
        assert!(child.genotype.len() <= 20);
        assert!(child.genotype.max_depth() <= 5);
        assert!(child.fitness.is_finite());
        child.genotype.validate().unwrap();
    }
}
