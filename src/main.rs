use anyhow::{bail, Context, Result};
use exprevo::config::ConfigManager;
use exprevo::data::{CsvConnector, Dataset, Variable};
use exprevo::engines::evaluation::Interpreter;
use exprevo::engines::generation::{
    BasicOffspringGenerator, Grammar, GrowTreeCreator, Individual, OnePointMutation, Selector,
    SubtreeCrossover, TournamentSelector,
};
use exprevo::tree::Tree;
use exprevo::types::{Range, Scalar};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: exprevo <config.toml>")?;

    let manager = ConfigManager::new();
    manager
        .load_from_file(&path)
        .with_context(|| format!("Failed to load configuration from {}", path))?;
    let config = manager.get();
    let evo = &config.evolution;

    let dataset = CsvConnector::load_dataset(&config.data.path, None)
        .with_context(|| format!("Failed to load {}", config.data.path.display()))?;
    let target = dataset
        .variable(&config.data.target)
        .with_context(|| format!("Target column '{}' not found", config.data.target))?
        .clone();
    let inputs: Vec<Variable> = dataset
        .variables()
        .iter()
        .filter(|v| v.hash != target.hash)
        .cloned()
        .collect();

    let range = training_range(&dataset, config.data.training_start, config.data.training_end)?;
    let targets = dataset.get_values_in(target.hash, range);
    log::info!(
        "Fitting '{}' from {} inputs over rows [{}, {})",
        target.name,
        inputs.len(),
        range.start(),
        range.end()
    );

    let interpreter = Interpreter::default();
    let mse = |tree: &Tree| -> Scalar {
        let predicted =
            interpreter.evaluate_batched::<Scalar>(tree, &dataset, range, evo.batch_size, None);
        let sum: Scalar = predicted
            .iter()
            .zip(targets)
            .map(|(p, t)| (p - t) * (p - t))
            .sum();
        sum / range.size() as Scalar
    };

    let mut rng = match evo.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let grammar = Grammar::from_preset(evo.grammar);
    let creator = GrowTreeCreator::new(evo.max_depth, evo.max_length);
    let trees = (0..evo.population_size)
        .map(|_| creator.create(&mut rng, &grammar, &inputs))
        .collect::<exprevo::Result<Vec<Tree>>>()
        .context("Failed to create the initial population")?;

    let mut population: Vec<Individual> = trees
        .into_par_iter()
        .map(|tree| {
            let fitness = mse(&tree);
            let fitness = if fitness.is_finite() { fitness } else { Scalar::MAX };
            Individual::new(tree, fitness)
        })
        .collect();

    let generator = BasicOffspringGenerator::new(
        SubtreeCrossover::new(evo.internal_probability, evo.max_depth, evo.max_length),
        OnePointMutation,
        TournamentSelector::new(evo.tournament_size),
        mse,
    );

    for generation in 0..evo.generations {
        let elite = best(&population)?.clone();
        let mut next = Vec::with_capacity(population.len());
        next.push(elite);

        while next.len() < population.len() {
            let child = match generator.generate(
                &mut rng,
                &population,
                evo.crossover_probability,
                evo.mutation_probability,
            ) {
                Some(child) => child,
                None => population[generator.selector.select(&mut rng, &population)].clone(),
            };
            next.push(child);
        }
        population = next;

        let leader = best(&population)?;
        log::info!(
            "Generation {}: best fitness = {:.6e}, length = {}",
            generation + 1,
            leader.fitness,
            leader.genotype.len()
        );
    }

    let winner = best(&population)?;
    println!("{}", winner.genotype.to_infix(&dataset, 6));
    println!("{}", serde_json::to_string_pretty(winner)?);
    Ok(())
}

fn training_range(dataset: &Dataset, start: Option<usize>, end: Option<usize>) -> Result<Range> {
    let start = start.unwrap_or(0);
    let end = end.unwrap_or(dataset.rows());
    if end > dataset.rows() || start >= end {
        bail!(
            "Training range [{}, {}) is empty or exceeds {} rows",
            start,
            end,
            dataset.rows()
        );
    }
    Ok(Range::new(start, end))
}

fn best(population: &[Individual]) -> Result<&Individual> {
    population
        .iter()
        .min_by(|a, b| a.fitness.total_cmp(&b.fitness))
        .context("population is empty")
}
