use crate::tree::Tree;
use crate::types::Scalar;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Population member. Lower fitness is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub genotype: Tree,
    pub fitness: Scalar,
}

impl Individual {
    pub fn new(genotype: Tree, fitness: Scalar) -> Self {
        Self { genotype, fitness }
    }
}

/// Recombines two parents into one offspring.
pub trait Crossover: Send + Sync {
    fn cross<R: Rng + ?Sized>(&self, rng: &mut R, lhs: &Tree, rhs: &Tree) -> Tree;
}

/// Produces a modified copy of a tree.
pub trait Mutator: Send + Sync {
    fn mutate<R: Rng + ?Sized>(&self, rng: &mut R, tree: Tree) -> Tree;
}

/// Picks the index of a parent in a population.
pub trait Selector: Send + Sync {
    fn select<R: Rng + ?Sized>(&self, rng: &mut R, population: &[Individual]) -> usize;
}

/// Scores a tree; lower is better.
pub trait Evaluator: Send + Sync {
    fn evaluate<R: Rng + ?Sized>(&self, rng: &mut R, tree: &Tree) -> Scalar;
}

impl<F> Evaluator for F
where
    F: Fn(&Tree) -> Scalar + Send + Sync,
{
    fn evaluate<R: Rng + ?Sized>(&self, _rng: &mut R, tree: &Tree) -> Scalar {
        self(tree)
    }
}

/// Tournament selection: pick best of K random candidates
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelector {
    pub tournament_size: usize,
}

impl TournamentSelector {
    pub fn new(tournament_size: usize) -> Self {
        Self {
            tournament_size: tournament_size.max(1),
        }
    }
}

impl Selector for TournamentSelector {
    fn select<R: Rng + ?Sized>(&self, rng: &mut R, population: &[Individual]) -> usize {
        assert!(!population.is_empty(), "cannot select from an empty population");

        let mut best_idx = rng.gen_range(0..population.len());
        let mut best_fitness = population[best_idx].fitness;

        for _ in 1..self.tournament_size {
            let idx = rng.gen_range(0..population.len());
            if population[idx].fitness < best_fitness {
                best_idx = idx;
                best_fitness = population[idx].fitness;
            }
        }

        best_idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population() -> Vec<Individual> {
        (0..10)
            .map(|i| Individual::new(Tree::from_nodes(vec![Node::constant(i as f64)]), i as f64))
            .collect()
    }

    #[test]
    fn test_tournament_prefers_lower_fitness() {
        let pop = population();
        let mut rng = StdRng::seed_from_u64(7);
        let selector = TournamentSelector::new(pop.len() * 4);
        let picks: Vec<usize> = (0..20).map(|_| selector.select(&mut rng, &pop)).collect();
        // a huge tournament almost always sees the best member
        assert!(picks.iter().filter(|&&i| i == 0).count() >= 18);
    }

    #[test]
    fn test_tournament_of_one_is_uniform_pick() {
        let pop = population();
        let mut rng = StdRng::seed_from_u64(11);
        let selector = TournamentSelector::new(1);
        for _ in 0..50 {
            assert!(selector.select(&mut rng, &pop) < pop.len());
        }
    }

    #[test]
    fn test_closure_evaluator() {
        let eval = |tree: &Tree| tree.len() as Scalar;
        let mut rng = StdRng::seed_from_u64(1);
        let tree = Tree::from_nodes(vec![Node::constant(1.0)]);
        assert_eq!(eval.evaluate(&mut rng, &tree), 1.0);
    }
}
