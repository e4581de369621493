use super::operators::{Crossover, Evaluator, Individual, Mutator, Selector};
use crate::types::Scalar;
use rand::Rng;

/// Selects parents, recombines and/or mutates them, and scores the child.
pub struct BasicOffspringGenerator<C, M, S, E> {
    pub crossover: C,
    pub mutator: M,
    pub selector: S,
    pub evaluator: E,
}

impl<C, M, S, E> BasicOffspringGenerator<C, M, S, E>
where
    C: Crossover,
    M: Mutator,
    S: Selector,
    E: Evaluator,
{
    pub fn new(crossover: C, mutator: M, selector: S, evaluator: E) -> Self {
        Self {
            crossover,
            mutator,
            selector,
            evaluator,
        }
    }

    /// Returns `None` when neither crossover nor mutation fires.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        population: &[Individual],
        p_crossover: f64,
        p_mutation: f64,
    ) -> Option<Individual> {
        let do_crossover = rng.gen_bool(p_crossover.clamp(0.0, 1.0));
        let do_mutation = rng.gen_bool(p_mutation.clamp(0.0, 1.0));
        if !do_crossover && !do_mutation {
            return None;
        }

        let first = self.selector.select(rng, population);
        let mut child = if do_crossover {
            let second = self.selector.select(rng, population);
            self.crossover
                .cross(rng, &population[first].genotype, &population[second].genotype)
        } else {
            population[first].genotype.clone()
        };

        if do_mutation {
            child = self.mutator.mutate(rng, child);
        }

        let mut fitness = self.evaluator.evaluate(rng, &child);
        if !fitness.is_finite() {
            log::warn!("non-finite fitness {} replaced by the worst value", fitness);
            fitness = Scalar::MAX;
        }
        Some(Individual::new(child, fitness))
    }
}
