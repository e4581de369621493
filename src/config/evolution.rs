use super::traits::ConfigSection;
use crate::engines::generation::GrammarPreset;
use crate::error::{EvoError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Upper bound on tree length, in nodes.
    pub max_length: usize,
    /// Upper bound on tree depth; a single leaf has depth 0.
    pub max_depth: usize,
    /// Probability of cutting at a function node rather than a leaf.
    pub internal_probability: f64,
    pub crossover_probability: f64,
    pub mutation_probability: f64,
    pub tournament_size: usize,
    /// Rows per parallel evaluation chunk.
    pub batch_size: usize,
    pub grammar: GrammarPreset,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            generations: 50,
            max_length: 50,
            max_depth: 10,
            internal_probability: 0.9,
            crossover_probability: 1.0,
            mutation_probability: 0.25,
            tournament_size: 5,
            batch_size: 1024,
            grammar: GrammarPreset::Arithmetic,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(EvoError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.max_length == 0 || self.max_length > u16::MAX as usize {
            return Err(EvoError::Configuration(format!(
                "Max length must be between 1 and {}",
                u16::MAX
            )));
        }
        for (name, p) in [
            ("Internal probability", self.internal_probability),
            ("Crossover probability", self.crossover_probability),
            ("Mutation probability", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(EvoError::Configuration(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        if self.tournament_size == 0 {
            return Err(EvoError::Configuration(
                "Tournament size must be positive".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(EvoError::Configuration(
                "Batch size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let config = EvolutionConfig {
            mutation_probability: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_length_beyond_node_field() {
        let config = EvolutionConfig {
            max_length: 70_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
