pub mod creator;
pub mod crossover;
pub mod grammar;
pub mod mutation;
pub mod offspring;
pub mod operators;

pub use creator::GrowTreeCreator;
pub use crossover::SubtreeCrossover;
pub use grammar::{Grammar, GrammarPreset};
pub use mutation::{ChangeVariableMutation, OnePointMutation};
pub use offspring::BasicOffspringGenerator;
pub use operators::{Crossover, Evaluator, Individual, Mutator, Selector, TournamentSelector};
