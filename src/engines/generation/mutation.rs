use super::operators::Mutator;
use crate::data::Variable;
use crate::tree::Tree;
use crate::types::Scalar;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use rand_distr::StandardNormal;

/// Perturbs the value of one random leaf with standard normal noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePointMutation;

impl Mutator for OnePointMutation {
    fn mutate<R: Rng + ?Sized>(&self, rng: &mut R, mut tree: Tree) -> Tree {
        let leaf = tree
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_leaf())
            .map(|(i, _)| i)
            .choose(rng);
        if let Some(i) = leaf {
            let noise: Scalar = rng.sample(StandardNormal);
            tree.nodes_mut()[i].value += noise;
        }
        tree
    }
}

/// Points one random variable node at a different input column.
#[derive(Debug, Clone, Default)]
pub struct ChangeVariableMutation {
    variables: Vec<Variable>,
}

impl ChangeVariableMutation {
    pub fn new(variables: Vec<Variable>) -> Self {
        Self { variables }
    }
}

impl Mutator for ChangeVariableMutation {
    fn mutate<R: Rng + ?Sized>(&self, rng: &mut R, mut tree: Tree) -> Tree {
        let target = tree
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_variable())
            .map(|(i, _)| i)
            .choose(rng);
        let (Some(i), Some(variable)) = (target, self.variables.choose(rng)) else {
            return tree;
        };

        let node = &mut tree.nodes_mut()[i];
        node.hash_value = variable.hash;
        tree.update_nodes();
        tree
    }
}
