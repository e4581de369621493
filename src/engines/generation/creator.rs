use super::grammar::Grammar;
use crate::data::Variable;
use crate::error::{EvoError, Result};
use crate::tree::{Node, Tree};
use crate::types::{NodeType, Scalar};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_distr::StandardNormal;

/// Grows random trees bounded in depth and length.
#[derive(Debug, Clone, Copy)]
pub struct GrowTreeCreator {
    pub max_depth: usize,
    pub max_length: usize,
}

impl GrowTreeCreator {
    pub fn new(max_depth: usize, max_length: usize) -> Self {
        Self {
            max_depth,
            max_length,
        }
    }

    pub fn create<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grammar: &Grammar,
        variables: &[Variable],
    ) -> Result<Tree> {
        if self.max_length == 0 {
            return Err(EvoError::Generation("max length must be positive".to_string()));
        }

        let symbols = grammar.allowed_symbols();
        let functions: Vec<(NodeType, f64)> =
            symbols.iter().copied().filter(|(ty, _)| !ty.is_leaf()).collect();
        let leaves: Vec<(NodeType, f64)> = symbols
            .iter()
            .copied()
            .filter(|(ty, _)| ty.is_leaf())
            .filter(|(ty, _)| *ty != NodeType::Variable || !variables.is_empty())
            .collect();

        if leaves.is_empty() {
            let msg = if grammar.is_enabled(NodeType::Variable) {
                "grammar only allows variables but no input variables were given"
            } else {
                "no leaf symbol is enabled"
            };
            return Err(EvoError::Generation(msg.to_string()));
        }

        let grow = Grow {
            functions,
            leaves,
            variables,
            min_arity: grammar.minimum_function_arity(),
        };

        let mut nodes = Vec::with_capacity(self.max_length);
        grow.branch(rng, &mut nodes, self.max_depth, self.max_length, true)?;

        if nodes.len() > self.max_length {
            return Err(EvoError::Generation(format!(
                "grown tree has {} nodes, limit is {}",
                nodes.len(),
                self.max_length
            )));
        }
        Ok(Tree::from_nodes(nodes))
    }
}

struct Grow<'a> {
    functions: Vec<(NodeType, f64)>,
    leaves: Vec<(NodeType, f64)>,
    variables: &'a [Variable],
    min_arity: usize,
}

impl Grow<'_> {
    /// Appends a subtree of at most `budget` nodes and height `depth`.
    fn branch<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        nodes: &mut Vec<Node>,
        depth: usize,
        budget: usize,
        root: bool,
    ) -> Result<()> {
        if depth == 0 || self.functions.is_empty() || budget < 1 + self.min_arity {
            nodes.push(self.leaf(rng)?);
            return Ok(());
        }

        let mut candidates: Vec<(NodeType, f64)> = self
            .functions
            .iter()
            .copied()
            .filter(|(ty, _)| 1 + ty.arity() as usize <= budget)
            .collect();
        if root {
            candidates.extend_from_slice(&self.leaves);
        }

        let node_type = sample(rng, &candidates)?;
        if node_type.is_leaf() {
            nodes.push(self.leaf_of(rng, node_type));
            return Ok(());
        }

        let arity = node_type.arity() as usize;
        let child_budget = (budget - 1) / arity;
        for _ in 0..arity {
            self.branch(rng, nodes, depth - 1, child_budget, false)?;
        }
        nodes.push(Node::function(node_type));
        Ok(())
    }

    fn leaf<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Node> {
        let node_type = sample(rng, &self.leaves)?;
        Ok(self.leaf_of(rng, node_type))
    }

    fn leaf_of<R: Rng + ?Sized>(&self, rng: &mut R, node_type: NodeType) -> Node {
        let value: Scalar = rng.sample(StandardNormal);
        match (node_type, self.variables.choose(rng)) {
            (NodeType::Variable, Some(variable)) => Node::variable(variable.hash, value),
            _ => Node::constant(value),
        }
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, symbols: &[(NodeType, f64)]) -> Result<NodeType> {
    let dist = WeightedIndex::new(symbols.iter().map(|(_, f)| *f))
        .map_err(|e| EvoError::Generation(format!("cannot sample symbol: {}", e)))?;
    Ok(symbols[dist.sample(rng)].0)
}
