use super::operators::Crossover;
use crate::tree::Tree;
use rand::seq::SliceRandom;
use rand::Rng;

/// Replaces a random subtree of the first parent with a random subtree of the
/// second parent that fits the remaining length and depth budget.
#[derive(Debug, Clone, Copy)]
pub struct SubtreeCrossover {
    /// Probability of preferring a function node over a leaf.
    pub internal_probability: f64,
    pub max_depth: usize,
    pub max_length: usize,
}

impl SubtreeCrossover {
    pub fn new(internal_probability: f64, max_depth: usize, max_length: usize) -> Self {
        Self {
            internal_probability,
            max_depth,
            max_length,
        }
    }

    /// First node, in shuffled order, whose subtree fits the budget and whose
    /// kind matches a coin flip biased by `internal_probability`.
    pub fn select_random_branch<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        tree: &Tree,
        max_depth: usize,
        max_length: usize,
    ) -> Option<usize> {
        let mut indices: Vec<usize> = (0..tree.len()).collect();
        indices.shuffle(rng);

        for i in indices {
            if tree[i].length as usize > max_length || tree.depth(i) > max_depth {
                continue;
            }
            if (rng.gen::<f64>() < self.internal_probability) != tree[i].is_leaf() {
                return Some(i);
            }
        }
        None
    }

    /// Cut point in the first parent. Falls back to the last scanned index
    /// when the biased coin never matches.
    pub fn cut_random<R: Rng + ?Sized>(&self, rng: &mut R, tree: &Tree) -> usize {
        let mut indices: Vec<usize> = (0..tree.len()).collect();
        indices.shuffle(rng);

        for &i in &indices {
            if (rng.gen::<f64>() < self.internal_probability) != tree[i].is_leaf() {
                return i;
            }
        }
        indices[indices.len() - 1]
    }

    /// Donor budget `(depth, length)` for replacing the subtree at `i`.
    pub fn branch_budget(&self, lhs: &Tree, i: usize) -> (usize, usize) {
        let max_depth = self.max_depth.saturating_sub(lhs.level(i));
        let kept = lhs.len() - lhs[i].length as usize;
        let max_length = self.max_length.saturating_sub(kept);
        (max_depth, max_length)
    }

    /// `lhs` with the subtree at `i` replaced by the subtree of `rhs` at `j`.
    pub fn splice(lhs: &Tree, i: usize, rhs: &Tree, j: usize) -> Tree {
        let left = lhs.nodes();
        let donor = rhs.subtree(j);
        let start = lhs.subtree_start(i);

        let mut nodes = Vec::with_capacity(left.len() - (i + 1 - start) + donor.len());
        nodes.extend_from_slice(&left[..start]);
        nodes.extend_from_slice(donor);
        nodes.extend_from_slice(&left[i + 1..]);

        Tree::from_nodes(nodes)
    }
}

impl Crossover for SubtreeCrossover {
    fn cross<R: Rng + ?Sized>(&self, rng: &mut R, lhs: &Tree, rhs: &Tree) -> Tree {
        assert!(!lhs.is_empty() && !rhs.is_empty(), "crossover needs non-empty parents");

        let i = self.cut_random(rng, lhs);
        let (max_branch_depth, max_branch_length) = self.branch_budget(lhs, i);

        match self.select_random_branch(rng, rhs, max_branch_depth, max_branch_length) {
            Some(j) => Self::splice(lhs, i, rhs, j),
            None => {
                log::trace!(
                    "no donor subtree within depth {} / length {}, keeping parent",
                    max_branch_depth,
                    max_branch_length
                );
                lhs.clone()
            }
        }
    }
}
