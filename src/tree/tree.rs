use super::node::Node;
use crate::error::{EvoError, Result};
use crate::types::Scalar;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::Index;

/// Expression tree stored as a post-order node sequence.
///
/// The children of node `i` occupy the `length - 1` positions directly before
/// it, operands left to right, so every subtree is the contiguous slice
/// `[i + 1 - length, i]` and the root is always the last node.
///
/// Trees are assembled from raw node sequences; [`Tree::update_nodes`] must run
/// before a freshly built sequence is used. A sequence that does not respect
/// the layout is a precondition violation for every consumer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Builds a tree from raw nodes and normalizes it.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self::new(nodes).updated()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable access for value edits. Structural fields must stay consistent.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Re-derives subtree lengths and structural hashes.
    pub fn update_nodes(&mut self) -> &mut Self {
        for i in 0..self.nodes.len() {
            let node = self.nodes[i];
            if node.is_leaf() {
                let n = &mut self.nodes[i];
                n.length = 1;
                n.calculated_hash_value = n.hash_value;
                continue;
            }

            let mut hasher = FxHasher::default();
            node.hash_value.hash(&mut hasher);
            let mut length = 1usize;
            for c in self.children(i) {
                length += self.nodes[c].length as usize;
                self.nodes[c].calculated_hash_value.hash(&mut hasher);
            }

            let n = &mut self.nodes[i];
            n.length = length as u16;
            n.calculated_hash_value = hasher.finish();
        }
        self
    }

    pub fn updated(mut self) -> Self {
        self.update_nodes();
        self
    }

    /// Checks arities and lengths against the post-order layout.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(EvoError::InvalidTree("tree is empty".to_string()));
        }

        let mut stack: Vec<usize> = Vec::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if node.arity != node.node_type.arity() {
                return Err(EvoError::InvalidTree(format!(
                    "node {} ({}) has arity {}, expected {}",
                    i,
                    node.node_type,
                    node.arity,
                    node.node_type.arity()
                )));
            }
            let arity = node.arity as usize;
            if stack.len() < arity {
                return Err(EvoError::InvalidTree(format!(
                    "node {} ({}) expects {} operands, found {}",
                    i,
                    node.node_type,
                    arity,
                    stack.len()
                )));
            }
            let length = 1 + stack.drain(stack.len() - arity..).sum::<usize>();
            if length != node.length as usize {
                return Err(EvoError::InvalidTree(format!(
                    "node {} has length {}, layout implies {}",
                    i, node.length, length
                )));
            }
            stack.push(length);
        }

        if stack.len() != 1 {
            return Err(EvoError::InvalidTree(format!(
                "sequence holds {} disjoint subtrees",
                stack.len()
            )));
        }
        Ok(())
    }

    /// Index of the first node of the subtree rooted at `i`.
    pub fn subtree_start(&self, i: usize) -> usize {
        i + 1 - self.nodes[i].length as usize
    }

    pub fn subtree(&self, i: usize) -> &[Node] {
        &self.nodes[self.subtree_start(i)..=i]
    }

    /// Child indices of node `i`, last operand first.
    pub fn children(&self, i: usize) -> Children<'_> {
        Children {
            nodes: &self.nodes,
            next: i.wrapping_sub(1),
            remaining: self.nodes[i].arity,
        }
    }

    /// Height of the subtree rooted at `i`; a leaf has depth 0.
    pub fn depth(&self, i: usize) -> usize {
        let start = self.subtree_start(i);
        let mut depths = vec![0usize; i + 1 - start];
        for k in start..=i {
            let d = self
                .children(k)
                .map(|c| depths[c - start] + 1)
                .max()
                .unwrap_or(0);
            depths[k - start] = d;
        }
        depths[i - start]
    }

    /// Depth of the whole tree.
    pub fn max_depth(&self) -> usize {
        match self.nodes.len() {
            0 => 0,
            n => self.depth(n - 1),
        }
    }

    /// Distance from the root to node `i`; the root has level 0.
    pub fn level(&self, i: usize) -> usize {
        (i + 1..self.nodes.len())
            .filter(|&k| self.subtree_start(k) <= i)
            .count()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Leaf values in node order.
    pub fn coefficients(&self) -> Vec<Scalar> {
        self.nodes
            .iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.value)
            .collect()
    }

    /// Overwrites leaf values in node order.
    ///
    /// # Panics
    /// Panics if `values` does not hold exactly one entry per leaf.
    pub fn set_coefficients(&mut self, values: &[Scalar]) {
        assert_eq!(values.len(), self.leaf_count(), "one coefficient per leaf");
        for (node, &v) in self.nodes.iter_mut().filter(|n| n.is_leaf()).zip(values) {
            node.value = v;
        }
    }

    /// Structural hash of the whole tree.
    pub fn hash_value(&self) -> u64 {
        self.nodes.last().map_or(0, |n| n.calculated_hash_value)
    }
}

impl Index<usize> for Tree {
    type Output = Node;

    fn index(&self, i: usize) -> &Node {
        &self.nodes[i]
    }
}

/// Iterator over the children of a node, from the last operand to the first.
pub struct Children<'a> {
    nodes: &'a [Node],
    next: usize,
    remaining: u16,
}

impl Iterator for Children<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = idx - self.nodes[idx].length as usize;
        }
        Some(idx)
    }
}
