use crate::data::Dataset;
use crate::functions::{Callable, DispatchTable, Numeric};
use crate::tree::Tree;
use crate::types::{Range, Scalar};
use rayon::prelude::*;
use std::sync::Arc;

/// Per-node work resolved once per call, outside the row loop.
enum NodeMeta<'a, T: Numeric> {
    Constant,
    Variable { weight: T, values: &'a [Scalar] },
    Function(Callable<T>),
}

/// Evaluates trees over dataset rows in fixed-width batches.
///
/// The numeric type is chosen per call; the only type dependent pieces are
/// `T::BATCH_SIZE` and the callables registered in the dispatch table.
#[derive(Clone)]
pub struct Interpreter {
    table: Arc<DispatchTable>,
}

impl Interpreter {
    pub fn new(table: Arc<DispatchTable>) -> Self {
        Self { table }
    }

    pub fn dispatch_table(&self) -> &DispatchTable {
        &self.table
    }

    /// Evaluates every row of `range`.
    ///
    /// `parameters`, when given, holds one value per leaf in node order and
    /// replaces the stored constants and variable weights.
    pub fn evaluate<T: Numeric>(
        &self,
        tree: &Tree,
        dataset: &Dataset,
        range: Range,
        parameters: Option<&[T]>,
    ) -> Vec<T> {
        let mut result = vec![T::default(); range.size()];
        self.evaluate_into(tree, dataset, range, &mut result, parameters);
        result
    }

    /// Splits `range` into chunks of `batch_size` rows evaluated in parallel.
    pub fn evaluate_batched<T: Numeric>(
        &self,
        tree: &Tree,
        dataset: &Dataset,
        range: Range,
        batch_size: usize,
        parameters: Option<&[T]>,
    ) -> Vec<T> {
        assert!(batch_size > 0, "batch size must be positive");
        let mut result = vec![T::default(); range.size()];
        result
            .par_chunks_mut(batch_size)
            .enumerate()
            .for_each(|(idx, chunk)| {
                let start = range.start() + idx * batch_size;
                let sub = Range::new(start, start + chunk.len());
                self.evaluate_into(tree, dataset, sub, chunk, parameters);
            });
        result
    }

    /// Evaluates into caller-provided storage of exactly `range.size()` values.
    ///
    /// # Panics
    /// Panics on an empty tree, a mis-sized output, a variable missing from the
    /// dataset, or a function with no callable for `T`.
    pub fn evaluate_into<T: Numeric>(
        &self,
        tree: &Tree,
        dataset: &Dataset,
        range: Range,
        result: &mut [T],
        parameters: Option<&[T]>,
    ) {
        let nodes = tree.nodes();
        assert!(!nodes.is_empty(), "cannot evaluate an empty tree");
        assert_eq!(result.len(), range.size(), "output size must match the range");

        let stride = T::BATCH_SIZE;
        let mut buffer = vec![T::default(); stride * nodes.len()];

        let mut meta: Vec<NodeMeta<'_, T>> = Vec::with_capacity(nodes.len());
        let mut leaf = 0;
        for (i, node) in nodes.iter().enumerate() {
            if !node.is_leaf() {
                meta.push(NodeMeta::Function(self.table.get::<T>(node.hash_value)));
                continue;
            }

            let value = match parameters {
                Some(p) => p[leaf],
                None => T::from_scalar(node.value),
            };
            leaf += 1;

            if node.is_variable() {
                meta.push(NodeMeta::Variable {
                    weight: value,
                    values: dataset.get_values_in(node.hash_value, range),
                });
            } else {
                buffer[i * stride..(i + 1) * stride].fill(value);
                meta.push(NodeMeta::Constant);
            }
        }

        let root = (nodes.len() - 1) * stride;
        let rows = range.size();
        let mut row = 0;
        while row < rows {
            let remaining = stride.min(rows - row);

            for (i, m) in meta.iter().enumerate() {
                match m {
                    NodeMeta::Function(f) => f(&mut buffer, nodes, i, stride),
                    NodeMeta::Variable { weight, values } => {
                        let col = &mut buffer[i * stride..i * stride + remaining];
                        for (dst, &x) in col.iter_mut().zip(&values[row..row + remaining]) {
                            *dst = *weight * T::from_scalar(x);
                        }
                    }
                    NodeMeta::Constant => {}
                }
            }

            result[row..row + remaining].copy_from_slice(&buffer[root..root + remaining]);
            row += stride;
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Arc::new(DispatchTable::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;
    use crate::types::NodeType;

    fn dataset(rows: usize) -> Dataset {
        let x: Vec<Scalar> = (0..rows).map(|i| i as Scalar * 0.5 - 3.0).collect();
        let y: Vec<Scalar> = (0..rows).map(|i| (i % 7) as Scalar + 1.0).collect();
        Dataset::new(vec![("x".to_string(), x), ("y".to_string(), y)]).unwrap()
    }

    #[test]
    fn test_constant_root() {
        let ds = dataset(5);
        let tree = Tree::from_nodes(vec![Node::constant(4.5)]);
        let out = Interpreter::default().evaluate::<f64>(&tree, &ds, ds.full_range(), None);
        assert_eq!(out, vec![4.5; 5]);
    }

    #[test]
    fn test_partial_last_batch() {
        // 64 + 3 rows for f64
        let ds = dataset(67);
        let x = ds.variable("x").unwrap().hash;
        let y = ds.variable("y").unwrap().hash;
        let tree = Tree::from_nodes(vec![
            Node::variable(x, 2.0),
            Node::variable(y, 1.0),
            Node::function(NodeType::Div),
        ]);
        let range = ds.full_range();
        let out = Interpreter::default().evaluate::<f64>(&tree, &ds, range, None);

        let xs = ds.get_values(x);
        let ys = ds.get_values(y);
        for i in 0..67 {
            assert_eq!(out[i], 2.0 * xs[i] / ys[i]);
        }
    }

    #[test]
    fn test_empty_range() {
        let ds = dataset(4);
        let tree = Tree::from_nodes(vec![Node::constant(1.0)]);
        let out = Interpreter::default().evaluate::<f64>(&tree, &ds, Range::new(2, 2), None);
        assert!(out.is_empty());
    }

    #[test]
    #[should_panic(expected = "empty tree")]
    fn test_empty_tree_panics() {
        let ds = dataset(4);
        let _ = Interpreter::default().evaluate::<f64>(&Tree::default(), &ds, ds.full_range(), None);
    }
}
