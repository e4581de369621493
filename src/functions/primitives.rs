//! Vectorized kernels, one per function symbol.
//!
//! The interpreter's scratch buffer is column-major: node `i` owns the
//! `stride` values starting at `i * stride`. Every kernel reads its operand
//! columns, which precede `i` in post-order, and overwrites column `i`.

use super::registry::Callable;
use super::traits::Numeric;
use crate::tree::Node;
use crate::types::NodeType;

#[inline]
fn split<T>(buffer: &mut [T], index: usize, stride: usize) -> (&[T], &mut [T]) {
    let (args, rest) = buffer.split_at_mut(index * stride);
    (args, &mut rest[..stride])
}

#[inline]
fn column<T>(args: &[T], index: usize, stride: usize) -> &[T] {
    &args[index * stride..(index + 1) * stride]
}

#[inline]
fn unary<T: Numeric>(buffer: &mut [T], index: usize, stride: usize, op: impl Fn(T) -> T) {
    let (args, out) = split(buffer, index, stride);
    let a = column(args, index - 1, stride);
    for (o, &x) in out.iter_mut().zip(a) {
        *o = op(x);
    }
}

#[inline]
fn binary<T: Numeric>(
    buffer: &mut [T],
    nodes: &[Node],
    index: usize,
    stride: usize,
    op: impl Fn(T, T) -> T,
) {
    let second = index - 1;
    let first = second - nodes[second].length as usize;
    let (args, out) = split(buffer, index, stride);
    let a = column(args, first, stride);
    let b = column(args, second, stride);
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = op(x, y);
    }
}

pub fn add<T: Numeric>(buffer: &mut [T], nodes: &[Node], index: usize, stride: usize) {
    binary(buffer, nodes, index, stride, |a, b| a + b)
}

pub fn sub<T: Numeric>(buffer: &mut [T], nodes: &[Node], index: usize, stride: usize) {
    binary(buffer, nodes, index, stride, |a, b| a - b)
}

pub fn mul<T: Numeric>(buffer: &mut [T], nodes: &[Node], index: usize, stride: usize) {
    binary(buffer, nodes, index, stride, |a, b| a * b)
}

pub fn div<T: Numeric>(buffer: &mut [T], nodes: &[Node], index: usize, stride: usize) {
    binary(buffer, nodes, index, stride, |a, b| a / b)
}

pub fn exp<T: Numeric>(buffer: &mut [T], _nodes: &[Node], index: usize, stride: usize) {
    unary(buffer, index, stride, T::exp)
}

pub fn log<T: Numeric>(buffer: &mut [T], _nodes: &[Node], index: usize, stride: usize) {
    unary(buffer, index, stride, T::ln)
}

pub fn sin<T: Numeric>(buffer: &mut [T], _nodes: &[Node], index: usize, stride: usize) {
    unary(buffer, index, stride, T::sin)
}

pub fn cos<T: Numeric>(buffer: &mut [T], _nodes: &[Node], index: usize, stride: usize) {
    unary(buffer, index, stride, T::cos)
}

pub fn tan<T: Numeric>(buffer: &mut [T], _nodes: &[Node], index: usize, stride: usize) {
    unary(buffer, index, stride, T::tan)
}

pub fn sqrt<T: Numeric>(buffer: &mut [T], _nodes: &[Node], index: usize, stride: usize) {
    unary(buffer, index, stride, T::sqrt)
}

pub fn cbrt<T: Numeric>(buffer: &mut [T], _nodes: &[Node], index: usize, stride: usize) {
    unary(buffer, index, stride, T::cbrt)
}

pub fn square<T: Numeric>(buffer: &mut [T], _nodes: &[Node], index: usize, stride: usize) {
    unary(buffer, index, stride, T::square)
}

/// Built-in kernel for a function symbol; `None` for leaves.
pub fn kernel<T: Numeric>(node_type: NodeType) -> Option<Callable<T>> {
    let f: Callable<T> = match node_type {
        NodeType::Add => add::<T>,
        NodeType::Sub => sub::<T>,
        NodeType::Mul => mul::<T>,
        NodeType::Div => div::<T>,
        NodeType::Exp => exp::<T>,
        NodeType::Log => log::<T>,
        NodeType::Sin => sin::<T>,
        NodeType::Cos => cos::<T>,
        NodeType::Tan => tan::<T>,
        NodeType::Sqrt => sqrt::<T>,
        NodeType::Cbrt => cbrt::<T>,
        NodeType::Square => square::<T>,
        NodeType::Constant | NodeType::Variable => return None,
    };
    Some(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;

    #[test]
    fn test_binary_operand_order() {
        // columns: [a | b | a - b], stride 2
        let tree = Tree::from_nodes(vec![
            Node::constant(0.0),
            Node::constant(0.0),
            Node::function(NodeType::Sub),
        ]);
        let mut buffer = vec![5.0, 6.0, 1.0, 2.0, 0.0, 0.0];
        sub::<f64>(&mut buffer, tree.nodes(), 2, 2);
        assert_eq!(&buffer[4..], &[4.0, 4.0]);
    }

    #[test]
    fn test_binary_skips_nested_operand() {
        // columns: [a | b | sqrt(b) | a / sqrt(b)], stride 1
        let tree = Tree::from_nodes(vec![
            Node::constant(0.0),
            Node::constant(0.0),
            Node::function(NodeType::Sqrt),
            Node::function(NodeType::Div),
        ]);
        let mut buffer = vec![8.0, 16.0, 0.0, 0.0];
        sqrt::<f64>(&mut buffer, tree.nodes(), 2, 1);
        div::<f64>(&mut buffer, tree.nodes(), 3, 1);
        assert_eq!(buffer[2], 4.0);
        assert_eq!(buffer[3], 2.0);
    }

    #[test]
    fn test_kernel_lookup() {
        assert!(kernel::<f64>(NodeType::Constant).is_none());
        assert!(kernel::<f32>(NodeType::Cbrt).is_some());
    }
}
