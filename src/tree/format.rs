use super::tree::Tree;
use crate::data::Dataset;
use std::fmt::Write;

impl Tree {
    /// Human readable infix form, e.g. `((1.00 * x) + sin(2.50))`.
    pub fn to_infix(&self, dataset: &Dataset, precision: usize) -> String {
        let mut out = String::new();
        if let Some(root) = self.len().checked_sub(1) {
            write_node(self, root, dataset, precision, &mut out);
        }
        out
    }

    /// Infix form cut to `max_len` characters.
    pub fn to_infix_short(&self, dataset: &Dataset, max_len: usize) -> String {
        let full = self.to_infix(dataset, 2);
        if full.chars().count() <= max_len {
            full
        } else {
            let cut: String = full.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", cut)
        }
    }
}

fn write_node(tree: &Tree, i: usize, dataset: &Dataset, precision: usize, out: &mut String) {
    let node = &tree[i];
    if node.is_constant() {
        let _ = write!(out, "{:.*}", precision, node.value);
        return;
    }
    if node.is_variable() {
        let name = dataset
            .variable_by_hash(node.hash_value)
            .map_or("?", |v| v.name.as_str());
        let _ = write!(out, "({:.*} * {})", precision, node.value, name);
        return;
    }

    let mut operands: Vec<usize> = tree.children(i).collect();
    operands.reverse();

    match node.node_type.symbol() {
        Some(symbol) => {
            out.push('(');
            for (k, &c) in operands.iter().enumerate() {
                if k > 0 {
                    let _ = write!(out, " {} ", symbol);
                }
                write_node(tree, c, dataset, precision, out);
            }
            out.push(')');
        }
        None => {
            out.push_str(node.node_type.name());
            out.push('(');
            for (k, &c) in operands.iter().enumerate() {
                if k > 0 {
                    out.push_str(", ");
                }
                write_node(tree, c, dataset, precision, out);
            }
            out.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;
    use crate::types::NodeType;

    #[test]
    fn test_infix_operand_order() {
        let ds = Dataset::new(vec![("x".to_string(), vec![1.0])]).unwrap();
        let x = ds.variable("x").unwrap().hash;
        let tree = Tree::from_nodes(vec![
            Node::variable(x, 1.0),
            Node::constant(2.0),
            Node::function(NodeType::Sub),
            Node::function(NodeType::Exp),
        ]);
        assert_eq!(tree.to_infix(&ds, 1), "exp(((1.0 * x) - 2.0))");
        assert_eq!(tree.to_infix_short(&ds, 10), "exp(((1...");
    }
}
