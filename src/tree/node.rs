use crate::types::{NodeType, Scalar};
use serde::{Deserialize, Serialize};

/// One symbol of a post-order expression tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_type: NodeType,
    pub arity: u16,
    /// Size of the subtree rooted at this node, the node itself included.
    pub length: u16,
    /// Constant literal, or the coefficient applied to a variable's column.
    pub value: Scalar,
    /// Dataset column key for variables, dispatch key for functions.
    pub hash_value: u64,
    /// Structural hash of the subtree rooted here, set by `Tree::update_nodes`.
    pub calculated_hash_value: u64,
}

impl Node {
    pub fn new(node_type: NodeType) -> Self {
        let hash = node_type.hash();
        Self {
            node_type,
            arity: node_type.arity(),
            length: 1,
            value: 1.0,
            hash_value: hash,
            calculated_hash_value: hash,
        }
    }

    pub fn constant(value: Scalar) -> Self {
        Self {
            value,
            ..Self::new(NodeType::Constant)
        }
    }

    pub fn variable(hash: u64, weight: Scalar) -> Self {
        Self {
            value: weight,
            hash_value: hash,
            calculated_hash_value: hash,
            ..Self::new(NodeType::Variable)
        }
    }

    pub fn function(node_type: NodeType) -> Self {
        debug_assert!(!node_type.is_leaf(), "{} is not a function", node_type);
        Self::new(node_type)
    }

    pub fn is_leaf(&self) -> bool {
        self.arity == 0
    }

    pub fn is_constant(&self) -> bool {
        self.node_type == NodeType::Constant
    }

    pub fn is_variable(&self) -> bool {
        self.node_type == NodeType::Variable
    }
}
