use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Element type of dataset columns and stored node values.
pub type Scalar = f64;

/// Stable identity hash for a symbol or variable name.
pub fn hash_name(name: &str) -> u64 {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    hasher.finish()
}

/// Symbol tag of an expression node.
///
/// Every tag occupies its own bit so that subsets of symbols can be expressed
/// as a [`NodeTypes`] mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum NodeType {
    Add = 1 << 0,
    Sub = 1 << 1,
    Mul = 1 << 2,
    Div = 1 << 3,
    Exp = 1 << 4,
    Log = 1 << 5,
    Sin = 1 << 6,
    Cos = 1 << 7,
    Tan = 1 << 8,
    Sqrt = 1 << 9,
    Cbrt = 1 << 10,
    Square = 1 << 11,
    Constant = 1 << 12,
    Variable = 1 << 13,
}

impl NodeType {
    pub const COUNT: usize = 14;

    /// All tags in bit order.
    pub const ALL: [NodeType; NodeType::COUNT] = [
        NodeType::Add,
        NodeType::Sub,
        NodeType::Mul,
        NodeType::Div,
        NodeType::Exp,
        NodeType::Log,
        NodeType::Sin,
        NodeType::Cos,
        NodeType::Tan,
        NodeType::Sqrt,
        NodeType::Cbrt,
        NodeType::Square,
        NodeType::Constant,
        NodeType::Variable,
    ];

    pub fn bits(self) -> u16 {
        self as u16
    }

    /// Position of the tag's bit, usable as a dense array index.
    pub fn index(self) -> usize {
        self.bits().trailing_zeros() as usize
    }

    pub fn arity(self) -> u16 {
        match self {
            NodeType::Add | NodeType::Sub | NodeType::Mul | NodeType::Div => 2,
            NodeType::Constant | NodeType::Variable => 0,
            _ => 1,
        }
    }

    pub fn is_leaf(self) -> bool {
        self.arity() == 0
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeType::Add => "add",
            NodeType::Sub => "sub",
            NodeType::Mul => "mul",
            NodeType::Div => "div",
            NodeType::Exp => "exp",
            NodeType::Log => "log",
            NodeType::Sin => "sin",
            NodeType::Cos => "cos",
            NodeType::Tan => "tan",
            NodeType::Sqrt => "sqrt",
            NodeType::Cbrt => "cbrt",
            NodeType::Square => "square",
            NodeType::Constant => "constant",
            NodeType::Variable => "variable",
        }
    }

    /// Infix operator symbol for binary functions.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            NodeType::Add => Some("+"),
            NodeType::Sub => Some("-"),
            NodeType::Mul => Some("*"),
            NodeType::Div => Some("/"),
            _ => None,
        }
    }

    /// Identity used to look the function up in a dispatch table.
    pub fn hash(self) -> u64 {
        hash_name(self.name())
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bit set of [`NodeType`] tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NodeTypes(u16);

impl NodeTypes {
    pub const NONE: NodeTypes = NodeTypes(0);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub fn contains(self, ty: NodeType) -> bool {
        self.0 & ty.bits() != 0
    }

    pub fn insert(&mut self, ty: NodeType) {
        self.0 |= ty.bits();
    }

    pub fn remove(&mut self, ty: NodeType) {
        self.0 &= !ty.bits();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = NodeType> {
        NodeType::ALL.into_iter().filter(move |ty| self.contains(*ty))
    }
}

impl From<NodeType> for NodeTypes {
    fn from(ty: NodeType) -> Self {
        Self(ty.bits())
    }
}

impl BitOr for NodeType {
    type Output = NodeTypes;

    fn bitor(self, rhs: NodeType) -> NodeTypes {
        NodeTypes(self.bits() | rhs.bits())
    }
}

impl BitOr<NodeType> for NodeTypes {
    type Output = NodeTypes;

    fn bitor(self, rhs: NodeType) -> NodeTypes {
        NodeTypes(self.0 | rhs.bits())
    }
}

impl BitOr for NodeTypes {
    type Output = NodeTypes;

    fn bitor(self, rhs: NodeTypes) -> NodeTypes {
        NodeTypes(self.0 | rhs.0)
    }
}

impl BitOrAssign<NodeType> for NodeTypes {
    fn bitor_assign(&mut self, rhs: NodeType) {
        self.insert(rhs);
    }
}

impl BitAnd for NodeTypes {
    type Output = NodeTypes;

    fn bitand(self, rhs: NodeTypes) -> NodeTypes {
        NodeTypes(self.0 & rhs.0)
    }
}

impl Not for NodeTypes {
    type Output = NodeTypes;

    fn not(self) -> NodeTypes {
        NodeTypes(!self.0)
    }
}

/// Half-open row interval `[start, end)` over a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    start: usize,
    end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "invalid range [{}, {})", start, end);
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn size(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(r: std::ops::Range<usize>) -> Self {
        Range::new(r.start, r.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_sets() {
        let set = NodeType::Add | NodeType::Mul | NodeType::Constant;
        assert!(set.contains(NodeType::Mul));
        assert!(!set.contains(NodeType::Sub));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![NodeType::Add, NodeType::Mul, NodeType::Constant]
        );

        let mut other = set;
        other.remove(NodeType::Add);
        assert_eq!((set & !other).iter().collect::<Vec<_>>(), vec![NodeType::Add]);
    }

    #[test]
    fn test_node_type_index_is_dense() {
        for (i, ty) in NodeType::ALL.iter().enumerate() {
            assert_eq!(ty.index(), i);
        }
    }

    #[test]
    fn test_range_size() {
        let range = Range::new(3, 10);
        assert_eq!(range.size(), 7);
        assert!(!range.is_empty());
        assert!(Range::from(4..4).is_empty());
    }
}
