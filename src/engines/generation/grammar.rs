use crate::types::{NodeType, NodeTypes};
use serde::{Deserialize, Serialize};

/// Named symbol sets selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrammarPreset {
    Arithmetic,
    TypeCoherent,
    Full,
}

/// Enabled symbols and their sampling frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    config: NodeTypes,
    frequencies: [f64; NodeType::COUNT],
}

impl Grammar {
    pub const ARITHMETIC: NodeTypes = NodeTypes::from_bits(
        NodeType::Constant as u16
            | NodeType::Variable as u16
            | NodeType::Add as u16
            | NodeType::Sub as u16
            | NodeType::Mul as u16
            | NodeType::Div as u16,
    );

    pub const TYPE_COHERENT: NodeTypes = NodeTypes::from_bits(
        Self::ARITHMETIC.bits()
            | NodeType::Exp as u16
            | NodeType::Log as u16
            | NodeType::Sin as u16
            | NodeType::Cos as u16,
    );

    pub const FULL: NodeTypes = NodeTypes::from_bits(
        Self::TYPE_COHERENT.bits()
            | NodeType::Tan as u16
            | NodeType::Sqrt as u16
            | NodeType::Cbrt as u16
            | NodeType::Square as u16,
    );

    pub fn new(config: NodeTypes) -> Self {
        Self {
            config,
            frequencies: [1.0; NodeType::COUNT],
        }
    }

    pub fn from_preset(preset: GrammarPreset) -> Self {
        match preset {
            GrammarPreset::Arithmetic => Self::new(Self::ARITHMETIC),
            GrammarPreset::TypeCoherent => Self::new(Self::TYPE_COHERENT),
            GrammarPreset::Full => Self::new(Self::FULL),
        }
    }

    pub fn config(&self) -> NodeTypes {
        self.config
    }

    pub fn is_enabled(&self, node_type: NodeType) -> bool {
        self.config.contains(node_type)
    }

    pub fn set_enabled(&mut self, node_type: NodeType, enabled: bool) {
        if enabled {
            self.config.insert(node_type);
        } else {
            self.config.remove(node_type);
        }
    }

    pub fn frequency(&self, node_type: NodeType) -> f64 {
        self.frequencies[node_type.index()]
    }

    pub fn set_frequency(&mut self, node_type: NodeType, frequency: f64) {
        self.frequencies[node_type.index()] = frequency;
    }

    /// Enabled symbols with positive frequency, in tag order.
    pub fn allowed_symbols(&self) -> Vec<(NodeType, f64)> {
        self.config
            .iter()
            .map(|ty| (ty, self.frequency(ty)))
            .filter(|&(_, f)| f > 0.0)
            .collect()
    }

    /// Smallest arity among enabled functions, 0 if none is enabled.
    pub fn minimum_function_arity(&self) -> usize {
        self.allowed_symbols()
            .iter()
            .filter(|(ty, _)| !ty.is_leaf())
            .map(|(ty, _)| ty.arity() as usize)
            .min()
            .unwrap_or(0)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new(Self::ARITHMETIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_nest() {
        let arithmetic = Grammar::from_preset(GrammarPreset::Arithmetic);
        assert!(arithmetic.is_enabled(NodeType::Div));
        assert!(!arithmetic.is_enabled(NodeType::Exp));

        let full = Grammar::from_preset(GrammarPreset::Full);
        for ty in Grammar::TYPE_COHERENT.iter() {
            assert!(full.is_enabled(ty));
        }
        assert!(full.is_enabled(NodeType::Square));
    }

    #[test]
    fn test_allowed_symbols_respect_frequency() {
        let mut grammar = Grammar::default();
        grammar.set_frequency(NodeType::Sub, 0.0);
        grammar.set_frequency(NodeType::Mul, 2.5);
        let allowed = grammar.allowed_symbols();
        assert!(allowed.iter().all(|(ty, _)| *ty != NodeType::Sub));
        assert!(allowed.contains(&(NodeType::Mul, 2.5)));
    }

    #[test]
    fn test_minimum_function_arity() {
        let mut grammar = Grammar::from_preset(GrammarPreset::TypeCoherent);
        assert_eq!(grammar.minimum_function_arity(), 1);
        for ty in [NodeType::Exp, NodeType::Log, NodeType::Sin, NodeType::Cos] {
            grammar.set_enabled(ty, false);
        }
        assert_eq!(grammar.minimum_function_arity(), 2);
    }
}
