use super::{dual::Dual, interval::Interval, primitives, traits::Numeric};
use crate::error::{EvoError, Result};
use crate::tree::Node;
use crate::types::NodeType;
use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

/// Vectorized routine for one function symbol and one numeric type.
///
/// Arguments are the scratch buffer, the tree's nodes, the index of the node
/// being evaluated and the column stride (the batch size of `T`).
pub type Callable<T> = fn(&mut [T], &[Node], usize, usize);

/// Registry of callables keyed by function hash and numeric type.
///
/// Populated at construction and read-only afterwards; share it behind an
/// `Arc` across evaluating threads.
pub struct DispatchTable {
    functions: FxHashMap<(u64, TypeId), Box<dyn Any + Send + Sync>>,
}

impl DispatchTable {
    /// Table with every built-in symbol registered for `f32`, `f64`, `Dual`
    /// and `Interval`.
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.register_numeric::<f32>();
        table.register_numeric::<f64>();
        table.register_numeric::<Dual>();
        table.register_numeric::<Interval>();
        table
    }

    pub fn empty() -> Self {
        Self {
            functions: FxHashMap::default(),
        }
    }

    /// Registers the built-in kernels of every function symbol for `T`.
    pub fn register_numeric<T: Numeric>(&mut self) {
        for node_type in NodeType::ALL {
            if let Some(f) = primitives::kernel::<T>(node_type) {
                self.register::<T>(node_type.hash(), f);
            }
        }
    }

    /// Adds or replaces the callable for `(hash, T)`.
    pub fn register<T: Numeric>(&mut self, hash: u64, f: Callable<T>) {
        self.functions.insert((hash, TypeId::of::<T>()), Box::new(f));
    }

    pub fn contains<T: Numeric>(&self, hash: u64) -> bool {
        self.functions.contains_key(&(hash, TypeId::of::<T>()))
    }

    pub fn try_get<T: Numeric>(&self, hash: u64) -> Result<Callable<T>> {
        self.functions
            .get(&(hash, TypeId::of::<T>()))
            .and_then(|f| f.downcast_ref::<Callable<T>>())
            .copied()
            .ok_or(EvoError::MissingCallable {
                hash,
                numeric_type: T::NAME,
            })
    }

    /// Callable for `(hash, T)`.
    ///
    /// # Panics
    /// Panics when nothing is registered for the pair; the table is fixed at
    /// construction so a miss is a configuration bug.
    pub fn get<T: Numeric>(&self, hash: u64) -> Callable<T> {
        match self.try_get::<T>(hash) {
            Ok(f) => f,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}
