use crate::error::{EvoError, Result};
use crate::types::{hash_name, Range, Scalar};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Input column descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub hash: u64,
    pub index: usize,
}

/// Read-only column store keyed by variable hash.
#[derive(Debug, Clone)]
pub struct Dataset {
    variables: Vec<Variable>,
    columns: Vec<Vec<Scalar>>,
    rows: usize,
    lookup: FxHashMap<u64, usize>,
}

impl Dataset {
    /// Builds a dataset from named columns of equal length.
    pub fn new(columns: Vec<(String, Vec<Scalar>)>) -> Result<Self> {
        let rows = columns.first().map_or(0, |(_, values)| values.len());
        let mut variables = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        let mut lookup = FxHashMap::default();

        for (index, (name, values)) in columns.into_iter().enumerate() {
            if values.len() != rows {
                return Err(EvoError::Dataset(format!(
                    "column '{}' has {} rows, expected {}",
                    name,
                    values.len(),
                    rows
                )));
            }
            let hash = hash_name(&name);
            if lookup.insert(hash, index).is_some() {
                return Err(EvoError::Dataset(format!("duplicate column '{}'", name)));
            }
            variables.push(Variable { name, hash, index });
            data.push(values);
        }

        Ok(Self {
            variables,
            columns: data,
            rows,
            lookup,
        })
    }

    /// Converts every numeric column of a data frame; other columns are skipped.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            let name = column.name().to_string();
            if !matches!(
                column.dtype(),
                DataType::Float64
                    | DataType::Float32
                    | DataType::Int64
                    | DataType::Int32
                    | DataType::UInt64
                    | DataType::UInt32
            ) {
                log::debug!("Skipping non-numeric column '{}' ({:?})", name, column.dtype());
                continue;
            }
            let cast = column.cast(&DataType::Float64)?;
            let values: Vec<Scalar> = cast
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(Scalar::NAN))
                .collect();
            columns.push((name, values));
        }
        Self::new(columns)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.lookup
            .get(&hash_name(name))
            .map(|&index| &self.variables[index])
    }

    pub fn variable_by_hash(&self, hash: u64) -> Option<&Variable> {
        self.lookup.get(&hash).map(|&index| &self.variables[index])
    }

    pub fn try_get_values(&self, hash: u64) -> Option<&[Scalar]> {
        self.lookup.get(&hash).map(|&index| self.columns[index].as_slice())
    }

    /// Column of the variable identified by `hash`.
    ///
    /// # Panics
    /// Panics if no column carries that hash.
    pub fn get_values(&self, hash: u64) -> &[Scalar] {
        self.try_get_values(hash)
            .unwrap_or_else(|| panic!("no column for variable hash {:#x}", hash))
    }

    /// Rows `range` of a column, without copying.
    pub fn get_values_in(&self, hash: u64, range: Range) -> &[Scalar] {
        &self.get_values(hash)[range.start()..range.end()]
    }

    pub fn full_range(&self) -> Range {
        Range::new(0, self.rows)
    }
}
