use crate::data::Dataset;
use crate::error::{EvoError, Result};
use polars::prelude::*;
use std::path::Path;

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| EvoError::Dataset(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load a CSV file straight into a column store, keeping numeric columns only.
    pub fn load_dataset<P: AsRef<Path>>(path: P, min_rows: Option<usize>) -> Result<Dataset> {
        let df = Self::load(&path)?;
        let dataset = Dataset::from_dataframe(&df)?;

        let min_rows = min_rows.unwrap_or(1);
        if dataset.rows() < min_rows {
            return Err(EvoError::Dataset(format!(
                "{} has {} rows, need at least {}",
                path.as_ref().display(),
                dataset.rows(),
                min_rows
            )));
        }

        log::debug!(
            "Loaded {} rows x {} numeric columns from {}",
            dataset.rows(),
            dataset.cols(),
            path.as_ref().display()
        );
        Ok(dataset)
    }
}
