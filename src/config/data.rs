use super::traits::ConfigSection;
use crate::error::{EvoError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
    /// Column to fit; every other numeric column is an input.
    pub target: String,
    /// Training rows `[start, end)`. `None` means every row.
    pub training_start: Option<usize>,
    pub training_end: Option<usize>,
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.training_start, self.training_end) {
            if start > end {
                return Err(EvoError::Configuration(format!(
                    "Training range [{}, {}) is inverted",
                    start, end
                )));
            }
        }
        Ok(())
    }
}
