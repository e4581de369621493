use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvoError {
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    #[error("No callable registered for function hash {hash:#x} and numeric type {numeric_type}")]
    MissingCallable { hash: u64, numeric_type: &'static str },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EvoError>;
