// src/error.rs

use thiserror::Error;

/// Errors raised while preparing or running a cost simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// A precondition on the dataset or parameters does not hold.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A parameter required by the selected compute mode was not supplied.
    #[error("Configuration mismatch: {0}")]
    ConfigurationMismatch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parameter file error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
