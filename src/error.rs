//! Error types for the input and reporting layers
//!
//! The simulation core is total and never returns these; they are raised
//! when validating user inputs and when writing reports.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StrategyError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        StrategyError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StrategyError>;
