//! Validation Error Types

use serde::Serialize;
use thiserror::Error;

/// Errors during form validation
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Value below the minimum or above the maximum
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Select-box value that is not one of the offered choices
    #[error("{field} value {value} is not one of {choices:?}")]
    NotAChoice {
        field: &'static str,
        value: f64,
        choices: &'static [f64],
    },

    /// NaN or infinite value
    #[error("{field} value is not a finite number")]
    NotFinite { field: &'static str },

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// Field that does not belong to the form
    #[error("Unknown field: {field}")]
    UnknownField { field: String },
}
