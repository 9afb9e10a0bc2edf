//! Form Input Validation
//!
//! Checks named form submissions against the bounds the form widgets enforce.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationResult, Validator};
