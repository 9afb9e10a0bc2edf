//! Clinical Feature Schemas
//!
//! Disease tags, the per-disease form field schemas and the fixed-order
//! feature vectors fed to the prediction models.

mod disease;
mod features;
mod schema;

pub use disease::Disease;
pub use features::{DiabetesInput, FeatureVector, HeartInput, ParkinsonsInput};
pub use schema::{FieldSpec, DIABETES_FIELDS, HEART_FIELDS, PARKINSONS_FIELDS};

use thiserror::Error;

/// Errors while building feature vectors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Unknown disease: {0}")]
    UnknownDisease(String),
    #[error("Missing fields for {disease}: {fields:?}")]
    MissingFields {
        disease: Disease,
        fields: Vec<&'static str>,
    },
    #[error("Unknown fields for {disease}: {fields:?}")]
    UnknownFields {
        disease: Disease,
        fields: Vec<String>,
    },
}
