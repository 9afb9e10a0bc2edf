//! Screening Inference Engine
//!
//! Loads the fitted scalers and classifiers once and dispatches feature
//! vectors to the right pair by disease.

mod artifact;
mod classifier;
mod engine;
mod scaler;

pub use artifact::{ArtifactPaths, ModelBundle, ModelStore};
pub use classifier::{Classifier, PlattScaling};
pub use engine::{InferenceResult, Prediction, PredictionEngine};
pub use scaler::Scaler;

use clinical_features::Disease;
use std::path::PathBuf;
use thiserror::Error;

/// Errors during artifact loading or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Failed to load artifact {path}: {reason}")]
    ArtifactLoad { path: PathBuf, reason: String },
    #[error("Invalid {artifact} artifact: {reason}")]
    InvalidArtifact {
        artifact: &'static str,
        reason: String,
    },
    #[error("Dimension mismatch for {disease}: expected {expected} features, got {actual}")]
    DimensionMismatch {
        disease: Disease,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Feature {index} for {disease} is not a finite number")]
    NonFiniteFeature { disease: Disease, index: usize },
    #[error("Input for {disease} overflowed during {stage}")]
    NumericOverflow { disease: Disease, stage: &'static str },
}
