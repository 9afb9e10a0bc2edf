//! Prediction Dispatch

use crate::artifact::{ArtifactPaths, ModelStore};
use crate::classifier::label_from_probabilities;
use crate::InferenceError;
use clinical_features::{Disease, FeatureVector};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Verdict for one feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Disease the vector was scored for
    pub disease: Disease,
    /// 1 = risk detected, 0 = no risk detected
    pub label: u8,
    /// `[P(0), P(1)]`
    pub probabilities: [f64; 2],
    /// Probability of the predicted label
    pub confidence: f64,
    /// Raw classifier decision value
    pub decision: f64,
}

/// Result of inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// The prediction
    pub prediction: Prediction,
    /// Inference latency in microseconds
    pub latency_us: u64,
}

/// Table-driven dispatch: disease → (scaler, classifier, dimension)
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    store: ModelStore,
}

impl PredictionEngine {
    /// Wrap an already loaded store
    pub fn new(store: ModelStore) -> Self {
        Self { store }
    }

    /// Load all artifacts and build the engine
    pub fn load(paths: &ArtifactPaths) -> Result<Self, InferenceError> {
        let store = ModelStore::load(paths)?;
        info!("Prediction engine ready for {} diseases", Disease::ALL.len());
        Ok(Self::new(store))
    }

    /// The loaded artifacts
    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    /// Scale `values` with the disease scaler and score them with the
    /// disease classifier
    pub fn predict(&self, disease: Disease, values: &[f64]) -> Result<InferenceResult, InferenceError> {
        let start = Instant::now();
        let bundle = self.store.bundle(disease);

        if values.len() != bundle.dimension() {
            return Err(InferenceError::DimensionMismatch {
                disease,
                expected: bundle.dimension(),
                actual: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(InferenceError::NonFiniteFeature { disease, index });
        }

        let normalized = bundle.scaler.transform(values)?;
        if normalized.iter().any(|v| !v.is_finite()) {
            return Err(InferenceError::NumericOverflow {
                disease,
                stage: "scaling",
            });
        }
        let decision = bundle.classifier.decision_function(normalized.view())?;
        if !decision.is_finite() {
            return Err(InferenceError::NumericOverflow {
                disease,
                stage: "decision",
            });
        }
        let probabilities = bundle.classifier.probabilities_from_decision(decision);
        let label = label_from_probabilities(&probabilities);
        let confidence = probabilities[label as usize];

        let latency_us = start.elapsed().as_micros() as u64;
        debug!(
            "{} prediction: label={} conf={:.4} decision={:.4} ({}us)",
            disease, label, confidence, decision, latency_us
        );

        Ok(InferenceResult {
            prediction: Prediction {
                disease,
                label,
                probabilities,
                confidence,
                decision,
            },
            latency_us,
        })
    }

    /// Dispatch an assembled feature vector
    pub fn predict_vector(&self, features: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        self.predict(features.disease, &features.values)
    }
}
