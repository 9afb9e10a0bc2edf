//! Fitted Feature Scalers

use crate::InferenceError;
use ndarray::Array1;

/// Scale values at or below this are treated as constant columns
const MIN_SCALE: f64 = 1e-12;

/// Fitted normalization applied before classification
#[derive(Debug, Clone, PartialEq)]
pub enum Scaler {
    /// Standardization: `(x - mean) / scale`
    Standard { mean: Array1<f64>, scale: Array1<f64> },
    /// Min-max: `x * scale + min`
    MinMax { scale: Array1<f64>, min: Array1<f64> },
}

impl Scaler {
    /// Build a standard scaler. Constant columns (zero scale) pass through
    /// centered but unscaled.
    pub fn standard(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, InferenceError> {
        if mean.len() != scale.len() {
            return Err(InferenceError::InvalidArtifact {
                artifact: "scaler",
                reason: format!("mean has {} values, scale has {}", mean.len(), scale.len()),
            });
        }
        check_finite("scaler", &mean)?;
        check_finite("scaler", &scale)?;

        let scale = scale
            .into_iter()
            .map(|s| if s.abs() <= MIN_SCALE { 1.0 } else { s })
            .collect::<Vec<_>>();

        Ok(Scaler::Standard {
            mean: Array1::from_vec(mean),
            scale: Array1::from_vec(scale),
        })
    }

    /// Build a min-max scaler from its fitted `scale` and `min` terms
    pub fn min_max(scale: Vec<f64>, min: Vec<f64>) -> Result<Self, InferenceError> {
        if scale.len() != min.len() {
            return Err(InferenceError::InvalidArtifact {
                artifact: "scaler",
                reason: format!("scale has {} values, min has {}", scale.len(), min.len()),
            });
        }
        check_finite("scaler", &scale)?;
        check_finite("scaler", &min)?;

        Ok(Scaler::MinMax {
            scale: Array1::from_vec(scale),
            min: Array1::from_vec(min),
        })
    }

    /// Number of features the scaler was fitted on
    pub fn dimension(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { scale, .. } => scale.len(),
        }
    }

    /// Transform one raw feature vector
    pub fn transform(&self, values: &[f64]) -> Result<Array1<f64>, InferenceError> {
        if values.len() != self.dimension() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.dimension(),
                actual: values.len(),
            });
        }

        let x = Array1::from_vec(values.to_vec());
        let out = match self {
            Scaler::Standard { mean, scale } => (&x - mean) / scale,
            Scaler::MinMax { scale, min } => &x * scale + min,
        };
        Ok(out)
    }
}

pub(crate) fn check_finite(artifact: &'static str, values: &[f64]) -> Result<(), InferenceError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(InferenceError::InvalidArtifact {
            artifact,
            reason: format!("parameter {} is not finite", i),
        }),
        None => Ok(()),
    }
}
