//! Fitted Binary Classifiers

use crate::scaler::check_finite;
use crate::InferenceError;
use ndarray::{Array1, Array2, ArrayView1};

/// Platt scaling parameters mapping a decision value to P(class = 1):
/// `1 / (1 + exp(a * f + b))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlattScaling {
    pub a: f64,
    pub b: f64,
}

impl PlattScaling {
    /// Probability of the positive class for a decision value
    pub fn probability(&self, decision: f64) -> f64 {
        sigmoid(-(self.a * decision + self.b))
    }
}

/// Fitted binary decision model
#[derive(Debug, Clone, PartialEq)]
pub enum Classifier {
    /// Logistic regression: `sigmoid(w·x + b)`
    LogisticRegression { coef: Array1<f64>, intercept: f64 },
    /// Linear SVM with Platt-calibrated probabilities
    LinearSvm {
        coef: Array1<f64>,
        intercept: f64,
        platt: PlattScaling,
    },
    /// RBF kernel SVM with Platt-calibrated probabilities
    KernelSvm {
        /// One support vector per row
        support_vectors: Array2<f64>,
        /// Signed dual coefficient per support vector
        dual_coef: Array1<f64>,
        intercept: f64,
        gamma: f64,
        platt: PlattScaling,
    },
}

impl Classifier {
    /// Build a logistic regression model
    pub fn logistic_regression(coef: Vec<f64>, intercept: f64) -> Result<Self, InferenceError> {
        check_linear(&coef, intercept)?;
        Ok(Classifier::LogisticRegression {
            coef: Array1::from_vec(coef),
            intercept,
        })
    }

    /// Build a linear SVM
    pub fn linear_svm(coef: Vec<f64>, intercept: f64, platt: PlattScaling) -> Result<Self, InferenceError> {
        check_linear(&coef, intercept)?;
        check_platt(&platt)?;
        Ok(Classifier::LinearSvm {
            coef: Array1::from_vec(coef),
            intercept,
            platt,
        })
    }

    /// Build an RBF kernel SVM from row-major support vectors
    pub fn kernel_svm(
        support_vectors: Vec<Vec<f64>>,
        dual_coef: Vec<f64>,
        intercept: f64,
        gamma: f64,
        platt: PlattScaling,
    ) -> Result<Self, InferenceError> {
        let invalid = |reason: String| InferenceError::InvalidArtifact {
            artifact: "classifier",
            reason,
        };

        if support_vectors.is_empty() {
            return Err(invalid("no support vectors".to_string()));
        }
        if support_vectors.len() != dual_coef.len() {
            return Err(invalid(format!(
                "{} support vectors but {} dual coefficients",
                support_vectors.len(),
                dual_coef.len()
            )));
        }
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(invalid(format!("gamma must be positive, got {}", gamma)));
        }

        let cols = support_vectors[0].len();
        if cols == 0 || support_vectors.iter().any(|row| row.len() != cols) {
            return Err(invalid("support vectors have inconsistent lengths".to_string()));
        }

        let rows = support_vectors.len();
        let flat: Vec<f64> = support_vectors.into_iter().flatten().collect();
        check_finite("classifier", &flat)?;
        check_finite("classifier", &dual_coef)?;
        check_finite("classifier", &[intercept])?;
        check_platt(&platt)?;

        let support_vectors =
            Array2::from_shape_vec((rows, cols), flat).map_err(|e| invalid(e.to_string()))?;

        Ok(Classifier::KernelSvm {
            support_vectors,
            dual_coef: Array1::from_vec(dual_coef),
            intercept,
            gamma,
            platt,
        })
    }

    /// Short model family name
    pub fn kind(&self) -> &'static str {
        match self {
            Classifier::LogisticRegression { .. } => "logistic_regression",
            Classifier::LinearSvm { .. } => "linear_svm",
            Classifier::KernelSvm { .. } => "kernel_svm",
        }
    }

    /// Number of features the model was fitted on
    pub fn dimension(&self) -> usize {
        match self {
            Classifier::LogisticRegression { coef, .. } | Classifier::LinearSvm { coef, .. } => coef.len(),
            Classifier::KernelSvm { support_vectors, .. } => support_vectors.ncols(),
        }
    }

    /// Raw decision value; positive leans towards class 1
    pub fn decision_function(&self, x: ArrayView1<f64>) -> Result<f64, InferenceError> {
        if x.len() != self.dimension() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.dimension(),
                actual: x.len(),
            });
        }

        let decision = match self {
            Classifier::LogisticRegression { coef, intercept }
            | Classifier::LinearSvm { coef, intercept, .. } => coef.dot(&x) + intercept,
            Classifier::KernelSvm {
                support_vectors,
                dual_coef,
                intercept,
                gamma,
                ..
            } => {
                let kernel_sum: f64 = support_vectors
                    .rows()
                    .into_iter()
                    .zip(dual_coef.iter())
                    .map(|(sv, alpha)| {
                        let sq_dist: f64 = sv.iter().zip(x.iter()).map(|(a, b)| (a - b) * (a - b)).sum();
                        alpha * (-gamma * sq_dist).exp()
                    })
                    .sum();
                kernel_sum + intercept
            }
        };
        Ok(decision)
    }

    /// Class probabilities `[P(0), P(1)]`
    pub fn predict_proba(&self, x: ArrayView1<f64>) -> Result<[f64; 2], InferenceError> {
        let decision = self.decision_function(x)?;
        Ok(self.probabilities_from_decision(decision))
    }

    /// Predicted label. Ties between the two classes go to class 1.
    pub fn predict(&self, x: ArrayView1<f64>) -> Result<u8, InferenceError> {
        let probs = self.predict_proba(x)?;
        Ok(label_from_probabilities(&probs))
    }

    pub(crate) fn probabilities_from_decision(&self, decision: f64) -> [f64; 2] {
        let p1 = match self {
            Classifier::LogisticRegression { .. } => sigmoid(decision),
            Classifier::LinearSvm { platt, .. } | Classifier::KernelSvm { platt, .. } => {
                platt.probability(decision)
            }
        }
        .clamp(0.0, 1.0);
        [1.0 - p1, p1]
    }
}

/// Label consistent with a probability pair
pub(crate) fn label_from_probabilities(probs: &[f64; 2]) -> u8 {
    if probs[1] >= probs[0] {
        1
    } else {
        0
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn check_linear(coef: &[f64], intercept: f64) -> Result<(), InferenceError> {
    if coef.is_empty() {
        return Err(InferenceError::InvalidArtifact {
            artifact: "classifier",
            reason: "empty coefficient vector".to_string(),
        });
    }
    check_finite("classifier", coef)?;
    check_finite("classifier", &[intercept])
}

fn check_platt(platt: &PlattScaling) -> Result<(), InferenceError> {
    check_finite("classifier", &[platt.a, platt.b])
}
