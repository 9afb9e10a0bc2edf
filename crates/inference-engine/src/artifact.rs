//! Model Artifact Store
//!
//! Fitted scalers and classifiers are exported offline as JSON documents,
//! one file per scaler and one per classifier. They are read once at
//! startup; any unreadable, malformed or inconsistent artifact fails the
//! whole load.
//!
//! Scaler documents:
//!
//! ```json
//! { "kind": "standard", "mean": [..], "scale": [..], "feature_names": [..] }
//! { "kind": "min_max", "scale": [..], "min": [..] }
//! ```
//!
//! Classifier documents:
//!
//! ```json
//! { "kind": "logistic_regression", "coef": [..], "intercept": 0.1 }
//! { "kind": "linear_svm", "coef": [..], "intercept": 0.1, "prob_a": -1.5, "prob_b": 0.0 }
//! { "kind": "kernel_svm", "support_vectors": [[..]], "dual_coef": [..],
//!   "intercept": 0.1, "gamma": 0.05, "prob_a": -1.5, "prob_b": 0.0 }
//! ```

use crate::classifier::{Classifier, PlattScaling};
use crate::scaler::Scaler;
use crate::InferenceError;
use clinical_features::Disease;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum ScalerArtifact {
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default)]
        feature_names: Option<Vec<String>>,
    },
    MinMax {
        scale: Vec<f64>,
        min: Vec<f64>,
        #[serde(default)]
        feature_names: Option<Vec<String>>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum ClassifierArtifact {
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
    },
    LinearSvm {
        coef: Vec<f64>,
        intercept: f64,
        prob_a: f64,
        prob_b: f64,
    },
    KernelSvm {
        support_vectors: Vec<Vec<f64>>,
        dual_coef: Vec<f64>,
        intercept: f64,
        gamma: f64,
        prob_a: f64,
        prob_b: f64,
    },
}

/// Locations of the six artifact files
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    scalers: BTreeMap<Disease, PathBuf>,
    classifiers: BTreeMap<Disease, PathBuf>,
}

impl ArtifactPaths {
    /// Default file names inside one model directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut scalers = BTreeMap::new();
        let mut classifiers = BTreeMap::new();
        for disease in Disease::ALL {
            scalers.insert(disease, dir.join(Self::default_scaler_file(disease)));
            classifiers.insert(disease, dir.join(Self::default_classifier_file(disease)));
        }
        Self { scalers, classifiers }
    }

    /// Default scaler file name for a disease
    pub fn default_scaler_file(disease: Disease) -> String {
        format!("scaler_{}.json", disease.as_str())
    }

    /// Default classifier file name for a disease
    pub fn default_classifier_file(disease: Disease) -> String {
        match disease {
            Disease::Heart => "heart_disease_model.json".to_string(),
            other => format!("{}_model.json", other.as_str()),
        }
    }

    /// Override the scaler path for one disease
    pub fn with_scaler(mut self, disease: Disease, path: impl Into<PathBuf>) -> Self {
        self.scalers.insert(disease, path.into());
        self
    }

    /// Override the classifier path for one disease
    pub fn with_classifier(mut self, disease: Disease, path: impl Into<PathBuf>) -> Self {
        self.classifiers.insert(disease, path.into());
        self
    }

    /// Scaler path for a disease
    pub fn scaler(&self, disease: Disease) -> &Path {
        &self.scalers[&disease]
    }

    /// Classifier path for a disease
    pub fn classifier(&self, disease: Disease) -> &Path {
        &self.classifiers[&disease]
    }
}

/// Scaler, classifier and expected dimension for one disease
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub disease: Disease,
    pub scaler: Scaler,
    pub classifier: Classifier,
}

impl ModelBundle {
    /// Pair a scaler and classifier, checking both agree with the disease
    /// feature count
    pub fn new(disease: Disease, scaler: Scaler, classifier: Classifier) -> Result<Self, InferenceError> {
        let expected = disease.feature_count();
        for actual in [scaler.dimension(), classifier.dimension()] {
            if actual != expected {
                return Err(InferenceError::DimensionMismatch {
                    disease,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self {
            disease,
            scaler,
            classifier,
        })
    }

    /// Expected feature vector length
    pub fn dimension(&self) -> usize {
        self.disease.feature_count()
    }

    /// Load both artifacts of one disease
    pub fn load(disease: Disease, paths: &ArtifactPaths) -> Result<Self, InferenceError> {
        let scaler = load_scaler(disease, paths.scaler(disease))?;
        check_dimension(disease, "scaler", scaler.dimension(), paths.scaler(disease))?;
        let classifier = load_classifier(paths.classifier(disease))?;
        check_dimension(disease, "classifier", classifier.dimension(), paths.classifier(disease))?;
        let bundle = Self::new(disease, scaler, classifier)?;
        info!(
            "Loaded {} model: {} over {} features",
            disease,
            bundle.classifier.kind(),
            bundle.dimension()
        );
        Ok(bundle)
    }
}

/// All three model bundles, immutable after load
#[derive(Debug, Clone)]
pub struct ModelStore {
    bundles: BTreeMap<Disease, ModelBundle>,
}

impl ModelStore {
    /// Load every disease's artifacts
    pub fn load(paths: &ArtifactPaths) -> Result<Self, InferenceError> {
        let mut bundles = BTreeMap::new();
        for disease in Disease::ALL {
            bundles.insert(disease, ModelBundle::load(disease, paths)?);
        }
        Ok(Self { bundles })
    }

    /// Assemble a store from already built bundles. Every disease must be
    /// present exactly once.
    pub fn from_bundles(bundles: Vec<ModelBundle>) -> Result<Self, InferenceError> {
        let mut map = BTreeMap::new();
        for bundle in bundles {
            let disease = bundle.disease;
            if map.insert(disease, bundle).is_some() {
                return Err(InferenceError::InvalidArtifact {
                    artifact: "model store",
                    reason: format!("duplicate bundle for {}", disease),
                });
            }
        }
        if let Some(missing) = Disease::ALL.iter().find(|d| !map.contains_key(*d)) {
            return Err(InferenceError::InvalidArtifact {
                artifact: "model store",
                reason: format!("no bundle for {}", missing),
            });
        }
        Ok(Self { bundles: map })
    }

    /// Bundle for a disease
    pub fn bundle(&self, disease: Disease) -> &ModelBundle {
        // from_bundles and load guarantee every disease is present
        &self.bundles[&disease]
    }

    /// Iterate bundles in tab order
    pub fn bundles(&self) -> impl Iterator<Item = &ModelBundle> {
        self.bundles.values()
    }
}

fn read_artifact(path: &Path) -> Result<String, InferenceError> {
    debug!("Reading artifact {}", path.display());
    fs::read_to_string(path).map_err(|e| InferenceError::ArtifactLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn check_dimension(disease: Disease, artifact: &str, actual: usize, path: &Path) -> Result<(), InferenceError> {
    let expected = disease.feature_count();
    if actual != expected {
        return Err(InferenceError::ArtifactLoad {
            path: path.to_path_buf(),
            reason: format!(
                "{} {} has {} features, expected {}",
                disease, artifact, actual, expected
            ),
        });
    }
    Ok(())
}

fn with_path(path: &Path) -> impl Fn(InferenceError) -> InferenceError + '_ {
    move |e| match e {
        InferenceError::InvalidArtifact { artifact, reason } => InferenceError::ArtifactLoad {
            path: path.to_path_buf(),
            reason: format!("invalid {}: {}", artifact, reason),
        },
        other => other,
    }
}

/// Load one scaler document. When the document lists feature names they
/// must match the disease form order.
fn load_scaler(disease: Disease, path: &Path) -> Result<Scaler, InferenceError> {
    let text = read_artifact(path)?;
    let artifact: ScalerArtifact = serde_json::from_str(&text).map_err(|e| InferenceError::ArtifactLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let (scaler, names) = match artifact {
        ScalerArtifact::Standard {
            mean,
            scale,
            feature_names,
        } => (Scaler::standard(mean, scale), feature_names),
        ScalerArtifact::MinMax {
            scale,
            min,
            feature_names,
        } => (Scaler::min_max(scale, min), feature_names),
    };
    let scaler = scaler.map_err(with_path(path))?;

    if let Some(names) = names {
        let expected: Vec<&str> = disease.fields().iter().map(|f| f.key).collect();
        if names.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(InferenceError::ArtifactLoad {
                path: path.to_path_buf(),
                reason: format!("feature order {:?} does not match {:?}", names, expected),
            });
        }
    }

    Ok(scaler)
}

/// Load one classifier document
fn load_classifier(path: &Path) -> Result<Classifier, InferenceError> {
    let text = read_artifact(path)?;
    let artifact: ClassifierArtifact =
        serde_json::from_str(&text).map_err(|e| InferenceError::ArtifactLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let classifier = match artifact {
        ClassifierArtifact::LogisticRegression { coef, intercept } => {
            Classifier::logistic_regression(coef, intercept)
        }
        ClassifierArtifact::LinearSvm {
            coef,
            intercept,
            prob_a,
            prob_b,
        } => Classifier::linear_svm(coef, intercept, PlattScaling { a: prob_a, b: prob_b }),
        ClassifierArtifact::KernelSvm {
            support_vectors,
            dual_coef,
            intercept,
            gamma,
            prob_a,
            prob_b,
        } => Classifier::kernel_svm(
            support_vectors,
            dual_coef,
            intercept,
            gamma,
            PlattScaling { a: prob_a, b: prob_b },
        ),
    };
    classifier.map_err(with_path(path))
}
