//! Dispatch against the sample artifacts shipped in `models/`

use clinical_features::{DiabetesInput, Disease, FeatureVector, HeartInput};
use inference_engine::{ArtifactPaths, InferenceError, PredictionEngine};
use std::path::PathBuf;

fn models_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn engine() -> PredictionEngine {
    PredictionEngine::load(&ArtifactPaths::in_dir(models_dir())).expect("sample artifacts load")
}

const PARKINSONS_AFFECTED: [f64; 22] = [
    119.992, 157.302, 74.997, 0.00784, 0.00007, 0.0037, 0.00554, 0.01109, 0.04374, 0.426, 0.02182,
    0.0313, 0.02971, 0.06545, 0.02211, 21.033, 0.414783, 0.815285, -4.813031, 0.266482, 2.301442,
    0.284654,
];

const PARKINSONS_HEALTHY: [f64; 22] = [
    197.076, 206.896, 192.055, 0.00289, 0.00001, 0.00166, 0.00168, 0.00498, 0.01098, 0.097, 0.00563,
    0.0068, 0.00802, 0.01689, 0.00339, 26.775, 0.422229, 0.741367, -7.3483, 0.177551, 1.743867,
    0.085569,
];

#[test]
fn test_all_bundles_load_with_expected_dimensions() {
    let engine = engine();
    let dims: Vec<_> = engine.store().bundles().map(|b| (b.disease, b.dimension())).collect();
    assert_eq!(
        dims,
        vec![(Disease::Heart, 13), (Disease::Diabetes, 8), (Disease::Parkinsons, 22)]
    );
    let kinds: Vec<_> = engine.store().bundles().map(|b| b.classifier.kind()).collect();
    assert_eq!(kinds, vec!["logistic_regression", "linear_svm", "kernel_svm"]);
}

#[test]
fn test_heart_example_vector() {
    let engine = engine();
    let values = [63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0];
    let p = engine.predict(Disease::Heart, &values).unwrap().prediction;

    assert_eq!(p.label, 1);
    assert!(p.confidence > 0.8 && p.confidence < 0.9);
    assert!((p.probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
}

#[test]
fn test_heart_low_risk_profile() {
    let engine = engine();
    let input = HeartInput {
        age: 67.0,
        sex: 1.0,
        cp: 0.0,
        trestbps: 160.0,
        chol: 286.0,
        fbs: 0.0,
        restecg: 0.0,
        thalach: 108.0,
        exang: 1.0,
        oldpeak: 1.5,
        slope: 1.0,
        ca: 3.0,
        thal: 3.0,
    };
    let p = engine.predict_vector(&input.to_feature_vector()).unwrap().prediction;
    assert_eq!(p.label, 0);
    assert!(p.confidence > 0.99);
}

#[test]
fn test_diabetes_profiles() {
    let engine = engine();
    let high = DiabetesInput {
        pregnancies: 6.0,
        glucose: 148.0,
        blood_pressure: 72.0,
        skin_thickness: 35.0,
        insulin: 0.0,
        bmi: 33.6,
        diabetes_pedigree: 0.627,
        age: 50.0,
    };
    let low = DiabetesInput {
        pregnancies: 1.0,
        glucose: 85.0,
        blood_pressure: 66.0,
        skin_thickness: 29.0,
        insulin: 0.0,
        bmi: 26.6,
        diabetes_pedigree: 0.351,
        age: 31.0,
    };
    assert_eq!(engine.predict_vector(&high.to_feature_vector()).unwrap().prediction.label, 1);
    assert_eq!(engine.predict_vector(&low.to_feature_vector()).unwrap().prediction.label, 0);
}

#[test]
fn test_parkinsons_profiles() {
    let engine = engine();
    let affected = engine.predict(Disease::Parkinsons, &PARKINSONS_AFFECTED).unwrap().prediction;
    let healthy = engine.predict(Disease::Parkinsons, &PARKINSONS_HEALTHY).unwrap().prediction;
    assert_eq!(affected.label, 1);
    assert_eq!(healthy.label, 0);
    assert!(affected.probabilities[1] > healthy.probabilities[1]);
}

#[test]
fn test_boundary_vectors_produce_labels() {
    let engine = engine();
    for disease in Disease::ALL {
        let p = engine.predict_vector(&FeatureVector::zeros(disease)).unwrap().prediction;
        assert!(p.label <= 1);
        assert_eq!(p.label == 1, p.probabilities[1] >= p.probabilities[0]);
    }

    let mut maxed = PARKINSONS_HEALTHY;
    maxed[16] = 1.0;
    maxed[17] = 1.0;
    maxed[18] = 1.0;
    maxed[19] = 1.0;
    assert!(engine.predict(Disease::Parkinsons, &maxed).is_ok());
}

#[test]
fn test_twelve_values_to_heart_fails() {
    let engine = engine();
    let values = [63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0];
    let err = engine.predict(Disease::Heart, &values).unwrap_err();
    assert!(matches!(
        err,
        InferenceError::DimensionMismatch {
            expected: 13,
            actual: 12,
            ..
        }
    ));
}

#[test]
fn test_missing_artifact_is_fatal() {
    let paths = ArtifactPaths::in_dir(models_dir()).with_scaler(Disease::Diabetes, fixture("does_not_exist.json"));
    let err = PredictionEngine::load(&paths).unwrap_err();
    assert!(matches!(err, InferenceError::ArtifactLoad { ref path, .. } if path.ends_with("does_not_exist.json")));
}

#[test]
fn test_corrupt_artifact_is_fatal() {
    let paths = ArtifactPaths::in_dir(models_dir()).with_scaler(Disease::Heart, fixture("corrupt_scaler.json"));
    assert!(matches!(
        PredictionEngine::load(&paths),
        Err(InferenceError::ArtifactLoad { .. })
    ));
}

#[test]
fn test_feature_order_mismatch_is_fatal() {
    let paths = ArtifactPaths::in_dir(models_dir())
        .with_scaler(Disease::Diabetes, fixture("reordered_scaler_diabetes.json"));
    let err = PredictionEngine::load(&paths).unwrap_err();
    assert!(err.to_string().contains("feature order"));
}

#[test]
fn test_classifier_dimension_mismatch_is_fatal() {
    let paths = ArtifactPaths::in_dir(models_dir()).with_classifier(Disease::Heart, fixture("short_heart_model.json"));
    let err = PredictionEngine::load(&paths).unwrap_err();
    assert!(matches!(err, InferenceError::ArtifactLoad { ref path, .. } if path.ends_with("short_heart_model.json")));
    assert!(err.to_string().contains("has 12 features, expected 13"));
}

#[test]
fn test_overflowing_scaled_values_are_rejected() {
    let engine = engine();
    let mut values = [63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0];
    values[1] = 1.7e308;
    values[8] = -1.7e308;
    let err = engine.predict(Disease::Heart, &values).unwrap_err();
    assert!(matches!(
        err,
        InferenceError::NumericOverflow {
            disease: Disease::Heart,
            stage: "scaling"
        }
    ));
}

#[test]
fn test_invalid_kernel_parameters_are_fatal() {
    let paths = ArtifactPaths::in_dir(models_dir())
        .with_classifier(Disease::Parkinsons, fixture("zero_gamma_parkinsons_model.json"));
    let err = PredictionEngine::load(&paths).unwrap_err();
    assert!(err.to_string().contains("gamma"));
}
