//! Diagnose Route

use advisory::Verdict;
use axum::{
    extract::{Path, State},
    Json,
};
use clinical_features::{Disease, FeatureVector};
use inference_engine::{InferenceError, Prediction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::parse_disease;
use crate::{ApiError, AppState};

/// Body of a diagnose request: either a positional vector in training
/// order or the named form values
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnoseRequest {
    /// Raw values, only dimension checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<f64>>,
    /// Form values keyed by field key, checked against widget bounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, f64>>,
}

/// Result of a diagnose request
#[derive(Debug, Serialize)]
pub struct DiagnoseResponse {
    pub prediction: Prediction,
    pub verdict: Verdict,
    pub latency_us: u64,
}

/// Run the disease dispatch for one form submission
pub async fn diagnose(
    State(state): State<Arc<AppState>>,
    Path(segment): Path<String>,
    Json(request): Json<DiagnoseRequest>,
) -> Result<Json<DiagnoseResponse>, ApiError> {
    let disease = parse_disease(&segment)?;

    let features = match build_features(&state, disease, request) {
        Ok(features) => features,
        Err(e) => {
            record_rejection(disease, &e);
            return Err(e);
        }
    };

    if !state.diagnose_delay.is_zero() {
        tokio::time::sleep(state.diagnose_delay).await;
    }

    let result = match state.engine.predict_vector(&features) {
        Ok(result) => result,
        Err(e) => {
            let e = ApiError::from(e);
            record_rejection(disease, &e);
            return Err(e);
        }
    };

    let prediction = result.prediction;
    let verdict = Verdict::new(disease, prediction.label, prediction.confidence);

    metrics::counter!(
        "screening_predictions_total",
        "disease" => disease.as_str(),
        "label" => prediction.label.to_string()
    )
    .increment(1);
    metrics::histogram!("screening_inference_seconds", "disease" => disease.as_str())
        .record(result.latency_us as f64 / 1_000_000.0);

    let served = state.record_prediction();
    info!(
        "{} diagnosis #{}: label={} confidence={:.4}",
        disease, served, prediction.label, prediction.confidence
    );

    Ok(Json(DiagnoseResponse {
        prediction,
        verdict,
        latency_us: result.latency_us,
    }))
}

fn build_features(
    state: &AppState,
    disease: Disease,
    request: DiagnoseRequest,
) -> Result<FeatureVector, ApiError> {
    match (request.features, request.fields) {
        (Some(values), None) => Ok(FeatureVector::new(disease, values)),
        (None, Some(named)) => {
            let result = state.validator.validate_named(disease, &named);
            if !result.valid {
                return Err(ApiError::Validation {
                    disease,
                    errors: result.errors,
                });
            }
            FeatureVector::from_named(disease, &named).map_err(|e| ApiError::BadRequest(e.to_string()))
        }
        (Some(_), Some(_)) => Err(ApiError::BadRequest(
            "provide either `features` or `fields`, not both".to_string(),
        )),
        (None, None) => Err(ApiError::BadRequest(
            "request needs `features` or `fields`".to_string(),
        )),
    }
}

fn record_rejection(disease: Disease, error: &ApiError) {
    let reason = error.code();
    if let ApiError::Inference(InferenceError::DimensionMismatch { expected, actual, .. }) = error {
        warn!("{} diagnosis rejected: expected {} features, got {}", disease, expected, actual);
    } else {
        warn!("{} diagnosis rejected: {}", disease, error);
    }
    metrics::counter!(
        "screening_rejections_total",
        "disease" => disease.as_str(),
        "reason" => reason
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shapes() {
        let positional: DiagnoseRequest = serde_json::from_str(r#"{"features": [1.0, 2.0]}"#).unwrap();
        assert_eq!(positional.features, Some(vec![1.0, 2.0]));
        assert!(positional.fields.is_none());

        let named: DiagnoseRequest = serde_json::from_str(r#"{"fields": {"age": 50}}"#).unwrap();
        assert_eq!(named.fields.unwrap()["age"], 50.0);

        assert!(serde_json::from_str::<DiagnoseRequest>(r#"{"values": []}"#).is_err());
    }
}
