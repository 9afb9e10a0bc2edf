//! Disease Tab Routes

use axum::{extract::Path, Json};
use clinical_features::{Disease, FieldSpec};
use serde::Serialize;

use super::parse_disease;
use crate::ApiError;

/// Summary of one disease tab
#[derive(Debug, Serialize)]
pub struct DiseaseSummary {
    pub key: Disease,
    pub name: &'static str,
    pub tab_title: &'static str,
    pub feature_count: usize,
    pub form_url: String,
    pub diagnose_url: String,
}

/// Response for the disease list
#[derive(Debug, Serialize)]
pub struct DiseaseListResponse {
    pub data: Vec<DiseaseSummary>,
    pub count: usize,
}

/// Form schema for one tab
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub disease: Disease,
    pub header: &'static str,
    pub fields: &'static [FieldSpec],
    pub submit_label: &'static str,
}

/// List disease tabs
pub async fn list_diseases() -> Json<DiseaseListResponse> {
    let data: Vec<_> = Disease::ALL
        .iter()
        .map(|&d| DiseaseSummary {
            key: d,
            name: d.display_name(),
            tab_title: d.tab_title(),
            feature_count: d.feature_count(),
            form_url: format!("/api/v1/diseases/{}/form", d),
            diagnose_url: format!("/api/v1/diseases/{}/diagnose", d),
        })
        .collect();

    Json(DiseaseListResponse {
        count: data.len(),
        data,
    })
}

/// Get the form schema of one tab
pub async fn get_form(Path(segment): Path<String>) -> Result<Json<FormResponse>, ApiError> {
    let disease = parse_disease(&segment)?;
    Ok(Json(FormResponse {
        disease,
        header: disease.tab_title(),
        fields: disease.fields(),
        submit_label: "Diagnose",
    }))
}
