//! Home / Help Route

use axum::Json;
use clinical_features::Disease;
use serde::Serialize;

const HOW_TO_USE: [&str; 4] = [
    "Navigate to the respective tabs for Heart, Diabetes, or Parkinson's predictions",
    "Fill in the required input features in the form",
    "Click Diagnose to see the result",
    "Use the help text next to each input to understand the features better",
];

const DISCLAIMER: &str = "This tool is for preliminary screening only and should not replace professional medical advice. \
Please consult with healthcare professionals for accurate diagnosis and treatment.";

const HIGHLIGHTS: [&str; 4] = [
    "Easy-to-use interface",
    "Instant predictions",
    "Detailed feature explanations",
    "Multiple disease prediction capabilities",
];

/// One navigation tab
#[derive(Debug, Serialize)]
pub struct TabInfo {
    pub key: &'static str,
    pub title: &'static str,
}

/// Home tab content
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub title: &'static str,
    pub welcome: &'static str,
    pub conditions: Vec<&'static str>,
    pub how_to_use: [&'static str; 4],
    pub disclaimer: &'static str,
    pub highlights: [&'static str; 4],
    pub tabs: Vec<TabInfo>,
}

/// Get the home/help tab
pub async fn get_home() -> Json<HomeResponse> {
    let mut tabs = vec![TabInfo {
        key: "home",
        title: "Home",
    }];
    tabs.extend(Disease::ALL.iter().map(|d| TabInfo {
        key: d.as_str(),
        title: d.tab_title(),
    }));

    Json(HomeResponse {
        title: "Disease Prediction Model",
        welcome: "Welcome to the Disease Prediction Web App",
        conditions: Disease::ALL.iter().map(|d| d.display_name()).collect(),
        how_to_use: HOW_TO_USE,
        disclaimer: DISCLAIMER,
        highlights: HIGHLIGHTS,
        tabs,
    })
}
