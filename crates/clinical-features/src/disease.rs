//! Disease Tags

use crate::schema::{FieldSpec, DIABETES_FIELDS, HEART_FIELDS, PARKINSONS_FIELDS};
use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Condition screened by one form tab and one model bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disease {
    /// Heart disease (13 features)
    Heart,
    /// Diabetes (8 features)
    Diabetes,
    /// Parkinson's disease (22 voice measurements)
    Parkinsons,
}

impl Disease {
    /// All diseases in tab order
    pub const ALL: [Disease; 3] = [Disease::Heart, Disease::Diabetes, Disease::Parkinsons];

    /// Wire name used in URLs and artifact file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Disease::Heart => "heart",
            Disease::Diabetes => "diabetes",
            Disease::Parkinsons => "parkinsons",
        }
    }

    /// Human readable name used in verdict headlines
    pub fn display_name(&self) -> &'static str {
        match self {
            Disease::Heart => "Heart Disease",
            Disease::Diabetes => "Diabetes",
            Disease::Parkinsons => "Parkinson's Disease",
        }
    }

    /// Title of the form tab
    pub fn tab_title(&self) -> &'static str {
        match self {
            Disease::Heart => "Heart Disease Prediction",
            Disease::Diabetes => "Diabetes Prediction",
            Disease::Parkinsons => "Parkinson's Prediction",
        }
    }

    /// Form fields in training order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Disease::Heart => &HEART_FIELDS,
            Disease::Diabetes => &DIABETES_FIELDS,
            Disease::Parkinsons => &PARKINSONS_FIELDS,
        }
    }

    /// Length of the feature vector the fitted models expect
    pub fn feature_count(&self) -> usize {
        self.fields().len()
    }

    /// Look up a field by key
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.key == key)
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disease {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heart" => Ok(Disease::Heart),
            "diabetes" => Ok(Disease::Diabetes),
            "parkinsons" | "parkinson" => Ok(Disease::Parkinsons),
            _ => Err(SchemaError::UnknownDisease(s.to_string())),
        }
    }
}
