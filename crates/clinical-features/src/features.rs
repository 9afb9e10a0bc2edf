//! Feature Vector Assembly

use crate::disease::Disease;
use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Ordered measurements for one disease, in model training order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Disease the vector was assembled for
    pub disease: Disease,
    /// Raw feature values
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap raw values. The length is not checked here; dispatch rejects
    /// mismatched vectors.
    pub fn new(disease: Disease, values: Vec<f64>) -> Self {
        Self { disease, values }
    }

    /// All-zero vector of the right length
    pub fn zeros(disease: Disease) -> Self {
        Self::new(disease, vec![0.0; disease.feature_count()])
    }

    /// Build a vector from named values, in schema order
    pub fn from_named(disease: Disease, named: &HashMap<String, f64>) -> Result<Self, SchemaError> {
        let unknown: Vec<String> = named
            .keys()
            .filter(|k| disease.field(k).is_none())
            .cloned()
            .collect();
        if !unknown.is_empty() {
            let mut fields = unknown;
            fields.sort();
            return Err(SchemaError::UnknownFields { disease, fields });
        }

        let mut values = Vec::with_capacity(disease.feature_count());
        let mut missing = Vec::new();
        for field in disease.fields() {
            match named.get(field.key) {
                Some(v) => values.push(*v),
                None => missing.push(field.key),
            }
        }
        if !missing.is_empty() {
            return Err(SchemaError::MissingFields {
                disease,
                fields: missing,
            });
        }

        debug!("Assembled {} feature vector from {} named values", disease, values.len());
        Ok(Self::new(disease, values))
    }

    /// Whether the length matches what the disease models expect
    pub fn dimension_matches(&self) -> bool {
        self.values.len() == self.disease.feature_count()
    }

    /// Pair each value with its field key. Extra values beyond the schema
    /// are dropped from the pairing.
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        self.disease
            .fields()
            .iter()
            .zip(self.values.iter())
            .map(|(f, v)| (f.key, *v))
            .collect()
    }
}

/// Heart disease measurements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeartInput {
    pub age: f64,
    pub sex: f64,
    /// Chest pain type
    pub cp: f64,
    /// Resting blood pressure
    pub trestbps: f64,
    /// Serum cholesterol
    pub chol: f64,
    /// Fasting blood sugar > 120 mg/dl
    pub fbs: f64,
    pub restecg: f64,
    /// Maximum heart rate achieved
    pub thalach: f64,
    /// Exercise induced angina
    pub exang: f64,
    /// ST depression induced by exercise
    pub oldpeak: f64,
    pub slope: f64,
    /// Major vessels colored by fluoroscopy
    pub ca: f64,
    pub thal: f64,
}

impl HeartInput {
    /// Convert to the 13-value training order
    pub fn to_feature_vector(&self) -> FeatureVector {
        FeatureVector::new(
            Disease::Heart,
            vec![
                self.age,
                self.sex,
                self.cp,
                self.trestbps,
                self.chol,
                self.fbs,
                self.restecg,
                self.thalach,
                self.exang,
                self.oldpeak,
                self.slope,
                self.ca,
                self.thal,
            ],
        )
    }
}

/// Diabetes measurements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiabetesInput {
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree: f64,
    pub age: f64,
}

impl DiabetesInput {
    /// Convert to the 8-value training order
    pub fn to_feature_vector(&self) -> FeatureVector {
        FeatureVector::new(
            Disease::Diabetes,
            vec![
                self.pregnancies,
                self.glucose,
                self.blood_pressure,
                self.skin_thickness,
                self.insulin,
                self.bmi,
                self.diabetes_pedigree,
                self.age,
            ],
        )
    }
}

/// Parkinson's voice measurements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParkinsonsInput {
    pub mdvp_fo_hz: f64,
    pub mdvp_fhi_hz: f64,
    pub mdvp_flo_hz: f64,
    pub mdvp_jitter_percent: f64,
    pub mdvp_jitter_abs: f64,
    pub mdvp_rap: f64,
    pub mdvp_ppq: f64,
    pub jitter_ddp: f64,
    pub mdvp_shimmer: f64,
    pub mdvp_shimmer_db: f64,
    pub shimmer_apq3: f64,
    pub shimmer_apq5: f64,
    pub mdvp_apq: f64,
    pub shimmer_dda: f64,
    pub nhr: f64,
    pub hnr: f64,
    pub rpde: f64,
    pub dfa: f64,
    pub spread1: f64,
    pub spread2: f64,
    pub d2: f64,
    pub ppe: f64,
}

impl ParkinsonsInput {
    /// Convert to the 22-value training order
    pub fn to_feature_vector(&self) -> FeatureVector {
        FeatureVector::new(
            Disease::Parkinsons,
            vec![
                self.mdvp_fo_hz,
                self.mdvp_fhi_hz,
                self.mdvp_flo_hz,
                self.mdvp_jitter_percent,
                self.mdvp_jitter_abs,
                self.mdvp_rap,
                self.mdvp_ppq,
                self.jitter_ddp,
                self.mdvp_shimmer,
                self.mdvp_shimmer_db,
                self.shimmer_apq3,
                self.shimmer_apq5,
                self.mdvp_apq,
                self.shimmer_dda,
                self.nhr,
                self.hnr,
                self.rpde,
                self.dfa,
                self.spread1,
                self.spread2,
                self.d2,
                self.ppe,
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heart_map() -> HashMap<String, f64> {
        let values = [63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0];
        Disease::Heart
            .fields()
            .iter()
            .zip(values)
            .map(|(f, v)| (f.key.to_string(), v))
            .collect()
    }

    #[test]
    fn test_from_named_uses_schema_order() {
        let vector = FeatureVector::from_named(Disease::Heart, &heart_map()).unwrap();
        assert!(vector.dimension_matches());
        assert_eq!(vector.values[0], 63.0);
        assert_eq!(vector.values[9], 2.3);
        assert_eq!(vector.values[12], 1.0);
    }

    #[test]
    fn test_from_named_reports_missing() {
        let mut map = heart_map();
        map.remove("chol");
        map.remove("thal");
        let err = FeatureVector::from_named(Disease::Heart, &map).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingFields {
                disease: Disease::Heart,
                fields: vec!["chol", "thal"],
            }
        );
    }

    #[test]
    fn test_from_named_reports_unknown() {
        let mut map = heart_map();
        map.insert("glucose".to_string(), 120.0);
        let err = FeatureVector::from_named(Disease::Heart, &map).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownFields { fields, .. } if fields == vec!["glucose"]));
    }

    #[test]
    fn test_typed_inputs_match_schema_length() {
        assert!(HeartInput::default().to_feature_vector().dimension_matches());
        assert!(DiabetesInput::default().to_feature_vector().dimension_matches());
        assert!(ParkinsonsInput::default().to_feature_vector().dimension_matches());
    }

    #[test]
    fn test_typed_input_order() {
        let input = DiabetesInput {
            pregnancies: 6.0,
            glucose: 148.0,
            blood_pressure: 72.0,
            skin_thickness: 35.0,
            insulin: 0.0,
            bmi: 33.6,
            diabetes_pedigree: 0.627,
            age: 50.0,
        };
        let vector = input.to_feature_vector();
        assert_eq!(vector.values, vec![6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0]);
        assert_eq!(vector.named()[5], ("bmi", 33.6));
    }

    #[test]
    fn test_parkinsons_keys_match_schema() {
        let json = serde_json::to_value(ParkinsonsInput::default()).unwrap();
        let object = json.as_object().unwrap();
        for field in Disease::Parkinsons.fields() {
            assert!(object.contains_key(field.key), "missing {}", field.key);
        }
        assert_eq!(object.len(), 22);
    }
}
