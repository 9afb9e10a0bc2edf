//! Form Validator for Range Checking

use crate::error::ValidationError;
use clinical_features::{Disease, FieldSpec};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Result of validation
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for named form submissions
#[derive(Debug, Clone)]
pub struct Validator {
    /// Reject select-box values outside the offered choices
    enforce_choices: bool,
}

impl Validator {
    /// Create a new validator
    pub fn new(enforce_choices: bool) -> Self {
        Self { enforce_choices }
    }

    /// Validate a single value against its field spec
    pub fn validate_field(&self, spec: &FieldSpec, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field: spec.key });
        }

        let max = spec.max.unwrap_or(f64::INFINITY);
        if value < spec.min || value > max {
            return Err(ValidationError::OutOfRange {
                field: spec.key,
                value,
                min: spec.min,
                max,
            });
        }

        if self.enforce_choices {
            if let Some(choices) = spec.choices {
                if !choices.iter().any(|c| (c - value).abs() < f64::EPSILON) {
                    return Err(ValidationError::NotAChoice {
                        field: spec.key,
                        value,
                        choices,
                    });
                }
            }
        }

        Ok(())
    }

    /// Validate a whole named submission, collecting every error
    pub fn validate_named(&self, disease: Disease, named: &HashMap<String, f64>) -> ValidationResult {
        let mut errors = Vec::new();

        let mut unknown: Vec<&String> = named.keys().filter(|k| disease.field(k).is_none()).collect();
        unknown.sort();
        errors.extend(
            unknown
                .into_iter()
                .map(|k| ValidationError::UnknownField { field: k.clone() }),
        );

        let mut fields_checked = 0;
        for spec in disease.fields() {
            match named.get(spec.key) {
                Some(&value) => {
                    fields_checked += 1;
                    if let Err(e) = self.validate_field(spec, value) {
                        errors.push(e);
                    }
                }
                None => errors.push(ValidationError::MissingField { field: spec.key }),
            }
        }

        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            debug!("{} submission rejected with {} errors", disease, errors.len());
            ValidationResult::invalid(errors, fields_checked)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn submission(disease: Disease, values: &[f64]) -> HashMap<String, f64> {
        disease
            .fields()
            .iter()
            .zip(values)
            .map(|(f, v)| (f.key.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_valid_heart_submission() {
        let validator = Validator::default();
        let named = submission(
            Disease::Heart,
            &[63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0],
        );
        let result = validator.validate_named(Disease::Heart, &named);
        assert!(result.valid, "{:?}", result.errors);
        assert_eq!(result.fields_checked, 13);
    }

    #[test]
    fn test_age_upper_bound() {
        let validator = Validator::default();
        let age = Disease::Heart.field("age").unwrap();
        assert!(validator.validate_field(age, 100.0).is_ok());
        assert!(matches!(
            validator.validate_field(age, 101.0),
            Err(ValidationError::OutOfRange { field: "age", .. })
        ));
        assert!(validator.validate_field(age, -1.0).is_err());
    }

    #[test]
    fn test_unbounded_fields_accept_large_values() {
        let validator = Validator::default();
        let chol = Disease::Heart.field("chol").unwrap();
        assert!(validator.validate_field(chol, 564.0).is_ok());
        assert!(validator.validate_field(chol, f64::NAN).is_err());
    }

    #[test]
    fn test_choice_enforcement() {
        let strict = Validator::default();
        let lenient = Validator::new(false);
        let cp = Disease::Heart.field("cp").unwrap();
        assert!(matches!(
            strict.validate_field(cp, 1.5),
            Err(ValidationError::NotAChoice { field: "cp", .. })
        ));
        assert!(lenient.validate_field(cp, 1.5).is_ok());
        assert!(lenient.validate_field(cp, 4.0).is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let validator = Validator::default();
        let mut named = submission(Disease::Parkinsons, &[0.5; 22]);
        named.remove("ppe");
        named.insert("rpde".to_string(), 1.5);
        named.insert("glucose".to_string(), 100.0);

        let result = validator.validate_named(Disease::Parkinsons, &named);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3);
        assert_eq!(
            result.errors[0],
            ValidationError::UnknownField {
                field: "glucose".to_string()
            }
        );
        assert!(result
            .errors
            .contains(&ValidationError::MissingField { field: "ppe" }));
    }

    #[test]
    fn test_spread_bounds_allow_negative() {
        let validator = Validator::default();
        let spread1 = Disease::Parkinsons.field("spread1").unwrap();
        assert!(validator.validate_field(spread1, -6.5).is_ok());
        assert!(validator.validate_field(spread1, -10.5).is_err());
    }

    proptest! {
        #[test]
        fn prop_in_range_rpde_is_valid(v in 0.0f64..=1.0) {
            let validator = Validator::default();
            let rpde = Disease::Parkinsons.field("rpde").unwrap();
            prop_assert!(validator.validate_field(rpde, v).is_ok());
        }
    }
}
