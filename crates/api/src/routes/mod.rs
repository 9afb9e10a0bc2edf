//! Route handlers

pub mod diagnose;
pub mod diseases;
pub mod home;

use crate::ApiError;
use clinical_features::Disease;

/// Parse the `{disease}` path segment
pub(crate) fn parse_disease(segment: &str) -> Result<Disease, ApiError> {
    segment
        .parse()
        .map_err(|_| ApiError::UnknownDisease(segment.to_string()))
}
