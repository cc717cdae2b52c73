//! Form Input Validation
//!
//! Checks a submitted field set against the required measurement list before
//! any call to the prediction service is made.
//!
//! A field counts as supplied when it is present with a non-blank value. A
//! submitted `0` is a real measurement and passes.

use prediction_sdk::{FormInput, MEASUREMENT_FIELDS};
use thiserror::Error;

/// Default maximum request payload size (64KB)
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

/// Fields that must be supplied, in the order they are reported
pub const REQUIRED_FIELDS: [&str; 7] = MEASUREMENT_FIELDS;

/// Validation error for form submissions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl FormValidationError {
    /// Names of the fields the user left out
    pub fn missing(&self) -> &[&'static str] {
        match self {
            Self::MissingFields(fields) => fields,
        }
    }
}

/// Required fields that were not supplied, in required-field order
pub fn missing_fields(input: &FormInput) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|name| !input.is_supplied(name))
        .collect()
}

/// Validate a submission
pub fn validate_form(input: &FormInput) -> Result<(), FormValidationError> {
    let missing = missing_fields(input);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormValidationError::MissingFields(missing))
    }
}

/// Create a request size limiting layer
pub fn payload_limit_config() -> tower_http::limit::RequestBodyLimitLayer {
    tower_http::limit::RequestBodyLimitLayer::new(MAX_PAYLOAD_SIZE)
}
