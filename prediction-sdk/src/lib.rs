//! # Prediction SDK
//!
//! Client for the remote crop prediction service used by the Crop Advisor
//! form front-end.
//!
//! This crate provides:
//!
//! - `PredictionService`: the trait the front-end depends on
//! - `PredictionClient`: the reqwest-backed implementation
//! - `PredictionReply` / `PredictionOutcome`: the raw and interpreted reply shapes
//! - `PredictionError`: the failure taxonomy (refused, HTTP status, transport, decode)
//! - Configuration loading from the environment

pub mod core;
pub use core::PredictionService;

pub mod services;
pub use services::prediction::{
    FormInput, PredictionClient, PredictionClientBuilder, PredictionOutcome, PredictionReply,
    MEASUREMENT_FIELDS,
};

pub mod error;
pub use error::{PredictionError, Result};

pub mod config;
pub use config::{ConfigProvider, PredictionServiceConfig};

#[cfg(test)]
mod tests;

/// Create a prediction client configured from the environment
pub fn prediction_client() -> Result<PredictionClient> {
    PredictionClient::from_env()
}
