//! Core abstractions for the Prediction SDK
//!
//! `PredictionService` is the seam between the form front-end and the remote
//! prediction API. The HTTP client implements it; tests substitute stubs.

use async_trait::async_trait;

use crate::error::Result;
use crate::services::prediction::{FormInput, PredictionOutcome};

/// A service that turns a submitted field set into a crop recommendation
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// The service name/identifier
    fn name(&self) -> &str;

    /// Send one prediction request. No retries are attempted.
    async fn predict(&self, input: &FormInput) -> Result<PredictionOutcome>;

    /// Health check for the service
    async fn health_check(&self) -> Result<bool>;
}
