//! Prediction service client implementation
//!
//! Sends the submitted field set to the remote prediction endpoint as JSON
//! and resolves the reply into a `PredictionOutcome`. One attempt per call.

mod models;
pub use models::*;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use url::Url;

use crate::config::{PredictionServiceConfig, DEFAULT_PROVIDER};
use crate::core::PredictionService;
use crate::error::{PredictionError, Result};
use crate::services::common::{build_http_client, parse_error_response, UserAgent};

/// Upper bound on a health probe, independent of the prediction timeout
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the remote prediction service
#[derive(Debug, Clone)]
pub struct PredictionClient {
    /// HTTP client
    http_client: Client,

    /// Configuration
    config: PredictionServiceConfig,

    /// Resolved prediction endpoint
    prediction_url: Url,

    /// Resolved health endpoint
    health_url: Url,

    /// Timeout applied to health probes only
    health_timeout: Duration,
}

impl PredictionClient {
    /// Create a client from `CROP_ADVISOR_*` environment variables, falling
    /// back to defaults when they are absent or invalid
    pub fn from_env() -> Result<Self> {
        let config = PredictionServiceConfig::from_provider(&**DEFAULT_PROVIDER).unwrap_or_else(|e| {
            warn!("Failed to load prediction config from environment, using defaults: {}", e);
            PredictionServiceConfig::default()
        });

        Self::new_with_config(config)
    }

    /// Create a new client with custom configuration
    pub fn new_with_config(config: PredictionServiceConfig) -> Result<Self> {
        config.validate()?;

        let http_client = build_http_client(
            Some(UserAgent {
                extra: Some("prediction-client".to_string()),
                ..UserAgent::default()
            }),
            config.timeout_seconds.map(Duration::from_secs),
        )
        .map_err(|e| {
            error!("Failed to build prediction HTTP client: {}", e);
            e
        })?;

        let prediction_url = config.prediction_url()?;
        let health_url = config.health_url()?;

        Ok(Self {
            http_client,
            config,
            prediction_url,
            health_url,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        })
    }

    /// Create a new builder for the prediction client
    pub fn builder() -> PredictionClientBuilder {
        PredictionClientBuilder::default()
    }

    /// Replace the health probe timeout
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &PredictionServiceConfig {
        &self.config
    }

    /// The URL predictions are posted to
    pub fn prediction_url(&self) -> &Url {
        &self.prediction_url
    }

    /// Post the field set and decode the raw reply without interpreting it
    pub async fn send(&self, input: &FormInput) -> Result<PredictionReply> {
        debug!(
            "Sending prediction request: POST {} ({} fields)",
            self.prediction_url,
            input.len()
        );

        let start_time = Instant::now();

        let response = self
            .http_client
            .post(self.prediction_url.clone())
            .json(input)
            .send()
            .await
            .map_err(PredictionError::from)?;

        let status = response.status();
        debug!(
            "Prediction service answered {} in {:.2}ms",
            status,
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        if !status.is_success() {
            return Err(parse_error_response(response).await);
        }

        let body = response.bytes().await.map_err(PredictionError::from)?;
        let reply = serde_json::from_slice::<PredictionReply>(&body)?;

        Ok(reply)
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    fn name(&self) -> &str {
        "prediction"
    }

    async fn predict(&self, input: &FormInput) -> Result<PredictionOutcome> {
        let reply = self.send(input).await?;
        Ok(reply.into_outcome())
    }

    async fn health_check(&self) -> Result<bool> {
        let probe = self
            .http_client
            .get(self.health_url.clone())
            .timeout(self.health_timeout)
            .send()
            .await;

        match probe {
            Ok(response) if response.status().is_success() => Ok(true),
            Ok(response) => {
                warn!("Prediction service health check returned {}", response.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Prediction service health check failed: {}", e);
                Ok(false)
            }
        }
    }
}

/// Builder for the prediction client
#[derive(Default)]
pub struct PredictionClientBuilder {
    /// Base URL of the service
    base_url: Option<String>,

    /// Prediction endpoint path
    endpoint: Option<String>,

    /// Request timeout
    timeout_seconds: Option<u64>,

    /// Health probe timeout
    health_timeout: Option<Duration>,
}

impl PredictionClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the prediction endpoint path
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the timeout in seconds
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Set the health probe timeout
    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = Some(timeout);
        self
    }

    /// Build the prediction client
    pub fn build(self) -> Result<PredictionClient> {
        let mut config = PredictionServiceConfig::default();

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }

        if self.timeout_seconds.is_some() {
            config.timeout_seconds = self.timeout_seconds;
        }

        let client = PredictionClient::new_with_config(config)?;
        Ok(match self.health_timeout {
            Some(timeout) => client.with_health_timeout(timeout),
            None => client,
        })
    }
}
