//! Common utilities for service clients

use std::fmt;
use std::time::Duration;

use reqwest::{header, Client};

use crate::error::{mapping, PredictionError, Result};

/// UserAgent structure for identifying the client to upstream services
#[derive(Debug, Clone)]
pub struct UserAgent {
    /// Application name
    pub app_name: String,

    /// Version string
    pub version: String,

    /// Optional extra info
    pub extra: Option<String>,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: "Crop-Advisor".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: Some("prediction-sdk".to_string()),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_name, self.version)?;

        if let Some(ref extra) = self.extra {
            write!(f, " ({})", extra)?;
        }

        Ok(())
    }
}

/// Build a standard HTTP client. Without a timeout the transport default applies.
pub fn build_http_client(user_agent: Option<UserAgent>, timeout: Option<Duration>) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    let ua = user_agent.unwrap_or_default().to_string();

    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_str(&ua)
            .map_err(|e| PredictionError::configuration(format!("Invalid user agent: {}", e)))?,
    );

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| PredictionError::configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Parse error response from HTTP response
pub async fn parse_error_response(response: reqwest::Response) -> PredictionError {
    let status = response.status();

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => format!("Failed to read error response: {}", e),
    };

    mapping::map_http_error(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_display() {
        let ua = UserAgent {
            app_name: "Crop-Advisor".to_string(),
            version: "1.2.3".to_string(),
            extra: None,
        };
        assert_eq!(ua.to_string(), "Crop-Advisor/1.2.3");

        let ua = UserAgent {
            extra: Some("smoke".to_string()),
            ..ua
        };
        assert_eq!(ua.to_string(), "Crop-Advisor/1.2.3 (smoke)");
    }

    #[test]
    fn test_build_http_client_without_timeout() {
        assert!(build_http_client(None, None).is_ok());
        assert!(build_http_client(None, Some(Duration::from_secs(5))).is_ok());
    }
}
