//! Error mapping for prediction service replies
//!
//! Converts a non-success HTTP reply into the normalized PredictionError,
//! keeping a trimmed copy of the body for diagnostics.

use reqwest::StatusCode;
use serde_json::Value;

use super::PredictionError;

/// Longest body excerpt kept on a RemoteHttp error
const MAX_BODY_EXCERPT: usize = 200;

/// Map a non-success HTTP reply to a PredictionError
pub fn map_http_error(status: StatusCode, body: &str) -> PredictionError {
    let reason = status.canonical_reason().unwrap_or("Unknown Status");

    let detail = if body.trim().is_empty() {
        None
    } else if let Ok(json) = serde_json::from_str::<Value>(body) {
        // The service reports failures under "Error"; generic frameworks use "error"/"message"
        json.get("Error")
            .or_else(|| json.get("error"))
            .or_else(|| json.get("message"))
            .and_then(|m| m.as_str())
            .map(|m| m.to_string())
            .or_else(|| Some(excerpt(body)))
    } else {
        Some(excerpt(body))
    };

    log::debug!(
        "Prediction service returned {} ({} error)",
        status,
        classify_http_error(status)
    );

    PredictionError::remote_http(status.as_u16(), reason, detail)
}

fn excerpt(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() > MAX_BODY_EXCERPT {
        let cut: String = body.chars().take(MAX_BODY_EXCERPT).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

/// Helper function to classify HTTP errors by category
pub fn classify_http_error(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "validation",
        404 => "not_found",
        405 => "method_not_allowed",
        408 => "timeout",
        500..=599 => "server",
        _ => "unknown",
    }
}
