use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse},
    routing::get,
    Form, Json, Router,
};
use prediction_sdk::{FormInput, PredictionOutcome, PredictionService};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub mod render;
pub mod validation;
pub mod view_model;

use validation::{payload_limit_config, validate_form};
use view_model::ViewModel;

/// Service name used in logs and health reports
pub const SERVICE_NAME: &str = "crop-form";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub service_name: String,
    pub uptime_seconds: u64,
    pub status: String,
    pub prediction_service: bool,
    pub timestamp: String,
}

/// Shared, read-only state for request handlers
pub struct AppState {
    predictor: Arc<dyn PredictionService>,
    static_dir: PathBuf,
    started_at: Instant,
}

impl AppState {
    pub fn new(predictor: Arc<dyn PredictionService>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            predictor,
            static_dir: static_dir.into(),
            started_at: Instant::now(),
        }
    }

    pub fn predictor(&self) -> &dyn PredictionService {
        self.predictor.as_ref()
    }
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/health", get(health_handler))
        .nest_service("/static", static_files)
        .layer(payload_limit_config())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run one submission through validation, the prediction call and
/// normalization. Never fails: every outcome becomes a view model.
pub async fn process_submission(predictor: &dyn PredictionService, input: FormInput) -> ViewModel {
    let request_id = Uuid::new_v4();

    if input.is_empty() {
        tracing::debug!(%request_id, "Submission carried no fields");
    }

    if let Err(err) = validate_form(&input) {
        tracing::info!(%request_id, missing = ?err.missing(), "Rejected incomplete submission");
        return ViewModel::validation_failed(input, &err);
    }

    tracing::debug!(%request_id, service = predictor.name(), "Requesting prediction");
    let result = predictor.predict(&input).await;

    match &result {
        Ok(PredictionOutcome::Success { crop, fertilizer, .. }) => {
            tracing::info!(%request_id, %crop, fertilizer = ?fertilizer, "Prediction succeeded");
        }
        Ok(PredictionOutcome::Failure { message }) => {
            tracing::warn!(%request_id, %message, "Prediction service reported an error");
        }
        Err(err) => {
            tracing::error!(
                %request_id,
                error = %err,
                status = ?err.status_code(),
                "Prediction request failed"
            );
        }
    }

    ViewModel::from_prediction(input, &result)
}

/// GET / - Empty form
async fn index_handler() -> Html<String> {
    Html(render::render_page(&ViewModel::empty()))
}

/// POST / - Validate, predict and render the result
async fn submit_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<FormInput>, FormRejection>,
) -> Html<String> {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Could not decode form body, treating as empty");
            FormInput::default()
        }
    };

    let vm = process_submission(state.predictor(), input).await;
    Html(render::render_page(&vm))
}

/// GET /health - Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let prediction_healthy = state.predictor().health_check().await.unwrap_or(false);

    let status = if prediction_healthy { "SERVING" } else { "DEGRADED" };

    Json(HealthResponse {
        healthy: true,
        service_name: SERVICE_NAME.to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        status: status.to_string(),
        prediction_service: prediction_healthy,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
