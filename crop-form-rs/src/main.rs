// crop-form-rs/src/main.rs
// Crop Advisor form front-end
// Port 2000 - serves the measurement form and forwards submissions to the
// prediction service

use std::sync::Arc;

use config_rs::ServiceConfig;
use crop_form::{create_router, AppState, SERVICE_NAME};
use prediction_sdk::config::DEFAULT_PROVIDER;
use prediction_sdk::{PredictionClient, PredictionServiceConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 2000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Loads .env before anything reads the environment
    let service_config = ServiceConfig::new(SERVICE_NAME);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = service_config.get_service_port(DEFAULT_PORT);
    let static_dir = service_config.get_setting(
        "static_dir",
        concat!(env!("CARGO_MANIFEST_DIR"), "/web/static"),
    );

    // CROP_ADVISOR_PREDICTION_* variables; a bad value stops startup
    let prediction_config = PredictionServiceConfig::from_provider(&**DEFAULT_PROVIDER)?;
    let predictor = PredictionClient::new_with_config(prediction_config)?;

    tracing::info!("Using Crop Form port: {}", port);
    tracing::info!("Using prediction endpoint: {}", predictor.prediction_url());
    tracing::info!("Serving static files from: {}", static_dir);

    let state = Arc::new(AppState::new(Arc::new(predictor), static_dir));
    let app = create_router(state);

    let addr = service_config.get_bind_address(port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server running at {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
