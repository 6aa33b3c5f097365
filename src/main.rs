//! `FastTrip` - conversational travel intake backend
//!
//! A Rust backend that turns a free-text trip-planning chat into a
//! structured intake record, then derives flight searches and
//! point-of-interest queries from it.

mod api;
mod flights;
mod intake;
mod llm;
mod places;
mod planner;
mod session;

use api::{create_router, AppState};
use flights::FlightSearchService;
use intake::IntakeTracker;
use llm::LlmConfig;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fasttrip=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("FASTTRIP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    // Initialize the extraction oracle
    let llm_config = LlmConfig::from_env();
    let oracle = llm::build_oracle(&llm_config);

    match &oracle {
        Some(service) => {
            tracing::info!(model = %service.model_id(), "Extraction oracle initialized");
        }
        None => {
            tracing::warn!(
                "No oracle API key configured. Set GEMINI_API_KEY; until then every \
                 chat turn returns the fallback re-prompt."
            );
        }
    }

    let tracker = IntakeTracker::new(oracle);
    let flight_search = FlightSearchService::from_env();

    // Create application state
    let state = AppState::new(tracker, flight_search);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(cors).layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("FastTrip server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
