use crate::api::handlers::{bets, devices, status};
use crate::config::TrustConfig;
use crate::service::DeviceTrustService;
use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Shared state for all handlers
pub struct AppState {
    pub service: Arc<DeviceTrustService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: Arc<DeviceTrustService>) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}

// API Router
pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        // Health and info endpoints
        .route("/", get(status::health_check))
        .route("/health", get(status::health_check))
        .route("/api/v1/status", get(status::api_status))
        .route("/api/v1/trust/tiers", get(status::list_tiers))
        // Device trust endpoints
        .route("/api/v1/devices/register", post(devices::register_device))
        .route("/api/v1/bets/validate", post(bets::validate_bet))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

// Server startup
pub async fn start_api_server(config: &TrustConfig, service: Arc<DeviceTrustService>) -> Result<()> {
    let addr = config.listen_addr();
    let app = create_router(Arc::new(AppState::new(service)), &config.server.cors_origins);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Trust API listening on {}", addr);

    axum::serve(listener, app).await.context("API server terminated")?;
    Ok(())
}
