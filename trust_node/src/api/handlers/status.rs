use crate::api::server::AppState;
use crate::policy::{TrustLevel, UpgradePath};
use axum::{extract::State, response::Json};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// Response for the health endpoints
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
    pub version: String,
    /// Seconds since the server started
    pub uptime: u64,
}

#[derive(Debug, Serialize)]
pub struct ApiStatusResponse {
    pub api: String,
    pub status: String,
    pub features: Vec<String>,
}

/// One row of the tier table
#[derive(Debug, Serialize)]
pub struct TierInfo {
    pub level: TrustLevel,
    pub min_score: u8,
    pub max_bet: Decimal,
    pub upgrade_path: UpgradePath,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "GeoProp Trust Node".to_string(),
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.started_at.elapsed().as_secs(),
    })
}

pub async fn api_status() -> Json<ApiStatusResponse> {
    Json(ApiStatusResponse {
        api: "GeoProp Trust v1".to_string(),
        status: "operational".to_string(),
        features: vec![
            "Device fingerprinting".to_string(),
            "Progressive trust tiers".to_string(),
            "Verification checks".to_string(),
            "Bet authorization".to_string(),
        ],
    })
}

pub async fn list_tiers(State(state): State<Arc<AppState>>) -> Json<Vec<TierInfo>> {
    let table = state.service.tiers();
    let tiers = table
        .tiers()
        .iter()
        .map(|tier| TierInfo {
            level: tier.level,
            min_score: tier.min_score,
            max_bet: tier.max_bet,
            upgrade_path: table.upgrade_path(tier.level),
        })
        .collect();
    Json(tiers)
}
