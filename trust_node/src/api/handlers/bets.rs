use crate::api::errors::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::policy::{BetAuthorizationResult, TrustLevel, UpgradePath};
use axum::{extract::State, response::Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ValidateBetRequest {
    pub device_id: String,
    pub bet_amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ValidateBetResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_path: Option<UpgradePath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_level: Option<TrustLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_limit: Option<Decimal>,
}

impl From<BetAuthorizationResult> for ValidateBetResponse {
    fn from(result: BetAuthorizationResult) -> Self {
        match result {
            BetAuthorizationResult::Approved {
                trust_level,
                remaining_limit,
            } => Self {
                allowed: true,
                reason: None,
                upgrade_path: None,
                trust_level: Some(trust_level),
                remaining_limit: Some(remaining_limit),
            },
            BetAuthorizationResult::Denied {
                reason,
                upgrade_path,
            } => Self {
                allowed: false,
                reason: Some(reason),
                upgrade_path: Some(upgrade_path),
                trust_level: None,
                remaining_limit: None,
            },
        }
    }
}

pub async fn validate_bet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidateBetRequest>,
) -> ApiResult<Json<ValidateBetResponse>> {
    if req.device_id.trim().is_empty() {
        return Err(ApiError::validation_error("device_id", "must not be empty"));
    }
    if req.bet_amount <= Decimal::ZERO {
        return Err(ApiError::validation_error(
            "bet_amount",
            &format!("must be greater than zero, got {}", req.bet_amount),
        ));
    }

    let result = state
        .service
        .validate_bet_request(req.device_id.trim(), req.bet_amount)
        .await?;
    Ok(Json(result.into()))
}
