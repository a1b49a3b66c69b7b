use crate::api::errors::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::device::ClientHints;
use crate::service::DeviceRegistration;
use axum::{extract::State, response::Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RegisterDeviceRequest {
    pub user_id: String,
    #[serde(default)]
    pub client: ClientHints,
}

pub async fn register_device(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterDeviceRequest>,
) -> ApiResult<Json<DeviceRegistration>> {
    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::validation_error("user_id", "must not be empty"));
    }

    let registration = state.service.register_device(user_id, &req.client).await?;
    Ok(Json(registration))
}
