//! API error handling for the trust node

use crate::error::TrustError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub timestamp: u64,
}

impl ApiError {
    pub fn new(code: u16, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            timestamp: chrono::Utc::now().timestamp() as u64,
        }
    }

    pub fn with_details(code: u16, message: String, details: serde_json::Value) -> Self {
        Self {
            code,
            message,
            details: Some(details),
            timestamp: chrono::Utc::now().timestamp() as u64,
        }
    }

    pub fn internal_server_error(message: &str) -> Self {
        Self::new(500, message.to_string())
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::with_details(
            422,
            "Validation error".to_string(),
            serde_json::json!({
                "field": field,
                "reason": reason
            }),
        )
    }

    pub fn device_not_found(device_id: &str) -> Self {
        Self::with_details(
            404,
            "Device not registered".to_string(),
            serde_json::json!({
                "device_id": device_id
            }),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API Error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<TrustError> for ApiError {
    fn from(err: TrustError) -> Self {
        match err {
            TrustError::InvalidBetAmount(amount) => {
                Self::validation_error("bet_amount", &format!("must be greater than zero, got {}", amount))
            }
            TrustError::UnknownDevice(device_id) => Self::device_not_found(&device_id),
            other => {
                error!("Request failed: {}", other);
                Self::internal_server_error(&other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_trust_error_mapping() {
        let err: ApiError = TrustError::InvalidBetAmount(Decimal::from(-1)).into();
        assert_eq!(err.code, 422);
        assert_eq!(err.details.unwrap()["field"], "bet_amount");

        let err: ApiError = TrustError::UnknownDevice("abc".to_string()).into();
        assert_eq!(err.code, 404);

        let err: ApiError = TrustError::Storage("down".to_string()).into();
        assert_eq!(err.code, 500);
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::validation_error("user_id", "must not be empty").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
