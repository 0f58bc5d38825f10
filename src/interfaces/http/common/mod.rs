//! Shared HTTP types: response envelope, error mapping, extractors

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PricingError;

/// Code carried by every successful response.
pub const SUCCESS_CODE: &str = "SUCCESS";

/// Standard API response envelope
///
/// Success: `{"success": true, "code": "SUCCESS", "data": {...}}`,
/// failure: `{"success": false, "code": "PRICE_NOT_EXISTS", "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Stable machine-readable result code
    pub code: String,
    /// Payload. `null` on failure
    pub data: Option<T>,
    /// Human-readable error. Omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: SUCCESS_CODE.to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler's result.
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// HTTP status for each pricing error.
pub fn status_for(err: &PricingError) -> StatusCode {
    match err {
        PricingError::RuleNotFound(_) => StatusCode::NOT_FOUND,
        PricingError::InvalidRule(_) | PricingError::InvalidTrip(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PricingError::UniquenessViolation { .. } | PricingError::RuleAlreadyExists(_) => {
            StatusCode::CONFLICT
        }
        PricingError::RuleUnchanged(_) => StatusCode::BAD_REQUEST,
        PricingError::Mapping { .. } => StatusCode::BAD_GATEWAY,
        PricingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a pricing error into the error envelope.
pub fn api_error(err: PricingError) -> ApiError {
    (
        status_for(&err),
        Json(ApiResponse::error(err.code(), err.to_string())),
    )
}
