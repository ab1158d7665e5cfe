//! Response types for the bid award API.
//!
//! This module defines the success envelope, the error response structures
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, ErrorKind};
use crate::models::{AwardResult, OptionSetting};

/// Successful response of the `/award` endpoint.
///
/// Run metadata lives here so the wrapped [`AwardResult`] stays identical
/// for identical inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardResponse {
    /// Unique id of this award run.
    pub run_id: Uuid,
    /// When the award was computed.
    pub computed_at: DateTime<Utc>,
    /// Version of the engine configuration that produced the result.
    pub engine_version: String,
    /// Time taken by the award run, in microseconds.
    pub duration_us: u64,
    /// The award itself.
    pub result: AwardResult,
}

/// A configured bid type as listed by `/bid-types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidTypeResponse {
    /// Bid type id.
    pub id: String,
    /// Description of the bid type.
    pub description: String,
    /// Options in force for bids of this type.
    pub options: Vec<OptionSetting>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a bid type not found error response.
    pub fn bid_type_not_found(bid_type: &str) -> Self {
        Self::with_details(
            "BID_TYPE_NOT_FOUND",
            format!("Bid type not found: {}", bid_type),
            format!("The bid type '{}' is not configured on this engine", bid_type),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        if let EngineError::BidTypeNotFound { bid_type } = &error {
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::bid_type_not_found(bid_type),
            };
        }

        match error.kind() {
            ErrorKind::Integrity => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INTEGRITY_ERROR",
                    error.to_string(),
                    "The seniority list is missing or inconsistent for a submitting pilot",
                ),
            },
            ErrorKind::Validation => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(error.to_string()),
            },
            ErrorKind::Config => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    error.to_string(),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeniorityField;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_bid_type_not_found_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::BidTypeNotFound {
            bid_type: "reserve".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "BID_TYPE_NOT_FOUND");
        assert!(api_error.error.message.contains("reserve"));
    }

    #[test]
    fn test_integrity_error_maps_to_422() {
        let api_error: ApiErrorResponse = EngineError::MissingSeniorityField {
            pilot_id: 7,
            field: SeniorityField::Captain,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "INTEGRITY_ERROR");
        assert_eq!(api_error.error.message, "Pilot 7 has no captain seniority");
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidStatus {
            value: "XX".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_config_error_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "engine.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
