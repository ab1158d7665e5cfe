//! HTTP request handlers for the bid award API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::engine::{OptionPolicy, run_award};
use crate::error::EngineResult;
use crate::models::AwardResult;

use super::request::{AwardInput, AwardRequest};
use super::response::{ApiError, ApiErrorResponse, AwardResponse, BidTypeResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/award", post(award_handler))
        .route("/bid-types", get(bid_types_handler))
        .with_state(state)
}

/// Handler for POST /award endpoint.
///
/// Accepts an award request and returns the award result in its envelope.
async fn award_handler(
    State(state): State<AppState>,
    payload: Result<Json<AwardRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing award request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let bid_id = request.bid.id.clone();
    let start_time = Instant::now();
    match perform_award(request, state.config()) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                bid_id = %bid_id,
                pilots = result.awards.len(),
                unassigned = result.unassigned().count(),
                duration_us = duration.as_micros(),
                "Award completed successfully"
            );
            let response = AwardResponse {
                run_id: correlation_id,
                computed_at: Utc::now(),
                engine_version: state.config().metadata().version.clone(),
                duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
                result,
            };
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                bid_id = %bid_id,
                error = %err,
                "Award failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for GET /bid-types endpoint.
///
/// Lists every configured bid type with its options, ordered by id.
async fn bid_types_handler(State(state): State<AppState>) -> Json<Vec<BidTypeResponse>> {
    let bid_types = state
        .config()
        .config()
        .bid_types()
        .iter()
        .map(|(id, bid_type)| BidTypeResponse {
            id: id.clone(),
            description: bid_type.description.clone(),
            options: bid_type.options.clone(),
        })
        .collect();
    Json(bid_types)
}

/// Converts the request, resolves the option policy and runs the award.
///
/// Options supplied in the request take precedence over the bid type's
/// configured options. Without them the bid type must be configured.
pub fn perform_award(request: AwardRequest, config: &ConfigLoader) -> EngineResult<AwardResult> {
    let input = AwardInput::try_from(request)?;

    let policy = match input.options {
        Some(settings) => OptionPolicy::from_settings(settings)?,
        None => {
            let bid_type = config.get_bid_type(&input.bid.bid_type)?;
            debug!(bid = %input.bid.label(&bid_type.description), "Using configured options");
            config.option_policy(&input.bid.bid_type)?
        }
    };

    run_award(
        &input.bid,
        &input.seniority_list,
        input.choices,
        &input.submissions,
        &policy,
    )
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/pilotbid").expect("Failed to load config");
        AppState::new(config)
    }

    fn create_valid_request() -> Value {
        json!({
            "bid": {
                "id": "summer-2026",
                "bid_type": "summer_deployment",
                "open_date": "2026-03-01T00:00:00Z",
                "close_date": "2026-03-15T00:00:00Z"
            },
            "seniority_list": {
                "id": "v52",
                "description": "Seniority List v52",
                "entries": [
                    {"ecrew_id": 100, "first_name": "Avery", "last_name": "Chen",
                     "master_seniority": 10, "captain_seniority": 1, "status": "CA"}
                ]
            },
            "choices": [
                {"id": "YVR-CA", "bid_id": "summer-2026", "code": "YVR",
                 "description": "Vancouver Base", "start_date": "2026-05-01",
                 "end_date": "2026-10-31", "status": "CA", "available_places": 1}
            ],
            "submissions": [
                {"bid_id": "summer-2026", "pilot_id": 100,
                 "priorities": [{"choice_id": "YVR-CA", "priority": 1}]}
            ]
        })
    }

    async fn post_award(body: String) -> (StatusCode, Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/award")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let (status, body) = post_award(create_valid_request().to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let response: AwardResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.engine_version, "2026-10");
        assert_eq!(response.result.assigned_choice(100), Some("YVR-CA"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, body) = post_award("{ not json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_bid_returns_400() {
        let mut request = create_valid_request();
        request.as_object_mut().unwrap().remove("bid");
        let (status, body) = post_award(request.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_unknown_bid_type_returns_400() {
        let mut request = create_valid_request();
        request["bid"]["bid_type"] = json!("reserve_lines");
        let (status, body) = post_award(request.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BID_TYPE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_inline_options_bypass_bid_type_lookup() {
        let mut request = create_valid_request();
        request["bid"]["bid_type"] = json!("reserve_lines");
        request["options"] = json!([]);
        let (status, _) = post_award(request.to_string()).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bid_types_lists_configuration() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/bid-types")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let bid_types: Vec<BidTypeResponse> = serde_json::from_slice(&body).unwrap();
        let ids: Vec<&str> = bid_types.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["summer_deployment", "upgrade", "vacation"]);
    }
}
