//! HTTP API module for the bid award engine.
//!
//! This module provides the REST API endpoints for running seniority awards
//! and listing the configured bid types.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{create_router, perform_award};
pub use request::{
    AwardInput, AwardRequest, BidChoiceRequest, SeniorityEntryRequest, SeniorityListRequest,
};
pub use response::{ApiError, ApiErrorResponse, AwardResponse, BidTypeResponse};
pub use state::AppState;
