//! Core data models for the bid award engine.
//!
//! This module contains the records supplied by external storage (pilots,
//! seniority lists, bids, choices, submissions, options) and the
//! [`AwardResult`] an award run produces.

mod award_result;
mod bid;
mod option;
mod pilot;
mod seniority;
mod submission;

pub use award_result::{
    AwardOutcome, AwardResult, ChoiceSummary, Decision, PilotAward, RejectedSubmission,
    TrailStep, UnassignedReason,
};
pub use bid::{Bid, BidChoice, BidType, ChoiceId, Term};
pub use option::OptionSetting;
pub use pilot::{Pilot, PilotId, PilotStatus, validate_email, validate_status};
pub use seniority::{SeniorityField, SeniorityList, SeniorityListEntry};
pub use submission::{BidSubmission, ChoicePriority};
