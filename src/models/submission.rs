//! Bid submission models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChoiceId, PilotId};

/// A priority for a bid choice in a given submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicePriority {
    /// The choice being ranked.
    pub choice_id: ChoiceId,
    /// Preference order, 1 being the most wanted.
    pub priority: u32,
}

/// A pilot's submission to a bid: a timestamp and a list of priorities.
///
/// # Example
///
/// ```
/// use pilot_bid_engine::models::BidSubmission;
///
/// let submission = BidSubmission::ranked("summer-2026", 1042, &["YVR-CA", "YYZ-CA"]);
/// assert_eq!(submission.priorities[1].choice_id, "YYZ-CA");
/// assert_eq!(submission.priorities[1].priority, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidSubmission {
    /// The bid submitted to.
    pub bid_id: String,
    /// The submitting pilot.
    pub pilot_id: PilotId,
    /// When the submission was made.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// The ranked choices.
    #[serde(default)]
    pub priorities: Vec<ChoicePriority>,
}

impl BidSubmission {
    /// Builds an untimed submission ranking the given choices 1..N in order.
    pub fn ranked(bid_id: &str, pilot_id: PilotId, choices: &[&str]) -> Self {
        Self {
            bid_id: bid_id.to_string(),
            pilot_id,
            timestamp: None,
            priorities: choices
                .iter()
                .zip(1..)
                .map(|(choice_id, priority)| ChoicePriority {
                    choice_id: choice_id.to_string(),
                    priority,
                })
                .collect(),
        }
    }
}
