//! Award result models.
//!
//! This module contains the [`AwardResult`] type and its associated
//! structures that capture everything an award run decided, including the
//! per-pilot trail that explains every acceptance and rejection.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ChoiceId, PilotId, PilotStatus, SeniorityField};
use crate::error::SubmissionError;

/// What happened to one candidate or note in a pilot's trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The choice was awarded.
    Accepted,
    /// The choice was passed over.
    Rejected,
    /// Informational step with no choice decided.
    Noted,
}

/// A single step in a pilot's trail.
///
/// Each step captures the rule applied, the choice it concerned and the
/// reasoning behind the decision.
///
/// # Example
///
/// ```
/// use pilot_bid_engine::models::{Decision, TrailStep};
///
/// let step = TrailStep {
///     step_number: 1,
///     rule_id: "priority_scan".to_string(),
///     choice_id: Some("YVR-CA".to_string()),
///     priority: Some(1),
///     remaining_places: Some(0),
///     decision: Decision::Rejected,
///     reasoning: "full".to_string(),
/// };
/// assert_eq!(step.decision, Decision::Rejected);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailStep {
    /// The sequential step number within the pilot's trail.
    pub step_number: u32,
    /// Identifier of the rule that produced the step.
    pub rule_id: String,
    /// The choice considered, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_id: Option<ChoiceId>,
    /// The pilot's priority for the choice, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Places left on the choice when it was considered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_places: Option<u32>,
    /// The decision taken.
    pub decision: Decision,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Why a pilot received no award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnassignedReason {
    /// Every choice the pilot listed was already full.
    Full,
    /// The pilot submitted an empty list.
    NoChoicesSubmitted,
    /// The pilot's submission was rejected during validation.
    InvalidSubmission {
        /// The validation failure.
        error: SubmissionError,
    },
}

impl fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnassignedReason::Full => f.write_str("full"),
            UnassignedReason::NoChoicesSubmitted => f.write_str("no choices submitted"),
            UnassignedReason::InvalidSubmission { error } => {
                write!(f, "invalid submission: {}", error)
            }
        }
    }
}

/// The outcome for one pilot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AwardOutcome {
    /// The pilot was awarded a choice.
    Assigned {
        /// The awarded choice.
        choice_id: ChoiceId,
    },
    /// The pilot was not awarded anything.
    Unassigned {
        /// Why nothing was awarded.
        reason: UnassignedReason,
    },
}

/// The award decision for one submitting pilot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotAward {
    /// The pilot's id.
    pub pilot_id: PilotId,
    /// The pilot's display name.
    pub display_name: String,
    /// The pilot's status in the seniority list.
    pub status: PilotStatus,
    /// The pilot's rank in the seniority field used, if ranked.
    pub seniority_rank: Option<u32>,
    /// What the pilot was awarded.
    #[serde(flatten)]
    pub outcome: AwardOutcome,
    /// Every decision taken for this pilot, in order.
    pub trail: Vec<TrailStep>,
}

impl PilotAward {
    /// Returns the awarded choice, if any.
    pub fn assigned_choice(&self) -> Option<&str> {
        match &self.outcome {
            AwardOutcome::Assigned { choice_id } => Some(choice_id),
            AwardOutcome::Unassigned { .. } => None,
        }
    }

    /// Returns the reason no choice was awarded, if unassigned.
    pub fn unassigned_reason(&self) -> Option<&UnassignedReason> {
        match &self.outcome {
            AwardOutcome::Assigned { .. } => None,
            AwardOutcome::Unassigned { reason } => Some(reason),
        }
    }
}

/// Capacity accounting for one choice after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSummary {
    /// The choice id.
    pub choice_id: ChoiceId,
    /// The choice's short code.
    pub code: String,
    /// Status the choice is open to.
    pub status: PilotStatus,
    /// Places open at the start of the run.
    pub available_places: u32,
    /// Places awarded during the run.
    pub awarded: u32,
    /// Places still open after the run.
    pub remaining: u32,
}

/// A rejected submission from a pilot who is not on the seniority list.
///
/// Such a pilot has no rank or status, so the rejection is reported apart
/// from the per-pilot awards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedSubmission {
    /// The submitting pilot's id.
    pub pilot_id: PilotId,
    /// Why the submission was rejected.
    pub error: SubmissionError,
}

/// The complete result of one award run.
///
/// Holds only what the inputs determine, so two runs over identical inputs
/// compare equal.
///
/// # Example
///
/// ```
/// use pilot_bid_engine::models::{AwardResult, SeniorityField};
///
/// let result = AwardResult {
///     bid_id: "summer-2026".to_string(),
///     seniority_field: SeniorityField::Captain,
///     awards: vec![],
///     choices: vec![],
///     unlisted_rejections: vec![],
/// };
/// assert_eq!(result.unassigned().count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardResult {
    /// The bid the run was for.
    pub bid_id: String,
    /// The seniority field that ordered the pilots.
    pub seniority_field: SeniorityField,
    /// Per-pilot awards, most senior first.
    pub awards: Vec<PilotAward>,
    /// Per-choice capacity accounting, in catalog order.
    pub choices: Vec<ChoiceSummary>,
    /// Rejected submissions from pilots not on the seniority list, by pilot id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unlisted_rejections: Vec<RejectedSubmission>,
}

impl AwardResult {
    /// Returns the award record for a pilot.
    pub fn award_for(&self, pilot_id: PilotId) -> Option<&PilotAward> {
        self.awards.iter().find(|a| a.pilot_id == pilot_id)
    }

    /// Returns the choice awarded to a pilot, if any.
    pub fn assigned_choice(&self, pilot_id: PilotId) -> Option<&str> {
        self.award_for(pilot_id).and_then(PilotAward::assigned_choice)
    }

    /// Counts the pilots awarded a given choice.
    pub fn awarded_count(&self, choice_id: &str) -> usize {
        self.awards
            .iter()
            .filter(|a| a.assigned_choice() == Some(choice_id))
            .count()
    }

    /// Iterates over pilots that received no award.
    pub fn unassigned(&self) -> impl Iterator<Item = &PilotAward> {
        self.awards
            .iter()
            .filter(|a| matches!(a.outcome, AwardOutcome::Unassigned { .. }))
    }

    /// Returns the capacity summary of a choice.
    pub fn choice_summary(&self, choice_id: &str) -> Option<&ChoiceSummary> {
        self.choices.iter().find(|c| c.choice_id == choice_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn award(pilot_id: PilotId, outcome: AwardOutcome) -> PilotAward {
        PilotAward {
            pilot_id,
            display_name: format!("Pilot {}", pilot_id),
            status: PilotStatus::Captain,
            seniority_rank: Some(pilot_id),
            outcome,
            trail: vec![],
        }
    }

    fn assigned(choice: &str) -> AwardOutcome {
        AwardOutcome::Assigned {
            choice_id: choice.to_string(),
        }
    }

    fn sample_result() -> AwardResult {
        AwardResult {
            bid_id: "summer-2026".to_string(),
            seniority_field: SeniorityField::Captain,
            awards: vec![
                award(1, assigned("YVR-CA")),
                award(2, assigned("YVR-CA")),
                award(
                    3,
                    AwardOutcome::Unassigned {
                        reason: UnassignedReason::Full,
                    },
                ),
            ],
            choices: vec![],
            unlisted_rejections: vec![],
        }
    }

    #[test]
    fn test_result_lookups() {
        let result = sample_result();
        assert_eq!(result.assigned_choice(1), Some("YVR-CA"));
        assert_eq!(result.assigned_choice(3), None);
        assert_eq!(result.assigned_choice(99), None);
        assert_eq!(result.awarded_count("YVR-CA"), 2);
        assert_eq!(result.awarded_count("YYZ-CA"), 0);

        let unassigned: Vec<PilotId> = result.unassigned().map(|a| a.pilot_id).collect();
        assert_eq!(unassigned, vec![3]);
    }

    #[test]
    fn test_unassigned_reason_display() {
        assert_eq!(UnassignedReason::Full.to_string(), "full");
        assert_eq!(
            UnassignedReason::NoChoicesSubmitted.to_string(),
            "no choices submitted"
        );
        let invalid = UnassignedReason::InvalidSubmission {
            error: SubmissionError::DuplicatePriority { priority: 1 },
        };
        assert_eq!(
            invalid.to_string(),
            "invalid submission: duplicate priority rank 1"
        );
    }

    #[test]
    fn test_pilot_award_serializes_flat_outcome() {
        let json = serde_json::to_value(award(1, assigned("YVR-CA"))).unwrap();
        assert_eq!(json["outcome"], "assigned");
        assert_eq!(json["choice_id"], "YVR-CA");
        assert_eq!(json["status"], "CA");

        let unassigned = award(
            2,
            AwardOutcome::Unassigned {
                reason: UnassignedReason::Full,
            },
        );
        let json = serde_json::to_value(unassigned).unwrap();
        assert_eq!(json["outcome"], "unassigned");
        assert_eq!(json["reason"]["reason"], "full");
    }

    #[test]
    fn test_trail_step_skips_empty_fields() {
        let step = TrailStep {
            step_number: 1,
            rule_id: "submission_validation".to_string(),
            choice_id: None,
            priority: None,
            remaining_places: None,
            decision: Decision::Noted,
            reasoning: "invalid submission: unknown choice 'ZZZ'".to_string(),
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(!json.contains("choice_id"));
        assert!(json.contains("\"decision\":\"noted\""));
    }

    #[test]
    fn test_award_result_deserializes_what_it_serializes() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let back: AwardResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
