//! Request types for the bid award API.
//!
//! This module defines the JSON request structures for the `/award` endpoint.
//! Status codes and email addresses arrive as plain strings and are checked
//! while converting to domain types, so bad values produce a validation error
//! rather than a JSON parse error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Bid, BidChoice, BidSubmission, OptionSetting, Pilot, PilotId, SeniorityList,
    SeniorityListEntry, Term, validate_email, validate_status,
};

/// Request body for the `/award` endpoint.
///
/// Contains every record needed to award one bid. When `options` is omitted
/// the options configured for `bid.bid_type` apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardRequest {
    /// The bid being awarded.
    pub bid: Bid,
    /// The seniority list that orders pilots.
    pub seniority_list: SeniorityListRequest,
    /// The choices offered in the bid.
    pub choices: Vec<BidChoiceRequest>,
    /// Pilots' submitted priority lists.
    #[serde(default)]
    pub submissions: Vec<BidSubmission>,
    /// Option settings overriding the bid type's configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionSetting>>,
}

/// Seniority list in an award request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeniorityListRequest {
    /// Identifier of the list.
    pub id: String,
    /// Human readable description, e.g. "Seniority List v52".
    #[serde(default)]
    pub description: String,
    /// One entry per pilot.
    pub entries: Vec<SeniorityEntryRequest>,
}

/// One pilot's line in a seniority list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeniorityEntryRequest {
    /// eCrew id of the pilot.
    pub ecrew_id: PilotId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address. Checked when present.
    #[serde(default)]
    pub email: String,
    /// Company-wide seniority rank.
    #[serde(default)]
    pub master_seniority: Option<u32>,
    /// Captain seniority rank.
    #[serde(default)]
    pub captain_seniority: Option<u32>,
    /// Status code: CA, FO or SE.
    pub status: String,
}

/// A bid choice in an award request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidChoiceRequest {
    /// Unique identifier of the choice.
    pub id: String,
    /// The bid offering the choice.
    pub bid_id: String,
    /// Short code, e.g. "YVR".
    pub code: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// First day of the assignment.
    pub start_date: NaiveDate,
    /// Last day of the assignment.
    pub end_date: NaiveDate,
    /// Status code the choice is open to.
    pub status: String,
    /// Number of pilots the choice can take.
    pub available_places: i64,
    /// Full or half term.
    #[serde(default)]
    pub term: Term,
}

impl TryFrom<SeniorityEntryRequest> for SeniorityListEntry {
    type Error = EngineError;

    fn try_from(req: SeniorityEntryRequest) -> EngineResult<Self> {
        let status = validate_status(&req.status)?;
        if !req.email.is_empty() {
            validate_email(&req.email)?;
        }

        Ok(SeniorityListEntry {
            pilot: Pilot {
                ecrew_id: req.ecrew_id,
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
            },
            master_seniority: req.master_seniority,
            captain_seniority: req.captain_seniority,
            status,
        })
    }
}

impl TryFrom<SeniorityListRequest> for SeniorityList {
    type Error = EngineError;

    fn try_from(req: SeniorityListRequest) -> EngineResult<Self> {
        let entries = req
            .entries
            .into_iter()
            .map(SeniorityListEntry::try_from)
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(SeniorityList {
            id: req.id,
            description: req.description,
            entries,
        })
    }
}

impl TryFrom<BidChoiceRequest> for BidChoice {
    type Error = EngineError;

    fn try_from(req: BidChoiceRequest) -> EngineResult<Self> {
        Ok(BidChoice {
            status: validate_status(&req.status)?,
            id: req.id,
            bid_id: req.bid_id,
            code: req.code,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            available_places: req.available_places,
            term: req.term,
        })
    }
}

/// An award request converted to domain types.
#[derive(Debug, Clone)]
pub struct AwardInput {
    /// The bid being awarded.
    pub bid: Bid,
    /// The seniority list that orders pilots.
    pub seniority_list: SeniorityList,
    /// The choices offered in the bid.
    pub choices: Vec<BidChoice>,
    /// Pilots' submitted priority lists.
    pub submissions: Vec<BidSubmission>,
    /// Option settings overriding the bid type's configuration.
    pub options: Option<Vec<OptionSetting>>,
}

impl TryFrom<AwardRequest> for AwardInput {
    type Error = EngineError;

    fn try_from(req: AwardRequest) -> EngineResult<Self> {
        let choices = req
            .choices
            .into_iter()
            .map(BidChoice::try_from)
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(AwardInput {
            bid: req.bid,
            seniority_list: req.seniority_list.try_into()?,
            choices,
            submissions: req.submissions,
            options: req.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PilotStatus;

    fn entry(status: &str, email: &str) -> SeniorityEntryRequest {
        SeniorityEntryRequest {
            ecrew_id: 1042,
            first_name: "Jordan".to_string(),
            last_name: "Reyes".to_string(),
            email: email.to_string(),
            master_seniority: Some(12),
            captain_seniority: None,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_entry_conversion() {
        let converted = SeniorityListEntry::try_from(entry("FO", "j.reyes@example.com")).unwrap();
        assert_eq!(converted.status, PilotStatus::FirstOfficer);
        assert_eq!(converted.pilot.display_name(), "Jordan Reyes");
        assert_eq!(converted.captain_seniority, None);
    }

    #[test]
    fn test_entry_with_bad_status_is_rejected() {
        match SeniorityListEntry::try_from(entry("XX", "")) {
            Err(EngineError::InvalidStatus { value }) => assert_eq!(value, "XX"),
            other => panic!("Expected InvalidStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_entry_with_bad_email_is_rejected() {
        assert!(matches!(
            SeniorityListEntry::try_from(entry("CA", "not-an-address")),
            Err(EngineError::InvalidEmail { .. })
        ));
    }

    #[test]
    fn test_request_deserializes_without_options() {
        let json = r#"{
            "bid": {
                "id": "summer-2026",
                "bid_type": "summer_deployment",
                "open_date": "2026-03-01T00:00:00Z",
                "close_date": "2026-03-15T00:00:00Z"
            },
            "seniority_list": {
                "id": "v52",
                "entries": [
                    {"ecrew_id": 1, "first_name": "A", "last_name": "B",
                     "captain_seniority": 1, "status": "CA"}
                ]
            },
            "choices": [
                {"id": "YVR-CA", "bid_id": "summer-2026", "code": "YVR",
                 "start_date": "2026-05-01", "end_date": "2026-10-31",
                 "status": "CA", "available_places": 1}
            ],
            "submissions": [
                {"bid_id": "summer-2026", "pilot_id": 1,
                 "priorities": [{"choice_id": "YVR-CA", "priority": 1}]}
            ]
        }"#;

        let request: AwardRequest = serde_json::from_str(json).unwrap();
        assert!(request.options.is_none());

        let input = AwardInput::try_from(request).unwrap();
        assert_eq!(input.choices[0].term, Term::Full);
        assert_eq!(input.choices[0].status, PilotStatus::Captain);
        assert_eq!(input.seniority_list.entries.len(), 1);
        assert_eq!(input.submissions[0].priorities.len(), 1);
    }
}
