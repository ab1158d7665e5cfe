//! Error types for the bid award engine.
//!
//! Two families of errors exist. [`EngineError`] is fatal: it aborts an award
//! run before any assignment is produced. [`SubmissionError`] is local to one
//! pilot's submission: it is recorded in that pilot's trail and never stops
//! the batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PilotId, PilotStatus, SeniorityField};

/// Broad classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Seniority data is missing or inconsistent.
    Integrity,
    /// Catalog, option or record data is malformed.
    Validation,
    /// Engine configuration could not be loaded or resolved.
    Config,
}

/// The main error type for the bid award engine.
///
/// # Example
///
/// ```
/// use pilot_bid_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::MissingSeniorityEntry {
///     pilot_id: 1042,
///     list: "Seniority List v52".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Pilot 1042 has no entry in seniority list 'Seniority List v52'"
/// );
/// assert_eq!(error.kind(), ErrorKind::Integrity);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No bid type with this id is configured.
    #[error("Bid type not found: {bid_type}")]
    BidTypeNotFound {
        /// The bid type id that was requested.
        bid_type: String,
    },

    /// A submitting pilot has no entry in the seniority list.
    #[error("Pilot {pilot_id} has no entry in seniority list '{list}'")]
    MissingSeniorityEntry {
        /// The pilot without an entry.
        pilot_id: PilotId,
        /// Description of the seniority list.
        list: String,
    },

    /// The configured seniority field is absent for an eligible pilot.
    #[error("Pilot {pilot_id} has no {field} seniority")]
    MissingSeniorityField {
        /// The pilot missing the field.
        pilot_id: PilotId,
        /// The seniority field the bid uses.
        field: SeniorityField,
    },

    /// The same pilot appears more than once in a seniority list.
    #[error("Pilot {pilot_id} appears more than once in seniority list '{list}'")]
    DuplicateSeniorityEntry {
        /// The duplicated pilot.
        pilot_id: PilotId,
        /// Description of the seniority list.
        list: String,
    },

    /// Two entries of a seniority list share a rank.
    #[error("{field} seniority rank {rank} is shared by pilots {first} and {second}")]
    DuplicateSeniorityRank {
        /// The seniority field holding the duplicate.
        field: SeniorityField,
        /// The shared rank.
        rank: u32,
        /// The first pilot holding the rank.
        first: PilotId,
        /// The second pilot holding the rank.
        second: PilotId,
    },

    /// A bid choice is malformed.
    #[error("Invalid bid choice '{choice_id}': {message}")]
    InvalidChoice {
        /// The id of the invalid choice.
        choice_id: String,
        /// What made the choice invalid.
        message: String,
    },

    /// Two choices in one catalog share an id.
    #[error("Duplicate bid choice: {choice_id}")]
    DuplicateChoice {
        /// The duplicated choice id.
        choice_id: String,
    },

    /// A bid is malformed.
    #[error("Invalid bid '{bid_id}': {message}")]
    InvalidBid {
        /// The id of the invalid bid.
        bid_id: String,
        /// What made the bid invalid.
        message: String,
    },

    /// An option setting is malformed.
    #[error("Invalid option '{name}': {message}")]
    InvalidOption {
        /// The option name.
        name: String,
        /// What made the option invalid.
        message: String,
    },

    /// A pilot status code is not one of CA, FO or SE.
    #[error("Invalid pilot status '{value}': enter a valid status, e.g. CA, FO, SE")]
    InvalidStatus {
        /// The rejected value.
        value: String,
    },

    /// An email address is malformed.
    #[error("Invalid email address '{value}'")]
    InvalidEmail {
        /// The rejected value.
        value: String,
    },
}

impl EngineError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::BidTypeNotFound { .. } => ErrorKind::Config,
            EngineError::MissingSeniorityEntry { .. }
            | EngineError::MissingSeniorityField { .. }
            | EngineError::DuplicateSeniorityEntry { .. }
            | EngineError::DuplicateSeniorityRank { .. } => ErrorKind::Integrity,
            EngineError::InvalidChoice { .. }
            | EngineError::DuplicateChoice { .. }
            | EngineError::InvalidBid { .. }
            | EngineError::InvalidOption { .. }
            | EngineError::InvalidStatus { .. }
            | EngineError::InvalidEmail { .. } => ErrorKind::Validation,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Why a single pilot's submission was rejected.
///
/// These errors never abort a run. The pilot is treated as if they had
/// submitted an empty list and the reason is written to their trail.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum SubmissionError {
    /// The submission references a different bid.
    #[error("submission is for bid '{bid_id}'")]
    WrongBid {
        /// The bid the submission names.
        bid_id: String,
    },

    /// The submission was made outside the bid's open window.
    #[error("submitted at {timestamp}, outside the bidding window")]
    OutsideBidWindow {
        /// When the submission was made.
        timestamp: DateTime<Utc>,
    },

    /// The submitting pilot is not on the seniority list.
    #[error("pilot is not on the seniority list")]
    NotOnSeniorityList,

    /// The pilot has more than one submission and none can be preferred.
    #[error("multiple submissions without a distinct latest timestamp")]
    DuplicateSubmission,

    /// Two priorities share the same rank.
    #[error("duplicate priority rank {priority}")]
    DuplicatePriority {
        /// The repeated rank.
        priority: u32,
    },

    /// Priority ranks do not run 1, 2, 3, ... without gaps.
    #[error("priority ranks are not contiguous: expected {expected}, found {found}")]
    NonContiguousPriorities {
        /// The rank that should have come next.
        expected: u32,
        /// The rank found instead.
        found: u32,
    },

    /// The same choice is listed more than once.
    #[error("choice '{choice_id}' listed more than once")]
    DuplicateChoice {
        /// The repeated choice.
        choice_id: String,
    },

    /// A listed choice is not part of the bid.
    #[error("unknown choice '{choice_id}'")]
    UnknownChoice {
        /// The unknown choice id.
        choice_id: String,
    },

    /// A listed choice is not open to the pilot's status.
    #[error("choice '{choice_id}' is not open to status {status}")]
    IneligibleChoice {
        /// The choice id.
        choice_id: String,
        /// The pilot's status in the seniority list.
        status: PilotStatus,
    },

    /// The list is longer than the bid type allows.
    #[error("{count} priorities exceed the maximum of {max}")]
    TooManyPriorities {
        /// Number of priorities submitted.
        count: usize,
        /// Maximum allowed.
        max: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
        assert_eq!(error.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_missing_seniority_field_displays_field() {
        let error = EngineError::MissingSeniorityField {
            pilot_id: 7,
            field: SeniorityField::Captain,
        };
        assert_eq!(error.to_string(), "Pilot 7 has no captain seniority");
        assert_eq!(error.kind(), ErrorKind::Integrity);
    }

    #[test]
    fn test_duplicate_rank_displays_both_pilots() {
        let error = EngineError::DuplicateSeniorityRank {
            field: SeniorityField::Master,
            rank: 12,
            first: 100,
            second: 200,
        };
        assert_eq!(
            error.to_string(),
            "master seniority rank 12 is shared by pilots 100 and 200"
        );
    }

    #[test]
    fn test_invalid_choice_is_validation_error() {
        let error = EngineError::InvalidChoice {
            choice_id: "YVR-CA".to_string(),
            message: "available places cannot be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid bid choice 'YVR-CA': available places cannot be negative"
        );
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_invalid_status_message() {
        let error = EngineError::InvalidStatus {
            value: "XX".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid pilot status 'XX': enter a valid status, e.g. CA, FO, SE"
        );
    }

    #[test]
    fn test_submission_error_messages() {
        assert_eq!(
            SubmissionError::DuplicatePriority { priority: 2 }.to_string(),
            "duplicate priority rank 2"
        );
        assert_eq!(
            SubmissionError::NonContiguousPriorities {
                expected: 2,
                found: 3
            }
            .to_string(),
            "priority ranks are not contiguous: expected 2, found 3"
        );
        assert_eq!(
            SubmissionError::IneligibleChoice {
                choice_id: "YVR-CA".to_string(),
                status: PilotStatus::FirstOfficer,
            }
            .to_string(),
            "choice 'YVR-CA' is not open to status FO"
        );
    }

    #[test]
    fn test_submission_error_serializes_with_code() {
        let json = serde_json::to_value(SubmissionError::UnknownChoice {
            choice_id: "ZZZ".to_string(),
        })
        .unwrap();
        assert_eq!(json["code"], "unknown_choice");
        assert_eq!(json["choice_id"], "ZZZ");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
        assert_error::<SubmissionError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_entry() -> EngineResult<()> {
            Err(EngineError::MissingSeniorityEntry {
                pilot_id: 1,
                list: "test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_entry()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
