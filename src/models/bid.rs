//! Bid, bid type and bid choice models.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::PilotStatus;

/// Identifier of a bid choice.
pub type ChoiceId = String;

/// Duration classification of a bid choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// The position runs for the whole bid period.
    #[default]
    Full,
    /// The position runs for half of the bid period.
    Half,
}

/// A type of bid, which determines the options that apply to it.
///
/// Examples include a vacation bid, an upgrade bid or a deployment bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidType {
    /// Identifier, e.g. "summer_deployment".
    pub id: String,
    /// Description, e.g. "Summer Deployment".
    pub description: String,
}

/// A bid published by the operator for seniority bidding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Identifier of the bid.
    pub id: String,
    /// Identifier of the bid type.
    pub bid_type: String,
    /// Identifier of the seniority list the bid is run against.
    #[serde(default)]
    pub seniority_list_id: Option<String>,
    /// When bidding opens.
    pub open_date: DateTime<Utc>,
    /// When bidding closes.
    pub close_date: DateTime<Utc>,
}

impl Bid {
    /// Returns true if the timestamp lies inside the bidding window, inclusive.
    pub fn is_open_at(&self, timestamp: DateTime<Utc>) -> bool {
        self.open_date <= timestamp && timestamp <= self.close_date
    }

    /// Renders "<bid type description>, <open date>".
    ///
    /// A bid only carries its type's id, so the caller supplies the
    /// description from the bid type's configuration.
    pub fn label(&self, bid_type_description: &str) -> String {
        format!("{}, {}", bid_type_description, self.open_date.date_naive())
    }
}

/// Renders "<bid type id>, <open date>". See [`Bid::label`] for the form
/// using the bid type's description.
impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.bid_type, self.open_date.date_naive())
    }
}

/// One awardable slot category of a bid, with a finite number of places.
///
/// # Example
///
/// ```
/// use pilot_bid_engine::models::{BidChoice, PilotStatus, Term};
/// use chrono::NaiveDate;
///
/// let choice = BidChoice {
///     id: "YVR-CA".to_string(),
///     bid_id: "summer-2026".to_string(),
///     code: "YVR".to_string(),
///     description: "Vancouver Base".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
///     status: PilotStatus::Captain,
///     available_places: 14,
///     term: Term::Full,
/// };
/// assert!(choice.is_open_to(PilotStatus::Captain));
/// assert!(!choice.is_open_to(PilotStatus::FirstOfficer));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidChoice {
    /// Identifier of the choice, unique within its bid.
    pub id: ChoiceId,
    /// The bid owning this choice.
    pub bid_id: String,
    /// Short form, e.g. "YVR".
    pub code: String,
    /// Long form, e.g. "Vancouver Base".
    pub description: String,
    /// Date the position commences.
    pub start_date: NaiveDate,
    /// Date the position ends.
    pub end_date: NaiveDate,
    /// The pilot status the position is open to.
    pub status: PilotStatus,
    /// Number of places open for bidding.
    pub available_places: i64,
    /// Full or half term.
    #[serde(default)]
    pub term: Term,
}

impl BidChoice {
    /// Returns true if a pilot with this status may be awarded the choice.
    pub fn is_open_to(&self, status: PilotStatus) -> bool {
        self.status == status
    }
}

impl fmt::Display for BidChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
