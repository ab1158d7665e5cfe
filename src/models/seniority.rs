//! Seniority list models.
//!
//! A [`SeniorityList`] is one published instance of the seniority list used
//! to run a bid. The same pilot may appear in many lists, with a different
//! status in each, but only once in any one list.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Pilot, PilotId, PilotStatus};

/// Which seniority number orders pilots for a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityField {
    /// Company-wide master seniority.
    Master,
    /// Seniority within the captain group.
    #[default]
    Captain,
}

impl fmt::Display for SeniorityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeniorityField::Master => f.write_str("master"),
            SeniorityField::Captain => f.write_str("captain"),
        }
    }
}

/// A pilot's entry in one seniority list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeniorityListEntry {
    /// The pilot this entry ranks.
    pub pilot: Pilot,
    /// Master seniority rank, if assigned.
    #[serde(default)]
    pub master_seniority: Option<u32>,
    /// Captain seniority rank, if assigned.
    #[serde(default)]
    pub captain_seniority: Option<u32>,
    /// The pilot's status in this list.
    pub status: PilotStatus,
}

impl SeniorityListEntry {
    /// Returns the rank held in the given seniority field.
    pub fn seniority(&self, field: SeniorityField) -> Option<u32> {
        match field {
            SeniorityField::Master => self.master_seniority,
            SeniorityField::Captain => self.captain_seniority,
        }
    }

    /// Returns the ranked pilot's id.
    pub fn pilot_id(&self) -> PilotId {
        self.pilot.ecrew_id
    }
}

/// An instance of the seniority list which can be used to run a bid.
///
/// # Example
///
/// ```
/// use pilot_bid_engine::models::{
///     Pilot, PilotStatus, SeniorityField, SeniorityList, SeniorityListEntry,
/// };
///
/// let list = SeniorityList {
///     id: "v52".to_string(),
///     description: "Seniority List v52".to_string(),
///     entries: vec![SeniorityListEntry {
///         pilot: Pilot {
///             ecrew_id: 1,
///             first_name: "Amelia".to_string(),
///             last_name: "Reyes".to_string(),
///             email: String::new(),
///         },
///         master_seniority: Some(4),
///         captain_seniority: Some(1),
///         status: PilotStatus::Captain,
///     }],
/// };
/// assert_eq!(list.entry(1).unwrap().seniority(SeniorityField::Master), Some(4));
/// assert!(list.entry(2).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeniorityList {
    /// Identifier of the list.
    pub id: String,
    /// Description, e.g. "2015 Summer Bid List".
    pub description: String,
    /// The entries of the list.
    #[serde(default)]
    pub entries: Vec<SeniorityListEntry>,
}

impl SeniorityList {
    /// Finds the entry for a pilot.
    pub fn entry(&self, pilot_id: PilotId) -> Option<&SeniorityListEntry> {
        self.entries.iter().find(|e| e.pilot_id() == pilot_id)
    }
}

impl fmt::Display for SeniorityList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
