//! Pilot model and status validation.
//!
//! This module defines the [`Pilot`] record and the closed [`PilotStatus`]
//! enum, together with the pure validators used when reading them from
//! external input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A pilot's eCrew identifier.
pub type PilotId = u32;

/// The status a pilot holds in a seniority list.
///
/// Serialized as the two-letter crew code (`"CA"`, `"FO"`, `"SE"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PilotStatus {
    /// Captain.
    Captain,
    /// First officer.
    FirstOfficer,
    /// Seasonal pilot.
    Seasonal,
}

impl PilotStatus {
    /// Returns the two-letter crew code.
    pub fn code(self) -> &'static str {
        match self {
            PilotStatus::Captain => "CA",
            PilotStatus::FirstOfficer => "FO",
            PilotStatus::Seasonal => "SE",
        }
    }
}

impl fmt::Display for PilotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PilotStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_status(s)
    }
}

impl TryFrom<String> for PilotStatus {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_status(&value)
    }
}

impl From<PilotStatus> for String {
    fn from(status: PilotStatus) -> Self {
        status.code().to_string()
    }
}

/// Validates a pilot status code as Captain, First Officer or Seasonal.
///
/// # Example
///
/// ```
/// use pilot_bid_engine::models::{validate_status, PilotStatus};
///
/// assert_eq!(validate_status("FO").unwrap(), PilotStatus::FirstOfficer);
/// assert!(validate_status("XO").is_err());
/// ```
pub fn validate_status(value: &str) -> EngineResult<PilotStatus> {
    match value {
        "CA" => Ok(PilotStatus::Captain),
        "FO" => Ok(PilotStatus::FirstOfficer),
        "SE" => Ok(PilotStatus::Seasonal),
        _ => Err(EngineError::InvalidStatus {
            value: value.to_string(),
        }),
    }
}

/// Validates an email address.
///
/// Requires a single `@` with a non-empty local part and a dotted domain
/// without empty labels. Whitespace anywhere is rejected.
pub fn validate_email(value: &str) -> EngineResult<()> {
    let invalid = || EngineError::InvalidEmail {
        value: value.to_string(),
    };

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// An individual pilot who may appear in any number of seniority lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pilot {
    /// The pilot's eCrew identifier.
    pub ecrew_id: PilotId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
}

impl Pilot {
    /// Returns the name shown in reports, "First Last".
    ///
    /// # Example
    ///
    /// ```
    /// use pilot_bid_engine::models::Pilot;
    ///
    /// let pilot = Pilot {
    ///     ecrew_id: 1042,
    ///     first_name: "Amelia".to_string(),
    ///     last_name: "Reyes".to_string(),
    ///     email: "amelia.reyes@example.com".to_string(),
    /// };
    /// assert_eq!(pilot.display_name(), "Amelia Reyes");
    /// ```
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Pilot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
