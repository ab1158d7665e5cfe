//! Bid type option settings.

use serde::{Deserialize, Serialize};

/// A bidding rule or option for a particular bid type.
///
/// Examples are using master seniority instead of captain seniority, or
/// allowing full terms to trump half terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSetting {
    /// Name of the option, e.g. "full_term_trumps_half_term".
    pub name: String,
    /// Longer description of the option.
    #[serde(default)]
    pub description: String,
    /// Boolean part of the option.
    #[serde(default)]
    pub enabled: bool,
    /// Integer part of the option, e.g. 0, 1, 23.
    #[serde(default)]
    pub value: i64,
}

impl OptionSetting {
    /// Creates a boolean option.
    pub fn flag(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            enabled,
            value: 0,
        }
    }

    /// Creates an enabled option carrying an integer value.
    pub fn valued(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            enabled: true,
            value,
        }
    }
}
