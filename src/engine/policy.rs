//! Option policy: bid type rules consulted by the award engine.
//!
//! The policy is read at two decision points. Before the run it selects the
//! seniority field that orders pilots. During the run it supplies the
//! tie-break rules that may reorder a pilot's candidates. It also bounds the
//! length of priority lists during submission validation.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{OptionSetting, SeniorityField, Term};

use super::award::Candidate;

/// Orders pilots by master seniority instead of captain seniority.
pub const USE_MASTER_SENIORITY: &str = "use_master_seniority";

/// Awards full term choices ahead of half term choices.
pub const FULL_TERM_TRUMPS_HALF_TERM: &str = "full_term_trumps_half_term";

/// Caps the number of choices a pilot may rank.
pub const MAX_PRIORITIES: &str = "max_priorities";

/// A rule that may reorder a pilot's candidate choices before the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Full term choices move ahead of half term choices. Preference order is
    /// kept within each term.
    FullTermFirst,
}

impl TieBreak {
    /// Identifier written to the trail when the rule changes an order.
    pub fn rule_id(self) -> &'static str {
        match self {
            TieBreak::FullTermFirst => "full_term_precedence",
        }
    }

    /// Reorders candidates in place. Returns true if the order changed.
    pub fn apply(self, candidates: &mut [Candidate<'_>]) -> bool {
        match self {
            TieBreak::FullTermFirst => {
                let before: Vec<u32> = candidates.iter().map(|c| c.priority).collect();
                candidates.sort_by_key(|c| match c.choice.term {
                    Term::Full => 0,
                    Term::Half => 1,
                });
                candidates
                    .iter()
                    .map(|c| c.priority)
                    .ne(before.into_iter())
            }
        }
    }

    /// Explanation written to the trail when the rule changes an order.
    pub fn describe(self, candidates: &[Candidate<'_>]) -> String {
        match self {
            TieBreak::FullTermFirst => {
                let order: Vec<&str> = candidates.iter().map(|c| c.choice.id.as_str()).collect();
                format!(
                    "full term choices considered before half term choices: {}",
                    order.join(", ")
                )
            }
        }
    }
}

/// The options in force for one bid, keyed by option name.
///
/// # Example
///
/// ```
/// use pilot_bid_engine::engine::OptionPolicy;
/// use pilot_bid_engine::models::{OptionSetting, SeniorityField};
///
/// let policy = OptionPolicy::from_settings(vec![
///     OptionSetting::flag("use_master_seniority", true),
///     OptionSetting::valued("max_priorities", 5),
/// ])
/// .unwrap();
///
/// assert_eq!(policy.seniority_field(), SeniorityField::Master);
/// assert_eq!(policy.max_priorities(), Some(5));
/// assert!(!policy.full_term_trumps_half_term());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionPolicy {
    settings: BTreeMap<String, OptionSetting>,
}

impl OptionPolicy {
    /// Builds a policy from option settings.
    ///
    /// Fails with `InvalidOption` if a name repeats or `max_priorities` is
    /// enabled with a value outside `1..=u32::MAX`. Unrecognised names are
    /// kept but never consulted.
    pub fn from_settings(settings: Vec<OptionSetting>) -> EngineResult<Self> {
        let mut by_name = BTreeMap::new();

        for setting in settings {
            if by_name.contains_key(&setting.name) {
                return Err(EngineError::InvalidOption {
                    name: setting.name,
                    message: "option is set more than once".to_string(),
                });
            }

            if setting.name == MAX_PRIORITIES
                && setting.enabled
                && (setting.value < 1 || u32::try_from(setting.value).is_err())
            {
                return Err(EngineError::InvalidOption {
                    message: format!("value {} is not a valid list length", setting.value),
                    name: setting.name,
                });
            }

            if ![USE_MASTER_SENIORITY, FULL_TERM_TRUMPS_HALF_TERM, MAX_PRIORITIES]
                .contains(&setting.name.as_str())
            {
                debug!(option = %setting.name, "Ignoring unrecognised bid option");
            }

            by_name.insert(setting.name.clone(), setting);
        }

        Ok(Self { settings: by_name })
    }

    /// Returns true if the named option is present and enabled.
    pub fn flag(&self, name: &str) -> bool {
        self.settings.get(name).is_some_and(|s| s.enabled)
    }

    /// Returns the integer value of the named option if it is enabled.
    pub fn value(&self, name: &str) -> Option<i64> {
        self.settings
            .get(name)
            .filter(|s| s.enabled)
            .map(|s| s.value)
    }

    /// Iterates over all settings, ordered by name.
    pub fn settings(&self) -> impl Iterator<Item = &OptionSetting> {
        self.settings.values()
    }

    /// The seniority field that orders pilots for this bid.
    pub fn seniority_field(&self) -> SeniorityField {
        if self.flag(USE_MASTER_SENIORITY) {
            SeniorityField::Master
        } else {
            SeniorityField::Captain
        }
    }

    /// Whether full term choices outrank half term choices.
    pub fn full_term_trumps_half_term(&self) -> bool {
        self.flag(FULL_TERM_TRUMPS_HALF_TERM)
    }

    /// Maximum number of priorities a pilot may submit, if limited.
    pub fn max_priorities(&self) -> Option<u32> {
        self.value(MAX_PRIORITIES)
            .and_then(|v| u32::try_from(v).ok())
    }

    /// The tie-break rules to apply to each pilot's candidates, in order.
    pub fn tie_breaks(&self) -> Vec<TieBreak> {
        let mut rules = Vec::new();
        if self.full_term_trumps_half_term() {
            rules.push(TieBreak::FullTermFirst);
        }
        rules
    }
}
