//! Bid catalog: an immutable snapshot of a bid's choices.
//!
//! Remaining capacity is not tracked on the catalog itself. Each award run
//! takes its own [`CapacityLedger`] from the catalog, so two runs never share
//! counters.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{EngineError, EngineResult};
use crate::models::{Bid, BidChoice, ChoiceId, PilotStatus};

/// Validated, read-only set of choices for one bid.
#[derive(Debug, Clone)]
pub struct BidCatalog {
    bid_id: String,
    choices: Vec<BidChoice>,
    positions: BTreeMap<ChoiceId, usize>,
}

impl BidCatalog {
    /// Builds a catalog for a bid.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the bid closes before it opens, or if any
    /// choice has negative places, ends before it starts, belongs to another
    /// bid, or repeats an id.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use pilot_bid_engine::engine::BidCatalog;
    /// use pilot_bid_engine::models::{Bid, BidChoice, PilotStatus, Term};
    ///
    /// let bid = Bid {
    ///     id: "summer-2026".to_string(),
    ///     bid_type: "summer_deployment".to_string(),
    ///     seniority_list_id: None,
    ///     open_date: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
    ///     close_date: Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap(),
    /// };
    /// let choice = BidChoice {
    ///     id: "YVR-CA".to_string(),
    ///     bid_id: "summer-2026".to_string(),
    ///     code: "YVR".to_string(),
    ///     description: "Vancouver Base".to_string(),
    ///     start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
    ///     status: PilotStatus::Captain,
    ///     available_places: 2,
    ///     term: Term::Full,
    /// };
    ///
    /// let catalog = BidCatalog::new(&bid, vec![choice]).unwrap();
    /// assert_eq!(catalog.capacity_ledger().remaining("YVR-CA"), 2);
    /// assert_eq!(catalog.eligible_for(PilotStatus::FirstOfficer).count(), 0);
    /// ```
    pub fn new(bid: &Bid, choices: Vec<BidChoice>) -> EngineResult<Self> {
        if bid.close_date < bid.open_date {
            return Err(EngineError::InvalidBid {
                bid_id: bid.id.clone(),
                message: format!(
                    "close date {} is before open date {}",
                    bid.close_date, bid.open_date
                ),
            });
        }

        let mut positions = BTreeMap::new();
        for (position, choice) in choices.iter().enumerate() {
            validate_choice(bid, choice)?;
            if positions.insert(choice.id.clone(), position).is_some() {
                return Err(EngineError::DuplicateChoice {
                    choice_id: choice.id.clone(),
                });
            }
        }

        Ok(Self {
            bid_id: bid.id.clone(),
            choices,
            positions,
        })
    }

    /// The bid this catalog belongs to.
    pub fn bid_id(&self) -> &str {
        &self.bid_id
    }

    /// All choices, in the order they were supplied.
    pub fn choices(&self) -> &[BidChoice] {
        &self.choices
    }

    /// Looks up a choice by id.
    pub fn get(&self, choice_id: &str) -> Option<&BidChoice> {
        self.positions.get(choice_id).map(|&i| &self.choices[i])
    }

    /// Choices open to pilots of the given status.
    pub fn eligible_for(&self, status: PilotStatus) -> impl Iterator<Item = &BidChoice> {
        self.choices.iter().filter(move |c| c.is_open_to(status))
    }

    /// Statuses the bid offers at least one choice to.
    pub fn statuses(&self) -> BTreeSet<PilotStatus> {
        self.choices.iter().map(|c| c.status).collect()
    }

    /// Takes a fresh capacity ledger, with every choice at its full places.
    pub fn capacity_ledger(&self) -> CapacityLedger {
        CapacityLedger {
            remaining: self
                .choices
                .iter()
                .map(|c| (c.id.clone(), places(c)))
                .collect(),
        }
    }
}

fn validate_choice(bid: &Bid, choice: &BidChoice) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidChoice {
        choice_id: choice.id.clone(),
        message,
    };

    if choice.bid_id != bid.id {
        return Err(invalid(format!("belongs to bid '{}'", choice.bid_id)));
    }
    if choice.available_places < 0 {
        return Err(invalid(format!(
            "available places cannot be negative (got {})",
            choice.available_places
        )));
    }
    if u32::try_from(choice.available_places).is_err() {
        return Err(invalid(format!(
            "available places {} is too large",
            choice.available_places
        )));
    }
    if choice.end_date < choice.start_date {
        return Err(invalid(format!(
            "end date {} is before start date {}",
            choice.end_date, choice.start_date
        )));
    }
    Ok(())
}

// Range already checked by validate_choice.
fn places(choice: &BidChoice) -> u32 {
    u32::try_from(choice.available_places).unwrap_or(0)
}

/// Remaining places per choice during one award run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityLedger {
    remaining: BTreeMap<ChoiceId, u32>,
}

impl CapacityLedger {
    /// Places still open on a choice. Unknown choices have none.
    pub fn remaining(&self, choice_id: &str) -> u32 {
        self.remaining.get(choice_id).copied().unwrap_or(0)
    }

    /// Takes one place on a choice. Returns false if none was left.
    pub(crate) fn consume(&mut self, choice_id: &str) -> bool {
        match self.remaining.get_mut(choice_id) {
            Some(places) if *places > 0 => {
                *places -= 1;
                true
            }
            _ => false,
        }
    }
}
