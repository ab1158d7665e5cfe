//! Seniority index: the ordering function over pilots for one bid.
//!
//! The index is built from a [`SeniorityList`] using the seniority field the
//! option policy selects. Every submitting pilot must be on the list, and
//! every submitting pilot whose status the bid offers choices for must hold
//! a rank in that field.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{EngineError, EngineResult};
use crate::models::{PilotId, PilotStatus, SeniorityField, SeniorityList};

/// One pilot as seen by the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPilot {
    /// The pilot's id.
    pub pilot_id: PilotId,
    /// The pilot's display name.
    pub display_name: String,
    /// The pilot's status in the list.
    pub status: PilotStatus,
    /// The pilot's rank in the selected field, if held.
    pub rank: Option<u32>,
}

/// Ordering of pilots by seniority for a single bid.
#[derive(Debug, Clone)]
pub struct SeniorityIndex {
    list: String,
    field: SeniorityField,
    relevant: BTreeSet<PilotStatus>,
    pilots: BTreeMap<PilotId, RankedPilot>,
}

impl SeniorityIndex {
    /// Builds the index for a bid.
    ///
    /// # Arguments
    ///
    /// * `list` - The seniority list the bid is run against
    /// * `field` - The seniority field selected by the option policy
    /// * `relevant` - Statuses the bid offers choices for
    /// * `submitting` - Pilots who submitted to the bid
    ///
    /// # Errors
    ///
    /// Returns an integrity error if the list holds a pilot twice, two
    /// entries share a rank in `field`, a submitting pilot has no entry, or
    /// a submitting pilot with a relevant status has no rank in `field`.
    pub fn build(
        list: &SeniorityList,
        field: SeniorityField,
        relevant: &BTreeSet<PilotStatus>,
        submitting: impl IntoIterator<Item = PilotId>,
    ) -> EngineResult<Self> {
        let mut pilots = BTreeMap::new();
        let mut holders: BTreeMap<u32, PilotId> = BTreeMap::new();

        for entry in &list.entries {
            let pilot_id = entry.pilot_id();
            let rank = entry.seniority(field);

            if let Some(rank) = rank {
                if let Some(&first) = holders.get(&rank) {
                    return Err(EngineError::DuplicateSeniorityRank {
                        field,
                        rank,
                        first,
                        second: pilot_id,
                    });
                }
                holders.insert(rank, pilot_id);
            }

            let ranked = RankedPilot {
                pilot_id,
                display_name: entry.pilot.display_name(),
                status: entry.status,
                rank,
            };
            if pilots.insert(pilot_id, ranked).is_some() {
                return Err(EngineError::DuplicateSeniorityEntry {
                    pilot_id,
                    list: list.description.clone(),
                });
            }
        }

        for pilot_id in submitting {
            let pilot = pilots
                .get(&pilot_id)
                .ok_or_else(|| EngineError::MissingSeniorityEntry {
                    pilot_id,
                    list: list.description.clone(),
                })?;
            if pilot.rank.is_none() && relevant.contains(&pilot.status) {
                return Err(EngineError::MissingSeniorityField { pilot_id, field });
            }
        }

        Ok(Self {
            list: list.description.clone(),
            field,
            relevant: relevant.clone(),
            pilots,
        })
    }

    /// The seniority field ordering this index.
    pub fn field(&self) -> SeniorityField {
        self.field
    }

    /// Returns a pilot's rank. Lower is more senior.
    pub fn rank(&self, pilot_id: PilotId) -> EngineResult<u32> {
        let pilot = self
            .pilots
            .get(&pilot_id)
            .ok_or_else(|| EngineError::MissingSeniorityEntry {
                pilot_id,
                list: self.list.clone(),
            })?;
        pilot.rank.ok_or(EngineError::MissingSeniorityField {
            pilot_id,
            field: self.field,
        })
    }

    /// Returns a pilot's status in the list.
    pub fn status(&self, pilot_id: PilotId) -> Option<PilotStatus> {
        self.pilots.get(&pilot_id).map(|p| p.status)
    }

    /// Returns the index record for a pilot.
    pub fn get(&self, pilot_id: PilotId) -> Option<&RankedPilot> {
        self.pilots.get(&pilot_id)
    }

    /// Whether the bid offers choices to pilots of this status.
    pub fn is_relevant(&self, status: PilotStatus) -> bool {
        self.relevant.contains(&status)
    }

    /// Orders the given pilots, most senior first.
    ///
    /// Ranked pilots come first by rank. Unranked pilots, who can only be
    /// pilots with no relevant status, follow by pilot id. Pilots not on the
    /// list are dropped.
    pub fn order(&self, pilots: impl IntoIterator<Item = PilotId>) -> Vec<&RankedPilot> {
        let mut ordered: Vec<&RankedPilot> = pilots
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|id| self.pilots.get(&id))
            .collect();
        ordered.sort_by_key(|p| (p.rank.is_none(), p.rank, p.pilot_id));
        ordered
    }
}
