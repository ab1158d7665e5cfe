//! Submission set: each pilot's validated priority list for one bid.
//!
//! Validation is per pilot. A bad submission is recorded against its pilot
//! and never affects anyone else's.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::SubmissionError;
use crate::models::{Bid, BidSubmission, ChoiceId, PilotId};

use super::{BidCatalog, OptionPolicy, SeniorityIndex};

/// Validated submissions for one bid.
#[derive(Debug, Clone, Default)]
pub struct SubmissionSet {
    valid: BTreeMap<PilotId, Vec<ChoiceId>>,
    rejected: BTreeMap<PilotId, SubmissionError>,
}

impl SubmissionSet {
    /// Validates every pilot's submission.
    ///
    /// For each pilot this checks that the submission is for this bid, was
    /// made inside the bid window, stays within the `max_priorities` option,
    /// ranks contiguously from 1, lists no choice twice, and lists only
    /// choices in the catalog that are open to the pilot's status. A pilot
    /// with several submissions is judged on the one with the latest
    /// timestamp.
    pub fn build(
        bid: &Bid,
        submissions: &[BidSubmission],
        catalog: &BidCatalog,
        index: &SeniorityIndex,
        policy: &OptionPolicy,
    ) -> Self {
        let mut by_pilot: BTreeMap<PilotId, Vec<&BidSubmission>> = BTreeMap::new();
        for submission in submissions {
            by_pilot
                .entry(submission.pilot_id)
                .or_default()
                .push(submission);
        }

        let mut set = Self::default();
        for (pilot_id, candidates) in by_pilot {
            let outcome = latest(&candidates).and_then(|submission| {
                validate(submission, bid, catalog, index, policy.max_priorities())
            });

            match outcome {
                Ok(priorities) => {
                    set.valid.insert(pilot_id, priorities);
                }
                Err(error) => {
                    debug!(pilot_id, error = %error, "Submission rejected");
                    set.rejected.insert(pilot_id, error);
                }
            }
        }
        set
    }

    /// Returns a pilot's choices in priority order, or why they were rejected.
    ///
    /// A pilot who submitted nothing has an empty list.
    pub fn priorities_for(&self, pilot_id: PilotId) -> Result<&[ChoiceId], &SubmissionError> {
        match self.rejected.get(&pilot_id) {
            Some(error) => Err(error),
            None => Ok(self.valid.get(&pilot_id).map(Vec::as_slice).unwrap_or(&[])),
        }
    }

    /// Every pilot that submitted, valid or not, by pilot id.
    pub fn pilots(&self) -> BTreeSet<PilotId> {
        self.valid
            .keys()
            .chain(self.rejected.keys())
            .copied()
            .collect()
    }

    /// Rejected submissions, by pilot id.
    pub fn rejections(&self) -> &BTreeMap<PilotId, SubmissionError> {
        &self.rejected
    }

    /// Number of valid submissions.
    pub fn valid_count(&self) -> usize {
        self.valid.len()
    }
}

fn latest<'a>(candidates: &[&'a BidSubmission]) -> Result<&'a BidSubmission, SubmissionError> {
    if let [only] = candidates {
        return Ok(*only);
    }

    let mut stamped: Vec<_> = candidates
        .iter()
        .map(|s| s.timestamp.map(|t| (t, *s)))
        .collect::<Option<Vec<_>>>()
        .ok_or(SubmissionError::DuplicateSubmission)?;
    stamped.sort_by_key(|(t, _)| *t);

    match stamped.as_slice() {
        [.., (before, _), (last, submission)] if before < last => Ok(*submission),
        _ => Err(SubmissionError::DuplicateSubmission),
    }
}

fn validate(
    submission: &BidSubmission,
    bid: &Bid,
    catalog: &BidCatalog,
    index: &SeniorityIndex,
    max_priorities: Option<u32>,
) -> Result<Vec<ChoiceId>, SubmissionError> {
    if submission.bid_id != bid.id {
        return Err(SubmissionError::WrongBid {
            bid_id: submission.bid_id.clone(),
        });
    }

    if let Some(timestamp) = submission.timestamp {
        if !bid.is_open_at(timestamp) {
            return Err(SubmissionError::OutsideBidWindow { timestamp });
        }
    }

    if let Some(max) = max_priorities {
        if submission.priorities.len() > max as usize {
            return Err(SubmissionError::TooManyPriorities {
                count: submission.priorities.len(),
                max,
            });
        }
    }

    let status = index
        .status(submission.pilot_id)
        .ok_or(SubmissionError::NotOnSeniorityList)?;

    let mut ranked: Vec<_> = submission.priorities.iter().collect();
    ranked.sort_by_key(|p| p.priority);

    if let Some(pair) = ranked.windows(2).find(|w| w[0].priority == w[1].priority) {
        return Err(SubmissionError::DuplicatePriority {
            priority: pair[0].priority,
        });
    }

    let mut seen = BTreeSet::new();
    let mut choices = Vec::with_capacity(ranked.len());
    for (expected, priority) in (1u32..).zip(&ranked) {
        if priority.priority != expected {
            return Err(SubmissionError::NonContiguousPriorities {
                expected,
                found: priority.priority,
            });
        }

        let choice_id = &priority.choice_id;
        if !seen.insert(choice_id.as_str()) {
            return Err(SubmissionError::DuplicateChoice {
                choice_id: choice_id.clone(),
            });
        }

        let choice = catalog
            .get(choice_id)
            .ok_or_else(|| SubmissionError::UnknownChoice {
                choice_id: choice_id.clone(),
            })?;
        if !choice.is_open_to(status) {
            return Err(SubmissionError::IneligibleChoice {
                choice_id: choice_id.clone(),
                status,
            });
        }

        choices.push(choice_id.clone());
    }

    Ok(choices)
}
