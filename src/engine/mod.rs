//! Award engine for seniority-based bids.
//!
//! A run goes through four stages:
//!
//! 1. [`BidCatalog`] validates the bid's choices and hands out a fresh
//!    capacity ledger.
//! 2. [`SeniorityIndex`] ranks the seniority list by the field the
//!    [`OptionPolicy`] selects, failing on missing or duplicate data.
//! 3. [`SubmissionSet`] validates each pilot's priority list on its own.
//! 4. [`AwardEngine`] walks pilots most senior first and awards each the
//!    first open place on their list.
//!
//! [`run_award`] chains the stages for callers that hold raw records.

mod award;
mod catalog;
mod policy;
mod seniority_index;
mod submission_set;

pub use award::{AwardEngine, Candidate};
pub use catalog::{BidCatalog, CapacityLedger};
pub use policy::{
    FULL_TERM_TRUMPS_HALF_TERM, MAX_PRIORITIES, OptionPolicy, TieBreak, USE_MASTER_SENIORITY,
};
pub use seniority_index::{RankedPilot, SeniorityIndex};
pub use submission_set::SubmissionSet;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{AwardResult, Bid, BidChoice, BidSubmission, SeniorityList};

/// Runs a complete award for one bid.
///
/// # Arguments
///
/// * `bid` - The bid being awarded
/// * `seniority_list` - The list that orders pilots
/// * `choices` - Every choice offered in the bid
/// * `submissions` - Pilots' priority lists, possibly several per pilot
/// * `policy` - Options in force for the bid type
///
/// # Errors
///
/// Returns an error if the bid names a different seniority list, if the
/// catalog is invalid, or if the seniority list is missing or inconsistent
/// for a pilot who submitted to this bid. No partial result is produced.
/// Submissions for other bids never fail the run; they are rejected against
/// their pilot.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use pilot_bid_engine::engine::{run_award, OptionPolicy};
/// use pilot_bid_engine::models::{
///     Bid, BidChoice, BidSubmission, Pilot, PilotStatus, SeniorityList, SeniorityListEntry,
///     Term,
/// };
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
///     available_places: 1,
///     term: Term::Full,
/// };
/// let entry = |id: u32, rank: u32| SeniorityListEntry {
///     pilot: Pilot {
///         ecrew_id: id,
///         first_name: "Pat".to_string(),
///         last_name: id.to_string(),
///         email: String::new(),
///     },
///     master_seniority: Some(rank),
///     captain_seniority: Some(rank),
///     status: PilotStatus::Captain,
/// };
/// let list = SeniorityList {
///     id: "v52".to_string(),
///     description: "Seniority List v52".to_string(),
///     entries: vec![entry(100, 1), entry(200, 2)],
/// };
/// let submissions = vec![
///     BidSubmission::ranked("summer-2026", 200, &["YVR-CA"]),
///     BidSubmission::ranked("summer-2026", 100, &["YVR-CA"]),
/// ];
///
/// let result = run_award(&bid, &list, vec![choice], &submissions, &OptionPolicy::default())
///     .unwrap();
/// assert_eq!(result.assigned_choice(100), Some("YVR-CA"));
/// assert_eq!(result.assigned_choice(200), None);
/// ```
pub fn run_award(
    bid: &Bid,
    seniority_list: &SeniorityList,
    choices: Vec<BidChoice>,
    submissions: &[BidSubmission],
    policy: &OptionPolicy,
) -> EngineResult<AwardResult> {
    if let Some(list_id) = &bid.seniority_list_id {
        if *list_id != seniority_list.id {
            return Err(EngineError::InvalidBid {
                bid_id: bid.id.clone(),
                message: format!(
                    "bid uses seniority list '{}', got '{}'",
                    list_id, seniority_list.id
                ),
            });
        }
    }

    let catalog = BidCatalog::new(bid, choices)?;
    let index = SeniorityIndex::build(
        seniority_list,
        policy.seniority_field(),
        &catalog.statuses(),
        submissions
            .iter()
            .filter(|s| s.bid_id == bid.id)
            .map(|s| s.pilot_id),
    )?;
    let set = SubmissionSet::build(bid, submissions, &catalog, &index, policy);

    let result = AwardEngine::new(policy.clone()).run(&index, &catalog, &set);

    info!(
        bid_id = %bid.id,
        seniority_field = %index.field(),
        pilots = result.awards.len(),
        unassigned = result.unassigned().count(),
        rejected_submissions = set.rejections().len(),
        "Award run complete"
    );

    Ok(result)
}
