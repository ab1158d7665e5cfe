//! The award engine: seniority-strict greedy assignment.
//!
//! Pilots are visited most senior first. Each is awarded the first choice on
//! their (policy-adjusted) priority list that still has a place. Submission
//! validation has already dropped lists naming choices outside the catalog
//! or closed to the pilot's status. Capacity only ever decreases in
//! seniority order, so a pilot is never displaced by someone junior.

use tracing::debug;

use crate::models::{
    AwardOutcome, AwardResult, BidChoice, ChoiceSummary, Decision, PilotAward, RejectedSubmission,
    TrailStep, UnassignedReason,
};

use super::catalog::CapacityLedger;
use super::{BidCatalog, OptionPolicy, SeniorityIndex, SubmissionSet, TieBreak};
use super::seniority_index::RankedPilot;

/// A choice on a pilot's list together with the pilot's priority for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// The listed choice.
    pub choice: &'a BidChoice,
    /// The pilot's priority for it.
    pub priority: u32,
}

/// Runs award passes under one option policy.
#[derive(Debug, Clone, Default)]
pub struct AwardEngine {
    policy: OptionPolicy,
}

impl AwardEngine {
    /// Creates an engine consulting the given policy.
    pub fn new(policy: OptionPolicy) -> Self {
        Self { policy }
    }

    /// The policy this engine consults.
    pub fn policy(&self) -> &OptionPolicy {
        &self.policy
    }

    /// Runs one award pass.
    ///
    /// The pass works on its own capacity ledger taken from `catalog`, and
    /// the result is only built once every pilot has been processed.
    /// Rejected submissions from pilots missing from `index` are listed in
    /// [`AwardResult::unlisted_rejections`].
    pub fn run(
        &self,
        index: &SeniorityIndex,
        catalog: &BidCatalog,
        submissions: &SubmissionSet,
    ) -> AwardResult {
        let mut ledger = catalog.capacity_ledger();
        let tie_breaks = self.policy.tie_breaks();

        let awards: Vec<PilotAward> = index
            .order(submissions.pilots())
            .into_iter()
            .map(|pilot| award_pilot(pilot, catalog, submissions, &tie_breaks, &mut ledger))
            .collect();

        let choices = catalog
            .choices()
            .iter()
            .map(|choice| {
                let available_places = catalog_places(choice);
                let remaining = ledger.remaining(&choice.id);
                ChoiceSummary {
                    choice_id: choice.id.clone(),
                    code: choice.code.clone(),
                    status: choice.status,
                    available_places,
                    awarded: available_places - remaining,
                    remaining,
                }
            })
            .collect();

        let unlisted_rejections = submissions
            .rejections()
            .iter()
            .filter(|(pilot_id, _)| index.get(**pilot_id).is_none())
            .map(|(pilot_id, error)| RejectedSubmission {
                pilot_id: *pilot_id,
                error: error.clone(),
            })
            .collect();

        AwardResult {
            bid_id: catalog.bid_id().to_string(),
            seniority_field: index.field(),
            awards,
            choices,
            unlisted_rejections,
        }
    }
}

fn catalog_places(choice: &BidChoice) -> u32 {
    u32::try_from(choice.available_places).unwrap_or(0)
}

/// Builds a pilot's trail one step at a time.
struct Trail {
    steps: Vec<TrailStep>,
}

impl Trail {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn note(&mut self, rule_id: &str, reasoning: String) {
        self.push(rule_id, None, None, Decision::Noted, reasoning);
    }

    fn push(
        &mut self,
        rule_id: &str,
        candidate: Option<&Candidate<'_>>,
        remaining_places: Option<u32>,
        decision: Decision,
        reasoning: String,
    ) {
        self.steps.push(TrailStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            choice_id: candidate.map(|c| c.choice.id.clone()),
            priority: candidate.map(|c| c.priority),
            remaining_places,
            decision,
            reasoning,
        });
    }
}

fn award_pilot(
    pilot: &RankedPilot,
    catalog: &BidCatalog,
    submissions: &SubmissionSet,
    tie_breaks: &[TieBreak],
    ledger: &mut CapacityLedger,
) -> PilotAward {
    let mut trail = Trail::new();
    let outcome = scan(pilot, catalog, submissions, tie_breaks, ledger, &mut trail);

    debug!(
        pilot_id = pilot.pilot_id,
        rank = ?pilot.rank,
        outcome = ?outcome,
        "Pilot processed"
    );

    PilotAward {
        pilot_id: pilot.pilot_id,
        display_name: pilot.display_name.clone(),
        status: pilot.status,
        seniority_rank: pilot.rank,
        outcome,
        trail: trail.steps,
    }
}

fn scan(
    pilot: &RankedPilot,
    catalog: &BidCatalog,
    submissions: &SubmissionSet,
    tie_breaks: &[TieBreak],
    ledger: &mut CapacityLedger,
    trail: &mut Trail,
) -> AwardOutcome {
    let priorities = match submissions.priorities_for(pilot.pilot_id) {
        Ok(priorities) => priorities,
        Err(error) => {
            trail.note("submission_validation", format!("invalid submission: {}", error));
            return AwardOutcome::Unassigned {
                reason: UnassignedReason::InvalidSubmission {
                    error: error.clone(),
                },
            };
        }
    };

    if priorities.is_empty() {
        trail.note("priority_scan", "no choices submitted".to_string());
        return AwardOutcome::Unassigned {
            reason: UnassignedReason::NoChoicesSubmitted,
        };
    }

    let mut candidates: Vec<Candidate<'_>> = (1u32..)
        .zip(priorities)
        .filter_map(|(priority, choice_id)| {
            catalog
                .get(choice_id)
                .map(|choice| Candidate { choice, priority })
        })
        .collect();

    for rule in tie_breaks {
        if rule.apply(&mut candidates) {
            trail.note(rule.rule_id(), rule.describe(&candidates));
        }
    }

    for candidate in &candidates {
        let remaining = ledger.remaining(&candidate.choice.id);

        if !ledger.consume(&candidate.choice.id) {
            trail.push(
                "priority_scan",
                Some(candidate),
                Some(0),
                Decision::Rejected,
                "full".to_string(),
            );
            continue;
        }

        trail.push(
            "priority_scan",
            Some(candidate),
            Some(remaining),
            Decision::Accepted,
            format!(
                "awarded at priority {} with {} of {} places open",
                candidate.priority,
                remaining,
                catalog_places(candidate.choice)
            ),
        );
        return AwardOutcome::Assigned {
            choice_id: candidate.choice.id.clone(),
        };
    }

    let reason = UnassignedReason::Full;
    trail.note("priority_scan", format!("unassigned: {}", reason));
    AwardOutcome::Unassigned { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmissionError;
    use crate::models::{
        Bid, BidSubmission, OptionSetting, Pilot, PilotId, PilotStatus, SeniorityField,
        SeniorityList, SeniorityListEntry, Term,
    };
    use chrono::{NaiveDate, TimeZone, Utc};

    const BID: &str = "summer-2026";

    fn bid() -> Bid {
        Bid {
            id: BID.to_string(),
            bid_type: "summer_deployment".to_string(),
            seniority_list_id: None,
            open_date: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            close_date: Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap(),
        }
    }

    fn choice(id: &str, places: i64, term: Term) -> BidChoice {
        BidChoice {
            id: id.to_string(),
            bid_id: BID.to_string(),
            code: id[..3].to_string(),
            description: id.to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
            status: PilotStatus::Captain,
            available_places: places,
            term,
        }
    }

    fn captains(ranks: &[(PilotId, u32)]) -> SeniorityList {
        SeniorityList {
            id: "v52".to_string(),
            description: "v52".to_string(),
            entries: ranks
                .iter()
                .map(|&(id, rank)| SeniorityListEntry {
                    pilot: Pilot {
                        ecrew_id: id,
                        first_name: "Pilot".to_string(),
                        last_name: id.to_string(),
                        email: String::new(),
                    },
                    master_seniority: Some(rank),
                    captain_seniority: Some(rank),
                    status: PilotStatus::Captain,
                })
                .collect(),
        }
    }

    fn run(
        choices: Vec<BidChoice>,
        list: &SeniorityList,
        submissions: &[BidSubmission],
        policy: OptionPolicy,
    ) -> AwardResult {
        let bid = bid();
        let catalog = BidCatalog::new(&bid, choices).unwrap();
        let index = SeniorityIndex::build(
            list,
            SeniorityField::Captain,
            &catalog.statuses(),
            submissions.iter().map(|s| s.pilot_id),
        )
        .unwrap();
        let set = SubmissionSet::build(&bid, submissions, &catalog, &index, &policy);
        AwardEngine::new(policy).run(&index, &catalog, &set)
    }

    #[test]
    fn test_senior_pilot_takes_last_place() {
        let result = run(
            vec![
                choice("YVR-CA", 1, Term::Full),
                choice("YYZ-CA", 1, Term::Full),
            ],
            &captains(&[(100, 1), (200, 2)]),
            &[
                BidSubmission::ranked(BID, 200, &["YVR-CA"]),
                BidSubmission::ranked(BID, 100, &["YVR-CA", "YYZ-CA"]),
            ],
            OptionPolicy::default(),
        );

        assert_eq!(result.awards[0].pilot_id, 100);
        assert_eq!(result.assigned_choice(100), Some("YVR-CA"));
        assert_eq!(result.assigned_choice(200), None);

        let junior = result.award_for(200).unwrap();
        assert_eq!(junior.unassigned_reason(), Some(&UnassignedReason::Full));
        assert_eq!(junior.trail[0].decision, Decision::Rejected);
        assert_eq!(junior.trail[0].reasoning, "full");
        assert_eq!(junior.trail[0].choice_id.as_deref(), Some("YVR-CA"));
    }

    #[test]
    fn test_falls_through_to_next_priority() {
        let result = run(
            vec![
                choice("YVR-CA", 1, Term::Full),
                choice("YYZ-CA", 1, Term::Full),
            ],
            &captains(&[(1, 1), (2, 2)]),
            &[
                BidSubmission::ranked(BID, 1, &["YVR-CA"]),
                BidSubmission::ranked(BID, 2, &["YVR-CA", "YYZ-CA"]),
            ],
            OptionPolicy::default(),
        );

        let second = result.award_for(2).unwrap();
        assert_eq!(second.assigned_choice(), Some("YYZ-CA"));
        assert_eq!(second.trail.len(), 2);
        assert_eq!(second.trail[0].decision, Decision::Rejected);
        assert_eq!(second.trail[1].decision, Decision::Accepted);
        assert_eq!(second.trail[1].priority, Some(2));
        assert_eq!(
            second.trail[1].reasoning,
            "awarded at priority 2 with 1 of 1 places open"
        );
    }

    #[test]
    fn test_choice_summary_accounts_for_awards() {
        let result = run(
            vec![choice("YVR-CA", 2, Term::Full)],
            &captains(&[(1, 1), (2, 2), (3, 3)]),
            &[
                BidSubmission::ranked(BID, 1, &["YVR-CA"]),
                BidSubmission::ranked(BID, 2, &["YVR-CA"]),
                BidSubmission::ranked(BID, 3, &["YVR-CA"]),
            ],
            OptionPolicy::default(),
        );

        let summary = result.choice_summary("YVR-CA").unwrap();
        assert_eq!(summary.available_places, 2);
        assert_eq!(summary.awarded, 2);
        assert_eq!(summary.remaining, 0);
        assert_eq!(result.assigned_choice(3), None);
    }

    #[test]
    fn test_invalid_submission_is_unassigned_with_reason() {
        let mut bad = BidSubmission::ranked(BID, 1, &["YVR-CA", "YYZ-CA"]);
        bad.priorities[1].priority = 1;

        let result = run(
            vec![
                choice("YVR-CA", 1, Term::Full),
                choice("YYZ-CA", 1, Term::Full),
            ],
            &captains(&[(1, 1), (2, 2)]),
            &[bad, BidSubmission::ranked(BID, 2, &["YVR-CA"])],
            OptionPolicy::default(),
        );

        let invalid = result.award_for(1).unwrap();
        assert_eq!(
            invalid.unassigned_reason(),
            Some(&UnassignedReason::InvalidSubmission {
                error: SubmissionError::DuplicatePriority { priority: 1 }
            })
        );
        assert_eq!(
            invalid.trail[0].reasoning,
            "invalid submission: duplicate priority rank 1"
        );
        assert_eq!(result.assigned_choice(2), Some("YVR-CA"));
    }

    #[test]
    fn test_empty_list_is_unassigned() {
        let result = run(
            vec![choice("YVR-CA", 1, Term::Full)],
            &captains(&[(1, 1)]),
            &[BidSubmission::ranked(BID, 1, &[])],
            OptionPolicy::default(),
        );

        assert_eq!(
            result.award_for(1).unwrap().unassigned_reason(),
            Some(&UnassignedReason::NoChoicesSubmitted)
        );
    }

    #[test]
    fn test_full_term_precedence_reorders_candidates() {
        let policy = OptionPolicy::from_settings(vec![OptionSetting::flag(
            "full_term_trumps_half_term",
            true,
        )])
        .unwrap();

        let result = run(
            vec![
                choice("YVR-HALF", 1, Term::Half),
                choice("YYZ-FULL", 1, Term::Full),
            ],
            &captains(&[(1, 1)]),
            &[BidSubmission::ranked(BID, 1, &["YVR-HALF", "YYZ-FULL"])],
            policy,
        );

        let award = result.award_for(1).unwrap();
        assert_eq!(award.assigned_choice(), Some("YYZ-FULL"));
        assert_eq!(award.trail[0].rule_id, "full_term_precedence");
        assert_eq!(award.trail[0].decision, Decision::Noted);
        assert_eq!(award.trail[1].priority, Some(2));
    }

    #[test]
    fn test_without_precedence_preference_order_holds() {
        let result = run(
            vec![
                choice("YVR-HALF", 1, Term::Half),
                choice("YYZ-FULL", 1, Term::Full),
            ],
            &captains(&[(1, 1)]),
            &[BidSubmission::ranked(BID, 1, &["YVR-HALF", "YYZ-FULL"])],
            OptionPolicy::default(),
        );

        assert_eq!(result.assigned_choice(1), Some("YVR-HALF"));
    }

    #[test]
    fn test_zero_place_choice_is_full() {
        let result = run(
            vec![choice("YVR-CA", 0, Term::Full)],
            &captains(&[(1, 1)]),
            &[BidSubmission::ranked(BID, 1, &["YVR-CA"])],
            OptionPolicy::default(),
        );

        assert_eq!(
            result.award_for(1).unwrap().unassigned_reason(),
            Some(&UnassignedReason::Full)
        );
    }

    #[test]
    fn test_runs_do_not_share_capacity() {
        let bid = bid();
        let catalog = BidCatalog::new(&bid, vec![choice("YVR-CA", 1, Term::Full)]).unwrap();
        let list = captains(&[(1, 1)]);
        let submissions = [BidSubmission::ranked(BID, 1, &["YVR-CA"])];
        let index =
            SeniorityIndex::build(&list, SeniorityField::Captain, &catalog.statuses(), [1])
                .unwrap();
        let policy = OptionPolicy::default();
        let set = SubmissionSet::build(&bid, &submissions, &catalog, &index, &policy);
        let engine = AwardEngine::new(policy);

        let first = engine.run(&index, &catalog, &set);
        let second = engine.run(&index, &catalog, &set);
        assert_eq!(first, second);
        assert_eq!(second.assigned_choice(1), Some("YVR-CA"));
    }
}
