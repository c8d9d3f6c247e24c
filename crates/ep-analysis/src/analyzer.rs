//! Pairwise overlap aggregation

use std::collections::BTreeMap;

use ep_core::{NotFoundError, PairResult};
use ep_models::{AssignmentRecord, PairKey, PairOverlap, ProjectId, ProjectOverlap};
use tracing::debug;

use crate::overlap::overlap_window;

/// Computes cumulative overlap per employee pair
///
/// Ties on the total are broken by the smallest pair key, so the same input
/// always yields the same winner.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapAnalyzer;

impl OverlapAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// The pair with the greatest cumulative overlap
    pub fn longest_pair(&self, records: &[AssignmentRecord]) -> PairResult<PairOverlap> {
        let totals = self.accumulate(records)?;

        let mut best: Option<PairOverlap> = None;
        // Keys iterate in ascending order; only a strictly greater total replaces
        for overlap in totals.into_values() {
            match &best {
                Some(current) if overlap.total_days <= current.total_days => {}
                _ => best = Some(overlap),
            }
        }

        let best = best.ok_or(NotFoundError::NoPairs)?;
        debug!(pair = %best.pair, total_days = best.total_days, "Selected longest working pair");
        Ok(best)
    }

    /// Every overlapping pair, longest first, ties by ascending key
    pub fn pair_totals(&self, records: &[AssignmentRecord]) -> PairResult<Vec<PairOverlap>> {
        let mut ranked: Vec<PairOverlap> = self.accumulate(records)?.into_values().collect();
        if ranked.is_empty() {
            return Err(NotFoundError::NoPairs.into());
        }
        ranked.sort_by(|a, b| {
            b.total_days
                .cmp(&a.total_days)
                .then_with(|| a.pair.cmp(&b.pair))
        });
        Ok(ranked)
    }

    fn accumulate(&self, records: &[AssignmentRecord]) -> PairResult<BTreeMap<PairKey, PairOverlap>> {
        if records.is_empty() {
            return Err(NotFoundError::NoRecords.into());
        }

        let groups = group_by_project(records);
        let mut totals: BTreeMap<PairKey, PairOverlap> = BTreeMap::new();

        for (project_id, members) in &groups {
            for (i, first) in members.iter().enumerate() {
                for second in &members[i + 1..] {
                    if first.employee_id == second.employee_id {
                        continue;
                    }
                    let Some(window) = overlap_window(first, second) else {
                        continue;
                    };

                    let key = PairKey::new(first.employee_id, second.employee_id);
                    totals
                        .entry(key)
                        .or_insert_with(|| PairOverlap::new(key))
                        .record(ProjectOverlap {
                            emp_id1: first.employee_id,
                            emp_id2: second.employee_id,
                            project_id: *project_id,
                            days_worked: window.days(),
                            date_from: window.start,
                            date_to: window.end,
                        });
                }
            }
        }

        debug!(
            records = records.len(),
            projects = groups.len(),
            pairs = totals.len(),
            "Accumulated pair overlaps"
        );
        Ok(totals)
    }
}

/// Records per project, projects ascending, members in input order
fn group_by_project(records: &[AssignmentRecord]) -> BTreeMap<ProjectId, Vec<&AssignmentRecord>> {
    let mut groups: BTreeMap<ProjectId, Vec<&AssignmentRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.project_id).or_default().push(record);
    }
    groups
}
