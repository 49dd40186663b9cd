//! Pull request timeline bucketed by calendar date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::PullRequest;

/// Opened/merged/closed counts for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Calendar date (UTC)
    pub date: NaiveDate,
    /// PRs opened on this date
    pub opened: usize,
    /// PRs merged on this date
    pub merged: usize,
    /// PRs closed without merge on this date
    pub closed: usize,
}

/// Pull request activity per calendar date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullTimeline {
    /// Entries sorted by date ascending
    pub entries: Vec<TimelineEntry>,
    /// Total opened increments
    pub opened_total: usize,
    /// Total merged increments
    pub merged_total: usize,
    /// Total closed-without-merge increments
    pub closed_total: usize,
}

/// Build the timeline from a pull request list.
///
/// Each PR contributes an "opened" increment at its creation date and at
/// most one further increment: "merged" at its merge date, or "closed" at
/// its close date only when it was closed without merging.
#[must_use]
pub fn pull_timeline(pulls: &[PullRequest]) -> PullTimeline {
    #[derive(Default, Clone, Copy)]
    struct Day {
        opened: usize,
        merged: usize,
        closed: usize,
    }

    let mut days: BTreeMap<NaiveDate, Day> = BTreeMap::new();
    let mut opened_total = 0;
    let mut merged_total = 0;
    let mut closed_total = 0;

    for pr in pulls {
        days.entry(pr.created_at.date_naive()).or_default().opened += 1;
        opened_total += 1;

        if let Some(merged_at) = pr.merged_at {
            days.entry(merged_at.date_naive()).or_default().merged += 1;
            merged_total += 1;
        } else if let Some(closed_at) = pr.closed_at {
            days.entry(closed_at.date_naive()).or_default().closed += 1;
            closed_total += 1;
        }
    }

    PullTimeline {
        entries: days
            .into_iter()
            .map(|(date, day)| TimelineEntry {
                date,
                opened: day.opened,
                merged: day.merged,
                closed: day.closed,
            })
            .collect(),
        opened_total,
        merged_total,
        closed_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PullState;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 10, 0, 0).unwrap()
    }

    fn pr(
        number: u64,
        created: DateTime<Utc>,
        merged: Option<DateTime<Utc>>,
        closed: Option<DateTime<Utc>>,
    ) -> PullRequest {
        PullRequest {
            number,
            title: format!("pr {number}"),
            state: if merged.is_some() || closed.is_some() {
                PullState::Closed
            } else {
                PullState::Open
            },
            created_at: created,
            merged_at: merged,
            closed_at: closed,
            author: "octocat".to_string(),
            additions: 1,
            deletions: 1,
            labels: vec![],
            draft: false,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_timeline() {
        let timeline = pull_timeline(&[]);
        assert!(timeline.entries.is_empty());
        assert_eq!(timeline.opened_total, 0);
        assert_eq!(timeline.merged_total, 0);
        assert_eq!(timeline.closed_total, 0);
    }

    #[test]
    fn test_merged_and_closed_increments() {
        // PR 1: created d1, merged d3. PR 2: created d2, closed d4.
        let pulls = vec![
            pr(1, day(1), Some(day(3)), Some(day(3))),
            pr(2, day(2), None, Some(day(4))),
        ];

        let timeline = pull_timeline(&pulls);
        let by_date: BTreeMap<NaiveDate, TimelineEntry> = timeline
            .entries
            .iter()
            .map(|e| (e.date, *e))
            .collect();

        assert_eq!(by_date[&day(1).date_naive()].opened, 1);
        assert_eq!(by_date[&day(2).date_naive()].opened, 1);
        assert_eq!(by_date[&day(3).date_naive()].merged, 1);
        assert_eq!(by_date[&day(3).date_naive()].closed, 0);
        assert_eq!(by_date[&day(4).date_naive()].closed, 1);

        assert_eq!(timeline.opened_total, 2);
        assert_eq!(timeline.merged_total, 1);
        assert_eq!(timeline.closed_total, 1);
    }

    #[test]
    fn test_merged_pr_contributes_no_closed_increment() {
        // Upstream marks merged PRs closed as well; only the merge counts
        let pulls = vec![pr(1, day(1), Some(day(2)), Some(day(2)))];

        let timeline = pull_timeline(&pulls);
        assert_eq!(timeline.merged_total, 1);
        assert_eq!(timeline.closed_total, 0);
    }

    #[test]
    fn test_entries_sorted_by_date_ascending() {
        let pulls = vec![
            pr(1, day(20), None, None),
            pr(2, day(5), None, None),
            pr(3, day(12), None, None),
        ];

        let timeline = pull_timeline(&pulls);
        let dates: Vec<NaiveDate> = timeline.entries.iter().map(|e| e.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_open_pr_contributes_single_bucket() {
        let pulls = vec![pr(1, day(7), None, None)];

        let timeline = pull_timeline(&pulls);
        assert_eq!(timeline.entries.len(), 1);
        assert_eq!(timeline.opened_total, 1);
    }
}
