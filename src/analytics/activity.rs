//! Weekly commit-activity rollup for the pattern-analysis panel.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::stats::{consistency_score, linear_trend, TrendDirection};
use crate::types::Commit;
use crate::window::Granularity;

/// Commit count for one ISO week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyActivity {
    /// Monday of the week
    pub week_start: NaiveDate,
    /// Commits during the week
    pub count: usize,
}

/// Weekly activity shape over the fetched window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    /// Weeks sorted ascending
    pub weeks: Vec<WeeklyActivity>,
    /// Commits with valid timestamps
    pub total: usize,
    /// Week with the highest count, earliest on ties
    pub busiest_week: Option<NaiveDate>,
    /// OLS direction over the weekly counts
    pub direction: TrendDirection,
    /// Consistency score over the weekly counts, in `[0, 100]`
    pub consistency: f64,
}

/// Roll commits up into per-week counts with trend metrics.
///
/// Commits without a parsable timestamp are skipped; empty input yields a
/// zero summary.
#[must_use]
pub fn weekly_activity(commits: &[Commit]) -> ActivitySummary {
    let mut weeks: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut total = 0;

    for commit in commits {
        let Some(at) = commit.timestamp else {
            continue;
        };
        *weeks
            .entry(Granularity::Weekly.bucket(at.date_naive()))
            .or_insert(0) += 1;
        total += 1;
    }

    let mut busiest_week = None;
    let mut busiest_count = 0;
    for (&week_start, &count) in &weeks {
        if count > busiest_count {
            busiest_count = count;
            busiest_week = Some(week_start);
        }
    }

    let counts: Vec<f64> = weeks.values().map(|&c| c as f64).collect();

    ActivitySummary {
        weeks: weeks
            .into_iter()
            .map(|(week_start, count)| WeeklyActivity { week_start, count })
            .collect(),
        total,
        busiest_week,
        direction: linear_trend(&counts),
        consistency: consistency_score(&counts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn commit(sha: &str, at: Option<DateTime<Utc>>) -> Commit {
        Commit {
            sha: sha.to_string(),
            author_login: Some("octocat".to_string()),
            author_name: "The Octocat".to_string(),
            timestamp: at,
            message: "work".to_string(),
        }
    }

    fn day(d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_input_yields_zero_summary() {
        let summary = weekly_activity(&[]);
        assert!(summary.weeks.is_empty());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.busiest_week, None);
        assert_eq!(summary.direction, TrendDirection::Stable);
        assert_eq!(summary.consistency, 0.0);
    }

    #[test]
    fn test_weeks_and_busiest() {
        // Week of Jan 1: 1 commit; week of Jan 8: 3; week of Jan 15: 1
        let commits = vec![
            commit("a", day(2)),
            commit("b", day(9)),
            commit("c", day(10)),
            commit("d", day(11)),
            commit("e", day(16)),
        ];

        let summary = weekly_activity(&commits);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.weeks.len(), 3);
        assert_eq!(
            summary.busiest_week,
            Some(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap())
        );
    }

    #[test]
    fn test_malformed_timestamps_are_skipped() {
        let commits = vec![commit("a", day(2)), commit("b", None)];

        let summary = weekly_activity(&commits);
        assert_eq!(summary.total, 1);
    }

    #[test]
    fn test_steady_weeks_score_full_consistency() {
        let commits = vec![
            commit("a", day(2)),
            commit("b", day(9)),
            commit("c", day(16)),
        ];

        let summary = weekly_activity(&commits);
        assert_eq!(summary.consistency, 100.0);
        assert_eq!(summary.direction, TrendDirection::Stable);
    }
}
