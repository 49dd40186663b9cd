//! Commit heatmap bucketed by day of week.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Commit, ContributorId};
use crate::window::Period;

/// Day of week, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Enumeration order used for buckets and peak tie-breaking.
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Index with 0 = Sunday .. 6 = Saturday.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Day of week of an instant's UTC calendar day.
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self::ALL[at.weekday().num_days_from_sunday() as usize]
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

/// One day-of-week bucket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapBucket {
    /// Day this bucket covers
    pub day: DayOfWeek,
    /// Commits landing on this day of week
    pub count: usize,
    /// Distinct contributors seen in this bucket
    pub contributors: BTreeSet<ContributorId>,
}

/// Commit activity grouped by day of week.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitHeatmap {
    /// Period the records were fetched for
    pub period: Period,
    /// Seven buckets, Sunday first
    pub buckets: Vec<HeatmapBucket>,
    /// Commits with a valid timestamp
    pub total: usize,
    /// Bucket with the highest count; ties go to the earliest day in
    /// Sunday-first order
    pub peak_day: DayOfWeek,
    /// Weekday-shape average: total divided by 7 regardless of the
    /// period's actual day span
    pub average_per_day: f64,
}

/// Bucket commits by day of week.
///
/// Commits without a parsable timestamp are skipped. Empty input yields
/// seven zero buckets, a zero total and average, and `Sunday` as the
/// default peak.
#[must_use]
pub fn commit_heatmap(commits: &[Commit], period: Period) -> CommitHeatmap {
    let mut buckets: Vec<HeatmapBucket> = DayOfWeek::ALL
        .into_iter()
        .map(|day| HeatmapBucket {
            day,
            count: 0,
            contributors: BTreeSet::new(),
        })
        .collect();

    let mut total = 0;
    for commit in commits {
        let Some(at) = commit.timestamp else {
            continue;
        };
        let day = DayOfWeek::from_datetime(at);
        let bucket = &mut buckets[day.index()];
        bucket.count += 1;
        bucket.contributors.insert(commit.contributor());
        total += 1;
    }

    let mut peak_day = DayOfWeek::Sunday;
    let mut peak_count = 0;
    for bucket in &buckets {
        if bucket.count > peak_count {
            peak_count = bucket.count;
            peak_day = bucket.day;
        }
    }

    CommitHeatmap {
        period,
        buckets,
        total,
        peak_day,
        average_per_day: total as f64 / 7.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn commit(sha: &str, author: &str, at: Option<DateTime<Utc>>) -> Commit {
        Commit {
            sha: sha.to_string(),
            author_login: Some(author.to_string()),
            author_name: author.to_string(),
            timestamp: at,
            message: "work".to_string(),
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_input_yields_canonical_empty_heatmap() {
        let heatmap = commit_heatmap(&[], Period::Days30);

        assert_eq!(heatmap.total, 0);
        assert_eq!(heatmap.average_per_day, 0.0);
        assert_eq!(heatmap.peak_day, DayOfWeek::Sunday);
        assert_eq!(heatmap.buckets.len(), 7);
        assert!(heatmap.buckets.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_weekday_bucketing_and_peak() {
        // 2024-01-01 was a Monday; 2024-01-07 a Sunday
        let commits = vec![
            commit("a", "alice", at(2024, 1, 1, 10)),
            commit("b", "bob", at(2024, 1, 1, 14)),
            commit("c", "alice", at(2024, 1, 2, 9)),
            commit("d", "charlie", at(2024, 1, 7, 11)),
        ];

        let heatmap = commit_heatmap(&commits, Period::Days30);

        assert_eq!(heatmap.total, 4);
        assert_eq!(heatmap.peak_day, DayOfWeek::Monday);
        assert_eq!(heatmap.buckets[DayOfWeek::Monday.index()].count, 2);
        assert_eq!(heatmap.buckets[DayOfWeek::Tuesday.index()].count, 1);
        assert_eq!(heatmap.buckets[DayOfWeek::Sunday.index()].count, 1);
        assert!((heatmap.average_per_day - 4.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_peak_tie_breaks_to_earliest_day() {
        // One commit Sunday, one Wednesday
        let commits = vec![
            commit("a", "alice", at(2024, 1, 7, 10)),
            commit("b", "bob", at(2024, 1, 3, 10)),
        ];

        let heatmap = commit_heatmap(&commits, Period::Days30);
        assert_eq!(heatmap.peak_day, DayOfWeek::Sunday);
    }

    #[test]
    fn test_distinct_contributors_per_bucket() {
        let commits = vec![
            commit("a", "alice", at(2024, 1, 1, 10)),
            commit("b", "alice", at(2024, 1, 1, 14)),
            commit("c", "bob", at(2024, 1, 1, 16)),
        ];

        let heatmap = commit_heatmap(&commits, Period::Days30);
        let monday = &heatmap.buckets[DayOfWeek::Monday.index()];
        assert_eq!(monday.count, 3);
        assert_eq!(monday.contributors.len(), 2);
    }

    #[test]
    fn test_malformed_timestamps_are_skipped() {
        let commits = vec![
            commit("a", "alice", at(2024, 1, 1, 10)),
            commit("b", "bob", None),
            commit("c", "charlie", at(2024, 1, 2, 9)),
        ];

        let heatmap = commit_heatmap(&commits, Period::Days30);
        assert_eq!(heatmap.total, 2);
        let bucket_sum: usize = heatmap.buckets.iter().map(|b| b.count).sum();
        assert_eq!(bucket_sum, 2);
    }
}
