//! Per-contributor commit trends over period-granular buckets.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::types::{Commit, ContributorId};
use crate::window::{Granularity, Period};

/// Days of trailing activity that keep a contributor "active".
const ACTIVE_WITHIN_DAYS: i64 = 30;

/// Direction of one trend point relative to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PointDirection {
    Up,
    Down,
    Stable,
}

/// One bucket in a trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Start date of the bucket
    pub period_start: NaiveDate,
    /// Records in the bucket
    pub count: usize,
    /// Comparison to the immediately preceding point; the first point is
    /// always `Stable`
    pub direction: PointDirection,
}

/// Trend series for one contributor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorTrend {
    /// Tagged contributor identity
    pub contributor: ContributorId,
    /// Commits with valid timestamps across the series
    pub total: usize,
    /// Buckets sorted by period start ascending
    pub points: Vec<TrendPoint>,
    /// Whether the contributor has activity within the trailing 30 days
    pub active: bool,
}

/// Contributor trends over one analysis period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorTrends {
    /// Period the records were fetched for
    pub period: Period,
    /// Bucket granularity derived from the period
    pub granularity: Granularity,
    /// Per-contributor series, sorted by total descending then name
    pub contributors: Vec<ContributorTrend>,
}

/// Group commits into per-contributor trend series.
#[must_use]
pub fn contributor_trends(commits: &[Commit], period: Period) -> ContributorTrends {
    contributor_trends_at(commits, period, Utc::now())
}

/// [`contributor_trends`] against an explicit "now" for the activity flag.
#[must_use]
pub fn contributor_trends_at(
    commits: &[Commit],
    period: Period,
    now: DateTime<Utc>,
) -> ContributorTrends {
    let granularity = period.granularity();
    let active_floor = now - Duration::days(ACTIVE_WITHIN_DAYS);

    // Identity grouping is strict on the tagged value: a Handle and a
    // DisplayName with the same text stay separate series.
    let mut series: HashMap<ContributorId, SeriesAccumulator> = HashMap::new();

    for commit in commits {
        let Some(at) = commit.timestamp else {
            continue;
        };
        let bucket = granularity.bucket(at.date_naive());
        let acc = series.entry(commit.contributor()).or_default();
        *acc.buckets.entry(bucket).or_insert(0) += 1;
        acc.total += 1;
        acc.active |= at >= active_floor;
    }

    let mut contributors: Vec<ContributorTrend> = series
        .into_iter()
        .map(|(contributor, acc)| ContributorTrend {
            contributor,
            total: acc.total,
            points: direction_points(&acc.buckets),
            active: acc.active,
        })
        .collect();

    contributors.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.contributor.cmp(&b.contributor))
    });

    ContributorTrends {
        period,
        granularity,
        contributors,
    }
}

#[derive(Default)]
struct SeriesAccumulator {
    buckets: BTreeMap<NaiveDate, usize>,
    total: usize,
    active: bool,
}

/// Turn sorted buckets into points with previous-point directions.
pub(crate) fn direction_points(buckets: &BTreeMap<NaiveDate, usize>) -> Vec<TrendPoint> {
    let mut points = Vec::with_capacity(buckets.len());
    let mut previous: Option<usize> = None;

    for (&period_start, &count) in buckets {
        let direction = match previous {
            None => PointDirection::Stable,
            Some(prev) if count > prev => PointDirection::Up,
            Some(prev) if count < prev => PointDirection::Down,
            Some(_) => PointDirection::Stable,
        };
        points.push(TrendPoint {
            period_start,
            count,
            direction,
        });
        previous = Some(count);
    }

    points
}
