//! Pure aggregation functions over raw records.
//!
//! Every function here is side-effect free and total over empty input:
//! an empty (or all-malformed) record set produces the canonical empty
//! result with the same shape as a populated one. Records whose timestamp
//! failed to parse are silently excluded from all aggregations.
//!
//! Inputs are assumed to be pre-bounded by the fetch layer's time window;
//! the `Period` argument selects trend granularity and is echoed in
//! results, it does not re-filter.

mod activity;
mod files;
mod heatmap;
mod stats;
mod timeline;
mod trends;

pub use activity::{weekly_activity, ActivitySummary, WeeklyActivity};
pub use files::{
    file_change_analysis, file_change_analysis_at, FileChangeAnalysis, FileChangeStat,
    TypeBreakdownEntry,
};
pub use heatmap::{commit_heatmap, CommitHeatmap, DayOfWeek, HeatmapBucket};
pub use stats::{consistency_score, linear_trend, mean, ols_slope, stddev, TrendDirection};
pub use timeline::{pull_timeline, PullTimeline, TimelineEntry};
pub use trends::{
    contributor_trends, contributor_trends_at, ContributorTrend, ContributorTrends,
    PointDirection, TrendPoint,
};
