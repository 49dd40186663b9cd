//! repopulse - analytics and retrieval core for repository dashboards
//!
//! Turns raw paginated hosting-API records (commits, pull requests,
//! reviews, branches) into time-bucketed aggregates, behind a fetch
//! orchestrator with bounded pagination, rate-limit backoff, cancellation,
//! progress reporting, and time-boxed in-memory caching.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use repopulse::{AnalyticsFetcher, FetchOptions, HostClient, Period, RestSource};
//!
//! # async fn run() -> Result<(), repopulse::Error> {
//! let client = HostClient::from_env()?;
//! let fetcher = AnalyticsFetcher::new(Arc::new(RestSource::new(client)));
//!
//! let snapshot = fetcher
//!     .fetch_analytics("octo", "widget", Period::Days30, &FetchOptions::default())
//!     .await?;
//! println!("peak day: {:?}", snapshot.heatmap.peak_day);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod cache;
pub mod cancel;
pub mod classify;
pub mod client;
pub mod clients;
pub mod error;
pub mod fetch;
pub mod retry;
pub mod source;
pub mod transport;
pub mod types;
pub mod window;

// Re-exports
pub use analytics::{
    commit_heatmap, consistency_score, contributor_trends, file_change_analysis, linear_trend,
    pull_timeline, weekly_activity, ActivitySummary, CommitHeatmap, ContributorTrend,
    ContributorTrends, DayOfWeek, FileChangeAnalysis, FileChangeStat, HeatmapBucket,
    PointDirection, PullTimeline, TimelineEntry, TrendDirection, TrendPoint, TypeBreakdownEntry,
    WeeklyActivity,
};
pub use cache::{CacheStats, TtlCache};
pub use cancel::CancellationToken;
pub use classify::{classify_path, FileCategory, FileKind};
pub use client::{HostClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use clients::{BranchesClient, CommitsClient, ContributorsClient, PullsClient, ReposClient};
pub use error::{Error, FetchError};
pub use fetch::{
    AnalyticsFetcher, AnalyticsSnapshot, CacheOverview, FetchConfig, FetchOptions, FetchOutcome,
    FileAnalysisSnapshot, ProgressFn,
};
pub use retry::{retry_with_backoff, RetryPolicy};
pub use source::{RecordSource, RestSource, SourceItem, SourcePage};
pub use transport::{ApiResponse, HttpTransport};
pub use types::{
    Branch, BranchStatus, Commit, CommitFiles, Contributor, ContributorId, FileChange, FileStatus,
    PullRequest, PullState, RateLimit, Repository, Review, ReviewState,
};
pub use window::{Granularity, Period, TimeWindow};
