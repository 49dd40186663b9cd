//! Paginated fetch orchestration over a [`RecordSource`].
//!
//! Drives page-by-page retrieval bounded by a record cap and the remote
//! rate limit, with cancellation, progress reporting, retry-with-backoff,
//! and two TTL caches (raw fetches and assembled analytics). Pages are
//! requested strictly in order; one request is in flight at a time per
//! orchestration run.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::analytics::{
    commit_heatmap, contributor_trends, file_change_analysis, pull_timeline, weekly_activity,
    ActivitySummary, CommitHeatmap, ContributorTrends, FileChangeAnalysis, PullTimeline,
};
use crate::cache::{CacheStats, TtlCache};
use crate::cancel::CancellationToken;
use crate::error::FetchError;
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::source::{RecordSource, SourcePage};
use crate::types::{
    Branch, Commit, CommitFiles, Contributor, PullRequest, RateLimit, Repository, Review,
};
use crate::window::Period;

/// Progress callback: `(records_so_far, estimated_total)`.
///
/// The estimate is revised as pages arrive and is never an overcommitment
/// beyond one page.
pub type ProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Per-call fetch options.
#[derive(Clone)]
pub struct FetchOptions {
    /// Hard cap on records returned; results are truncated exactly to it
    pub max_records: usize,
    /// Remaining-quota floor below which pagination stops early
    pub rate_limit_threshold: u32,
    /// Courtesy delay between page requests (not retry backoff)
    pub page_delay: Duration,
    /// Invoked after each successful page; never on error, cancellation,
    /// or cache hit
    pub on_progress: Option<ProgressFn>,
    /// Cancellation handle checked at every suspension point
    pub cancel: CancellationToken,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_records: 1000,
            rate_limit_threshold: 10,
            page_delay: Duration::from_millis(150),
            on_progress: None,
            cancel: CancellationToken::new(),
        }
    }
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("max_records", &self.max_records)
            .field("rate_limit_threshold", &self.rate_limit_threshold)
            .field("page_delay", &self.page_delay)
            .field("on_progress", &self.on_progress.is_some())
            .field("cancel", &self.cancel)
            .finish()
    }
}

/// Construction-time orchestrator configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Records requested per page
    pub page_size: u32,
    /// TTL of the raw-fetch cache
    pub fetch_ttl: Duration,
    /// Entry capacity of the raw-fetch cache
    pub fetch_capacity: usize,
    /// TTL of the analytics cache
    pub transform_ttl: Duration,
    /// Entry capacity of the analytics cache
    pub transform_capacity: usize,
    /// Cap on per-commit file-detail requests in one call
    pub detail_limit: usize,
    /// Retry policy wrapped around every network round
    pub retry: RetryPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            fetch_ttl: Duration::from_secs(15 * 60),
            fetch_capacity: 100,
            transform_ttl: Duration::from_secs(5 * 60),
            transform_capacity: 50,
            detail_limit: 50,
            retry: RetryPolicy::default(),
        }
    }
}

/// Result of one orchestrated fetch.
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
    /// Retrieved records, possibly truncated or partial
    pub records: Vec<T>,
    /// Most recent rate-limit state observed; `None` on cache hits
    pub rate_limit: Option<RateLimit>,
    /// Pagination stopped early because the remaining quota dipped below
    /// the threshold; the partial records are still returned
    pub rate_limit_warning: bool,
    /// Served from the fetch cache without network cost
    pub from_cache: bool,
}

/// Assembled analytics for one `(owner, repo, period)` tuple.
#[derive(Debug, Clone)]
pub struct AnalyticsSnapshot {
    /// Commit heatmap by day of week
    pub heatmap: CommitHeatmap,
    /// Per-contributor trend series
    pub contributor_trends: ContributorTrends,
    /// Pull request timeline
    pub timeline: PullTimeline,
    /// Weekly activity rollup
    pub activity: ActivitySummary,
    /// Most recent rate-limit state observed during the fetches
    pub rate_limit: Option<RateLimit>,
    /// Any underlying fetch stopped early on the rate-limit threshold
    pub rate_limit_warning: bool,
}

/// File-change analysis assembled from per-commit detail fetches.
#[derive(Debug, Clone)]
pub struct FileAnalysisSnapshot {
    /// Per-file tallies, hotspots, and type breakdown
    pub analysis: FileChangeAnalysis,
    /// Most recent rate-limit state observed during the fetches
    pub rate_limit: Option<RateLimit>,
    /// Any underlying fetch stopped early on the rate-limit threshold
    pub rate_limit_warning: bool,
}

/// Cache overview across both cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheOverview {
    /// Raw-fetch cache
    pub fetch: CacheStats,
    /// Analytics cache
    pub transform: CacheStats,
}

/// Raw records stored in the fetch cache, keyed by query shape.
#[derive(Debug, Clone)]
enum CachedRecords {
    Commits(Vec<Commit>),
    Pulls(Vec<PullRequest>),
    Branches(Vec<Branch>),
    Contributors(Vec<Contributor>),
    Repository(Repository),
}

/// Assembled results stored in the analytics cache.
#[derive(Debug, Clone)]
enum CachedTransform {
    Analytics(AnalyticsSnapshot),
    Files(FileAnalysisSnapshot),
}

/// Fetch orchestrator over a [`RecordSource`].
///
/// Independent orchestration runs may share one instance; the caches are
/// the only shared mutable state.
pub struct AnalyticsFetcher {
    source: Arc<dyn RecordSource>,
    fetch_cache: TtlCache<CachedRecords>,
    transform_cache: TtlCache<CachedTransform>,
    config: FetchConfig,
}

impl AnalyticsFetcher {
    /// Create a fetcher with default configuration.
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self::with_config(source, FetchConfig::default())
    }

    /// Create a fetcher with explicit configuration.
    #[must_use]
    pub fn with_config(source: Arc<dyn RecordSource>, config: FetchConfig) -> Self {
        Self {
            fetch_cache: TtlCache::new(config.fetch_ttl, config.fetch_capacity),
            transform_cache: TtlCache::new(config.transform_ttl, config.transform_capacity),
            source,
            config,
        }
    }

    /// Fetch the commit list for a period, cache-first.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`]; `Cancelled` wins any race.
    pub async fn fetch_commits(
        &self,
        owner: &str,
        repo: &str,
        period: Period,
        options: &FetchOptions,
    ) -> Result<FetchOutcome<Commit>, FetchError> {
        options.cancel.check()?;

        let key = cache_key(owner, repo, "commits", Some(period));
        if let Some(CachedRecords::Commits(records)) = self.fetch_cache.get(&key).await {
            debug!(owner, repo, %period, "commit fetch served from cache");
            return Ok(cached_outcome(records));
        }

        let window = period.window();
        let per_page = self.config.page_size;
        let (records, rate_limit, warned) = self
            .paginate(options, |page| {
                let source = Arc::clone(&self.source);
                async move {
                    source
                        .commit_page(owner, repo, &window, page, per_page)
                        .await
                }
            })
            .await?;

        if warned {
            info!(owner, repo, fetched = records.len(), "partial commit fetch not cached");
        } else {
            self.fetch_cache
                .insert(key, CachedRecords::Commits(records.clone()))
                .await;
        }

        Ok(FetchOutcome {
            records,
            rate_limit,
            rate_limit_warning: warned,
            from_cache: false,
        })
    }

    /// Fetch the pull request list (all states), cache-first.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`]; `Cancelled` wins any race.
    pub async fn fetch_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        options: &FetchOptions,
    ) -> Result<FetchOutcome<PullRequest>, FetchError> {
        options.cancel.check()?;

        let key = cache_key(owner, repo, "pulls", None);
        if let Some(CachedRecords::Pulls(records)) = self.fetch_cache.get(&key).await {
            debug!(owner, repo, "pull fetch served from cache");
            return Ok(cached_outcome(records));
        }

        let per_page = self.config.page_size;
        let (records, rate_limit, warned) = self
            .paginate(options, |page| {
                let source = Arc::clone(&self.source);
                async move { source.pull_page(owner, repo, page, per_page).await }
            })
            .await?;

        if !warned {
            self.fetch_cache
                .insert(key, CachedRecords::Pulls(records.clone()))
                .await;
        }

        Ok(FetchOutcome {
            records,
            rate_limit,
            rate_limit_warning: warned,
            from_cache: false,
        })
    }

    /// Fetch the branch list, cache-first.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`]; `Cancelled` wins any race.
    pub async fn fetch_branches(
        &self,
        owner: &str,
        repo: &str,
        options: &FetchOptions,
    ) -> Result<FetchOutcome<Branch>, FetchError> {
        options.cancel.check()?;

        let key = cache_key(owner, repo, "branches", None);
        if let Some(CachedRecords::Branches(records)) = self.fetch_cache.get(&key).await {
            debug!(owner, repo, "branch fetch served from cache");
            return Ok(cached_outcome(records));
        }

        let per_page = self.config.page_size;
        let (records, rate_limit, warned) = self
            .paginate(options, |page| {
                let source = Arc::clone(&self.source);
                async move { source.branch_page(owner, repo, page, per_page).await }
            })
            .await?;

        if !warned {
            self.fetch_cache
                .insert(key, CachedRecords::Branches(records.clone()))
                .await;
        }

        Ok(FetchOutcome {
            records,
            rate_limit,
            rate_limit_warning: warned,
            from_cache: false,
        })
    }

    /// Fetch the contributor list, cache-first.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`]; `Cancelled` wins any race.
    pub async fn fetch_contributors(
        &self,
        owner: &str,
        repo: &str,
        options: &FetchOptions,
    ) -> Result<FetchOutcome<Contributor>, FetchError> {
        options.cancel.check()?;

        let key = cache_key(owner, repo, "contributors", None);
        if let Some(CachedRecords::Contributors(records)) = self.fetch_cache.get(&key).await {
            debug!(owner, repo, "contributor fetch served from cache");
            return Ok(cached_outcome(records));
        }

        let per_page = self.config.page_size;
        let (records, rate_limit, warned) = self
            .paginate(options, |page| {
                let source = Arc::clone(&self.source);
                async move { source.contributor_page(owner, repo, page, per_page).await }
            })
            .await?;

        if !warned {
            self.fetch_cache
                .insert(key, CachedRecords::Contributors(records.clone()))
                .await;
        }

        Ok(FetchOutcome {
            records,
            rate_limit,
            rate_limit_warning: warned,
            from_cache: false,
        })
    }

    /// Fetch repository metadata, cache-first.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`]; `Cancelled` wins any race.
    pub async fn fetch_repository(
        &self,
        owner: &str,
        repo: &str,
        options: &FetchOptions,
    ) -> Result<Repository, FetchError> {
        options.cancel.check()?;

        let key = cache_key(owner, repo, "repository", None);
        if let Some(CachedRecords::Repository(repository)) = self.fetch_cache.get(&key).await {
            debug!(owner, repo, "repository fetch served from cache");
            return Ok(repository);
        }

        let item = retry_with_backoff(&self.config.retry, &options.cancel, || {
            let source = Arc::clone(&self.source);
            async move { source.repository(owner, repo).await }
        })
        .await?;
        options.cancel.check()?;

        self.fetch_cache
            .insert(key, CachedRecords::Repository(item.record.clone()))
            .await;
        Ok(item.record)
    }

    /// Fetch the reviews for a list of pull requests, one request per PR.
    ///
    /// Stops early with a warning when the remaining quota dips below the
    /// threshold; the reviews collected so far are returned.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`]; `Cancelled` wins any race.
    pub async fn fetch_reviews(
        &self,
        owner: &str,
        repo: &str,
        pulls: &[PullRequest],
        options: &FetchOptions,
    ) -> Result<FetchOutcome<Review>, FetchError> {
        let mut records = Vec::new();
        let mut rate_limit = None;
        let mut warned = false;

        for (i, pr) in pulls.iter().enumerate() {
            options.cancel.check()?;
            if i > 0 {
                tokio::time::sleep(options.page_delay).await;
            }

            let number = pr.number;
            let page = retry_with_backoff(&self.config.retry, &options.cancel, || {
                let source = Arc::clone(&self.source);
                async move { source.pull_reviews(owner, repo, number).await }
            })
            .await?;
            options.cancel.check()?;

            if let Some(rl) = page.rate_limit {
                rate_limit = Some(rl);
            }
            records.extend(page.records);

            if let Some(rl) = rate_limit {
                if rl.remaining < options.rate_limit_threshold {
                    warn!(
                        owner,
                        repo,
                        remaining = rl.remaining,
                        "rate limit low, stopping review fetch early"
                    );
                    warned = true;
                    break;
                }
            }
        }

        Ok(FetchOutcome {
            records,
            rate_limit,
            rate_limit_warning: warned,
            from_cache: false,
        })
    }

    /// Fetch per-commit file details, capped at the configured detail
    /// limit.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`]; `Cancelled` wins any race.
    pub async fn fetch_file_details(
        &self,
        owner: &str,
        repo: &str,
        commits: &[Commit],
        options: &FetchOptions,
    ) -> Result<FetchOutcome<CommitFiles>, FetchError> {
        let mut records = Vec::new();
        let mut rate_limit = None;
        let mut warned = false;

        let capped = &commits[..commits.len().min(self.config.detail_limit)];
        if capped.len() < commits.len() {
            debug!(
                owner,
                repo,
                requested = commits.len(),
                capped = capped.len(),
                "file-detail fetch capped"
            );
        }

        for (i, commit) in capped.iter().enumerate() {
            options.cancel.check()?;
            if i > 0 {
                tokio::time::sleep(options.page_delay).await;
            }

            let sha = commit.sha.as_str();
            let item = retry_with_backoff(&self.config.retry, &options.cancel, || {
                let source = Arc::clone(&self.source);
                async move { source.commit_files(owner, repo, sha).await }
            })
            .await?;
            options.cancel.check()?;

            if let Some(rl) = item.rate_limit {
                rate_limit = Some(rl);
            }
            records.push(item.record);

            if let Some(rl) = rate_limit {
                if rl.remaining < options.rate_limit_threshold {
                    warn!(
                        owner,
                        repo,
                        remaining = rl.remaining,
                        "rate limit low, stopping file-detail fetch early"
                    );
                    warned = true;
                    break;
                }
            }
        }

        Ok(FetchOutcome {
            records,
            rate_limit,
            rate_limit_warning: warned,
            from_cache: false,
        })
    }

    /// Fetch everything the dashboard's analytics panels need and
    /// assemble the aggregations, cache-first.
    ///
    /// A partial (rate-limit-warning) snapshot is returned but not
    /// cached, so a later call can complete the picture.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`]; `Cancelled` wins any race.
    pub async fn fetch_analytics(
        &self,
        owner: &str,
        repo: &str,
        period: Period,
        options: &FetchOptions,
    ) -> Result<AnalyticsSnapshot, FetchError> {
        options.cancel.check()?;

        let key = cache_key(owner, repo, "analytics", Some(period));
        if let Some(CachedTransform::Analytics(snapshot)) = self.transform_cache.get(&key).await
        {
            debug!(owner, repo, %period, "analytics served from cache");
            return Ok(snapshot);
        }

        let commits = self.fetch_commits(owner, repo, period, options).await?;
        let pulls = self.fetch_pull_requests(owner, repo, options).await?;

        let rate_limit_warning = commits.rate_limit_warning || pulls.rate_limit_warning;
        let snapshot = AnalyticsSnapshot {
            heatmap: commit_heatmap(&commits.records, period),
            contributor_trends: contributor_trends(&commits.records, period),
            timeline: pull_timeline(&pulls.records),
            activity: weekly_activity(&commits.records),
            rate_limit: pulls.rate_limit.or(commits.rate_limit),
            rate_limit_warning,
        };

        if !rate_limit_warning {
            self.transform_cache
                .insert(key, CachedTransform::Analytics(snapshot.clone()))
                .await;
        }

        Ok(snapshot)
    }

    /// Fetch commits plus per-commit file details and assemble the
    /// file-change analysis, cache-first.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`]; `Cancelled` wins any race.
    pub async fn fetch_file_analysis(
        &self,
        owner: &str,
        repo: &str,
        period: Period,
        options: &FetchOptions,
    ) -> Result<FileAnalysisSnapshot, FetchError> {
        options.cancel.check()?;

        let key = cache_key(owner, repo, "files", Some(period));
        if let Some(CachedTransform::Files(snapshot)) = self.transform_cache.get(&key).await {
            debug!(owner, repo, %period, "file analysis served from cache");
            return Ok(snapshot);
        }

        let commits = self.fetch_commits(owner, repo, period, options).await?;
        let details = self
            .fetch_file_details(owner, repo, &commits.records, options)
            .await?;

        let rate_limit_warning = commits.rate_limit_warning || details.rate_limit_warning;
        let snapshot = FileAnalysisSnapshot {
            analysis: file_change_analysis(&details.records, period),
            rate_limit: details.rate_limit.or(commits.rate_limit),
            rate_limit_warning,
        };

        if !rate_limit_warning {
            self.transform_cache
                .insert(key, CachedTransform::Files(snapshot.clone()))
                .await;
        }

        Ok(snapshot)
    }

    /// Invalidate cached entries.
    ///
    /// With owner and repo, that repository's entries; with only an
    /// owner, all of the owner's repositories; with neither, everything.
    /// Returns the number of entries removed across both caches.
    pub async fn invalidate_cache(&self, owner: Option<&str>, repo: Option<&str>) -> usize {
        match (owner, repo) {
            (Some(owner), Some(repo)) => {
                let prefix = format!("{owner}/{repo}:");
                self.fetch_cache.invalidate_prefix(&prefix).await
                    + self.transform_cache.invalidate_prefix(&prefix).await
            }
            (Some(owner), None) => {
                let prefix = format!("{owner}/");
                self.fetch_cache.invalidate_prefix(&prefix).await
                    + self.transform_cache.invalidate_prefix(&prefix).await
            }
            _ => self.fetch_cache.clear().await + self.transform_cache.clear().await,
        }
    }

    /// Stats for both cache instances.
    pub async fn cache_stats(&self) -> CacheOverview {
        CacheOverview {
            fetch: self.fetch_cache.stats().await,
            transform: self.transform_cache.stats().await,
        }
    }

    /// Drive pagination until exhaustion, the record cap, or the
    /// rate-limit threshold.
    async fn paginate<T, F, Fut>(
        &self,
        options: &FetchOptions,
        mut fetch_page: F,
    ) -> Result<(Vec<T>, Option<RateLimit>, bool), FetchError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<SourcePage<T>, FetchError>>,
    {
        let page_size = self.config.page_size as usize;
        let mut records: Vec<T> = Vec::new();
        let mut rate_limit = None;
        let mut warned = false;
        let mut page = 1;

        loop {
            options.cancel.check()?;

            let source_page =
                retry_with_backoff(&self.config.retry, &options.cancel, || fetch_page(page))
                    .await?;
            options.cancel.check()?;

            if let Some(rl) = source_page.rate_limit {
                rate_limit = Some(rl);
            }

            let page_len = source_page.records.len();
            records.extend(source_page.records);

            let truncated = records.len() >= options.max_records;
            if truncated {
                records.truncate(options.max_records);
            }

            let so_far = records.len();
            let estimated = if !truncated && page_len >= page_size {
                (so_far + page_size).min(options.max_records)
            } else {
                so_far
            };
            if let Some(on_progress) = &options.on_progress {
                on_progress(so_far, estimated);
            }

            if truncated {
                debug!(fetched = so_far, "record cap reached, truncating");
                break;
            }

            if let Some(rl) = rate_limit {
                if rl.remaining < options.rate_limit_threshold {
                    warn!(
                        remaining = rl.remaining,
                        threshold = options.rate_limit_threshold,
                        "rate limit low, stopping pagination early"
                    );
                    warned = true;
                    break;
                }
            }

            if page_len < page_size {
                break;
            }

            page += 1;
            tokio::time::sleep(options.page_delay).await;
        }

        Ok((records, rate_limit, warned))
    }
}

fn cache_key(owner: &str, repo: &str, shape: &str, period: Option<Period>) -> String {
    match period {
        Some(period) => format!("{owner}/{repo}:{shape}:{period}"),
        None => format!("{owner}/{repo}:{shape}"),
    }
}

fn cached_outcome<T>(records: Vec<T>) -> FetchOutcome<T> {
    FetchOutcome {
        records,
        rate_limit: None,
        rate_limit_warning: false,
        from_cache: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_shapes() {
        assert_eq!(
            cache_key("octo", "widget", "commits", Some(Period::Days30)),
            "octo/widget:commits:30d"
        );
        assert_eq!(cache_key("octo", "widget", "pulls", None), "octo/widget:pulls");
    }

    #[test]
    fn test_default_options() {
        let options = FetchOptions::default();
        assert_eq!(options.max_records, 1000);
        assert_eq!(options.rate_limit_threshold, 10);
        assert!(options.on_progress.is_none());
        assert!(!options.cancel.is_cancelled());
    }

    #[test]
    fn test_default_config_ttls() {
        let config = FetchConfig::default();
        assert_eq!(config.fetch_ttl, Duration::from_secs(900));
        assert_eq!(config.transform_ttl, Duration::from_secs(300));
        assert_eq!(config.transform_capacity, 50);
    }
}
