//! Record source seam between the orchestrator and the REST layer.
//!
//! The orchestrator paginates against this trait rather than the concrete
//! clients, so tests can drive it with an in-memory source and the
//! production path plugs in [`RestSource`].

use async_trait::async_trait;

use crate::client::HostClient;
use crate::error::FetchError;
use crate::types::{
    Branch, Commit, CommitFiles, Contributor, PullRequest, RateLimit, Repository, Review,
};
use crate::window::TimeWindow;

/// One page of records with the rate-limit state observed alongside it.
#[derive(Debug, Clone)]
pub struct SourcePage<T> {
    /// Records on this page
    pub records: Vec<T>,
    /// Rate-limit headers from the response, if present
    pub rate_limit: Option<RateLimit>,
}

/// A single record with its rate-limit state.
#[derive(Debug, Clone)]
pub struct SourceItem<T> {
    /// The record
    pub record: T,
    /// Rate-limit headers from the response, if present
    pub rate_limit: Option<RateLimit>,
}

/// Paginated access to the record kinds the analytics core consumes.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// One page of commits within a time window.
    async fn commit_page(
        &self,
        owner: &str,
        repo: &str,
        window: &TimeWindow,
        page: u32,
        per_page: u32,
    ) -> Result<SourcePage<Commit>, FetchError>;

    /// One page of pull requests (all states).
    async fn pull_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SourcePage<PullRequest>, FetchError>;

    /// One page of branches.
    async fn branch_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SourcePage<Branch>, FetchError>;

    /// One page of contributors.
    async fn contributor_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SourcePage<Contributor>, FetchError>;

    /// Reviews submitted on one pull request.
    async fn pull_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<SourcePage<Review>, FetchError>;

    /// File detail for one commit.
    async fn commit_files(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<SourceItem<CommitFiles>, FetchError>;

    /// Repository metadata.
    async fn repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<SourceItem<Repository>, FetchError>;
}

/// Production [`RecordSource`] backed by the REST clients.
pub struct RestSource {
    client: HostClient,
}

impl RestSource {
    /// Wrap a configured [`HostClient`].
    #[must_use]
    pub fn new(client: HostClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordSource for RestSource {
    async fn commit_page(
        &self,
        owner: &str,
        repo: &str,
        window: &TimeWindow,
        page: u32,
        per_page: u32,
    ) -> Result<SourcePage<Commit>, FetchError> {
        let response = self
            .client
            .commits()
            .list(owner, repo, window, page, per_page)
            .await?;
        Ok(SourcePage {
            records: response.data,
            rate_limit: response.rate_limit,
        })
    }

    async fn pull_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SourcePage<PullRequest>, FetchError> {
        let response = self
            .client
            .pulls()
            .list(owner, repo, None, page, per_page)
            .await?;
        Ok(SourcePage {
            records: response.data,
            rate_limit: response.rate_limit,
        })
    }

    async fn branch_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SourcePage<Branch>, FetchError> {
        let response = self
            .client
            .branches()
            .list(owner, repo, page, per_page)
            .await?;
        Ok(SourcePage {
            records: response.data,
            rate_limit: response.rate_limit,
        })
    }

    async fn contributor_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SourcePage<Contributor>, FetchError> {
        let response = self
            .client
            .contributors()
            .list(owner, repo, page, per_page)
            .await?;
        Ok(SourcePage {
            records: response.data,
            rate_limit: response.rate_limit,
        })
    }

    async fn pull_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<SourcePage<Review>, FetchError> {
        let response = self.client.pulls().reviews(owner, repo, number).await?;
        Ok(SourcePage {
            records: response.data,
            rate_limit: response.rate_limit,
        })
    }

    async fn commit_files(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<SourceItem<CommitFiles>, FetchError> {
        let response = self.client.commits().files(owner, repo, sha).await?;
        Ok(SourceItem {
            record: response.data,
            rate_limit: response.rate_limit,
        })
    }

    async fn repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<SourceItem<Repository>, FetchError> {
        let response = self.client.repos().get(owner, repo).await?;
        Ok(SourceItem {
            record: response.data,
            rate_limit: response.rate_limit,
        })
    }
}
