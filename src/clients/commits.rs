//! Commits resource client.

use std::sync::Arc;

use crate::error::FetchError;
use crate::transport::{ApiResponse, HttpTransport};
use crate::types::{Commit, CommitFiles};
use crate::window::TimeWindow;

/// Client for the commit-list and commit-detail endpoints.
pub struct CommitsClient {
    transport: Arc<HttpTransport>,
}

impl CommitsClient {
    /// Create a new commits client.
    #[must_use]
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List one page of commits, optionally bounded by a time window.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request fails.
    pub async fn list(
        &self,
        owner: &str,
        repo: &str,
        window: &TimeWindow,
        page: u32,
        per_page: u32,
    ) -> Result<ApiResponse<Vec<Commit>>, FetchError> {
        let mut params = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(since) = window.since {
            params.push(("since", since.to_rfc3339()));
        }
        if let Some(until) = window.until {
            params.push(("until", until.to_rfc3339()));
        }

        self.transport
            .get_json(&format!("/repos/{owner}/{repo}/commits"), &params)
            .await
    }

    /// Fetch the file list for a single commit.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request fails.
    pub async fn files(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<ApiResponse<CommitFiles>, FetchError> {
        self.transport
            .get_json(&format!("/repos/{owner}/{repo}/commits/{sha}"), &[])
            .await
    }
}
