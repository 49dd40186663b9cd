//! Pull requests resource client.

use std::sync::Arc;

use crate::error::FetchError;
use crate::transport::{ApiResponse, HttpTransport};
use crate::types::{PullRequest, Review};

/// Client for pull request and review endpoints.
pub struct PullsClient {
    transport: Arc<HttpTransport>,
}

impl PullsClient {
    /// Create a new pulls client.
    #[must_use]
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List one page of pull requests.
    ///
    /// `state` filters by upstream state (`"open"`, `"closed"`, `"all"`);
    /// `None` lists every state.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request fails.
    pub async fn list(
        &self,
        owner: &str,
        repo: &str,
        state: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<ApiResponse<Vec<PullRequest>>, FetchError> {
        let mut params = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        params.push(("state", state.unwrap_or("all").to_string()));

        self.transport
            .get_json(&format!("/repos/{owner}/{repo}/pulls"), &params)
            .await
    }

    /// List the reviews submitted on one pull request.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request fails.
    pub async fn reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<ApiResponse<Vec<Review>>, FetchError> {
        self.transport
            .get_json(&format!("/repos/{owner}/{repo}/pulls/{number}/reviews"), &[])
            .await
    }
}
