//! Repository metadata resource client.

use std::sync::Arc;

use crate::error::FetchError;
use crate::transport::{ApiResponse, HttpTransport};
use crate::types::Repository;

/// Client for the repository metadata endpoint.
pub struct ReposClient {
    transport: Arc<HttpTransport>,
}

impl ReposClient {
    /// Create a new repos client.
    #[must_use]
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetch repository metadata.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request fails.
    pub async fn get(&self, owner: &str, repo: &str) -> Result<ApiResponse<Repository>, FetchError> {
        self.transport
            .get_json(&format!("/repos/{owner}/{repo}"), &[])
            .await
    }
}
