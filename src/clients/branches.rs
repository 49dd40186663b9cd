//! Branches resource client.

use std::sync::Arc;

use crate::error::FetchError;
use crate::transport::{ApiResponse, HttpTransport};
use crate::types::Branch;

/// Client for the branch-list endpoint.
pub struct BranchesClient {
    transport: Arc<HttpTransport>,
}

impl BranchesClient {
    /// Create a new branches client.
    #[must_use]
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List one page of branches.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request fails.
    pub async fn list(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<ApiResponse<Vec<Branch>>, FetchError> {
        let params = [
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];

        self.transport
            .get_json(&format!("/repos/{owner}/{repo}/branches"), &params)
            .await
    }
}
