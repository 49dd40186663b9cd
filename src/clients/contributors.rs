//! Contributors resource client.

use std::sync::Arc;

use crate::error::FetchError;
use crate::transport::{ApiResponse, HttpTransport};
use crate::types::Contributor;

/// Client for the contributors endpoint.
pub struct ContributorsClient {
    transport: Arc<HttpTransport>,
}

impl ContributorsClient {
    /// Create a new contributors client.
    #[must_use]
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List one page of contributors, ordered by contribution count.
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
    ) -> Result<ApiResponse<Vec<Contributor>>, FetchError> {
        let params = [
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];

        self.transport
            .get_json(&format!("/repos/{owner}/{repo}/contributors"), &params)
            .await
    }
}
