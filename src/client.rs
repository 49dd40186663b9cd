//! Aggregate client for the hosting API.
//!
//! Bundles the resource clients over one shared transport. Authentication
//! is limited to an optional bearer token; header construction beyond that
//! is the embedding application's concern.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::{
    BranchesClient, CommitsClient, ContributorsClient, PullsClient, ReposClient,
};
use crate::error::Error;
use crate::transport::HttpTransport;

/// Default base URL for the hosting API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main client for the hosting API.
///
/// # Example
///
/// ```rust,no_run
/// use repopulse::HostClient;
///
/// # fn main() -> Result<(), repopulse::Error> {
/// let client = HostClient::new(None, Some("token"), None)?;
/// # Ok(())
/// # }
/// ```
pub struct HostClient {
    transport: Arc<HttpTransport>,
    repos: ReposClient,
    commits: CommitsClient,
    pulls: PullsClient,
    branches: BranchesClient,
    contributors: ContributorsClient,
}

impl HostClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base URL (default: [`DEFAULT_BASE_URL`])
    /// * `token` - Optional bearer token
    /// * `timeout` - Request timeout (default: 30 seconds)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn new(
        base_url: Option<&str>,
        token: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let base_url = base_url.unwrap_or(DEFAULT_BASE_URL);
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let transport = Arc::new(HttpTransport::new(base_url, token, timeout)?);

        Ok(Self {
            repos: ReposClient::new(Arc::clone(&transport)),
            commits: CommitsClient::new(Arc::clone(&transport)),
            pulls: PullsClient::new(Arc::clone(&transport)),
            branches: BranchesClient::new(Arc::clone(&transport)),
            contributors: ContributorsClient::new(Arc::clone(&transport)),
            transport,
        })
    }

    /// Create a client from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `REPOPULSE_BASE_URL` - API base URL (optional)
    /// * `REPOPULSE_TOKEN` - Bearer token (optional)
    /// * `REPOPULSE_TIMEOUT_SECS` - Request timeout in seconds (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if `REPOPULSE_TIMEOUT_SECS` is set but not a
    /// number, or the transport cannot be created.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = env::var("REPOPULSE_BASE_URL").ok();
        let token = env::var("REPOPULSE_TOKEN").ok();

        let timeout = match env::var("REPOPULSE_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse().map_err(|_| {
                Error::Configuration("REPOPULSE_TIMEOUT_SECS must be an integer".to_string())
            })?)),
            Err(_) => None,
        };

        Self::new(base_url.as_deref(), token.as_deref(), timeout)
    }

    /// Get the underlying HTTP transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    /// Get the repos client.
    #[must_use]
    pub fn repos(&self) -> &ReposClient {
        &self.repos
    }

    /// Get the commits client.
    #[must_use]
    pub fn commits(&self) -> &CommitsClient {
        &self.commits
    }

    /// Get the pulls client.
    #[must_use]
    pub fn pulls(&self) -> &PullsClient {
        &self.pulls
    }

    /// Get the branches client.
    #[must_use]
    pub fn branches(&self) -> &BranchesClient {
        &self.branches
    }

    /// Get the contributors client.
    #[must_use]
    pub fn contributors(&self) -> &ContributorsClient {
        &self.contributors
    }
}
