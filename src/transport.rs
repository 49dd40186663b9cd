//! HTTP transport for the hosting API.
//!
//! One GET-with-classification primitive: every response is either parsed
//! JSON plus rate-limit metadata, or a [`FetchError`] produced here and
//! nowhere else. Retry decisions belong to the orchestrator's backoff
//! layer, never to this transport.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, FetchError};
use crate::types::RateLimit;

/// Parsed response payload with its rate-limit metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// Deserialized body
    pub data: T,
    /// Rate-limit headers, when the API sent them
    pub rate_limit: Option<RateLimit>,
}

/// Thin HTTP layer over the hosting API.
pub struct HttpTransport {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpTransport {
    /// Create a transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            client,
        })
    }

    /// Issue a GET request and classify the outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] from the closed taxonomy; transport-level
    /// failures (DNS, connect, timeout, corrupt body) map to
    /// [`FetchError::Network`].
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse<T>, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| FetchError::Network {
            message: e.to_string(),
        })?;

        let rate_limit = RateLimit::from_headers(response.headers());
        let status = response.status();

        if status.is_success() {
            let data = response.json().await.map_err(|e| FetchError::Network {
                message: format!("failed to decode response body: {e}"),
            })?;
            return Ok(ApiResponse { data, rate_limit });
        }

        Err(classify_failure(status, rate_limit, response).await)
    }

    /// Base URL this transport talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Map a non-success response to the error taxonomy.
///
/// A 403 splits on the rate-limit headers: exhausted quota is
/// `RateLimited` (with the reset instant), anything else `Forbidden`.
async fn classify_failure(
    status: StatusCode,
    rate_limit: Option<RateLimit>,
    response: Response,
) -> FetchError {
    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("no message")
        .to_string();

    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound { message },
        StatusCode::FORBIDDEN => match rate_limit {
            Some(rl) if rl.remaining == 0 => FetchError::RateLimited {
                message,
                reset: rl.reset,
            },
            _ => FetchError::Forbidden { message },
        },
        StatusCode::UNPROCESSABLE_ENTITY => FetchError::Validation { message },
        s if s.is_server_error() => FetchError::ServiceUnavailable {
            status: s.as_u16(),
            message,
        },
        s => FetchError::Network {
            message: format!("unexpected status {s}: {message}"),
        },
    }
}
