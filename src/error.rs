//! Error types for the repopulse core.
//!
//! Failures split into two layers: `Error` covers construction and
//! configuration problems, while `FetchError` is the closed taxonomy every
//! transport or orchestration failure is classified into exactly once, at
//! the transport boundary. Downstream code matches on `FetchError` variants,
//! never on message text.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Crate-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP client could not be constructed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration error (missing or invalid settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unrecognized period token
    #[error("Invalid period token: {0}")]
    InvalidPeriod(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Classified fetch-pipeline error
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Closed taxonomy for fetch-pipeline failures.
///
/// Produced once by the transport (or the cancellation token) and carried
/// as a typed value through the orchestrator to the caller.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    /// The remote resource does not exist (404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Remaining API quota is exhausted (403 with rate-limit headers).
    ///
    /// Terminal for the current call; `reset` tells the caller when the
    /// quota refills.
    #[error("rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        reset: Option<DateTime<Utc>>,
    },

    /// Access denied without rate-limit indication (403).
    #[error("access forbidden: {message}")]
    Forbidden { message: String },

    /// The remote service failed transiently (5xx).
    #[error("service unavailable (status {status}): {message}")]
    ServiceUnavailable { status: u16, message: String },

    /// The remote rejected the request parameters (422).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Transport-level failure (DNS, connect, timeout, corrupt body).
    #[error("network error: {message}")]
    Network { message: String },

    /// The caller's cancellation token fired.
    ///
    /// Wins any race against an in-flight success or failure.
    #[error("operation cancelled")]
    Cancelled,
}

impl FetchError {
    /// Whether the retry wrapper may re-attempt the failed operation.
    ///
    /// Only transient kinds qualify; everything else is terminal on first
    /// occurrence.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable { .. } | Self::Network { .. }
        )
    }

    /// Render the fixed user-facing message for this error kind.
    ///
    /// `context` is a caller-supplied fragment such as
    /// `"while fetching branches"`; pass an empty string for none.
    #[must_use]
    pub fn user_message(&self, context: &str) -> String {
        let base = match self {
            Self::NotFound { .. } => {
                "The repository or resource could not be found.".to_string()
            }
            Self::RateLimited { reset, .. } => match reset {
                Some(at) => format!(
                    "API rate limit exceeded. Quota resets {}.",
                    format_reset(*at, Utc::now())
                ),
                None => "API rate limit exceeded. Please try again later.".to_string(),
            },
            Self::Forbidden { .. } => {
                "Access to this repository is forbidden.".to_string()
            }
            Self::ServiceUnavailable { .. } => {
                "The hosting service is temporarily unavailable.".to_string()
            }
            Self::Validation { .. } => {
                "The request was rejected as invalid.".to_string()
            }
            Self::Network { .. } => {
                "A network error occurred. Check your connection.".to_string()
            }
            Self::Cancelled => "The operation was cancelled.".to_string(),
        };

        if context.is_empty() {
            base
        } else {
            format!("{base} ({context})")
        }
    }

    /// Reset instant for rate-limited errors.
    #[must_use]
    pub fn rate_limit_reset(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::RateLimited { reset, .. } => *reset,
            _ => None,
        }
    }
}

/// Human-readable countdown to a reset instant, e.g. `"in 3m 20s"`.
#[must_use]
pub fn format_reset(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = at.signed_duration_since(now);
    let secs = remaining.num_seconds();
    if secs <= 0 {
        return "momentarily".to_string();
    }
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("in {h}h {m}m")
    } else if m > 0 {
        format!("in {m}m {s}s")
    } else {
        format!("in {s}s")
    }
}
