//! Rate-limit metadata parsed from response headers.

use chrono::{DateTime, Duration, Utc};
use reqwest::header::HeaderMap;
use serde::Serialize;

/// Rate-limit state reported alongside an API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    /// Total quota per window
    pub limit: u32,
    /// Requests remaining in the current window
    pub remaining: u32,
    /// When the window resets
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Parse the `x-ratelimit-*` headers, if present.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_u32(headers, "x-ratelimit-limit")?;
        let remaining = header_u32(headers, "x-ratelimit-remaining")?;
        let reset = header_u32(headers, "x-ratelimit-reset")
            .and_then(|epoch| DateTime::from_timestamp(i64::from(epoch), 0));

        Some(Self {
            limit,
            remaining,
            reset,
        })
    }

    /// Time until the quota resets, `None` when unknown or already past.
    #[must_use]
    pub fn resets_in(&self, now: DateTime<Utc>) -> Option<Duration> {
        let reset = self.reset?;
        let remaining = reset.signed_duration_since(now);
        (remaining > Duration::zero()).then_some(remaining)
    }
}

fn header_u32(headers: &HeaderMap, name: &str) -> Option<u32> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reqwest::header::HeaderValue;

    fn headers(limit: &str, remaining: &str, reset: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert("x-ratelimit-limit", HeaderValue::from_str(limit).unwrap());
        map.insert(
            "x-ratelimit-remaining",
            HeaderValue::from_str(remaining).unwrap(),
        );
        map.insert("x-ratelimit-reset", HeaderValue::from_str(reset).unwrap());
        map
    }

    #[test]
    fn test_parse_from_headers() {
        let rl = RateLimit::from_headers(&headers("5000", "4321", "1717243200")).unwrap();
        assert_eq!(rl.limit, 5000);
        assert_eq!(rl.remaining, 4321);
        assert!(rl.reset.is_some());
    }

    #[test]
    fn test_missing_headers_yield_none() {
        assert!(RateLimit::from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_resets_in() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let rl = RateLimit {
            limit: 5000,
            remaining: 0,
            reset: Some(now + Duration::minutes(10)),
        };

        assert_eq!(rl.resets_in(now), Some(Duration::minutes(10)));
        assert_eq!(rl.resets_in(now + Duration::hours(1)), None);
    }
}
