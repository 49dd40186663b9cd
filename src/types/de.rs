//! Deserialization helpers shared by the wire models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an RFC 3339 timestamp, mapping anything malformed to `None`.
///
/// Upstream occasionally emits invalid date strings; a record with an
/// unparsable timestamp must be skipped by the aggregations, not fail the
/// whole page.
pub(crate) fn lenient_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}
