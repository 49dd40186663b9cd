//! Symbolic analysis periods and their concrete time bounds.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Symbolic analysis period selected by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Trailing 30 days
    #[serde(rename = "30d")]
    Days30,
    /// Trailing 90 days
    #[serde(rename = "90d")]
    Days90,
    /// Trailing ~6 months (182 days)
    #[serde(rename = "6m")]
    Months6,
    /// Trailing year (365 days)
    #[serde(rename = "1y")]
    Year1,
    /// Unbounded history
    #[serde(rename = "all")]
    All,
}

impl Period {
    /// Canonical token for this period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Days30 => "30d",
            Self::Days90 => "90d",
            Self::Months6 => "6m",
            Self::Year1 => "1y",
            Self::All => "all",
        }
    }

    /// Number of trailing days covered, `None` for unbounded.
    #[must_use]
    pub const fn days(self) -> Option<i64> {
        match self {
            Self::Days30 => Some(30),
            Self::Days90 => Some(90),
            Self::Months6 => Some(182),
            Self::Year1 => Some(365),
            Self::All => None,
        }
    }

    /// Resolve this period against the current instant.
    ///
    /// Must be called at query time; the result is never cached because
    /// "now" moves.
    #[must_use]
    pub fn window(self) -> TimeWindow {
        self.window_at(Utc::now())
    }

    /// Resolve this period against an explicit instant.
    #[must_use]
    pub fn window_at(self, now: DateTime<Utc>) -> TimeWindow {
        TimeWindow {
            since: self.days().map(|d| now - Duration::days(d)),
            until: None,
        }
    }

    /// Bucket granularity for trend series over this period.
    ///
    /// Longer ranges get coarser buckets so trend lines stay bounded in
    /// point count.
    #[must_use]
    pub const fn granularity(self) -> Granularity {
        match self {
            Self::Days30 => Granularity::Daily,
            Self::Days90 | Self::Months6 => Granularity::Weekly,
            Self::Year1 | Self::All => Granularity::Monthly,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "30d" => Ok(Self::Days30),
            "90d" | "3m" => Ok(Self::Days90),
            "6m" => Ok(Self::Months6),
            "1y" => Ok(Self::Year1),
            "all" => Ok(Self::All),
            other => Err(Error::InvalidPeriod(other.to_string())),
        }
    }
}

/// Concrete bounds resolved from a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    /// Inclusive lower bound, `None` for unbounded history
    pub since: Option<DateTime<Utc>>,
    /// Exclusive upper bound, unset for open-ended windows
    pub until: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Whether an instant falls inside the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if at < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if at >= until {
                return false;
            }
        }
        true
    }
}

/// Time-bucket granularity for trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Map a calendar date to the start date of its bucket.
    ///
    /// Weekly buckets start on Monday; monthly buckets on the first of the
    /// month.
    #[must_use]
    pub fn bucket(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Self::Monthly => date.with_day(1).unwrap_or(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_period_round_trips_through_tokens() {
        for period in [
            Period::Days30,
            Period::Days90,
            Period::Months6,
            Period::Year1,
            Period::All,
        ] {
            let parsed: Period = period.as_str().parse().unwrap();
            assert_eq!(parsed, period);
        }
    }

    #[test]
    fn test_quarter_alias() {
        let parsed: Period = "3m".parse().unwrap();
        assert_eq!(parsed, Period::Days90);
    }

    #[test]
    fn test_unknown_token_rejected() {
        assert!("fortnight".parse::<Period>().is_err());
    }

    #[test]
    fn test_window_bounds() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let window = Period::Days30.window_at(now);
        assert_eq!(window.since, Some(now - Duration::days(30)));
        assert_eq!(window.until, None);

        let window = Period::Months6.window_at(now);
        assert_eq!(window.since, Some(now - Duration::days(182)));

        let window = Period::All.window_at(now);
        assert_eq!(window.since, None);
        assert_eq!(window.until, None);
    }

    #[test]
    fn test_window_contains() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let window = Period::Days30.window_at(now);

        assert!(window.contains(now - Duration::days(10)));
        assert!(!window.contains(now - Duration::days(40)));

        let all = Period::All.window_at(now);
        assert!(all.contains(now - Duration::days(4000)));
    }

    #[test]
    fn test_granularity_mapping() {
        assert_eq!(Period::Days30.granularity(), Granularity::Daily);
        assert_eq!(Period::Days90.granularity(), Granularity::Weekly);
        assert_eq!(Period::Months6.granularity(), Granularity::Weekly);
        assert_eq!(Period::Year1.granularity(), Granularity::Monthly);
        assert_eq!(Period::All.granularity(), Granularity::Monthly);
    }

    #[test]
    fn test_bucket_starts() {
        // 2024-06-12 is a Wednesday
        let date = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();

        assert_eq!(Granularity::Daily.bucket(date), date);
        assert_eq!(
            Granularity::Weekly.bucket(date),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
        assert_eq!(
            Granularity::Monthly.bucket(date),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }
}
