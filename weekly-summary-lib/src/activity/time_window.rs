use crate::Result;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use ohno::bail;
use serde::{Deserialize, Serialize};

/// A closed interval of instants used to filter activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    since: DateTime<Utc>,
    until: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window from explicit bounds.
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Result<Self> {
        if since > until {
            bail!("time window starts after it ends ({since} > {until})");
        }

        Ok(Self { since, until })
    }

    /// The window covering the `days` days leading up to `now`.
    ///
    /// `now` should be read once per run and shared by every window derived from it,
    /// so that successive filters don't disagree about the current instant.
    pub fn trailing_days(now: DateTime<Utc>, days: u32) -> Result<Self> {
        if days == 0 {
            bail!("time window must span at least one day");
        }

        let Some(since) = TimeDelta::try_days(i64::from(days)).and_then(|span| now.checked_sub_signed(span)) else {
            bail!("time window of {days} days is out of range");
        };

        Ok(Self { since, until: now })
    }

    #[must_use]
    pub const fn since(&self) -> DateTime<Utc> {
        self.since
    }

    #[must_use]
    pub const fn until(&self) -> DateTime<Utc> {
        self.until
    }

    /// Whether `ts` lies within the window, both ends inclusive.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.since <= ts && ts <= self.until
    }

    /// `since` formatted for use as an API query parameter, e.g. `2024-01-01T00:00:00Z`.
    #[must_use]
    pub fn since_param(&self) -> String {
        self.since.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Parse an RFC 3339 timestamp as returned by the GitHub API.
///
/// Returns `None` for anything that doesn't parse; callers decide whether that keeps or drops a record.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim()).ok().map(|dt| dt.to_utc())
}
