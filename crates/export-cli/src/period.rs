//! Period resolver: turns a human period expression into a timestamp interval.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

use crate::error::ExportError;

/// Half-open fetch window in epoch milliseconds. `None` on either bound
/// means unbounded in that direction. When both bounds are set,
/// `since <= until` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub since: Option<i64>,
    pub until: Option<i64>,
}

impl TimeInterval {
    pub fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }
}

/// Resolve a period expression against `now`.
///
/// Accepted forms: `"all"`, `"last_<N>"` (N days back from now), and
/// `"YYYY-MM-DD..YYYY-MM-DD"` (both dates at local midnight). Anything
/// else, including inverted date ranges, is rejected.
pub fn resolve_period(period: &str, now: DateTime<Local>) -> Result<TimeInterval, ExportError> {
    if period == "all" {
        return Ok(TimeInterval {
            since: None,
            until: None,
        });
    }

    if let Some(days_str) = period.strip_prefix("last_") {
        let days: i64 = days_str
            .parse()
            .map_err(|_| ExportError::InvalidPeriod(period.to_string()))?;
        if days <= 0 {
            return Err(ExportError::InvalidPeriod(period.to_string()));
        }
        let since = now - Duration::days(days);
        return Ok(TimeInterval {
            since: Some(since.timestamp_millis()),
            until: Some(now.timestamp_millis()),
        });
    }

    if let Some((start, end)) = period.split_once("..") {
        let since = local_midnight_ms(start)
            .ok_or_else(|| ExportError::InvalidPeriod(period.to_string()))?;
        let until = local_midnight_ms(end)
            .ok_or_else(|| ExportError::InvalidPeriod(period.to_string()))?;
        if since > until {
            return Err(ExportError::InvalidPeriod(period.to_string()));
        }
        return Ok(TimeInterval {
            since: Some(since),
            until: Some(until),
        });
    }

    Err(ExportError::InvalidPeriod(period.to_string()))
}

/// Parse `YYYY-MM-DD` as local midnight, in epoch milliseconds.
fn local_midnight_ms(date: &str) -> Option<i64> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}
