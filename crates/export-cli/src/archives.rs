//! Monthly archive buckets and interval overlap selection.

use chrono::{Local, TimeZone};

use crate::period::TimeInterval;

/// One monthly partition of a player's Chess.com game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArchiveBucket {
    pub year: i32,
    pub month: u32,
}

impl ArchiveBucket {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// First local instant of the month, epoch ms.
    fn start_ms(&self) -> Option<i64> {
        Local
            .with_ymd_and_hms(self.year, self.month, 1, 0, 0, 0)
            .earliest()
            .map(|dt| dt.timestamp_millis())
    }

    /// Last local instant of the month: the first instant of the next month
    /// minus one millisecond. December rolls into January of year+1.
    fn end_ms(&self) -> Option<i64> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        Local
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .earliest()
            .map(|dt| dt.timestamp_millis() - 1)
    }

    fn overlaps(&self, interval: &TimeInterval) -> bool {
        let (Some(start), Some(end)) = (self.start_ms(), self.end_ms()) else {
            // Malformed (year, month) pair; nothing to fetch there
            return false;
        };
        interval.since.map_or(true, |since| end >= since)
            && interval.until.map_or(true, |until| start <= until)
    }
}

/// Keep the buckets that overlap the interval, newest first. The fully
/// unbounded interval selects every bucket without any boundary math.
/// Newest-first ordering drives the fetch and progress-reporting order.
pub fn select_archives(mut buckets: Vec<ArchiveBucket>, interval: &TimeInterval) -> Vec<ArchiveBucket> {
    if !interval.is_unbounded() {
        buckets.retain(|bucket| bucket.overlaps(interval));
    }
    buckets.sort_by(|a, b| b.cmp(a));
    buckets
}
