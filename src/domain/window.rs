use chrono::{DateTime, TimeDelta, TimeZone, Timelike, Utc};

/// Source of "now" for window computation.
pub type Clock = fn() -> DateTime<Utc>;

/// Half-open `[start, end)` range of "recent" timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window covering the `lookback_hours` full hours before `now`.
    ///
    /// Both bounds are truncated to the hour in `now`'s own time zone, so the
    /// hour currently in progress is never part of the window. A look-back of
    /// zero or less produces an empty window.
    pub fn ending_at<Tz: TimeZone>(now: DateTime<Tz>, lookback_hours: i32) -> Self {
        let start = truncate_to_hour(now.clone() - TimeDelta::hours(i64::from(lookback_hours)));
        let end = truncate_to_hour(now);
        Self { start, end }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Drop minutes, seconds and sub-second parts of the local wall-clock time.
pub fn truncate_to_hour<Tz: TimeZone>(dt: DateTime<Tz>) -> DateTime<Utc> {
    let into_hour = TimeDelta::seconds(i64::from(dt.minute()) * 60 + i64::from(dt.second()))
        + TimeDelta::nanoseconds(i64::from(dt.nanosecond()));
    (dt - into_hour).with_timezone(&Utc)
}
