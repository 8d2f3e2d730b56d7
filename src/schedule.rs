//! Market-hours gate and tick alignment

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Utc, Weekday};
use std::time::Duration;

/// IST offset from UTC in seconds (+05:30, no DST)
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is within a day")
}

/// Daily monitoring window, Monday to Friday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub offset: FixedOffset,
}

impl Default for ScheduleWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 55, 0).expect("valid time"),
            end: NaiveTime::from_hms_opt(15, 35, 0).expect("valid time"),
            offset: ist(),
        }
    }
}

impl ScheduleWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            offset: ist(),
        }
    }

    /// Whether `time` lies within [start, end], both ends inclusive
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }

    /// Monday through Friday; no holiday calendar
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Time-of-day gate only, in the window's timezone
    pub fn contains_instant(&self, now: DateTime<FixedOffset>) -> bool {
        self.contains(now.with_timezone(&self.offset).time())
    }

    /// Day gate only, in the window's timezone
    pub fn is_trading_instant(&self, now: DateTime<FixedOffset>) -> bool {
        self.is_trading_day(now.with_timezone(&self.offset).date_naive())
    }
}

/// Source of wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(ist())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Wait until the next multiple of `period` since the anchor, given the
/// time already `elapsed` since it. An exact multiple waits a full period.
pub fn until_next_tick(elapsed: Duration, period: Duration) -> Duration {
    if period.is_zero() {
        return Duration::ZERO;
    }
    let into_period = elapsed.as_nanos() % period.as_nanos();
    period - Duration::from_nanos(into_period as u64)
}
