//! Wall-clock timestamps for log lines
//!
//! A [`Timestamp`] is captured once per entry and rendered as the line
//! prefix `YYYY-M-D HH:MM:SS.mmm`. Year, month and day are not padded;
//! hour, minute and second are padded to two digits and the millisecond
//! to three.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which clock entries are stamped with
///
/// # Examples
///
/// ```
/// use rust_swap_logger::core::{ClockSource, Timestamp};
///
/// let ts = Timestamp::now(ClockSource::Utc);
/// assert!(ts.millisecond < 1000);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockSource {
    /// Local time of the host, the usual choice for a single-process log file
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Always in `0..=999`
    pub millisecond: u32,
}

impl Timestamp {
    #[must_use]
    pub fn now(clock: ClockSource) -> Self {
        match clock {
            ClockSource::Local => Self::from_datetime(&Local::now()),
            ClockSource::Utc => Self::from_datetime(&Utc::now()),
        }
    }

    /// Break a chrono datetime of any zone into its calendar fields
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        // chrono reports a leap second as nanosecond >= 1_000_000_000
        let millisecond = (datetime.nanosecond() / 1_000_000).min(999);
        Self {
            year: datetime.year(),
            month: datetime.month(),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
            second: datetime.second(),
            millisecond,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{} {:02}:{:02}:{:02}.{:03}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.millisecond
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 09:05:03.007 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 9, 5, 3)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(7)
    }

    #[test]
    fn test_fields_from_datetime() {
        let ts = Timestamp::from_datetime(&fixed_datetime());
        assert_eq!(
            ts,
            Timestamp {
                year: 2025,
                month: 1,
                day: 8,
                hour: 9,
                minute: 5,
                second: 3,
                millisecond: 7,
            }
        );
    }

    #[test]
    fn test_display_padding() {
        let ts = Timestamp::from_datetime(&fixed_datetime());
        assert_eq!(ts.to_string(), "2025-1-8 09:05:03.007");
    }

    #[test]
    fn test_display_wide_fields() {
        let ts = Timestamp {
            year: 2024,
            month: 12,
            day: 31,
            hour: 23,
            minute: 59,
            second: 58,
            millisecond: 999,
        };
        assert_eq!(ts.to_string(), "2024-12-31 23:59:58.999");
    }

    #[test]
    fn test_from_offset_datetime() {
        let offset = FixedOffset::east_opt(2 * 3600).expect("valid offset");
        let ts = Timestamp::from_datetime(&fixed_datetime().with_timezone(&offset));
        assert_eq!(ts.hour, 11);
        assert_eq!(ts.day, 8);
    }

    #[test]
    fn test_now_is_in_range() {
        for clock in [ClockSource::Local, ClockSource::Utc] {
            let ts = Timestamp::now(clock);
            assert!((1..=12).contains(&ts.month));
            assert!((1..=31).contains(&ts.day));
            assert!(ts.hour < 24);
            assert!(ts.millisecond < 1000);
        }
    }

    #[test]
    fn test_clock_source_serde() {
        let clock: ClockSource = serde_json::from_str("\"utc\"").unwrap();
        assert_eq!(clock, ClockSource::Utc);
        assert_eq!(ClockSource::default(), ClockSource::Local);
    }
}
