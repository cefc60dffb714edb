//! Invocation timestamps.
//!
//! A [`Stamp`] is captured once at the start of an invocation and threaded
//! through every step, so the archive name and commit message agree with each
//! other and tests can pin time through the `_at` entry points.

use std::fmt;

use chrono::{Local, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stamp(NaiveDateTime);

impl Stamp {
    /// Local wall-clock time, truncated to whole seconds.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        use chrono::Timelike;
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// `YYYYMMDD-HHMM`, used in archive file names.
    pub fn archive_suffix(&self) -> String {
        self.0.format("%Y%m%d-%H%M").to_string()
    }

    pub fn commit_message(&self) -> String {
        format!("Auto-backup: {}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.format("%Y-%m-%d %H:%M:%S").fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Stamp {
        Stamp::from_datetime(
            NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap(),
        )
    }

    #[test]
    fn archive_suffix_is_minute_granular() {
        assert_eq!(at(2024, 1, 1, 0, 0, 59).archive_suffix(), "20240101-0000");
        assert_eq!(at(2025, 12, 31, 23, 7, 0).archive_suffix(), "20251231-2307");
    }

    #[test]
    fn commit_message_carries_seconds() {
        assert_eq!(
            at(2024, 3, 9, 14, 5, 7).commit_message(),
            "Auto-backup: 2024-03-09 14:05:07"
        );
    }

    #[test]
    fn now_has_no_subsecond_part() {
        use chrono::Timelike;
        assert_eq!(Stamp::now().datetime().nanosecond(), 0);
    }
}
