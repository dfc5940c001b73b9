//! Date arithmetic shared by every component
//!
//! "Today" is always the caller's local calendar day: callers pass `now` as a
//! `DateTime<FixedOffset>` carrying their UTC offset. Stored timestamps are UTC.
//!
//! Windows are right-open and end at tomorrow's local midnight, so an entry
//! made at any time today is counted exactly once.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Weekday abbreviation used as the key of the environment map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeekdayKey {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl WeekdayKey {
    /// Calendar order, week starting Sunday
    pub const ALL: [WeekdayKey; 7] = [
        WeekdayKey::Sun,
        WeekdayKey::Mon,
        WeekdayKey::Tue,
        WeekdayKey::Wed,
        WeekdayKey::Thu,
        WeekdayKey::Fri,
        WeekdayKey::Sat,
    ];

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self::ALL[weekday.num_days_from_sunday() as usize]
    }

    /// Position in a Sunday-based week (Sun = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Sun => "Sunday",
            Self::Mon => "Monday",
            Self::Tue => "Tuesday",
            Self::Wed => "Wednesday",
            Self::Thu => "Thursday",
            Self::Fri => "Friday",
            Self::Sat => "Saturday",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
        }
    }
}

impl fmt::Display for WeekdayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekdayKey {
    type Err = String;

    /// Accepts the abbreviation or the full day name, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| s.eq_ignore_ascii_case(key.as_str()) || s.eq_ignore_ascii_case(key.full_name()))
            .ok_or_else(|| format!("Unknown weekday: {}", s))
    }
}

/// Truncate to local midnight
pub fn start_of_day(date: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let elapsed = Duration::seconds(i64::from(date.num_seconds_from_midnight()))
        + Duration::nanoseconds(i64::from(date.nanosecond()));
    date - elapsed
}

pub fn weekday_key(date: DateTime<FixedOffset>) -> WeekdayKey {
    WeekdayKey::from_weekday(date.weekday())
}

pub fn days_ago(date: DateTime<FixedOffset>, n: i64) -> DateTime<FixedOffset> {
    date - Duration::days(n)
}

/// Local midnight of the Sunday that starts `date`'s calendar week
pub fn week_start(date: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let offset = i64::from(date.weekday().num_days_from_sunday());
    days_ago(start_of_day(date), offset)
}

/// The last `n` local calendar dates, today first
pub fn local_dates_back(now: DateTime<FixedOffset>, n: usize) -> Vec<NaiveDate> {
    let today = now.date_naive();
    (0..n as i64).map(|i| today - Duration::days(i)).collect()
}

/// Document key for per-day collections (`YYYY-MM-DD`)
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Right-open time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// `[start_of_day(now) - n days, start_of_day(now) + 1 day)`
    pub fn trailing_days(now: DateTime<FixedOffset>, n: i64) -> Self {
        let today = start_of_day(now);
        Self {
            start: days_ago(today, n).with_timezone(&Utc),
            end: (today + Duration::days(1)).with_timezone(&Utc),
        }
    }

    /// The last `n` local calendar days, today included:
    /// `[start_of_day(now) - (n - 1) days, start_of_day(now) + 1 day)`
    pub fn local_days(now: DateTime<FixedOffset>, n: i64) -> Self {
        let end = start_of_day(now) + Duration::days(1);
        Self {
            start: days_ago(end, n.max(0)).with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_start_of_day_keeps_local_date() {
        let now = local(2024, 1, 16, 23, 45);
        let midnight = start_of_day(now);
        assert_eq!(midnight, local(2024, 1, 16, 0, 0));
        assert_eq!(midnight.offset(), now.offset());
    }

    #[test]
    fn test_weekday_key() {
        // 2024-01-16 is a Tuesday
        assert_eq!(weekday_key(local(2024, 1, 16, 8, 0)), WeekdayKey::Tue);
        assert_eq!(weekday_key(local(2024, 1, 14, 8, 0)), WeekdayKey::Sun);
        assert_eq!(weekday_key(local(2024, 1, 20, 8, 0)), WeekdayKey::Sat);
    }

    #[test]
    fn test_week_start_is_sunday_midnight() {
        assert_eq!(week_start(local(2024, 1, 16, 8, 0)), local(2024, 1, 14, 0, 0));
        assert_eq!(week_start(local(2024, 1, 14, 8, 0)), local(2024, 1, 14, 0, 0));
        assert_eq!(week_start(local(2024, 1, 20, 22, 0)), local(2024, 1, 14, 0, 0));
    }

    #[test]
    fn test_trailing_window_is_right_open() {
        let now = local(2024, 1, 16, 12, 0);
        let window = DateWindow::trailing_days(now, 7);

        let start = local(2024, 1, 9, 0, 0).with_timezone(&Utc);
        let end = local(2024, 1, 17, 0, 0).with_timezone(&Utc);
        assert_eq!(window.start, start);
        assert_eq!(window.end, end);

        assert!(window.contains(start));
        assert!(!window.contains(end));
        assert!(window.contains(local(2024, 1, 16, 23, 59).with_timezone(&Utc)));
        assert!(!window.contains(local(2024, 1, 8, 23, 59).with_timezone(&Utc)));
    }

    #[test]
    fn test_local_days_spans_n_calendar_days() {
        let now = local(2024, 1, 16, 12, 0);
        let window = DateWindow::local_days(now, 7);
        assert_eq!(window.start, local(2024, 1, 10, 0, 0).with_timezone(&Utc));
        assert_eq!(window.end, local(2024, 1, 17, 0, 0).with_timezone(&Utc));
        assert!(!window.contains(local(2024, 1, 9, 23, 59).with_timezone(&Utc)));

        let empty = DateWindow::local_days(now, 0);
        assert_eq!(empty.start, empty.end);
    }

    #[test]
    fn test_local_dates_back() {
        let dates = local_dates_back(local(2024, 3, 2, 7, 0), 3);
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            ]
        );
        assert_eq!(date_key(dates[2]), "2024-02-29");
    }

    #[test]
    fn test_weekday_key_parsing() {
        assert_eq!("Mon".parse::<WeekdayKey>(), Ok(WeekdayKey::Mon));
        assert_eq!("thursday".parse::<WeekdayKey>(), Ok(WeekdayKey::Thu));
        assert_eq!("SUN".parse::<WeekdayKey>(), Ok(WeekdayKey::Sun));
        assert!("funday".parse::<WeekdayKey>().is_err());
        assert!("Monkey".parse::<WeekdayKey>().is_err());
        assert!("Sunburn".parse::<WeekdayKey>().is_err());
        assert!("Thurs".parse::<WeekdayKey>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_start_of_day_is_midnight_same_date(secs in 0i64..4_000_000_000, offset_hours in -12i32..=14) {
            let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
            let now = Utc.timestamp_opt(secs, 0).unwrap().with_timezone(&offset);
            let midnight = start_of_day(now);
            prop_assert_eq!(midnight.num_seconds_from_midnight(), 0);
            prop_assert_eq!(midnight.date_naive(), now.date_naive());
            prop_assert!(midnight <= now);
        }

        #[test]
        fn prop_local_days_match_local_dates(secs in 0i64..4_000_000_000, n in 1i64..60) {
            let now = Utc.timestamp_opt(secs, 0).unwrap().fixed_offset();
            let window = DateWindow::local_days(now, n);
            let dates = local_dates_back(now, n as usize);
            prop_assert!(window.contains(start_of_day(now).with_timezone(&Utc)));
            prop_assert_eq!(window.start.date_naive(), *dates.last().unwrap());
            prop_assert_eq!(window.end - window.start, Duration::days(n));
        }

        #[test]
        fn prop_week_start_is_sunday(secs in 0i64..4_000_000_000) {
            let now = Utc.timestamp_opt(secs, 0).unwrap().fixed_offset();
            let start = week_start(now);
            prop_assert_eq!(weekday_key(start), WeekdayKey::Sun);
            prop_assert!(now - start < Duration::days(7));
        }
    }
}
