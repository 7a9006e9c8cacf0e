//! "Today" in a configured IANA time zone.
//!
//! The pipeline takes `today` as an argument; this is the one place that reads the
//! wall clock. US equities close at 16:00 America/New_York, so a service running in
//! UTC sees the next calendar day several hours before the US session ends. Configure
//! the zone whose calendar should decide what "today" means.
//!
//! Examples
//! - 2024-03-10T03:30:00Z in America/New_York -> 2024-03-09
//! - 2024-03-10T03:30:00Z in UTC -> 2024-03-10

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Calendar date of `now` in `tz`.
pub fn date_in(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Current calendar date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    date_in(Utc::now(), tz)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn evening_in_new_york_is_still_yesterday() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 3, 30, 0).unwrap();
        let ny: Tz = "America/New_York".parse().unwrap();
        assert_eq!(date_in(now, ny), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(
            date_in(now, Tz::UTC),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
    }

    #[test]
    fn east_of_utc_runs_ahead() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 20, 0, 0).unwrap();
        let tokyo: Tz = "Asia/Tokyo".parse().unwrap();
        assert_eq!(date_in(now, tokyo), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
