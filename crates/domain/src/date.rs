//! Calendar-day arithmetic shared by every storage backend.
//!
//! All instants are UTC and all windows are half-open `[start, end)`, so the
//! in-memory and Postgres backends slice time identically.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};

/// Drop the sub-second component of an instant.
///
/// Events are stored with whole-second precision to keep equality and
/// storage-key derivation stable across backends.
pub fn truncate_to_seconds(t: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(t.timestamp(), 0).unwrap_or(t)
}

/// True when both instants fall on the same calendar day.
pub fn fits_one_day(start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start.date_naive() == end.date_naive()
}

/// The calendar day an instant falls on, used as the secondary index key.
pub fn iso_date(t: DateTime<Utc>) -> NaiveDate {
    t.date_naive()
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// `[00:00:00 of d's day, 00:00:00 of the next day)`.
pub fn day_window(d: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let day = d.date_naive();
    (midnight(day), midnight(day + Days::new(1)))
}

/// The Sunday-to-Saturday week containing `d`.
///
/// Weeks deliberately start on Sunday, not the ISO Monday.
pub fn week_window(d: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let day = d.date_naive();
    let sunday = day - Days::new(day.weekday().num_days_from_sunday() as u64);
    (midnight(sunday), midnight(sunday + Days::new(7)))
}

/// The full calendar month containing `d`.
pub fn month_window(d: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let day = d.date_naive();
    let first = day.with_day(1).unwrap_or(day);
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .unwrap_or(first);
    (midnight(first), midnight(next_first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn truncates_sub_second_precision() {
        let t = at(2021, 1, 1, 10, 30, 15) + chrono::Duration::nanoseconds(987_654_321);
        assert_eq!(truncate_to_seconds(t), at(2021, 1, 1, 10, 30, 15));
    }

    #[test]
    fn same_day_check() {
        assert!(fits_one_day(at(2021, 1, 1, 0, 0, 0), at(2021, 1, 1, 23, 59, 59)));
        assert!(!fits_one_day(at(2021, 1, 1, 23, 0, 0), at(2021, 1, 2, 1, 0, 0)));
    }

    #[test]
    fn day_window_is_half_open() {
        let (lo, hi) = day_window(at(2021, 1, 1, 13, 45, 0));
        assert_eq!(lo, at(2021, 1, 1, 0, 0, 0));
        assert_eq!(hi, at(2021, 1, 2, 0, 0, 0));
    }

    #[test]
    fn week_window_starts_on_sunday() {
        // 2020-12-31 is a Thursday; its week starts on Sunday 2020-12-27.
        let (lo, hi) = week_window(at(2020, 12, 31, 12, 0, 0));
        assert_eq!(lo, at(2020, 12, 27, 0, 0, 0));
        assert_eq!(hi, at(2021, 1, 3, 0, 0, 0));

        // A Sunday is the start of its own week.
        let (lo, _) = week_window(at(2020, 12, 27, 5, 0, 0));
        assert_eq!(lo, at(2020, 12, 27, 0, 0, 0));
    }

    #[test]
    fn month_window_covers_the_calendar_month() {
        let (lo, hi) = month_window(at(2020, 12, 31, 23, 0, 0));
        assert_eq!(lo, at(2020, 12, 1, 0, 0, 0));
        assert_eq!(hi, at(2021, 1, 1, 0, 0, 0));

        let (lo, hi) = month_window(at(2021, 1, 3, 0, 0, 0));
        assert_eq!(lo, at(2021, 1, 1, 0, 0, 0));
        assert_eq!(hi, at(2021, 2, 1, 0, 0, 0));
    }
}
