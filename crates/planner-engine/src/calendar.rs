//! Wall-clock calendar helpers shared by the parser and the slot finder.
//!
//! Both components reason in local calendar fields ("set the hour to 14",
//! "same time tomorrow"), not in elapsed durations. These helpers do that
//! arithmetic on naive local datetimes and only attach the time zone at the
//! end, so month/day rollover follows the calendar and DST transitions
//! never panic.
//!
//! Nothing here reads the system clock; the caller provides every anchor.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;

use crate::error::{PlannerError, Result};

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| PlannerError::InvalidTimezone(format!("'{}'", s)))
}

/// Parse an RFC 3339 datetime string into `DateTime<Utc>`.
pub fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PlannerError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// Attach a time zone to a local wall-clock datetime.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant.
/// Nonexistent times (DST spring-forward gap) are read with the offset in
/// effect before the gap, which lands them the gap's width later.
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = naive - Duration::hours(3);
            match tz.from_local_datetime(&before).earliest() {
                Some(dt) => {
                    let offset = dt.offset().fix().local_minus_utc() as i64;
                    tz.from_utc_datetime(&(naive - Duration::seconds(offset)))
                }
                None => tz.from_utc_datetime(&naive),
            }
        }
    }
}

/// Set hour and minute as calendar fields on `date`.
///
/// Out-of-range values roll over into neighbouring days: hour 25 is 01:00
/// on the following day, hour -1 is 23:00 on the previous day.
pub fn at_wall_clock(tz: &Tz, date: NaiveDate, hours: i64, minutes: i64) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    let naive = midnight
        .checked_add_signed(Duration::hours(hours) + Duration::minutes(minutes))
        .unwrap_or(midnight);
    localize(tz, naive)
}

/// Shift a date by whole days.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

/// Calendar month addition, clamped to the last day of a shorter month.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Days from `current` until the next `target`, always in `1..=7`.
///
/// "next Monday" said on a Monday means a week from today, never today.
pub fn days_until_next(current: Weekday, target: Weekday) -> i64 {
    let diff = target.num_days_from_sunday() as i64 - current.num_days_from_sunday() as i64;
    if diff <= 0 {
        diff + 7
    } else {
        diff
    }
}

/// Parse a weekday name (case-insensitive; full, abbreviated, or plural).
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    let lower = s.trim().to_lowercase();
    let name = lower
        .strip_suffix('s')
        .filter(|n| n.ends_with("day"))
        .unwrap_or(lower.as_str());
    match name {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// RFC 5545 two-letter weekday code.
pub fn byday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Inverse of [`byday_code`].
pub fn weekday_from_code(code: &str) -> Option<Weekday> {
    match code.trim().to_uppercase().as_str() {
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        "SU" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Short numeric date used in suggestion reasons, e.g. "10/20/2026".
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
