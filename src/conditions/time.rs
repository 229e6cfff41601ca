//! date and time utilities for conditions
//!
//! supports formats:
//! - dates: "2024-03-15", "2024-03-15T09:30" (time part ignored)
//! - times: "09:00", "9:00", "09:00:30", "9:00AM", "9AM", "5:00PM"
//!
//! delta checks compare against a [`Clock`] so callers and tests can pin "now"

use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

/// minutes in one day
const DAY_MINUTES: i64 = 24 * 60;

/// source of "today" and "now" for delta checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// local wall clock
    #[default]
    System,
    /// fixed instant
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(at) => *at,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// current time of day in minutes from midnight
    pub fn minutes(&self) -> i64 {
        let now = self.now();
        (now.hour() * 60 + now.minute()) as i64
    }
}

/// parse a time string into minutes from midnight
/// supports: "09:00", "9:00", "09:00:30", "9:00AM", "9AM", "17:00", "5:00PM", "5PM"
pub fn parse_time(s: &str) -> Option<u16> {
    let s = s.trim().to_uppercase();

    // check for a single AM/PM suffix
    let (time_part, is_pm, is_am) = if let Some(rest) = s.strip_suffix("AM") {
        (rest.trim(), false, true)
    } else if let Some(rest) = s.strip_suffix("PM") {
        (rest.trim(), true, false)
    } else {
        (s.as_str(), false, false)
    };

    // parse hour and optional minute; seconds are accepted and ignored
    let (hour, minute) = if time_part.contains(':') {
        let parts: Vec<&str> = time_part.split(':').collect();
        if parts.len() > 3 {
            return None;
        }
        let h: u16 = parts[0].parse().ok()?;
        let m: u16 = parts[1].parse().ok()?;
        if let Some(sec) = parts.get(2) {
            let sec: u16 = sec.parse().ok()?;
            if sec >= 60 {
                return None;
            }
        }
        (h, m)
    } else {
        // just hour: "9AM", "17"
        let h: u16 = time_part.parse().ok()?;
        (h, 0)
    };

    // validate; a 12-hour clock reading never exceeds 12
    if minute >= 60 || ((is_am || is_pm) && hour > 12) {
        return None;
    }

    // convert to 24h format
    let hour_24 = if is_pm {
        if hour == 12 {
            12
        } else {
            hour + 12
        }
    } else if is_am {
        if hour == 12 {
            0
        } else {
            hour
        }
    } else {
        hour
    };

    if hour_24 >= 24 {
        return None;
    }

    Some(hour_24 * 60 + minute)
}

/// format minutes from midnight as "HH:MM"
pub fn format_time(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// parse a calendar date, ignoring any time-of-day suffix
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// shift a date by whole months; the day clamps to the end of the target month
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::try_days(days)?)
}

// ============================================================================
// Date Deltas
// ============================================================================

/// value is on or before `reference`
pub fn is_date_on_or_before(value: &str, reference: NaiveDate) -> bool {
    parse_date(value).map(|d| d <= reference).unwrap_or(false)
}

/// value is on or after `reference`
pub fn is_date_on_or_after(value: &str, reference: NaiveDate) -> bool {
    parse_date(value).map(|d| d >= reference).unwrap_or(false)
}

/// value is `months` or more months before today
pub fn is_months_ago(value: &str, months: i32, clock: &Clock) -> bool {
    shift_months(clock.today(), months.saturating_neg())
        .map(|reference| is_date_on_or_before(value, reference))
        .unwrap_or(false)
}

/// value is `months` or more months after today
pub fn is_months_later(value: &str, months: i32, clock: &Clock) -> bool {
    shift_months(clock.today(), months)
        .map(|reference| is_date_on_or_after(value, reference))
        .unwrap_or(false)
}

/// value is `days` or more days before today
pub fn is_days_ago(value: &str, days: i64, clock: &Clock) -> bool {
    shift_days(clock.today(), days.saturating_neg())
        .map(|reference| is_date_on_or_before(value, reference))
        .unwrap_or(false)
}

/// value is `days` or more days after today
pub fn is_days_later(value: &str, days: i64, clock: &Clock) -> bool {
    shift_days(clock.today(), days)
        .map(|reference| is_date_on_or_after(value, reference))
        .unwrap_or(false)
}

/// value is on or before the caller's reference date
pub fn is_date_ago(value: &str, reference: &str) -> bool {
    parse_date(reference)
        .map(|r| is_date_on_or_before(value, r))
        .unwrap_or(false)
}

/// value is on or after the caller's reference date
pub fn is_date_later(value: &str, reference: &str) -> bool {
    parse_date(reference)
        .map(|r| is_date_on_or_after(value, r))
        .unwrap_or(false)
}

// ============================================================================
// Time Deltas
// ============================================================================
//
// both sides are placed on one fixed day; an offset reference is allowed to
// fall outside [0, 1440) rather than wrapping to a neighbouring day

fn value_minutes(value: &str) -> Option<i64> {
    parse_time(value).map(i64::from)
}

/// value is at or before now minus `minutes`
pub fn is_minutes_ago(value: &str, minutes: i64, clock: &Clock) -> bool {
    let reference = clock.minutes().saturating_sub(minutes);
    value_minutes(value).map(|v| v <= reference).unwrap_or(false)
}

/// value is at or after now plus `minutes`
pub fn is_minutes_later(value: &str, minutes: i64, clock: &Clock) -> bool {
    let reference = clock.minutes().saturating_add(minutes);
    value_minutes(value).map(|v| v >= reference).unwrap_or(false)
}

pub fn is_hours_ago(value: &str, hours: i64, clock: &Clock) -> bool {
    is_minutes_ago(value, hours.saturating_mul(60), clock)
}

pub fn is_hours_later(value: &str, hours: i64, clock: &Clock) -> bool {
    is_minutes_later(value, hours.saturating_mul(60), clock)
}

/// value is at or before the caller's reference time
pub fn is_time_ago(value: &str, reference: &str) -> bool {
    match (value_minutes(value), value_minutes(reference)) {
        (Some(v), Some(r)) => v <= r,
        _ => false,
    }
}

/// value is at or after the caller's reference time
pub fn is_time_later(value: &str, reference: &str) -> bool {
    match (value_minutes(value), value_minutes(reference)) {
        (Some(v), Some(r)) => v >= r,
        _ => false,
    }
}

// ============================================================================
// Value Transforms
// ============================================================================

/// add days to a date value, returning the new "YYYY-MM-DD" value
pub fn add_days(value: &str, days: i64) -> Option<String> {
    parse_date(value)
        .and_then(|d| shift_days(d, days))
        .map(format_date)
}

/// add months to a date value, returning the new "YYYY-MM-DD" value
pub fn add_months(value: &str, months: i32) -> Option<String> {
    parse_date(value)
        .and_then(|d| shift_months(d, months))
        .map(format_date)
}

/// add minutes to a time value; wraps around midnight
pub fn add_minutes(value: &str, minutes: i64) -> Option<String> {
    let current = value_minutes(value)?;
    let shifted = (current + minutes % DAY_MINUTES).rem_euclid(DAY_MINUTES);
    Some(format_time(shifted as u16))
}

pub fn add_hours(value: &str, hours: i64) -> Option<String> {
    add_minutes(value, (hours % 24) * 60)
}

/// weekday of a date value, 0 = Sunday
pub fn weekday_of(value: &str) -> Option<u32> {
    parse_date(value).map(|d| d.weekday().num_days_from_sunday())
}
