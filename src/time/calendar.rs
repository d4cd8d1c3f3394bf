//! Fixed non-leap calendar used by the date controls.
//!
//! Day 1 is January 1 and day 365 is December 31 in every year; leap days
//! are never addressable.

use chrono::{Datelike, Local, NaiveDate};

pub const DAYS_PER_YEAR: u16 = 365;
pub const MINUTES_PER_DAY: u16 = 24 * 60;

pub const DAYS_IN_MONTH: [u16; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Clamp a day of year into `[1, 365]`.
#[inline]
pub fn clamp_day_of_year(day: i64) -> u16 {
    day.clamp(1, DAYS_PER_YEAR as i64) as u16
}

/// Clamp a minute of day into `[0, 1439]`.
#[inline]
pub fn clamp_minute_of_day(minute: i64) -> u16 {
    minute.clamp(0, MINUTES_PER_DAY as i64 - 1) as u16
}

/// Month (1-12) and day of month for a day of year. Out-of-range input is
/// clamped first.
pub fn month_and_day(day_of_year: u16) -> (u32, u32) {
    let mut remaining = clamp_day_of_year(day_of_year as i64);
    let mut month = 0;
    while remaining > DAYS_IN_MONTH[month] && month < 11 {
        remaining -= DAYS_IN_MONTH[month];
        month += 1;
    }
    (month as u32 + 1, remaining as u32)
}

/// Inverse of [`month_and_day`]. Days past the end of the month clamp to
/// its last day.
pub fn day_of_year(month: u32, day: u32) -> u16 {
    let month_idx = (month.clamp(1, 12) - 1) as usize;
    let preceding: u16 = DAYS_IN_MONTH[..month_idx].iter().sum();
    let day = day.clamp(1, u32::from(DAYS_IN_MONTH[month_idx])) as u16;
    preceding + day
}

/// Calendar date for a day of year in the given year.
pub fn calendar_date(year: i32, day_of_year: u16) -> NaiveDate {
    let (month, day) = month_and_day(day_of_year);
    // Month table never exceeds Feb 28, so every (year, month, day) exists.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Today's day of year from the host clock. February 29 maps to day 59.
pub fn today_day_of_year() -> u16 {
    let now = Local::now();
    day_of_year(now.month(), now.day())
}

/// Current calendar year on the host clock.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Short date label, e.g. `"Jun 21"`.
pub fn format_date(day_of_year: u16) -> String {
    let (month, day) = month_and_day(day_of_year);
    format!("{} {}", MONTH_NAMES[month as usize - 1], day)
}

/// Zero-padded 24h clock label, e.g. `"07:05"`.
pub fn format_time(minute_of_day: u16) -> String {
    let minute = clamp_minute_of_day(minute_of_day as i64);
    format!("{:02}:{:02}", minute / 60, minute % 60)
}
