//! Timezone offset resolution against the IANA database.

use chrono::{DateTime, Local, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::core::{Error, Result};

/// Parse an IANA timezone identifier.
pub fn validate_time_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| Error::InvalidTimeZone(format!("{name}: {e}")))
}

/// UTC offset in minutes (positive east of Greenwich) of `time_zone` at
/// `instant`, honoring whatever DST rule is in force at that instant.
///
/// An unknown identifier degrades to UTC and returns 0; callers that need to
/// surface the degraded state should check [`validate_time_zone`].
pub fn resolve_offset_minutes(time_zone: &str, instant: DateTime<Utc>) -> i32 {
    match validate_time_zone(time_zone) {
        Ok(tz) => offset_minutes_in(&tz, instant),
        Err(e) => {
            log::warn!("{e}; falling back to UTC");
            0
        }
    }
}

/// Offset of any chrono zone at a UTC instant, in minutes.
pub fn offset_minutes_in<Z: TimeZone>(zone: &Z, instant: DateTime<Utc>) -> i32 {
    zone.offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc()
        / 60
}

/// Map a wall-clock time in `zone` to an absolute instant.
///
/// Ambiguous wall times (clocks turned back) take the earlier instant.
/// Wall times inside a forward gap use the offset in force before the
/// transition, so 02:30 in a 02:00 -> 03:00 gap lands on 03:30.
pub fn wall_clock_to_utc<Z: TimeZone>(zone: &Z, wall: NaiveDateTime) -> DateTime<Utc> {
    match zone.from_local_datetime(&wall).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => {
            let before = wall - TimeDelta::hours(12);
            let offset = zone.offset_from_utc_datetime(&before).fix().local_minus_utc();
            Utc.from_utc_datetime(&(wall - TimeDelta::seconds(offset as i64)))
        }
    }
}

/// The timezone the evaluating host's own calendar functions follow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum HostClock {
    /// The operating system's local zone.
    #[default]
    Local,
    /// A fixed IANA zone, for hosts running in a container or for tests.
    Zone(Tz),
}

impl HostClock {
    /// Host zone from an optional IANA override; `None` means system local.
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        match name {
            Some(name) => Ok(Self::Zone(validate_time_zone(name)?)),
            None => Ok(Self::Local),
        }
    }

    /// Host UTC offset in minutes at `instant`.
    pub fn offset_minutes(&self, instant: DateTime<Utc>) -> i32 {
        match self {
            Self::Local => offset_minutes_in(&Local, instant),
            Self::Zone(tz) => offset_minutes_in(tz, instant),
        }
    }

    /// Interpret a host wall-clock time as an absolute instant.
    pub fn to_utc(&self, wall: NaiveDateTime) -> DateTime<Utc> {
        match self {
            Self::Local => wall_clock_to_utc(&Local, wall),
            Self::Zone(tz) => wall_clock_to_utc(tz, wall),
        }
    }

    /// Host wall-clock reading of an absolute instant.
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Zone(tz) => instant.with_timezone(tz).naive_local(),
        }
    }
}
