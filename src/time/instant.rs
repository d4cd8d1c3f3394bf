//! Building absolute instants from target-location wall-clock inputs.

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use super::calendar::{calendar_date, clamp_day_of_year, clamp_minute_of_day, current_year};
use super::zone::{resolve_offset_minutes, HostClock};
use crate::core::Location;

/// A concrete point in time for the simulation.
///
/// Carries both the host-clock reading the builder produced and the
/// absolute instant it denotes. Always derived, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedInstant {
    /// Host wall-clock time after the offset correction.
    pub host_wall_clock: NaiveDateTime,
    /// Absolute instant.
    pub utc: DateTime<Utc>,
}

/// Converts `(day_of_year, minute_of_day, location)` into a [`SimulatedInstant`].
#[derive(Clone, Copy, Debug)]
pub struct SimulatedInstantBuilder {
    year: i32,
    host: HostClock,
}

impl SimulatedInstantBuilder {
    pub fn new(year: i32, host: HostClock) -> Self {
        Self { year, host }
    }

    /// Builder for the host's current calendar year and local zone.
    pub fn current() -> Self {
        Self::new(current_year(), HostClock::Local)
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub fn host(&self) -> HostClock {
        self.host
    }

    /// Host-local midnight starting the given day.
    fn midnight(&self, day_of_year: u16) -> NaiveDateTime {
        calendar_date(self.year, clamp_day_of_year(day_of_year as i64)).and_time(NaiveTime::MIN)
    }

    /// Target offset minus host offset, both evaluated at host-local
    /// midnight of the day. Independent of minute of day and coordinates.
    pub fn offset_difference_minutes(&self, day_of_year: u16, time_zone: &str) -> i32 {
        let reference = self.host.to_utc(self.midnight(day_of_year));
        let target = resolve_offset_minutes(time_zone, reference);
        let host = self.host.offset_minutes(reference);
        target - host
    }

    /// Instant at which the target location's wall clock reads
    /// `minute_of_day` on `day_of_year`. Inputs are clamped to their valid
    /// ranges.
    pub fn build(&self, day_of_year: u16, minute_of_day: u16, location: &Location) -> SimulatedInstant {
        let day = clamp_day_of_year(day_of_year as i64);
        let minute = clamp_minute_of_day(minute_of_day as i64);
        let difference = self.offset_difference_minutes(day, &location.time_zone);
        self.build_with_offset(day, minute as i64, difference)
    }

    /// Like [`build`](Self::build) with a precomputed offset difference.
    ///
    /// `minute` is not clamped: samplers pass 1440 to reach the following
    /// midnight. Calendar rollover in either direction is handled by the
    /// date arithmetic, so minute 0 with a +10 difference becomes 23:50 of
    /// the previous day.
    pub fn build_with_offset(&self, day_of_year: u16, minute: i64, offset_difference: i32) -> SimulatedInstant {
        let wall = self.midnight(day_of_year)
            + TimeDelta::minutes(minute - offset_difference as i64);
        SimulatedInstant {
            host_wall_clock: wall,
            utc: self.host.to_utc(wall),
        }
    }
}

impl Default for SimulatedInstantBuilder {
    fn default() -> Self {
        Self::current()
    }
}

/// Memo of the offset difference keyed on `(day_of_year, time_zone)`.
///
/// Both key parts invalidate it: the difference depends on the date
/// through DST.
#[derive(Clone, Debug, Default)]
pub struct OffsetMemo {
    entry: Option<(u16, String, i32)>,
}

impl OffsetMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, builder: &SimulatedInstantBuilder, day_of_year: u16, time_zone: &str) -> i32 {
        if let Some((day, tz, diff)) = &self.entry {
            if *day == day_of_year && tz == time_zone {
                return *diff;
            }
        }
        let diff = builder.offset_difference_minutes(day_of_year, time_zone);
        self.entry = Some((day_of_year, time_zone.to_string(), diff));
        diff
    }

    /// Cached difference for the key, without computing on a miss.
    pub fn peek(&self, day_of_year: u16, time_zone: &str) -> Option<i32> {
        match &self.entry {
            Some((day, tz, diff)) if *day == day_of_year && tz == time_zone => Some(*diff),
            _ => None,
        }
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_cached(&self, day_of_year: u16, time_zone: &str) -> bool {
        matches!(&self.entry, Some((day, tz, _)) if *day == day_of_year && tz == time_zone)
    }
}
