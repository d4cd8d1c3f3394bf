//! Calendar, timezone, and simulated-instant handling.
//!
//! The UI speaks in the target location's wall clock (day of year plus
//! minute of day) while solar math needs an absolute instant. This module
//! bridges the two without the host changing its own timezone context.

pub mod calendar;
pub mod instant;
pub mod zone;

pub use calendar::{
    clamp_day_of_year, clamp_minute_of_day, current_year, day_of_year, format_date, format_time,
    month_and_day, today_day_of_year, DAYS_PER_YEAR, MINUTES_PER_DAY,
};
pub use instant::{OffsetMemo, SimulatedInstant, SimulatedInstantBuilder};
pub use zone::{resolve_offset_minutes, validate_time_zone, HostClock};
