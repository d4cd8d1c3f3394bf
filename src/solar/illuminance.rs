//! Hourly clear-sky illuminance for a day.
//!
//! This is a proxy, not an irradiance model: lux is `100000 * sin(altitude)`
//! while the sun is up and 0 otherwise. Weather scaling happens afterwards
//! through [`IlluminanceCurve::with_weather`].

use super::ephemeris::solar_position;
use super::weather::Weather;
use crate::core::Location;
use crate::time::{clamp_day_of_year, SimulatedInstantBuilder};

pub const HOURS: usize = 24;
/// Lux with the sun at the zenith.
pub const PEAK_LUX: f64 = 100_000.0;

/// Lux for one solar altitude in radians.
#[inline]
pub fn clear_sky_lux(altitude: f64) -> f64 {
    if altitude > 0.0 {
        (PEAK_LUX * altitude.sin()).round()
    } else {
        0.0
    }
}

/// 24 lux samples, one per wall-clock hour at the target location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IlluminanceCurve {
    pub hourly: [f64; HOURS],
}

impl IlluminanceCurve {
    /// Scale by the weather factor, rounding each sample.
    pub fn with_weather(&self, weather: Weather) -> Self {
        let factor = weather.illuminance_multiplier();
        Self {
            hourly: self.hourly.map(|lux| (lux * factor).round()),
        }
    }

    /// Brightest hour and its lux. Earliest hour wins ties.
    pub fn peak(&self) -> (usize, f64) {
        self.hourly
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::MIN), |best, (h, lux)| if lux > best.1 { (h, lux) } else { best })
    }

    /// Hours with any sunlight.
    pub fn lit_hours(&self) -> usize {
        self.hourly.iter().filter(|&&lux| lux > 0.0).count()
    }

    /// Chart series covering 0..=24 h; hour 24 repeats hour 0 so the line
    /// spans the whole day.
    pub fn chart_points(&self) -> Vec<(u8, f64)> {
        let mut points: Vec<(u8, f64)> = self
            .hourly
            .iter()
            .enumerate()
            .map(|(h, &lux)| (h as u8, lux))
            .collect();
        points.push((HOURS as u8, self.hourly[0]));
        points
    }
}

/// Clear-sky illuminance for each hour of `day_of_year` at `location`.
pub fn daily_illuminance(builder: &SimulatedInstantBuilder, day_of_year: u16, location: &Location) -> IlluminanceCurve {
    let day = clamp_day_of_year(day_of_year as i64);
    let difference = builder.offset_difference_minutes(day, &location.time_zone);
    daily_illuminance_with_offset(builder, day, difference, location)
}

/// [`daily_illuminance`] with a precomputed offset difference.
pub fn daily_illuminance_with_offset(
    builder: &SimulatedInstantBuilder,
    day_of_year: u16,
    offset_difference: i32,
    location: &Location,
) -> IlluminanceCurve {
    let mut hourly = [0.0; HOURS];
    for (hour, lux) in hourly.iter_mut().enumerate() {
        let instant = builder.build_with_offset(day_of_year, hour as i64 * 60, offset_difference);
        let position = solar_position(instant.utc, location.latitude, location.longitude);
        *lux = clear_sky_lux(position.altitude);
    }
    IlluminanceCurve { hourly }
}
