//! Sunrise, sunset and solar noon on the target location's wall clock.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use super::ephemeris::solar_events;
use crate::core::Location;
use crate::time::{validate_time_zone, SimulatedInstantBuilder};

/// Minutes of day (target wall clock) of the day's solar events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: Option<u16>,
    pub solar_noon: u16,
    pub sunset: Option<u16>,
    /// Minutes from sunrise to sunset, measured on absolute time so a sunset
    /// past local midnight still counts.
    pub daylight: Option<u16>,
}

impl SunTimes {
    /// Daylight duration in minutes; `None` during polar day or night.
    pub fn day_length(&self) -> Option<u16> {
        self.daylight
    }
}

fn minute_of_day(instant: DateTime<Utc>, zone: Tz) -> u16 {
    let local = instant.with_timezone(&zone);
    (local.hour() * 60 + local.minute()) as u16
}

/// Solar events for `day_of_year` at `location`. An unknown zone reports
/// times on the UTC clock.
pub fn sun_times(builder: &SimulatedInstantBuilder, day_of_year: u16, location: &Location) -> SunTimes {
    let zone = validate_time_zone(&location.time_zone).unwrap_or(Tz::UTC);
    let noon = builder.build(day_of_year, 12 * 60, location);
    let events = solar_events(noon.utc, location.latitude, location.longitude);

    SunTimes {
        sunrise: events.sunrise.map(|t| minute_of_day(t, zone)),
        solar_noon: minute_of_day(events.solar_noon, zone),
        sunset: events.sunset.map(|t| minute_of_day(t, zone)),
        daylight: events
            .sunrise
            .zip(events.sunset)
            .map(|(rise, set)| (set - rise).num_minutes().clamp(0, 24 * 60) as u16),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::HostClock;

    fn builder(host: &str) -> SimulatedInstantBuilder {
        SimulatedInstantBuilder::new(2025, HostClock::from_name(Some(host)).unwrap())
    }

    #[test]
    fn test_krakow_midsummer() {
        let t = sun_times(&builder("UTC"), 172, &Location::krakow());
        // Sunrise ~04:32, noon ~12:42, sunset ~21:00 CEST
        let rise = t.sunrise.unwrap();
        let set = t.sunset.unwrap();
        assert!((260..=285).contains(&rise), "sunrise {rise}");
        assert!((750..=775).contains(&t.solar_noon), "noon {}", t.solar_noon);
        assert!((1245..=1275).contains(&set), "sunset {set}");
        assert!(t.day_length().unwrap() > 15 * 60);
    }

    #[test]
    fn test_independent_of_host_zone() {
        let loc = Location::krakow();
        assert_eq!(sun_times(&builder("UTC"), 300, &loc), sun_times(&builder("Asia/Tokyo"), 300, &loc));
    }

    #[test]
    fn test_sunset_after_local_midnight() {
        let reykjavik = Location::new(64.15, -21.94, "Atlantic/Reykjavik");
        let t = sun_times(&builder("UTC"), 172, &reykjavik);
        let (rise, set) = (t.sunrise.unwrap(), t.sunset.unwrap());
        // Sunset lands just after 00:00 on the following calendar day.
        assert!(set < rise, "sunrise {rise} sunset {set}");
        let len = t.day_length().unwrap();
        assert!((20 * 60..22 * 60).contains(&len), "day length {len}");
        let wall_span = (24 * 60 - rise) + set;
        assert!(len.abs_diff(wall_span) <= 1, "{len} vs {wall_span}");
    }

    #[test]
    fn test_polar_night() {
        let svalbard = Location::new(78.22, 15.65, "Arctic/Longyearbyen");
        let t = sun_times(&builder("UTC"), 355, &svalbard);
        assert_eq!(t.sunrise, None);
        assert_eq!(t.sunset, None);
        assert_eq!(t.day_length(), None);
    }
}
