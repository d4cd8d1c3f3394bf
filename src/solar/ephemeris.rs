//! Low-precision solar ephemeris.
//!
//! Mean-anomaly / equation-of-center model referenced to J2000, good to a
//! fraction of a degree for dates within a few centuries of 2000. Azimuth
//! is measured from south, clockwise (S = 0, W = PI/2, N = PI, E = 3PI/2).

use std::f64::consts::{PI, TAU};

use chrono::{DateTime, TimeZone, Utc};

const MS_PER_DAY: f64 = 86_400_000.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;
/// Obliquity of the ecliptic at J2000.
const OBLIQUITY: f64 = 23.4397 * PI / 180.0;
/// Mean solar transit correction in days.
const J0: f64 = 0.0009;
/// Sun's apparent upper limb on the horizon, refraction included.
pub const SUNRISE_ALTITUDE_DEG: f64 = -0.833;

/// Sun position in horizontal coordinates, radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolarPosition {
    /// From south, clockwise.
    pub azimuth: f64,
    /// Above the horizon; negative below.
    pub altitude: f64,
}

/// Key solar events for one day. Rise and set are `None` during polar day
/// or polar night.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolarEvents {
    pub solar_noon: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

fn to_julian(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / MS_PER_DAY - 0.5 + J1970
}

fn from_julian(julian: f64) -> DateTime<Utc> {
    let millis = ((julian + 0.5 - J1970) * MS_PER_DAY).round() as i64;
    Utc.timestamp_millis_opt(millis).single().unwrap_or_default()
}

fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    to_julian(instant) - J2000
}

fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

fn sidereal_time(d: f64, lw: f64) -> f64 {
    (280.16 + 360.985_623_5 * d).to_radians() - lw
}

fn solar_mean_anomaly(d: f64) -> f64 {
    (357.5291 + 0.985_600_28 * d).to_radians()
}

fn ecliptic_longitude(m: f64) -> f64 {
    let center = (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin()).to_radians();
    let perihelion = 102.9372_f64.to_radians();
    m + center + perihelion + PI
}

/// Returns (declination, right ascension) for `d` days after J2000.
fn sun_coords(d: f64) -> (f64, f64) {
    let l = ecliptic_longitude(solar_mean_anomaly(d));
    (declination(l, 0.0), right_ascension(l, 0.0))
}

/// Horizontal position of the sun seen from `(latitude, longitude)` degrees.
pub fn solar_position(instant: DateTime<Utc>, latitude: f64, longitude: f64) -> SolarPosition {
    let lw = (-longitude).to_radians();
    let phi = latitude.to_radians();
    let d = days_since_j2000(instant);

    let (dec, ra) = sun_coords(d);
    let h = sidereal_time(d, lw) - ra;

    SolarPosition {
        azimuth: azimuth(h, phi, dec),
        altitude: altitude(h, phi, dec),
    }
}

fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - J0 - lw / TAU).round()
}

fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / TAU + n
}

fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

/// Hour angle at which the sun reaches altitude `h`; `None` when it never does.
fn hour_angle(h: f64, phi: f64, dec: f64) -> Option<f64> {
    let cos_w = (h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    (-1.0..=1.0).contains(&cos_w).then(|| cos_w.acos())
}

/// Solar noon, sunrise and sunset for the solar day nearest `instant`.
pub fn solar_events(instant: DateTime<Utc>, latitude: f64, longitude: f64) -> SolarEvents {
    let lw = (-longitude).to_radians();
    let phi = latitude.to_radians();
    let d = days_since_j2000(instant);

    let n = julian_cycle(d, lw);
    let ds = approx_transit(0.0, lw, n);
    let m = solar_mean_anomaly(ds);
    let l = ecliptic_longitude(m);
    let dec = declination(l, 0.0);
    let j_noon = solar_transit_j(ds, m, l);

    let j_set = hour_angle(SUNRISE_ALTITUDE_DEG.to_radians(), phi, dec)
        .map(|w| solar_transit_j(approx_transit(w, lw, n), m, l));

    SolarEvents {
        solar_noon: from_julian(j_noon),
        sunrise: j_set.map(|set| from_julian(j_noon - (set - j_noon))),
        sunset: j_set.map(from_julian),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap(),
        )
    }

    #[test]
    fn test_julian_epoch() {
        let j2000 = utc(2000, 1, 1, 12, 0);
        assert!((to_julian(j2000) - J2000).abs() < 1e-9);
        assert_eq!(from_julian(J2000), j2000);
    }

    #[test]
    fn test_equinox_noon_at_equator_is_overhead() {
        let pos = solar_position(utc(2025, 3, 20, 12, 7), 0.0, 0.0);
        let alt = pos.altitude.to_degrees();
        assert!(alt > 87.0, "equinox noon altitude {alt} should be near 90");
    }

    #[test]
    fn test_midnight_is_below_horizon() {
        let pos = solar_position(utc(2025, 6, 21, 0, 0), 0.0, 0.0);
        assert!(pos.altitude < -1.0);
    }

    #[test]
    fn test_morning_sun_in_east() {
        // Kraków, June morning: azimuth measured from south, east is negative
        let pos = solar_position(utc(2025, 6, 21, 5, 0), 50.06, 19.94);
        assert!(pos.altitude > 0.0);
        assert!(pos.azimuth < -PI / 4.0, "azimuth {} should point east", pos.azimuth);
    }

    #[test]
    fn test_summer_noon_altitude_krakow() {
        // Noon altitude ~ 90 - 50.06 + 23.44 = 63.4 degrees
        let events = solar_events(utc(2025, 6, 21, 12, 0), 50.06, 19.94);
        let pos = solar_position(events.solar_noon, 50.06, 19.94);
        assert!((pos.altitude.to_degrees() - 63.4).abs() < 0.5);
    }

    #[test]
    fn test_solar_noon_tracks_longitude() {
        // Greenwich solar noon near 12:00 UTC, Kraków about 80 minutes earlier
        let green = solar_events(utc(2025, 4, 15, 12, 0), 51.48, 0.0).solar_noon;
        let krk = solar_events(utc(2025, 4, 15, 12, 0), 50.06, 19.94).solar_noon;
        let from_noon = (green - utc(2025, 4, 15, 12, 0)).num_minutes().abs();
        assert!(from_noon <= 3, "greenwich solar noon {green}");
        assert!(krk < green);
        let diff = (green - krk).num_minutes();
        assert!((75..=85).contains(&diff), "diff {diff}");
    }

    #[test]
    fn test_sunrise_before_sunset() {
        let events = solar_events(utc(2025, 9, 1, 12, 0), 50.06, 19.94);
        let rise = events.sunrise.unwrap();
        let set = events.sunset.unwrap();
        assert!(rise < events.solar_noon && events.solar_noon < set);
        let pos = solar_position(rise, 50.06, 19.94);
        assert!((pos.altitude.to_degrees() - SUNRISE_ALTITUDE_DEG).abs() < 0.5);
    }

    #[test]
    fn test_polar_night_has_no_sunrise() {
        let events = solar_events(utc(2025, 12, 21, 12, 0), 78.22, 15.65);
        assert!(events.sunrise.is_none());
        assert!(events.sunset.is_none());
    }
}
