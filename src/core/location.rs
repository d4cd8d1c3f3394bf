//! Geographic observer location.

use serde::{Deserialize, Serialize};

/// Observer position plus the IANA zone its wall clock follows.
///
/// Treated as an immutable value: a new location replaces the old one
/// wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Degrees north, `[-90, 90]`.
    pub latitude: f64,
    /// Degrees east, `[-180, 180]`.
    pub longitude: f64,
    /// IANA identifier such as `"Europe/Warsaw"`.
    pub time_zone: String,
}

/// NaN becomes 0; everything else clamps into `[-limit, limit]`.
fn clamp_degrees(value: f64, limit: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(-limit, limit) }
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, time_zone: impl Into<String>) -> Self {
        Self {
            latitude: clamp_degrees(latitude, 90.0),
            longitude: clamp_degrees(longitude, 180.0),
            time_zone: time_zone.into(),
        }
    }

    /// Same location with coordinates forced into range.
    pub fn clamped(&self) -> Self {
        Self::new(self.latitude, self.longitude, self.time_zone.clone())
    }

    /// Kraków, Poland.
    pub fn krakow() -> Self {
        Self::new(50.06, 19.94, "Europe/Warsaw")
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::krakow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_coordinates() {
        let loc = Location::new(95.0, -200.0, "UTC");
        assert_eq!(loc.latitude, 90.0);
        assert_eq!(loc.longitude, -180.0);
    }

    #[test]
    fn test_nan_coordinates_become_zero() {
        let loc = Location::new(f64::NAN, f64::NAN, "UTC");
        assert_eq!((loc.latitude, loc.longitude), (0.0, 0.0));
    }

    #[test]
    fn test_deserialized_values_clamped_on_request() {
        let raw: Location = serde_json::from_str(
            r#"{"latitude": 250.0, "longitude": -999.0, "timeZone": "UTC"}"#,
        )
        .unwrap();
        assert_eq!(raw.latitude, 250.0);
        let fixed = raw.clamped();
        assert_eq!((fixed.latitude, fixed.longitude), (90.0, -180.0));
        assert_eq!(fixed.time_zone, "UTC");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Location::krakow()).unwrap();
        assert_eq!(json["timeZone"], "Europe/Warsaw");
        assert_eq!(json["latitude"], 50.06);
    }
}
