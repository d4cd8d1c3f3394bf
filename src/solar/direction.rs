//! Sun direction in scene space.
//!
//! Scene frame is right-handed and Y-up with -Z pointing geographic north
//! and +X pointing east, so a viewer looking toward -Z has east on the
//! right, as on a map.

use glam::DVec3;

use super::ephemeris::{solar_position, SolarPosition};
use crate::core::Location;
use crate::time::SimulatedInstant;

/// Unit vector from the scene origin toward the sun. `y = sin(altitude)`.
pub type SolarVector = DVec3;

/// Convert a south-origin, clockwise azimuth and an altitude into the scene
/// frame.
pub fn to_scene_vector(position: SolarPosition) -> SolarVector {
    let SolarPosition { azimuth, altitude } = position;
    DVec3::new(
        -altitude.cos() * azimuth.sin(),
        altitude.sin(),
        altitude.cos() * azimuth.cos(),
    )
}

/// Sun direction for an instant seen from a location.
pub fn solar_direction(instant: &SimulatedInstant, location: &Location) -> SolarVector {
    to_scene_vector(solar_position(instant.utc, location.latitude, location.longitude))
}

/// Altitude in radians recovered from a scene vector.
#[inline]
pub fn altitude_of(direction: SolarVector) -> f64 {
    direction.y.clamp(-1.0, 1.0).asin()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
