//! Solar geometry and the quantities derived from it.
//!
//! Everything here is a pure function of an instant (or a day) and a
//! location: sun direction, sky color, hourly illuminance, the day/night
//! sun path, sunrise/sunset, and the scene lighting built from them.

pub mod direction;
pub mod ephemeris;
pub mod illuminance;
pub mod lighting;
pub mod path;
pub mod sky;
pub mod times;
pub mod weather;

pub use direction::{altitude_of, solar_direction, SolarVector};
pub use ephemeris::{solar_position, SolarPosition};
pub use illuminance::{daily_illuminance, IlluminanceCurve};
pub use lighting::{LightingState, LightingUniform};
pub use path::{sun_path_segments, PathKind, PathSegment, SunMarker, SunPath};
pub use sky::{sky_color, SkyPalette};
pub use times::{sun_times, SunTimes};
pub use weather::Weather;
