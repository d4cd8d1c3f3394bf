//! Scene lighting derived from the sun direction, plus a GPU uniform.
//!
//! The directional light fades out between 2 degrees above and 6 degrees
//! below the horizon. That band is a perceptual light fade and is kept
//! separate from the geometric horizon used by path segmentation.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;

use super::direction::{altitude_of, SolarVector};
use super::sky::SkyPalette;
use super::weather::Weather;
use crate::core::Rgb;

/// Altitude (degrees) above which the sun light is at full strength.
pub const FADE_UPPER_DEG: f64 = 2.0;
/// Altitude (degrees) below which the sun light is off.
pub const FADE_LOWER_DEG: f64 = -6.0;

/// Daylight fade factor in `[0, 1]` for an altitude in radians.
pub fn daylight_factor(altitude: f64) -> f32 {
    let upper = FADE_UPPER_DEG.to_radians();
    let lower = FADE_LOWER_DEG.to_radians();
    if altitude >= upper {
        1.0
    } else if altitude < lower {
        0.0
    } else {
        ((altitude - lower) / (upper - lower)).clamp(0.0, 1.0) as f32
    }
}

/// Direction the scene light shines from. Below the horizon the sun is
/// pinned to the horizon along its own bearing so light never comes from
/// underground.
pub fn light_direction(sun: SolarVector) -> SolarVector {
    if sun.y >= 0.0 {
        return sun;
    }
    let horizontal = DVec3::new(sun.x, 0.0, sun.z);
    let len = horizontal.length();
    if len > 0.0 { horizontal / len } else { horizontal }
}

// ---------------------------------------------------------------------------
// CPU-side state
// ---------------------------------------------------------------------------

/// Lighting inputs for the renderer at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct LightingState {
    pub sun_direction: [f32; 3],
    pub light_direction: [f32; 3],
    /// Radians.
    pub altitude: f32,
    pub sky_color: Rgb,
    pub directional_intensity: f32,
    pub ambient_intensity: f32,
    pub sun_below_horizon: bool,
}

impl LightingState {
    pub fn compute(sun: SolarVector, weather: Weather, palette: &SkyPalette) -> Self {
        let altitude = altitude_of(sun);
        let bases = weather.light_bases();
        Self {
            sun_direction: sun.as_vec3().to_array(),
            light_direction: light_direction(sun).as_vec3().to_array(),
            altitude: altitude as f32,
            sky_color: palette.sample(altitude),
            directional_intensity: bases.directional * daylight_factor(altitude),
            ambient_intensity: bases.ambient,
            sun_below_horizon: sun.y < 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// GPU uniform
// ---------------------------------------------------------------------------

/// GPU-ready lighting uniform buffer.
///
/// All `vec3` fields are padded to 16-byte alignment for WGSL compatibility.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightingUniform {
    // -- Sun (16 + 16 = 32 bytes) --
    pub sun_direction: [f32; 3],
    pub altitude: f32,
    pub light_direction: [f32; 3],
    pub directional_intensity: f32,

    // -- Sky (16 bytes) --
    pub sky_color: [f32; 3],
    pub ambient_intensity: f32,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self {
            sun_direction: [0.0, 1.0, 0.0],
            altitude: std::f32::consts::FRAC_PI_2,
            light_direction: [0.0, 1.0, 0.0],
            directional_intensity: 5.0,
            sky_color: SkyPalette::default().zenith,
            ambient_intensity: 0.5,
        }
    }
}

impl From<&LightingState> for LightingUniform {
    fn from(s: &LightingState) -> Self {
        Self {
            sun_direction: s.sun_direction,
            altitude: s.altitude,
            light_direction: s.light_direction,
            directional_intensity: s.directional_intensity,
            sky_color: s.sky_color,
            ambient_intensity: s.ambient_intensity,
        }
    }
}
