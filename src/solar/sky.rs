//! Sky background color as a function of solar altitude.
//!
//! [`SkyPalette`] holds the six named anchor colors of the sky gradient;
//! colors between anchors are interpolated linearly and clamp at both ends.

use serde::{Deserialize, Serialize};

use crate::core::Rgb;

// ---------------------------------------------------------------------------
// Lerp trait
// ---------------------------------------------------------------------------

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for [f32; 3] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0] + (other[0] - self[0]) * t,
            self[1] + (other[1] - self[1]) * t,
            self[2] + (other[2] - self[2]) * t,
        ]
    }
}

/// Sample the six `(altitude_deg, value)` anchors sorted by altitude. Below
/// the first anchor the first value is returned as is; above the last, the last.
fn sample_keys<T: Lerp>(keys: &[(f64, T); 6], altitude_deg: f64) -> T {
    let first = &keys[0];
    let rest = &keys[1..];
    if altitude_deg < first.0 {
        return first.1.clone();
    }
    let mut lo = first;
    for hi in rest {
        if altitude_deg < hi.0 {
            let span = hi.0 - lo.0;
            if span < 1e-9 {
                return hi.1.clone();
            }
            let frac = ((altitude_deg - lo.0) / span) as f32;
            return lo.1.lerp(&hi.1, frac);
        }
        lo = hi;
    }
    lo.1.clone()
}

// ---------------------------------------------------------------------------
// Sky palette
// ---------------------------------------------------------------------------

/// Altitude (degrees) at which each anchor color is reached.
pub const NIGHT_DEG: f64 = -6.0;
pub const CIVIL_TWILIGHT_DEG: f64 = -3.0;
pub const SUNRISE_DEG: f64 = 0.0;
pub const GOLDEN_HOUR_DEG: f64 = 6.0;
pub const DAY_DEG: f64 = 15.0;
pub const ZENITH_DEG: f64 = 90.0;

const fn hex(rgb: u32) -> Rgb {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    ]
}

/// The six anchor colors of the sky gradient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyPalette {
    pub night: Rgb,
    pub civil_twilight: Rgb,
    pub sunrise: Rgb,
    pub golden_hour: Rgb,
    pub day: Rgb,
    pub zenith: Rgb,
}

impl Default for SkyPalette {
    fn default() -> Self {
        Self {
            night: hex(0x000010),
            civil_twilight: hex(0x2E4482),
            sunrise: hex(0xFF8C00),
            golden_hour: hex(0xFFD700),
            day: hex(0x87CEEB),
            zenith: hex(0x4682B4),
        }
    }
}

impl SkyPalette {
    fn keys(&self) -> [(f64, Rgb); 6] {
        [
            (NIGHT_DEG, self.night),
            (CIVIL_TWILIGHT_DEG, self.civil_twilight),
            (SUNRISE_DEG, self.sunrise),
            (GOLDEN_HOUR_DEG, self.golden_hour),
            (DAY_DEG, self.day),
            (ZENITH_DEG, self.zenith),
        ]
    }

    /// Sky color at a solar altitude in radians.
    pub fn sample(&self, altitude: f64) -> Rgb {
        sample_keys(&self.keys(), altitude.to_degrees())
    }
}

/// Sky color with the default palette.
pub fn sky_color(altitude: f64) -> Rgb {
    SkyPalette::default().sample(altitude)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
