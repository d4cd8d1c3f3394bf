//! Weather presets and the scale factors they apply.
//!
//! Weather never feeds the solar geometry. It only scales the clear-sky
//! illuminance curve and the scene light intensities.

use serde::{Deserialize, Serialize};

/// User-selected weather.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
}

/// Base intensities of the scene lights for a weather preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightBases {
    /// Directional (sun) light before the daylight fade.
    pub directional: f32,
    /// Ambient light, independent of sun altitude.
    pub ambient: f32,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Sunny, Weather::Cloudy, Weather::Rainy];

    /// Factor applied to clear-sky illuminance.
    pub fn illuminance_multiplier(self) -> f64 {
        match self {
            Weather::Sunny => 1.0,
            Weather::Cloudy => 0.2,
            Weather::Rainy => 0.05,
        }
    }

    pub fn light_bases(self) -> LightBases {
        match self {
            Weather::Sunny => LightBases { directional: 5.0, ambient: 0.5 },
            Weather::Cloudy => LightBases { directional: 1.5, ambient: 1.0 },
            Weather::Rainy => LightBases { directional: 0.5, ambient: 1.2 },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Cloudy => "Cloudy",
            Weather::Rainy => "Rainy",
        }
    }
}

impl std::str::FromStr for Weather {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weather::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown weather '{s}' (expected Sunny, Cloudy or Rainy)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers() {
        assert_eq!(Weather::Sunny.illuminance_multiplier(), 1.0);
        assert_eq!(Weather::Cloudy.illuminance_multiplier(), 0.2);
        assert_eq!(Weather::Rainy.illuminance_multiplier(), 0.05);
    }

    #[test]
    fn test_darker_weather_dims_sun_but_lifts_ambient() {
        let sunny = Weather::Sunny.light_bases();
        let rainy = Weather::Rainy.light_bases();
        assert!(rainy.directional < sunny.directional);
        assert!(rainy.ambient > sunny.ambient);
    }

    #[test]
    fn test_parse_and_serde_names() {
        assert_eq!("cloudy".parse::<Weather>().unwrap(), Weather::Cloudy);
        assert!("Foggy".parse::<Weather>().is_err());
        assert_eq!(serde_json::to_string(&Weather::Rainy).unwrap(), "\"Rainy\"");
    }
}
