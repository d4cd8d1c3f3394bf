//! Plain simulation state as seen by consumers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Location;
use crate::solar::Weather;
use crate::time::{today_day_of_year, MINUTES_PER_DAY};

/// Gizmo mode used while editing the model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl TransformMode {
    pub fn name(self) -> &'static str {
        match self {
            TransformMode::Translate => "translate",
            TransformMode::Rotate => "rotate",
            TransformMode::Scale => "scale",
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "translate" => Ok(TransformMode::Translate),
            "rotate" => Ok(TransformMode::Rotate),
            "scale" => Ok(TransformMode::Scale),
            other => Err(format!("unknown transform mode '{}'", other)),
        }
    }
}

/// Everything the controller tracks apart from the edit history.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    /// Day of year, 1..=365.
    pub date: u16,
    /// Minute of day on the target wall clock, 0..=1439.
    pub time: u16,
    pub weather: Weather,
    pub location: Location,
    pub location_name: String,
    /// Encoded model payload, opaque to the engine.
    pub model_data: Option<String>,
    /// Whether the host has a model scene loaded.
    pub model_attached: bool,
    /// 0..=1.
    pub model_opacity: f32,
    pub is_edit_mode: bool,
    pub transform_mode: TransformMode,
    pub show_compass_guide: bool,
    pub show_sun_path: bool,
    /// Horizontal camera rotation, radians.
    pub camera_azimuth: f64,
    /// Bumped each time a camera reset is requested.
    pub camera_reset_request: u32,
    pub is_model_loading: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            date: today_day_of_year(),
            time: MINUTES_PER_DAY / 2,
            weather: Weather::Sunny,
            location: Location::krakow(),
            location_name: "Kraków".to_string(),
            model_data: None,
            model_attached: false,
            model_opacity: 1.0,
            is_edit_mode: false,
            transform_mode: TransformMode::Translate,
            show_compass_guide: true,
            show_sun_path: true,
            camera_azimuth: 0.0,
            camera_reset_request: 0,
            is_model_loading: false,
        }
    }
}
