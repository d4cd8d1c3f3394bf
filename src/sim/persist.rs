//! The record exchanged with an external save/restore collaborator.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::state::{SimulationState, TransformMode};
use crate::core::{Location, Result};
use crate::history::{RehydrateOutcome, TransformSnapshot};
use crate::solar::Weather;

/// Saved simulation state.
///
/// Numeric fields are wide and signed so that an out-of-range payload still
/// parses and can be clamped on rehydration instead of being rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub date: i64,
    pub time: i64,
    pub weather: Weather,
    pub location: Location,
    pub location_name: String,
    pub model_data: Option<String>,
    pub model_opacity: f64,
    pub is_edit_mode: bool,
    pub transform_mode: TransformMode,
    pub history: Vec<TransformSnapshot>,
    pub history_index: i64,
    pub show_compass_guide: bool,
    pub show_sun_path: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self::capture(&SimulationState::default(), &[], -1)
    }
}

impl PersistedState {
    pub fn capture(state: &SimulationState, history: &[TransformSnapshot], history_index: isize) -> Self {
        Self {
            date: state.date as i64,
            time: state.time as i64,
            weather: state.weather,
            location: state.location.clone(),
            location_name: state.location_name.clone(),
            model_data: state.model_data.clone(),
            model_opacity: state.model_opacity as f64,
            is_edit_mode: state.is_edit_mode,
            transform_mode: state.transform_mode,
            history: history.to_vec(),
            history_index: history_index as i64,
            show_compass_guide: state.show_compass_guide,
            show_sun_path: state.show_sun_path,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        log::info!("Saved state to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let state = serde_json::from_str(&json)?;
        log::info!("Loaded state from {}", path.display());
        Ok(state)
    }
}

/// What rehydration had to repair.
#[derive(Clone, Debug, PartialEq)]
pub struct RehydrateReport {
    /// Names of fields clamped into range (camelCase, as persisted).
    pub clamped_fields: Vec<&'static str>,
    pub history: RehydrateOutcome,
    /// False when the location's zone is unknown and offsets fall back to UTC.
    pub time_zone_valid: bool,
    /// Pose at the restored history cursor, for the host to apply once the
    /// model has loaded.
    pub pose: Option<TransformSnapshot>,
}

impl RehydrateReport {
    /// Anything repaired or degraded.
    pub fn is_degraded(&self) -> bool {
        !self.clamped_fields.is_empty() || self.history.is_degraded() || !self.time_zone_valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{EulerRotation, RotationOrder};

    #[test]
    fn test_field_names() {
        let json = serde_json::to_value(PersistedState::default()).unwrap();
        for key in [
            "date",
            "time",
            "weather",
            "location",
            "locationName",
            "modelData",
            "modelOpacity",
            "isEditMode",
            "transformMode",
            "history",
            "historyIndex",
            "showCompassGuide",
            "showSunPath",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["location"]["timeZone"], "Europe/Warsaw");
        assert_eq!(json["historyIndex"], -1);
        assert_eq!(json["transformMode"], "translate");
    }

    #[test]
    fn test_loads_browser_payload() {
        let json = r#"{
            "date": 172, "time": 720, "weather": "Cloudy",
            "location": {"latitude": 40.71, "longitude": -74.0, "timeZone": "America/New_York"},
            "locationName": "New York", "modelData": null, "modelOpacity": 0.5,
            "isEditMode": true, "transformMode": "rotate",
            "history": [
                {"position": [0,0,0], "rotation": [0,0,0,"XYZ"], "scale": [1,1,1]},
                {"position": [1,0,0], "rotation": [0,0.5,0,"XYZ"], "scale": [1,1,1]}
            ],
            "historyIndex": 1, "showCompassGuide": false, "showSunPath": true
        }"#;
        let state: PersistedState = serde_json::from_str(json).unwrap();
        assert_eq!(state.weather, Weather::Cloudy);
        assert_eq!(state.transform_mode, TransformMode::Rotate);
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[1].rotation, EulerRotation::new(0.0, 0.5, 0.0, RotationOrder::Xyz));
        assert!(!state.show_compass_guide);
    }

    #[test]
    fn test_missing_fields_default() {
        let state: PersistedState = serde_json::from_str(r#"{"date": 10}"#).unwrap();
        assert_eq!(state.date, 10);
        assert_eq!(state.time, 720);
        assert_eq!(state.history_index, -1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("sunlight.json");
        let mut state = PersistedState::default();
        state.date = 355;
        state.history = vec![TransformSnapshot::IDENTITY];
        state.history_index = 0;
        state.save(&path).unwrap();
        assert_eq!(PersistedState::load(&path).unwrap(), state);
    }

    #[test]
    fn test_report_degraded() {
        let clean = RehydrateReport {
            clamped_fields: Vec::new(),
            history: RehydrateOutcome::Clean,
            time_zone_valid: true,
            pose: None,
        };
        assert!(!clean.is_degraded());
        let bad_zone = RehydrateReport { time_zone_valid: false, ..clean.clone() };
        assert!(bad_zone.is_degraded());
        let clamped = RehydrateReport { clamped_fields: vec!["date"], ..clean };
        assert!(clamped.is_degraded());
    }
}
