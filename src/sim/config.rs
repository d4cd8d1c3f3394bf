//! Simulation configuration loaded from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Error, Location, Result};
use crate::solar::SkyPalette;
use crate::time::{clamp_minute_of_day, current_year, validate_time_zone, HostClock, SimulatedInstantBuilder};

/// Startup configuration. Every field has a default, so a config file only
/// needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Location used until the host supplies one.
    pub location: Location,
    pub location_name: String,
    /// Initial minute of day (noon).
    pub minute_of_day: u16,
    /// Calendar year the day-of-year slider maps into. Defaults to the
    /// current host year.
    pub year: Option<i32>,
    /// IANA zone standing in for the host clock. Defaults to system local.
    pub host_time_zone: Option<String>,
    /// Sky gradient anchors.
    pub sky: SkyPalette,
    /// Control server port.
    pub control_port: u16,
    /// Where the persisted state is read at startup and written on change.
    pub state_path: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            location: Location::krakow(),
            location_name: "Kraków".to_string(),
            minute_of_day: 12 * 60,
            year: None,
            host_time_zone: None,
            sky: SkyPalette::default(),
            control_port: sunlight_control::DEFAULT_PORT,
            state_path: None,
        }
    }
}

impl SimulationConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject settings the simulation cannot run with. An unknown location
    /// zone is tolerated (it degrades to UTC); an unknown host zone is not.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.host_time_zone {
            validate_time_zone(name)
                .map_err(|_| Error::Config(format!("unknown host time zone '{}'", name)))?;
        }
        if clamp_minute_of_day(self.minute_of_day as i64) != self.minute_of_day {
            return Err(Error::Config(format!(
                "minute_of_day {} outside 0..1440",
                self.minute_of_day
            )));
        }
        if validate_time_zone(&self.location.time_zone).is_err() {
            log::warn!(
                "Default location zone '{}' is unknown, solar times will use UTC",
                self.location.time_zone
            );
        }
        Ok(())
    }

    pub fn host_clock(&self) -> Result<HostClock> {
        HostClock::from_name(self.host_time_zone.as_deref())
    }

    /// Instant builder for the configured year and host clock.
    pub fn instant_builder(&self) -> Result<SimulatedInstantBuilder> {
        let year = self.year.unwrap_or_else(current_year);
        Ok(SimulatedInstantBuilder::new(year, self.host_clock()?))
    }
}
