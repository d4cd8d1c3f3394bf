//! Control-protocol handler driving a [`SimulationController`].

use std::path::PathBuf;

use sunlight_control::{
    ControlCommand, ControlHandler, ControlResponse, HistoryInfo, Pose, ResponseData, SolarFrameInfo,
    StateInfo,
};

use super::controller::SimulationController;
use super::persist::PersistedState;
use super::state::TransformMode;
use crate::core::{Error, Location, Result};
use crate::history::{EulerRotation, RotationOrder, TransformSnapshot};
use crate::solar::{PathSegment, Weather};
use crate::time::{format_date, format_time};

/// Wire pose to snapshot. Rejects unknown rotation orders and non-finite values.
pub fn snapshot_from_pose(pose: Pose) -> Result<TransformSnapshot> {
    let (x, y, z, order) = pose.rotation;
    let order: RotationOrder = order.parse().map_err(Error::InvalidArgument)?;
    let snapshot = TransformSnapshot::new(pose.position, EulerRotation::new(x, y, z, order), pose.scale);
    if !snapshot.is_finite() {
        return Err(Error::InvalidArgument("pose has non-finite components".to_string()));
    }
    Ok(snapshot)
}

pub fn pose_from_snapshot(snapshot: &TransformSnapshot) -> Pose {
    let r = snapshot.rotation;
    Pose {
        position: snapshot.position,
        rotation: (r.x, r.y, r.z, r.order.name().to_string()),
        scale: snapshot.scale,
    }
}

/// Handler owning the controller. Saves state after every mutating command
/// when a state path is set.
pub struct ControlSession {
    controller: SimulationController,
    state_path: Option<PathBuf>,
}

impl ControlSession {
    pub fn new(controller: SimulationController, state_path: Option<PathBuf>) -> Self {
        Self { controller, state_path }
    }

    pub fn controller(&self) -> &SimulationController {
        &self.controller
    }

    fn save(&self) {
        if let Some(path) = &self.state_path {
            if let Err(e) = self.controller.persisted().save(path) {
                log::error!("Failed to save state to {}: {}", path.display(), e);
            }
        }
    }

    fn history_info(&self, applied: Option<TransformSnapshot>) -> HistoryInfo {
        let history = self.controller.history();
        HistoryInfo {
            length: history.len() as u32,
            index: history.index() as i64,
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
            applied: applied.as_ref().map(pose_from_snapshot),
        }
    }

    fn state_info(&self) -> StateInfo {
        let s = self.controller.state();
        StateInfo {
            date: s.date as u32,
            date_label: format_date(s.date),
            time: s.time as u32,
            time_label: format_time(s.time),
            weather: s.weather.name().to_string(),
            location_name: s.location_name.clone(),
            latitude: s.location.latitude,
            longitude: s.location.longitude,
            time_zone: s.location.time_zone.clone(),
            model_attached: s.model_attached,
            is_edit_mode: s.is_edit_mode,
            transform_mode: s.transform_mode.name().to_string(),
            history: self.history_info(None),
        }
    }

    fn execute(&mut self, cmd: ControlCommand) -> Result<ControlResponse> {
        let response = match cmd {
            ControlCommand::Ping => return Ok(ControlResponse::pong()),
            ControlCommand::GetState => return Ok(ControlResponse::ok(ResponseData::State(self.state_info()))),
            ControlCommand::GetSolarFrame => {
                let frame = self.controller.solar_frame();
                let l = &frame.lighting;
                return Ok(ControlResponse::ok(ResponseData::SolarFrame(SolarFrameInfo {
                    utc: frame.instant.utc.to_rfc3339(),
                    direction: frame.direction.to_array(),
                    altitude_deg: frame.altitude.to_degrees(),
                    light_direction: l.light_direction,
                    sky_color: l.sky_color,
                    directional_intensity: l.directional_intensity,
                    ambient_intensity: l.ambient_intensity,
                    sun_below_horizon: l.sun_below_horizon,
                })));
            }
            ControlCommand::GetDailyIlluminance => {
                let curve = self.controller.daily_illuminance();
                let (peak_hour, peak_lux) = curve.peak();
                return Ok(ControlResponse::ok(ResponseData::Illuminance {
                    weather: self.controller.state().weather.name().to_string(),
                    hourly: curve.hourly.to_vec(),
                    peak_hour: peak_hour as u32,
                    peak_lux,
                }));
            }
            ControlCommand::GetSunPath => {
                let path = self.controller.sun_path();
                let points = |s: &PathSegment| -> Vec<[f64; 3]> { s.points.iter().map(|p| p.to_array()).collect() };
                return Ok(ControlResponse::ok(ResponseData::SunPath {
                    day_segments: path.day_segments().map(points).collect(),
                    night_segments: path.night_segments().map(points).collect(),
                }));
            }
            ControlCommand::GetSunTimes => {
                let times = self.controller.sun_times();
                return Ok(ControlResponse::ok(ResponseData::SunTimes {
                    sunrise: times.sunrise.map(format_time),
                    solar_noon: format_time(times.solar_noon),
                    sunset: times.sunset.map(format_time),
                    day_length_minutes: times.day_length().map(u32::from),
                }));
            }
            ControlCommand::ExportState => {
                let state = serde_json::to_value(self.controller.persisted())?;
                return Ok(ControlResponse::ok(ResponseData::ExportedState { state }));
            }

            ControlCommand::SetDate { day } => {
                self.controller.set_date(day);
                ControlResponse::ok(ResponseData::State(self.state_info()))
            }
            ControlCommand::SetTime { minute } => {
                self.controller.set_time(minute);
                ControlResponse::ok(ResponseData::State(self.state_info()))
            }
            ControlCommand::SetWeather { weather } => {
                let weather: Weather = weather.parse().map_err(Error::InvalidArgument)?;
                self.controller.set_weather(weather);
                ControlResponse::ok(ResponseData::State(self.state_info()))
            }
            ControlCommand::SetLocation { latitude, longitude, time_zone, name } => {
                let valid = self.controller.set_location(Location::new(latitude, longitude, time_zone));
                if let Some(name) = name {
                    self.controller.set_location_name(name);
                }
                let description = if valid {
                    "location updated".to_string()
                } else {
                    "location updated, unknown time zone treated as UTC".to_string()
                };
                ControlResponse::ok(ResponseData::ParamsUpdated { description })
            }
            ControlCommand::SetModelAttached { attached } => {
                if attached {
                    self.controller.attach_model();
                } else {
                    self.controller.detach_model();
                }
                ControlResponse::ok(ResponseData::History(self.history_info(None)))
            }
            ControlCommand::SetEditMode { enabled, pose } => {
                let pose = pose.map(snapshot_from_pose).transpose()?;
                self.controller.set_edit_mode(enabled, pose);
                ControlResponse::ok(ResponseData::History(self.history_info(None)))
            }
            ControlCommand::SetTransformMode { mode } => {
                let mode: TransformMode = mode.parse().map_err(Error::InvalidArgument)?;
                self.controller.set_transform_mode(mode);
                ControlResponse::none()
            }
            ControlCommand::CommitTransform { pose } => {
                let snapshot = snapshot_from_pose(pose)?;
                if !self.controller.commit_transform(snapshot) {
                    return Err(Error::State("no model attached".to_string()));
                }
                ControlResponse::ok(ResponseData::History(self.history_info(None)))
            }
            ControlCommand::Undo => {
                let applied = self.controller.undo();
                ControlResponse::ok(ResponseData::History(self.history_info(applied)))
            }
            ControlCommand::Redo => {
                let applied = self.controller.redo();
                ControlResponse::ok(ResponseData::History(self.history_info(applied)))
            }
            ControlCommand::ImportState { state } => {
                let saved: PersistedState = serde_json::from_value(state)?;
                let report = self.controller.rehydrate(saved);
                ControlResponse::ok(ResponseData::Rehydrated {
                    degraded: report.is_degraded(),
                    clamped_fields: report.clamped_fields.iter().map(|f| f.to_string()).collect(),
                    history_index: self.controller.history().index() as i64,
                    time_zone_valid: report.time_zone_valid,
                    pose: report.pose.as_ref().map(pose_from_snapshot),
                })
            }
        };
        self.save();
        Ok(response)
    }
}

impl ControlHandler for ControlSession {
    fn handle_command(&mut self, cmd: ControlCommand) -> ControlResponse {
        match self.execute(cmd) {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Control command failed: {}", e);
                ControlResponse::error(e.to_string())
            }
        }
    }
}
