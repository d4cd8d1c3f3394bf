//! Single owner of the simulation and edit-history state.
//!
//! All mutation goes through [`SimulationController`]. Readers take an
//! immutable [`SimulationState`] via [`state`](SimulationController::state)
//! or subscribe to [`ChangeEvent`]s.

use std::sync::mpsc::{channel, Receiver, Sender};

use super::config::SimulationConfig;
use super::persist::{PersistedState, RehydrateReport};
use super::state::{SimulationState, TransformMode};
use crate::core::{Location, Result};
use crate::history::{TransformHistory, TransformSnapshot};
use crate::solar::illuminance::daily_illuminance_with_offset;
use crate::solar::path::sun_path_segments_with_offset;
use crate::solar::{
    altitude_of, solar_direction, sun_times, IlluminanceCurve, LightingState, LightingUniform,
    SkyPalette, SolarVector, SunMarker, SunPath, SunTimes, Weather,
};
use crate::time::{
    clamp_day_of_year, clamp_minute_of_day, validate_time_zone, OffsetMemo, SimulatedInstant,
    SimulatedInstantBuilder,
};

/// Notification sent to subscribers after a mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeEvent {
    Date(u16),
    Time(u16),
    Weather(Weather),
    Location(Location),
    LocationName(String),
    ModelData,
    ModelAttached(bool),
    ModelOpacity(f32),
    EditMode(bool),
    TransformMode(TransformMode),
    /// History length or cursor changed.
    History { len: usize, index: isize },
    /// The host must apply this pose to the model.
    PoseApplied(TransformSnapshot),
    CompassGuide(bool),
    SunPathVisible(bool),
    CameraAzimuth(f64),
    CameraReset(u32),
    ModelLoading(bool),
    /// State was replaced wholesale from a persisted record.
    Rehydrated,
}

/// Everything the renderer needs for the current date, time and location.
#[derive(Clone, Debug, PartialEq)]
pub struct SolarFrame {
    pub instant: SimulatedInstant,
    pub direction: SolarVector,
    /// Radians.
    pub altitude: f64,
    pub lighting: LightingState,
    pub marker: SunMarker,
}

impl SolarFrame {
    /// Lighting packed for upload as a GPU uniform buffer.
    pub fn uniform(&self) -> LightingUniform {
        LightingUniform::from(&self.lighting)
    }
}

pub struct SimulationController {
    state: SimulationState,
    history: TransformHistory,
    builder: SimulatedInstantBuilder,
    palette: SkyPalette,
    memo: OffsetMemo,
    subscribers: Vec<Sender<ChangeEvent>>,
}

impl SimulationController {
    pub fn new(builder: SimulatedInstantBuilder, state: SimulationState) -> Self {
        let mut controller = Self {
            state,
            history: TransformHistory::new(),
            builder,
            palette: SkyPalette::default(),
            memo: OffsetMemo::new(),
            subscribers: Vec::new(),
        };
        controller.state.date = clamp_day_of_year(controller.state.date as i64);
        controller.state.time = clamp_minute_of_day(controller.state.time as i64);
        controller.history.set_model_attached(controller.state.model_attached);
        controller.refresh_offset();
        controller
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let state = SimulationState {
            location: config.location.clone(),
            location_name: config.location_name.clone(),
            time: config.minute_of_day,
            ..SimulationState::default()
        };
        let mut controller = Self::new(config.instant_builder()?, state);
        controller.palette = config.sky.clone();
        Ok(controller)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn history(&self) -> &TransformHistory {
        &self.history
    }

    pub fn builder(&self) -> &SimulatedInstantBuilder {
        &self.builder
    }

    /// Receive a [`ChangeEvent`] for every subsequent mutation.
    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: ChangeEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn notify_history(&mut self) {
        let event = ChangeEvent::History {
            len: self.history.len(),
            index: self.history.index(),
        };
        self.notify(event);
    }

    fn refresh_offset(&mut self) {
        self.memo.get(&self.builder, self.state.date, &self.state.location.time_zone);
    }

    /// Target-minus-host offset for the current day and zone.
    fn offset_difference(&self) -> i32 {
        let (day, zone) = (self.state.date, &self.state.location.time_zone);
        self.memo
            .peek(day, zone)
            .unwrap_or_else(|| self.builder.offset_difference_minutes(day, zone))
    }

    // -- Solar inputs --------------------------------------------------------

    pub fn set_date(&mut self, day_of_year: i64) {
        let day = clamp_day_of_year(day_of_year);
        if day != self.state.date {
            self.state.date = day;
            self.refresh_offset();
        }
        self.notify(ChangeEvent::Date(day));
    }

    pub fn set_time(&mut self, minute_of_day: i64) {
        let minute = clamp_minute_of_day(minute_of_day);
        self.state.time = minute;
        self.notify(ChangeEvent::Time(minute));
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.state.weather = weather;
        self.notify(ChangeEvent::Weather(weather));
    }

    /// Replace the location. Returns false when its zone is unknown; the
    /// location is still applied and offsets degrade to UTC.
    pub fn set_location(&mut self, location: Location) -> bool {
        let valid = validate_time_zone(&location.time_zone).is_ok();
        if !valid {
            log::warn!("Location zone '{}' is unknown, using UTC", location.time_zone);
        }
        self.state.location = location.clone();
        self.refresh_offset();
        self.notify(ChangeEvent::Location(location));
        valid
    }

    pub fn set_location_name(&mut self, name: impl Into<String>) {
        self.state.location_name = name.into();
        let event = ChangeEvent::LocationName(self.state.location_name.clone());
        self.notify(event);
    }

    // -- Model lifecycle -----------------------------------------------------

    /// New model payload. Any previous edit history no longer applies.
    pub fn set_model_data(&mut self, data: Option<String>) {
        let cleared = data.is_none();
        self.state.model_data = data;
        self.history.reset();
        self.notify(ChangeEvent::ModelData);
        if cleared && self.state.model_attached {
            self.detach_model();
        } else {
            self.notify_history();
        }
    }

    /// The host finished loading a model scene. History is kept so a
    /// rehydrated stack survives the reload.
    pub fn attach_model(&mut self) {
        self.state.model_attached = true;
        self.history.set_model_attached(true);
        self.notify(ChangeEvent::ModelAttached(true));
    }

    /// The model scene was removed.
    pub fn detach_model(&mut self) {
        self.state.model_attached = false;
        self.history.set_model_attached(false);
        self.notify(ChangeEvent::ModelAttached(false));
        self.notify_history();
    }

    pub fn set_model_opacity(&mut self, opacity: f32) {
        let opacity = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
        self.state.model_opacity = opacity;
        self.notify(ChangeEvent::ModelOpacity(opacity));
    }

    pub fn set_model_loading(&mut self, loading: bool) {
        self.state.is_model_loading = loading;
        self.notify(ChangeEvent::ModelLoading(loading));
    }

    // -- Editing -------------------------------------------------------------

    /// Enter or leave edit mode. Entering resets the gizmo to translate and
    /// restarts the history from `current_pose`.
    pub fn set_edit_mode(&mut self, enabled: bool, current_pose: Option<TransformSnapshot>) {
        self.state.is_edit_mode = enabled;
        self.notify(ChangeEvent::EditMode(enabled));
        if enabled {
            self.state.transform_mode = TransformMode::Translate;
            self.notify(ChangeEvent::TransformMode(TransformMode::Translate));
            self.history.begin_editing(current_pose);
            self.notify_history();
        }
    }

    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        self.state.transform_mode = mode;
        self.notify(ChangeEvent::TransformMode(mode));
    }

    /// Record the pose reached at the end of a gizmo drag.
    pub fn commit_transform(&mut self, pose: TransformSnapshot) -> bool {
        let committed = self.history.commit(pose);
        if committed {
            self.notify_history();
        }
        committed
    }

    /// Step back. The returned pose must be applied to the model.
    pub fn undo(&mut self) -> Option<TransformSnapshot> {
        let pose = self.history.undo()?;
        self.notify(ChangeEvent::PoseApplied(pose));
        self.notify_history();
        Some(pose)
    }

    pub fn redo(&mut self) -> Option<TransformSnapshot> {
        let pose = self.history.redo()?;
        self.notify(ChangeEvent::PoseApplied(pose));
        self.notify_history();
        Some(pose)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -- View ----------------------------------------------------------------

    pub fn set_show_compass_guide(&mut self, show: bool) {
        self.state.show_compass_guide = show;
        self.notify(ChangeEvent::CompassGuide(show));
    }

    pub fn set_show_sun_path(&mut self, show: bool) {
        self.state.show_sun_path = show;
        self.notify(ChangeEvent::SunPathVisible(show));
    }

    pub fn set_camera_azimuth(&mut self, azimuth: f64) {
        self.state.camera_azimuth = azimuth;
        self.notify(ChangeEvent::CameraAzimuth(azimuth));
    }

    pub fn request_camera_reset(&mut self) {
        self.state.camera_reset_request = self.state.camera_reset_request.wrapping_add(1);
        let event = ChangeEvent::CameraReset(self.state.camera_reset_request);
        self.notify(event);
    }

    // -- Derived -------------------------------------------------------------

    pub fn instant(&self) -> SimulatedInstant {
        self.builder
            .build_with_offset(self.state.date, self.state.time as i64, self.offset_difference())
    }

    pub fn solar_frame(&self) -> SolarFrame {
        let instant = self.instant();
        let direction = solar_direction(&instant, &self.state.location);
        SolarFrame {
            instant,
            direction,
            altitude: altitude_of(direction),
            lighting: LightingState::compute(direction, self.state.weather, &self.palette),
            marker: SunMarker::new(direction),
        }
    }

    /// Hourly lux for the current day, weather applied.
    pub fn daily_illuminance(&self) -> IlluminanceCurve {
        daily_illuminance_with_offset(
            &self.builder,
            self.state.date,
            self.offset_difference(),
            &self.state.location,
        )
        .with_weather(self.state.weather)
    }

    pub fn sun_path(&self) -> SunPath {
        sun_path_segments_with_offset(
            &self.builder,
            self.state.date,
            self.offset_difference(),
            &self.state.location,
        )
    }

    pub fn sun_times(&self) -> SunTimes {
        sun_times(&self.builder, self.state.date, &self.state.location)
    }

    // -- Persistence ---------------------------------------------------------

    pub fn persisted(&self) -> PersistedState {
        PersistedState::capture(&self.state, self.history.entries(), self.history.index())
    }

    /// Replace state from a saved record, repairing anything out of range.
    pub fn rehydrate(&mut self, saved: PersistedState) -> RehydrateReport {
        let mut clamped_fields = Vec::new();

        let date = clamp_day_of_year(saved.date);
        if date as i64 != saved.date {
            clamped_fields.push("date");
        }
        let time = clamp_minute_of_day(saved.time);
        if time as i64 != saved.time {
            clamped_fields.push("time");
        }
        let opacity = if saved.model_opacity.is_nan() {
            1.0
        } else {
            saved.model_opacity.clamp(0.0, 1.0)
        };
        if opacity != saved.model_opacity {
            clamped_fields.push("modelOpacity");
        }

        let location = saved.location.clamped();
        if location != saved.location {
            clamped_fields.push("location");
        }

        let time_zone_valid = validate_time_zone(&saved.location.time_zone).is_ok();
        if !time_zone_valid {
            log::warn!("Restored zone '{}' is unknown, using UTC", saved.location.time_zone);
        }

        self.state.date = date;
        self.state.time = time;
        self.state.weather = saved.weather;
        self.state.location = location;
        self.state.location_name = saved.location_name;
        self.state.model_data = saved.model_data;
        self.state.model_opacity = opacity as f32;
        self.state.is_edit_mode = saved.is_edit_mode;
        self.state.transform_mode = saved.transform_mode;
        self.state.show_compass_guide = saved.show_compass_guide;
        self.state.show_sun_path = saved.show_sun_path;

        let history = self.history.rehydrate(saved.history, saved.history_index);
        self.refresh_offset();

        let report = RehydrateReport {
            clamped_fields,
            history,
            time_zone_valid,
            pose: self.history.current().copied(),
        };
        if report.is_degraded() {
            log::warn!("State restored with repairs: {:?}", report);
        } else {
            log::debug!("State restored");
        }
        self.notify(ChangeEvent::Rehydrated);
        report
    }
}
