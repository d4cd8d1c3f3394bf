//! Control protocol - JSON command/response definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pose of the model as exchanged on the wire.
///
/// `rotation` is `[x, y, z, order]` with angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: [f64; 3],
    pub rotation: (f64, f64, f64, String),
    pub scale: [f64; 3],
}

/// Commands sent from a client to the control server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum ControlCommand {
    /// Ping (health check)
    Ping,
    /// Get the current simulation state
    GetState,
    /// Set day of year (1-365, clamped)
    SetDate { day: i64 },
    /// Set minute of day (0-1439, clamped)
    SetTime { minute: i64 },
    /// Set weather (Sunny, Cloudy, Rainy)
    SetWeather { weather: String },
    /// Replace the location
    SetLocation {
        latitude: f64,
        longitude: f64,
        time_zone: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Report whether the host has a model scene loaded
    SetModelAttached { attached: bool },
    /// Enter or leave edit mode; entering seeds history with `pose`
    SetEditMode {
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pose: Option<Pose>,
    },
    /// Set gizmo mode (translate, rotate, scale)
    SetTransformMode { mode: String },
    /// Record a finished transform edit
    CommitTransform { pose: Pose },
    /// Step back in the transform history
    Undo,
    /// Step forward in the transform history
    Redo,
    /// Sun direction and lighting at the current instant
    GetSolarFrame,
    /// Hourly illuminance for the current day
    GetDailyIlluminance,
    /// Day/night sun path segments for the current day
    GetSunPath,
    /// Sunrise, solar noon and sunset for the current day
    GetSunTimes,
    /// Export the persisted state record
    ExportState,
    /// Replace state from a persisted record
    ImportState { state: serde_json::Value },
}

/// Responses from the control server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ControlResponse {
    #[serde(rename = "ok")]
    Ok { data: ResponseData },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Response data variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    None,
    Pong { message: String },
    State(StateInfo),
    History(HistoryInfo),
    SolarFrame(SolarFrameInfo),
    Illuminance {
        weather: String,
        hourly: Vec<f64>,
        peak_hour: u32,
        peak_lux: f64,
    },
    SunPath {
        day_segments: Vec<Vec<[f64; 3]>>,
        night_segments: Vec<Vec<[f64; 3]>>,
    },
    SunTimes {
        sunrise: Option<String>,
        solar_noon: String,
        sunset: Option<String>,
        day_length_minutes: Option<u32>,
    },
    ExportedState { state: serde_json::Value },
    Rehydrated {
        degraded: bool,
        clamped_fields: Vec<String>,
        history_index: i64,
        time_zone_valid: bool,
        pose: Option<Pose>,
    },
    ParamsUpdated { description: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateInfo {
    pub date: u32,
    pub date_label: String,
    pub time: u32,
    pub time_label: String,
    pub weather: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: String,
    pub model_attached: bool,
    pub is_edit_mode: bool,
    pub transform_mode: String,
    pub history: HistoryInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryInfo {
    pub length: u32,
    pub index: i64,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Pose the host should apply, when the command moved the cursor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied: Option<Pose>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarFrameInfo {
    /// UTC instant, RFC 3339
    pub utc: String,
    pub direction: [f64; 3],
    pub altitude_deg: f64,
    pub light_direction: [f32; 3],
    pub sky_color: [f32; 3],
    pub directional_intensity: f32,
    pub ambient_intensity: f32,
    pub sun_below_horizon: bool,
}

impl ControlResponse {
    pub fn ok(data: ResponseData) -> Self {
        ControlResponse::Ok { data }
    }

    pub fn none() -> Self {
        ControlResponse::Ok {
            data: ResponseData::None,
        }
    }

    pub fn pong() -> Self {
        ControlResponse::Ok {
            data: ResponseData::Pong {
                message: "pong".to_string(),
            },
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        ControlResponse::Error {
            message: msg.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ControlResponse::Ok { .. })
    }
}

/// Errors decoding a request line
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Empty command line")]
    Empty,
    #[error("Invalid command JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Decode one request line.
pub fn parse_command(line: &str) -> Result<ControlCommand, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Encode a response as one newline-terminated line.
pub fn encode_response(response: &ControlResponse) -> String {
    let mut json = serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            "{{\"status\":\"error\",\"message\":\"Serialize error: {}\"}}",
            e
        )
    });
    json.push('\n');
    json
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_command() {
        assert_eq!(parse_command(r#"{"cmd":"Ping"}"#).unwrap(), ControlCommand::Ping);
        assert_eq!(parse_command("  {\"cmd\":\"Undo\"}\n").unwrap(), ControlCommand::Undo);
    }

    #[test]
    fn test_parse_params() {
        let cmd = parse_command(r#"{"cmd":"SetDate","params":{"day":172}}"#).unwrap();
        assert_eq!(cmd, ControlCommand::SetDate { day: 172 });

        let cmd = parse_command(
            r#"{"cmd":"SetLocation","params":{"latitude":35.68,"longitude":139.69,"time_zone":"Asia/Tokyo"}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            ControlCommand::SetLocation {
                latitude: 35.68,
                longitude: 139.69,
                time_zone: "Asia/Tokyo".to_string(),
                name: None,
            }
        );
    }

    #[test]
    fn test_parse_pose() {
        let cmd = parse_command(
            r#"{"cmd":"CommitTransform","params":{"pose":{"position":[1,2,3],"rotation":[0,0.5,0,"XYZ"],"scale":[1,1,1]}}}"#,
        )
        .unwrap();
        let ControlCommand::CommitTransform { pose } = cmd else {
            panic!("wrong command");
        };
        assert_eq!(pose.position, [1.0, 2.0, 3.0]);
        assert_eq!(pose.rotation, (0.0, 0.5, 0.0, "XYZ".to_string()));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_command("   "), Err(ProtocolError::Empty)));
        assert!(matches!(parse_command("{"), Err(ProtocolError::InvalidJson(_))));
        assert!(matches!(
            parse_command(r#"{"cmd":"Explode"}"#),
            Err(ProtocolError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_response_shape() {
        let line = encode_response(&ControlResponse::ok(ResponseData::Pong {
            message: "pong".to_string(),
        }));
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"]["message"], "pong");

        let value = serde_json::to_value(ControlResponse::error("nope")).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "nope");
    }

    #[test]
    fn test_history_info_omits_missing_pose() {
        let info = HistoryInfo {
            length: 2,
            index: 1,
            can_undo: true,
            can_redo: false,
            applied: None,
        };
        let value = serde_json::to_value(ResponseData::History(info)).unwrap();
        assert!(value.get("applied").is_none());
        assert_eq!(value["index"], 1);
    }
}
