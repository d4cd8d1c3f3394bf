//! Serializable pose snapshots.

use std::str::FromStr;

use glam::{DMat4, DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// Axis order of an intrinsic Euler rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationOrder {
    #[default]
    #[serde(rename = "XYZ")]
    Xyz,
    #[serde(rename = "XZY")]
    Xzy,
    #[serde(rename = "YXZ")]
    Yxz,
    #[serde(rename = "YZX")]
    Yzx,
    #[serde(rename = "ZXY")]
    Zxy,
    #[serde(rename = "ZYX")]
    Zyx,
}

impl RotationOrder {
    pub fn name(self) -> &'static str {
        match self {
            RotationOrder::Xyz => "XYZ",
            RotationOrder::Xzy => "XZY",
            RotationOrder::Yxz => "YXZ",
            RotationOrder::Yzx => "YZX",
            RotationOrder::Zxy => "ZXY",
            RotationOrder::Zyx => "ZYX",
        }
    }

    fn euler_rot(self) -> EulerRot {
        match self {
            RotationOrder::Xyz => EulerRot::XYZ,
            RotationOrder::Xzy => EulerRot::XZY,
            RotationOrder::Yxz => EulerRot::YXZ,
            RotationOrder::Yzx => EulerRot::YZX,
            RotationOrder::Zxy => EulerRot::ZXY,
            RotationOrder::Zyx => EulerRot::ZYX,
        }
    }
}

impl FromStr for RotationOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XYZ" => Ok(RotationOrder::Xyz),
            "XZY" => Ok(RotationOrder::Xzy),
            "YXZ" => Ok(RotationOrder::Yxz),
            "YZX" => Ok(RotationOrder::Yzx),
            "ZXY" => Ok(RotationOrder::Zxy),
            "ZYX" => Ok(RotationOrder::Zyx),
            other => Err(format!("unknown rotation order '{}'", other)),
        }
    }
}

/// Euler angles in radians. Serialized as `[x, y, z, "ORDER"]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64, f64, RotationOrder)", into = "(f64, f64, f64, RotationOrder)")]
pub struct EulerRotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub order: RotationOrder,
}

impl From<(f64, f64, f64, RotationOrder)> for EulerRotation {
    fn from((x, y, z, order): (f64, f64, f64, RotationOrder)) -> Self {
        Self { x, y, z, order }
    }
}

impl From<EulerRotation> for (f64, f64, f64, RotationOrder) {
    fn from(r: EulerRotation) -> Self {
        (r.x, r.y, r.z, r.order)
    }
}

impl EulerRotation {
    pub fn new(x: f64, y: f64, z: f64, order: RotationOrder) -> Self {
        Self { x, y, z, order }
    }

    pub fn to_quat(&self) -> DQuat {
        DQuat::from_euler(self.order.euler_rot(), self.x, self.y, self.z)
    }
}

/// Complete pose of the model at one point in its edit history.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: [f64; 3],
    pub rotation: EulerRotation,
    pub scale: [f64; 3],
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformSnapshot {
    pub const IDENTITY: Self = Self {
        position: [0.0; 3],
        rotation: EulerRotation { x: 0.0, y: 0.0, z: 0.0, order: RotationOrder::Xyz },
        scale: [1.0; 3],
    };

    pub fn new(position: [f64; 3], rotation: EulerRotation, scale: [f64; 3]) -> Self {
        Self { position, rotation, scale }
    }

    /// Same pose moved by `offset`.
    pub fn translated(&self, offset: [f64; 3]) -> Self {
        let p = DVec3::from(self.position) + DVec3::from(offset);
        Self { position: p.to_array(), ..*self }
    }

    /// Model matrix (scale, then rotation, then translation).
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(
            DVec3::from(self.scale),
            self.rotation.to_quat(),
            DVec3::from(self.position),
        )
    }

    /// All components finite.
    pub fn is_finite(&self) -> bool {
        let r = &self.rotation;
        self.position.iter().chain(self.scale.iter()).all(|v| v.is_finite())
            && r.x.is_finite()
            && r.y.is_finite()
            && r.z.is_finite()
    }
}
