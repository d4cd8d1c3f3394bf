//! Core type aliases and re-exports

pub use glam::DVec3;

/// Standard Result type for the engine
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// RGB color with components in `[0.0, 1.0]`.
pub type Rgb = [f32; 3];
