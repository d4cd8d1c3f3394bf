//! Sunlight simulation engine: solar geometry, sky and light models for a
//! target location and date, plus the transform edit history of the model
//! being lit.

pub mod core;
pub mod time;
pub mod solar;
pub mod history;
pub mod sim;
