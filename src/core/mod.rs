//! Core types and utilities shared by the simulation engine

pub mod types;
pub mod error;
pub mod logging;
pub mod location;

pub use types::*;
pub use error::Error;
pub use location::Location;
