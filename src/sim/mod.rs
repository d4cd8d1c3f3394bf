//! Simulation state ownership: the controller, its configuration and the
//! persisted record exchanged with a save/restore collaborator.

pub mod config;
pub mod control;
pub mod controller;
pub mod persist;
pub mod state;

pub use config::SimulationConfig;
pub use control::ControlSession;
pub use controller::{ChangeEvent, SimulationController, SolarFrame};
pub use persist::{PersistedState, RehydrateReport};
pub use state::{SimulationState, TransformMode};
