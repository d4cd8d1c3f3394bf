//! Remote control of a running sunlight simulation.
//!
//! A client writes one JSON [`ControlCommand`] per line, such as
//! `{"cmd":"SetTime","params":{"minute":720}}`, and reads back one
//! [`ControlResponse`] line tagged with `"status"`. The host supplies a
//! [`ControlHandler`] and hands it to [`ControlServer::start`], which listens
//! on loopback only.

pub mod protocol;
pub mod server;

pub use protocol::*;
pub use server::{ControlHandler, ControlServer, SharedHandler};

/// Port used when the host config does not name one.
pub const DEFAULT_PORT: u16 = 9743;
