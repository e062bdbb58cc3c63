//! Kinetic Runtime - Session host loop
//!
//! Each host frame runs two phases:
//! 1. `tick`: pull new sensor data into the engine and sync the face tracker
//! 2. `draw`: publish dirty sources to the graphics target
//!
//! Device selection, render planning, configuration, logging and
//! screenshots live alongside the session.

pub mod config;
pub mod device;
pub mod logging;
pub mod plan;
pub mod screenshot;
pub mod session;

pub use config::*;
pub use device::*;
pub use logging::*;
pub use plan::*;
pub use screenshot::*;
pub use session::*;
