//! Kinetic Test Harness - Simulated sensors and scenario testing
//!
//! This crate provides:
//! - A seeded scene of wandering subjects rendered into sensor frames
//! - Modern and legacy sensor simulators with frame drops
//! - A driver-thread simulator publishing frames through a shared slot
//! - End-to-end scenario runs over a full session

pub mod driver;
pub mod integration;
pub mod scene;
pub mod simulator;

pub use driver::*;
pub use integration::*;
pub use scene::*;
pub use simulator::*;
