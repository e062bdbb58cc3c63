//! Kinetic Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every layer of the sensor
//! fusion engine:
//! - Identifiers and sentinels (TrackingId, NO_PLAYER)
//! - Space primitives (camera, depth and color points, sizes)
//! - Colors and the default player palette
//! - Source and face-feature bitmasks
//! - The error taxonomy

pub mod color;
pub mod error;
pub mod id;
pub mod point;
pub mod source;

pub use color::*;
pub use error::*;
pub use id::*;
pub use point::*;
pub use source::*;
