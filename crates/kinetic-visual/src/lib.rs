//! Kinetic Visual - Raster compositing for the host renderer
//!
//! This crate decides pixel values and marker positions. Uploading them
//! to a GPU is the job of a [`GraphicsTarget`] supplied by the host.
//!
//! # Depth visualization
//!
//! - Intensity: linear or wrapped over the reliable depth range
//! - Tint: per-player palette color, active player always first
//! - Joints: markers at the active player's joints in depth space

pub mod compositor;
pub mod intensity;
pub mod mode;
pub mod palette;
pub mod sprite;
pub mod target;

pub use compositor::*;
pub use intensity::*;
pub use mode::*;
pub use palette::*;
pub use sprite::*;
pub use target::*;
