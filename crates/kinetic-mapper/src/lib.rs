//! Kinetic Coordinate Mapper
//!
//! Stateless conversions between the three sensor spaces:
//! - Camera space: 3-D, meters, centered on the sensor
//! - Depth space: pixel coordinates of the depth image plus a depth in millimeters
//! - Color space: pixel coordinates of the color image
//!
//! Every conversion is recomputed on each call. Inputs outside the
//! sensor's range never fail; they produce `-inf` sentinel coordinates
//! that callers filter with `is_finite()`.

pub mod calibration;
pub mod checked;
pub mod mapper;
pub mod pinhole;

pub use calibration::*;
pub use checked::*;
pub use mapper::*;
pub use pinhole::*;
