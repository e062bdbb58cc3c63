//! Kinetic Frame - Frame acquisition and decoding
//!
//! Raw frames are handed to the decoders by value. A decoder copies the
//! pixels into a buffer that was sized by the first frame of its source
//! and drops the frame before returning, so nothing retains driver
//! memory past the decode call.
//!
//! Internal color format is 4 bytes per pixel in B, G, R, A order.

pub mod buffer;
pub mod convert;
pub mod decode;
pub mod face;
pub mod frame;
pub mod sample;

pub use buffer::*;
pub use convert::*;
pub use decode::*;
pub use face::*;
pub use frame::*;
pub use sample::*;
