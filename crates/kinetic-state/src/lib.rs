//! Kinetic State - Per-session frame state
//!
//! One engine per open sensor. The host calls `update` once per tick
//! with the frame source and `render` when it wants pixels. Both run on
//! the host's loop thread; the only value written from elsewhere is the
//! availability flag.
//!
//! # Backends
//!
//! - Modern: multiplexed packets, reports a change per packet
//! - Legacy: three independently polled streams, reports a change once
//!   color, depth and skeleton have all advanced

pub mod availability;
pub mod engine;
pub mod legacy;
pub mod modern;
pub mod selector;
pub mod sensor;
pub mod source;

pub use availability::*;
pub use engine::*;
pub use legacy::*;
pub use modern::*;
pub use selector::*;
pub use sensor::*;
pub use source::*;
