//! Kinetic Body - Tracked subjects in one shape for both sensor generations
//!
//! The modern generation reports 25 joints with orientations, hand states
//! and lean. The legacy generation reports a 20-joint skeleton and none
//! of the extras; those fields carry fixed "unsupported" values.
//!
//! A [`Body`] is an owned value. It is overwritten from a raw record each
//! frame and never keeps a reference to driver memory.

pub mod body;
pub mod joint;
pub mod record;

pub use body::*;
pub use joint::*;
pub use record::*;
