//! Identity types and sentinels
//!
//! Tracking ids are assigned by the sensor and stay stable while a
//! subject remains in view. Player indices are small slot numbers with a
//! reserved "no player" value.

use std::fmt;

/// Body-index / active-index sentinel: no player at this pixel or slot
pub const NO_PLAYER: u8 = u8::MAX;

/// Sensor-assigned tracking identity of a subject
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TrackingId(pub u64);

impl TrackingId {
    /// Id reported for untracked slots
    pub const NONE: TrackingId = TrackingId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        TrackingId(id)
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracking({:016x})", self.0)
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Convert a slot number to the sentinel-based byte representation
#[inline]
pub fn player_index_to_byte(index: Option<u8>) -> u8 {
    index.unwrap_or(NO_PLAYER)
}

/// Convert a sentinel-based byte back to an optional slot number
#[inline]
pub fn player_index_from_byte(byte: u8) -> Option<u8> {
    if byte == NO_PLAYER {
        None
    } else {
        Some(byte)
    }
}
