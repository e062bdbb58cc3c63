//! Active-subject selection

use std::cmp::Ordering;

use kinetic_body::Body;
use kinetic_core::{CameraSpacePoint, NO_PLAYER};

/// Preferred distance from the sensor (meters)
pub const PREFERRED_DISTANCE: f32 = 2.0;

/// Lower is better: distance from the optical axis plus distance from
/// the preferred range
#[inline]
pub fn selection_score(reference: CameraSpacePoint) -> f32 {
    reference.x.abs() + (PREFERRED_DISTANCE - reference.z).abs()
}

/// Pick the tracked slot with the lowest score; the lowest slot wins ties.
/// A NaN score ranks behind every number.
pub fn select_active(players: &[Body]) -> Option<u8> {
    let mut best: Option<(usize, f32)> = None;
    for (index, body) in players.iter().enumerate() {
        if !body.is_tracked() {
            continue;
        }
        let score = selection_score(body.reference_point());
        let better = match best {
            None => true,
            Some((_, current)) => rank(score, current) == Ordering::Less,
        };
        if better {
            best = Some((index, score));
        }
    }
    best.and_then(|(index, _)| u8::try_from(index).ok())
}

fn rank(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Active selection and its previous-frame edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveSubjectState {
    pub active_index: Option<u8>,
    pub had_player_previous_frame: bool,
}

impl ActiveSubjectState {
    /// Recompute after a body update
    pub fn update(&mut self, players: &[Body]) {
        self.had_player_previous_frame = self.active_index.is_some();
        self.active_index = select_active(players);
    }

    /// Active index as a byte, `NO_PLAYER` when nobody is active
    pub fn active_index_byte(&self) -> u8 {
        self.active_index.unwrap_or(NO_PLAYER)
    }

    /// A player appeared this frame
    pub fn player_entered(&self) -> bool {
        !self.had_player_previous_frame && self.active_index.is_some()
    }

    /// The last player left this frame
    pub fn player_left(&self) -> bool {
        self.had_player_previous_frame && self.active_index.is_none()
    }
}
