//! Raw per-subject records as delivered by each driver generation

use std::ops::{BitOr, BitOrAssign};

use kinetic_core::{CameraSpacePoint, PointF, TrackingId};

use crate::{Joint, JointOrientation, JointType, LegacyJointType, TrackingState};

/// Edges of the field of view that clip a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FrameEdges(pub u8);

impl FrameEdges {
    pub const NONE: FrameEdges = FrameEdges(0);
    pub const RIGHT: FrameEdges = FrameEdges(0x01);
    pub const LEFT: FrameEdges = FrameEdges(0x02);
    pub const TOP: FrameEdges = FrameEdges(0x04);
    pub const BOTTOM: FrameEdges = FrameEdges(0x08);

    #[inline]
    pub fn contains(self, other: FrameEdges) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FrameEdges {
    type Output = FrameEdges;

    fn bitor(self, rhs: FrameEdges) -> FrameEdges {
        FrameEdges(self.0 | rhs.0)
    }
}

impl BitOrAssign for FrameEdges {
    fn bitor_assign(&mut self, rhs: FrameEdges) {
        self.0 |= rhs.0;
    }
}

/// Open/closed state of a hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandState {
    #[default]
    Unknown,
    NotTracked,
    Open,
    Closed,
    Lasso,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingConfidence {
    #[default]
    Low,
    High,
}

/// Modern driver body record
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRecord {
    pub tracking_id: TrackingId,
    pub is_tracked: bool,
    pub is_restricted: bool,
    pub clipped_edges: FrameEdges,
    pub joints: Vec<Joint>,
    pub orientations: Vec<JointOrientation>,
    pub hand_left_state: HandState,
    pub hand_left_confidence: TrackingConfidence,
    pub hand_right_state: HandState,
    pub hand_right_confidence: TrackingConfidence,
    pub lean: PointF,
    pub lean_tracking_state: TrackingState,
}

impl BodyRecord {
    /// An untracked slot as the driver reports it
    pub fn untracked() -> Self {
        Self {
            tracking_id: TrackingId::NONE,
            is_tracked: false,
            is_restricted: false,
            clipped_edges: FrameEdges::NONE,
            joints: Vec::new(),
            orientations: Vec::new(),
            hand_left_state: HandState::Unknown,
            hand_left_confidence: TrackingConfidence::Low,
            hand_right_state: HandState::Unknown,
            hand_right_confidence: TrackingConfidence::Low,
            lean: PointF::ZERO,
            lean_tracking_state: TrackingState::NotTracked,
        }
    }

    /// A tracked record with every joint at `position` offset by a small
    /// per-joint amount. Mostly useful to simulators.
    pub fn tracked_at(tracking_id: TrackingId, position: CameraSpacePoint) -> Self {
        let joints = JointType::ALL
            .iter()
            .map(|&joint_type| {
                let lift = joint_type.index() as f32 * 0.02;
                let at = CameraSpacePoint::new(position.x, position.y + lift, position.z);
                Joint::new(joint_type, at, TrackingState::Tracked)
            })
            .collect::<Vec<_>>();
        let mut record = Self::untracked();
        record.tracking_id = tracking_id;
        record.is_tracked = true;
        record.joints = joints;
        // The reference joint sits exactly at the requested position
        record.joints[JointType::SpineMid.index()].position = position;
        record
    }
}

/// Legacy skeleton tracking state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkeletonTrackingState {
    #[default]
    NotTracked,
    PositionOnly,
    Tracked,
}

/// Legacy per-joint record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyJoint {
    pub joint_type: LegacyJointType,
    pub position: CameraSpacePoint,
    pub tracking_state: TrackingState,
}

/// Legacy driver skeleton record
#[derive(Debug, Clone, PartialEq)]
pub struct LegacySkeleton {
    /// Legacy ids are 32-bit
    pub tracking_id: u32,
    pub tracking_state: SkeletonTrackingState,
    pub clipped_edges: FrameEdges,
    pub joints: Vec<LegacyJoint>,
}

impl LegacySkeleton {
    pub fn untracked() -> Self {
        Self {
            tracking_id: 0,
            tracking_state: SkeletonTrackingState::NotTracked,
            clipped_edges: FrameEdges::NONE,
            joints: Vec::new(),
        }
    }

    pub fn tracked_at(tracking_id: u32, position: CameraSpacePoint) -> Self {
        let joints = LegacyJointType::ALL
            .iter()
            .map(|&joint_type| LegacyJoint {
                joint_type,
                position: if joint_type == LegacyJointType::Spine {
                    position
                } else {
                    let lift = joint_type.index() as f32 * 0.02;
                    CameraSpacePoint::new(position.x, position.y + lift, position.z)
                },
                tracking_state: TrackingState::Tracked,
            })
            .collect();
        Self {
            tracking_id,
            tracking_state: SkeletonTrackingState::Tracked,
            clipped_edges: FrameEdges::NONE,
            joints,
        }
    }
}
