//! Owned subject model

use kinetic_core::{CameraSpacePoint, PointF, TrackingId};

use crate::{
    BodyRecord, FrameEdges, HandState, Joint, JointOrientation, JointType, LegacySkeleton,
    SkeletonTrackingState, TrackingConfidence, TrackingState,
};

/// A tracked subject slot
///
/// Slots are allocated once per engine and overwritten in place every
/// body frame. An absent record leaves the slot as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    tracking_id: TrackingId,
    is_tracked: bool,
    is_restricted: bool,
    clipped_edges: FrameEdges,
    joints: [Joint; JointType::COUNT],
    orientations: [JointOrientation; JointType::COUNT],
    hand_left_state: HandState,
    hand_left_confidence: TrackingConfidence,
    hand_right_state: HandState,
    hand_right_confidence: TrackingConfidence,
    lean: PointF,
    lean_tracking_state: TrackingState,
}

impl Body {
    pub fn new() -> Self {
        Self {
            tracking_id: TrackingId::NONE,
            is_tracked: false,
            is_restricted: false,
            clipped_edges: FrameEdges::NONE,
            joints: JointType::ALL.map(Joint::not_tracked),
            orientations: JointType::ALL.map(JointOrientation::identity),
            hand_left_state: HandState::Unknown,
            hand_left_confidence: TrackingConfidence::Low,
            hand_right_state: HandState::Unknown,
            hand_right_confidence: TrackingConfidence::Low,
            lean: PointF::ZERO,
            lean_tracking_state: TrackingState::NotTracked,
        }
    }

    fn reset_joints(&mut self) {
        for (joint, orientation) in self.joints.iter_mut().zip(self.orientations.iter_mut()) {
            *joint = Joint::not_tracked(joint.joint_type);
            *orientation = JointOrientation::identity(orientation.joint_type);
        }
    }

    /// Overwrite from a modern body record
    pub fn update_from_record(&mut self, record: Option<&BodyRecord>) {
        let Some(record) = record else {
            return;
        };
        self.reset_joints();
        for joint in &record.joints {
            self.joints[joint.joint_type.index()] = *joint;
        }
        for orientation in &record.orientations {
            self.orientations[orientation.joint_type.index()] = *orientation;
        }
        self.tracking_id = record.tracking_id;
        self.is_tracked = record.is_tracked;
        self.is_restricted = record.is_restricted;
        self.clipped_edges = record.clipped_edges;
        self.hand_left_state = record.hand_left_state;
        self.hand_left_confidence = record.hand_left_confidence;
        self.hand_right_state = record.hand_right_state;
        self.hand_right_confidence = record.hand_right_confidence;
        self.lean = record.lean;
        self.lean_tracking_state = record.lean_tracking_state;
    }

    /// Overwrite from a legacy skeleton record
    ///
    /// Fields the legacy sensor cannot measure are set to fixed values:
    /// low confidence, unknown hand state, zero lean that is not tracked,
    /// unrestricted and identity orientations. Joints missing from the
    /// legacy set stay not tracked.
    pub fn update_from_skeleton(&mut self, skeleton: Option<&LegacySkeleton>) {
        let Some(skeleton) = skeleton else {
            return;
        };
        self.reset_joints();
        for joint in &skeleton.joints {
            let joint_type = joint.joint_type.to_modern();
            self.joints[joint_type.index()] =
                Joint::new(joint_type, joint.position, joint.tracking_state);
        }
        self.tracking_id = TrackingId::new(u64::from(skeleton.tracking_id));
        self.is_tracked = skeleton.tracking_state == SkeletonTrackingState::Tracked;
        self.is_restricted = false;
        self.clipped_edges = skeleton.clipped_edges;
        self.hand_left_state = HandState::Unknown;
        self.hand_left_confidence = TrackingConfidence::Low;
        self.hand_right_state = HandState::Unknown;
        self.hand_right_confidence = TrackingConfidence::Low;
        self.lean = PointF::ZERO;
        self.lean_tracking_state = TrackingState::NotTracked;
    }

    pub fn tracking_id(&self) -> TrackingId {
        self.tracking_id
    }

    pub fn is_tracked(&self) -> bool {
        self.is_tracked
    }

    pub fn is_restricted(&self) -> bool {
        self.is_restricted
    }

    pub fn clipped_edges(&self) -> FrameEdges {
        self.clipped_edges
    }

    pub fn joint(&self, joint_type: JointType) -> &Joint {
        &self.joints[joint_type.index()]
    }

    pub fn joints(&self) -> &[Joint; JointType::COUNT] {
        &self.joints
    }

    pub fn joint_orientation(&self, joint_type: JointType) -> &JointOrientation {
        &self.orientations[joint_type.index()]
    }

    pub fn joint_orientations(&self) -> &[JointOrientation; JointType::COUNT] {
        &self.orientations
    }

    pub fn hand_left_state(&self) -> HandState {
        self.hand_left_state
    }

    pub fn hand_left_confidence(&self) -> TrackingConfidence {
        self.hand_left_confidence
    }

    pub fn hand_right_state(&self) -> HandState {
        self.hand_right_state
    }

    pub fn hand_right_confidence(&self) -> TrackingConfidence {
        self.hand_right_confidence
    }

    pub fn lean(&self) -> PointF {
        self.lean
    }

    pub fn lean_tracking_state(&self) -> TrackingState {
        self.lean_tracking_state
    }

    /// Position used to rank subjects: the mid-spine joint
    pub fn reference_point(&self) -> CameraSpacePoint {
        self.joints[JointType::SpineMid.index()].position
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}
