//! Joint tables and per-joint data

use kinetic_core::CameraSpacePoint;

/// Modern joint set, in sensor order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum JointType {
    SpineBase = 0,
    SpineMid = 1,
    Neck = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
    SpineShoulder = 20,
    HandTipLeft = 21,
    ThumbLeft = 22,
    HandTipRight = 23,
    ThumbRight = 24,
}

impl JointType {
    /// Number of joints
    pub const COUNT: usize = 25;

    /// All joints in order
    pub const ALL: [JointType; Self::COUNT] = [
        JointType::SpineBase,
        JointType::SpineMid,
        JointType::Neck,
        JointType::Head,
        JointType::ShoulderLeft,
        JointType::ElbowLeft,
        JointType::WristLeft,
        JointType::HandLeft,
        JointType::ShoulderRight,
        JointType::ElbowRight,
        JointType::WristRight,
        JointType::HandRight,
        JointType::HipLeft,
        JointType::KneeLeft,
        JointType::AnkleLeft,
        JointType::FootLeft,
        JointType::HipRight,
        JointType::KneeRight,
        JointType::AnkleRight,
        JointType::FootRight,
        JointType::SpineShoulder,
        JointType::HandTipLeft,
        JointType::ThumbLeft,
        JointType::HandTipRight,
        JointType::ThumbRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<JointType> {
        Self::ALL.get(index).copied()
    }
}

/// Legacy 20-joint skeleton set, in sensor order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LegacyJointType {
    HipCenter = 0,
    Spine = 1,
    ShoulderCenter = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
}

impl LegacyJointType {
    pub const COUNT: usize = 20;

    pub const ALL: [LegacyJointType; Self::COUNT] = [
        LegacyJointType::HipCenter,
        LegacyJointType::Spine,
        LegacyJointType::ShoulderCenter,
        LegacyJointType::Head,
        LegacyJointType::ShoulderLeft,
        LegacyJointType::ElbowLeft,
        LegacyJointType::WristLeft,
        LegacyJointType::HandLeft,
        LegacyJointType::ShoulderRight,
        LegacyJointType::ElbowRight,
        LegacyJointType::WristRight,
        LegacyJointType::HandRight,
        LegacyJointType::HipLeft,
        LegacyJointType::KneeLeft,
        LegacyJointType::AnkleLeft,
        LegacyJointType::FootLeft,
        LegacyJointType::HipRight,
        LegacyJointType::KneeRight,
        LegacyJointType::AnkleRight,
        LegacyJointType::FootRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The modern joint occupying the same anatomical position
    pub fn to_modern(self) -> JointType {
        match self {
            LegacyJointType::HipCenter => JointType::SpineBase,
            LegacyJointType::Spine => JointType::SpineMid,
            LegacyJointType::ShoulderCenter => JointType::SpineShoulder,
            LegacyJointType::Head => JointType::Head,
            LegacyJointType::ShoulderLeft => JointType::ShoulderLeft,
            LegacyJointType::ElbowLeft => JointType::ElbowLeft,
            LegacyJointType::WristLeft => JointType::WristLeft,
            LegacyJointType::HandLeft => JointType::HandLeft,
            LegacyJointType::ShoulderRight => JointType::ShoulderRight,
            LegacyJointType::ElbowRight => JointType::ElbowRight,
            LegacyJointType::WristRight => JointType::WristRight,
            LegacyJointType::HandRight => JointType::HandRight,
            LegacyJointType::HipLeft => JointType::HipLeft,
            LegacyJointType::KneeLeft => JointType::KneeLeft,
            LegacyJointType::AnkleLeft => JointType::AnkleLeft,
            LegacyJointType::FootLeft => JointType::FootLeft,
            LegacyJointType::HipRight => JointType::HipRight,
            LegacyJointType::KneeRight => JointType::KneeRight,
            LegacyJointType::AnkleRight => JointType::AnkleRight,
            LegacyJointType::FootRight => JointType::FootRight,
        }
    }
}

impl From<LegacyJointType> for JointType {
    fn from(joint: LegacyJointType) -> Self {
        joint.to_modern()
    }
}

/// Tracking quality of a joint or of the lean vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    #[default]
    NotTracked,
    Inferred,
    Tracked,
}

/// One joint's camera-space position and its tracking state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub joint_type: JointType,
    pub position: CameraSpacePoint,
    pub tracking_state: TrackingState,
}

impl Joint {
    pub fn new(joint_type: JointType, position: CameraSpacePoint, tracking_state: TrackingState) -> Self {
        Self {
            joint_type,
            position,
            tracking_state,
        }
    }

    /// Joint with no data
    pub fn not_tracked(joint_type: JointType) -> Self {
        Self::new(joint_type, CameraSpacePoint::default(), TrackingState::NotTracked)
    }

    /// Farther from the sensor than `other`
    pub fn is_behind(&self, other: &Joint) -> bool {
        self.position.z > other.position.z
    }

    pub fn is_above(&self, other: &Joint) -> bool {
        self.position.y > other.position.y
    }

    pub fn is_below(&self, other: &Joint) -> bool {
        self.position.y < other.position.y
    }

    pub fn is_left_of(&self, other: &Joint) -> bool {
        self.position.x < other.position.x
    }

    pub fn is_right_of(&self, other: &Joint) -> bool {
        self.position.x > other.position.x
    }
}

/// Unit quaternion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const IDENTITY: Vector4 = Vector4 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Vector4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Hierarchical rotation of a joint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointOrientation {
    pub joint_type: JointType,
    pub orientation: Vector4,
}

impl JointOrientation {
    pub fn identity(joint_type: JointType) -> Self {
        Self {
            joint_type,
            orientation: Vector4::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_joint_table_order() {
        for (i, joint) in JointType::ALL.iter().enumerate() {
            assert_eq!(joint.index(), i);
            assert_eq!(JointType::from_index(i), Some(*joint));
        }
        assert_eq!(JointType::from_index(JointType::COUNT), None);
    }

    #[test]
    fn test_legacy_renames() {
        assert_eq!(LegacyJointType::HipCenter.to_modern(), JointType::SpineBase);
        assert_eq!(LegacyJointType::ShoulderCenter.to_modern(), JointType::SpineShoulder);
        assert_eq!(LegacyJointType::Spine.to_modern(), JointType::SpineMid);
        assert_eq!(JointType::from(LegacyJointType::FootRight), JointType::FootRight);
    }

    #[test]
    fn test_legacy_conversion_injective() {
        let mut seen = [false; JointType::COUNT];
        for joint in LegacyJointType::ALL {
            let modern = joint.to_modern().index();
            assert!(!seen[modern], "{:?} collides", joint);
            seen[modern] = true;
        }
        assert!(!seen[JointType::HandTipLeft.index()]);
        assert!(!seen[JointType::Neck.index()]);
    }

    #[test]
    fn test_relations() {
        let a = Joint::new(JointType::HandLeft, CameraSpacePoint::new(-0.3, 1.0, 2.0), TrackingState::Tracked);
        let b = Joint::new(JointType::HandRight, CameraSpacePoint::new(0.3, 0.5, 1.5), TrackingState::Tracked);
        assert!(a.is_behind(&b));
        assert!(a.is_above(&b));
        assert!(b.is_below(&a));
        assert!(a.is_left_of(&b));
        assert!(b.is_right_of(&a));
        assert!(!a.is_right_of(&b));
    }

    fn joint_at(x: f32, y: f32) -> Joint {
        Joint::new(JointType::SpineMid, CameraSpacePoint::new(x, y, 2.0), TrackingState::Tracked)
    }

    proptest! {
        #[test]
        fn prop_index_roundtrip(index in 0usize..JointType::COUNT) {
            let joint = JointType::from_index(index).unwrap();
            prop_assert_eq!(joint.index(), index);
        }

        #[test]
        fn prop_legacy_conversion_injective(a in 0usize..LegacyJointType::COUNT, b in 0usize..LegacyJointType::COUNT) {
            prop_assume!(a != b);
            let (a, b) = (LegacyJointType::ALL[a], LegacyJointType::ALL[b]);
            prop_assert_ne!(a.to_modern(), b.to_modern());
        }

        #[test]
        fn prop_relations_antisymmetric(ax in -3.0f32..3.0, ay in -3.0f32..3.0, bx in -3.0f32..3.0, by in -3.0f32..3.0) {
            let (a, b) = (joint_at(ax, ay), joint_at(bx, by));
            prop_assert_eq!(a.is_left_of(&b), b.is_right_of(&a));
            prop_assert_eq!(a.is_above(&b), b.is_below(&a));
            prop_assert!(!(a.is_left_of(&b) && a.is_right_of(&b)));
        }
    }
}
