//! Face tracking results
//!
//! Results are stored as reported. Nothing here interprets expressions
//! or face shape.

use kinetic_body::Vector4;
use kinetic_core::{FaceFrameFeatures, PointF, RectI, TrackingId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacePointType {
    EyeLeft = 0,
    EyeRight = 1,
    Nose = 2,
    MouthCornerLeft = 3,
    MouthCornerRight = 4,
}

impl FacePointType {
    pub const COUNT: usize = 5;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceProperty {
    Happy = 0,
    Engaged = 1,
    WearingGlasses = 2,
    LeftEyeClosed = 3,
    RightEyeClosed = 4,
    MouthOpen = 5,
    MouthMoved = 6,
    LookingAway = 7,
}

impl FaceProperty {
    pub const COUNT: usize = 8;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionResult {
    #[default]
    Unknown,
    No,
    Maybe,
    Yes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceFrameResult {
    pub tracking_id: TrackingId,
    pub features: FaceFrameFeatures,
    pub bounding_box_in_color_space: RectI,
    pub bounding_box_in_infrared_space: RectI,
    pub points_in_color_space: [PointF; FacePointType::COUNT],
    pub points_in_infrared_space: [PointF; FacePointType::COUNT],
    pub rotation: Vector4,
    pub properties: [DetectionResult; FaceProperty::COUNT],
}

impl FaceFrameResult {
    /// Empty result for a tracking id
    pub fn new(tracking_id: TrackingId, features: FaceFrameFeatures) -> Self {
        Self {
            tracking_id,
            features,
            bounding_box_in_color_space: RectI::default(),
            bounding_box_in_infrared_space: RectI::default(),
            points_in_color_space: [PointF::ZERO; FacePointType::COUNT],
            points_in_infrared_space: [PointF::ZERO; FacePointType::COUNT],
            rotation: Vector4::IDENTITY,
            properties: [DetectionResult::Unknown; FaceProperty::COUNT],
        }
    }

    pub fn point_in_color_space(&self, point: FacePointType) -> PointF {
        self.points_in_color_space[point as usize]
    }

    pub fn property(&self, property: FaceProperty) -> DetectionResult {
        self.properties[property as usize]
    }
}

/// Face frame; the result is absent when the tracker lost the face
#[derive(Debug, Clone)]
pub struct FaceFrame {
    pub tracking_id: TrackingId,
    pub result: Option<FaceFrameResult>,
}
