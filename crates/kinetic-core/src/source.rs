//! Source and feature bitmasks
//!
//! Bit values match the sensor SDK so that masks can be passed through
//! to the driver layer unchanged.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

/// Set of frame source kinds
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameSourceTypes(pub u32);

impl FrameSourceTypes {
    pub const NONE: FrameSourceTypes = FrameSourceTypes(0);
    pub const COLOR: FrameSourceTypes = FrameSourceTypes(0x01);
    pub const INFRARED: FrameSourceTypes = FrameSourceTypes(0x02);
    pub const LONG_EXPOSURE_INFRARED: FrameSourceTypes = FrameSourceTypes(0x04);
    pub const DEPTH: FrameSourceTypes = FrameSourceTypes(0x08);
    pub const BODY_INDEX: FrameSourceTypes = FrameSourceTypes(0x10);
    pub const BODY: FrameSourceTypes = FrameSourceTypes(0x20);
    pub const AUDIO: FrameSourceTypes = FrameSourceTypes(0x40);

    /// Sources opened when the host does not ask for anything else
    pub const DEFAULT_SOURCES: FrameSourceTypes =
        FrameSourceTypes(Self::BODY.0 | Self::BODY_INDEX.0 | Self::COLOR.0 | Self::DEPTH.0);

    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set
    #[inline]
    pub fn contains(self, other: FrameSourceTypes) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set
    #[inline]
    pub fn intersects(self, other: FrameSourceTypes) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: FrameSourceTypes) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: FrameSourceTypes) {
        self.0 &= !other.0;
    }
}

impl BitOr for FrameSourceTypes {
    type Output = FrameSourceTypes;

    fn bitor(self, rhs: FrameSourceTypes) -> FrameSourceTypes {
        FrameSourceTypes(self.0 | rhs.0)
    }
}

impl BitOrAssign for FrameSourceTypes {
    fn bitor_assign(&mut self, rhs: FrameSourceTypes) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FrameSourceTypes {
    type Output = FrameSourceTypes;

    fn bitand(self, rhs: FrameSourceTypes) -> FrameSourceTypes {
        FrameSourceTypes(self.0 & rhs.0)
    }
}

impl Not for FrameSourceTypes {
    type Output = FrameSourceTypes;

    fn not(self) -> FrameSourceTypes {
        FrameSourceTypes(!self.0)
    }
}

impl fmt::Debug for FrameSourceTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(FrameSourceTypes, &str); 7] = [
            (FrameSourceTypes::COLOR, "Color"),
            (FrameSourceTypes::INFRARED, "Infrared"),
            (FrameSourceTypes::LONG_EXPOSURE_INFRARED, "LongExposureInfrared"),
            (FrameSourceTypes::DEPTH, "Depth"),
            (FrameSourceTypes::BODY_INDEX, "BodyIndex"),
            (FrameSourceTypes::BODY, "Body"),
            (FrameSourceTypes::AUDIO, "Audio"),
        ];
        if self.is_empty() {
            return write!(f, "None");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Set of face features requested from the face tracker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceFrameFeatures(pub u32);

impl FaceFrameFeatures {
    pub const NONE: FaceFrameFeatures = FaceFrameFeatures(0);
    pub const BOUNDING_BOX_IN_INFRARED_SPACE: FaceFrameFeatures = FaceFrameFeatures(0x001);
    pub const POINTS_IN_INFRARED_SPACE: FaceFrameFeatures = FaceFrameFeatures(0x002);
    pub const BOUNDING_BOX_IN_COLOR_SPACE: FaceFrameFeatures = FaceFrameFeatures(0x004);
    pub const POINTS_IN_COLOR_SPACE: FaceFrameFeatures = FaceFrameFeatures(0x008);
    pub const ROTATION_ORIENTATION: FaceFrameFeatures = FaceFrameFeatures(0x010);
    pub const HAPPY: FaceFrameFeatures = FaceFrameFeatures(0x020);
    pub const RIGHT_EYE_CLOSED: FaceFrameFeatures = FaceFrameFeatures(0x040);
    pub const LEFT_EYE_CLOSED: FaceFrameFeatures = FaceFrameFeatures(0x080);
    pub const MOUTH_OPEN: FaceFrameFeatures = FaceFrameFeatures(0x100);
    pub const MOUTH_MOVED: FaceFrameFeatures = FaceFrameFeatures(0x200);
    pub const LOOKING_AWAY: FaceFrameFeatures = FaceFrameFeatures(0x400);
    pub const GLASSES: FaceFrameFeatures = FaceFrameFeatures(0x800);
    pub const FACE_ENGAGEMENT: FaceFrameFeatures = FaceFrameFeatures(0x1000);

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn contains(self, other: FaceFrameFeatures) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for FaceFrameFeatures {
    type Output = FaceFrameFeatures;

    fn bitor(self, rhs: FaceFrameFeatures) -> FaceFrameFeatures {
        FaceFrameFeatures(self.0 | rhs.0)
    }
}
