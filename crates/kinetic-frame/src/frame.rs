//! Raw frames as produced by the driver layer

use bytes::Bytes;

use kinetic_body::{BodyRecord, LegacySkeleton};
use kinetic_core::Size;

use crate::FaceFrame;

/// Native pixel layout of a color frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorImageFormat {
    #[default]
    Bgra,
    Rgba,
    /// Packed 4:2:2, two pixels per Y0 U Y1 V quad
    Yuy2,
}

impl ColorImageFormat {
    /// Bytes per pixel in the native layout
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ColorImageFormat::Bgra | ColorImageFormat::Rgba => 4,
            ColorImageFormat::Yuy2 => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorFrame {
    pub size: Size,
    pub format: ColorImageFormat,
    pub data: Bytes,
}

impl ColorFrame {
    pub fn new(size: Size, format: ColorImageFormat, data: impl Into<Bytes>) -> Self {
        Self {
            size,
            format,
            data: data.into(),
        }
    }
}

/// Depth frame; samples are millimeters
#[derive(Debug, Clone)]
pub struct DepthFrame {
    pub size: Size,
    pub min_reliable_distance: u16,
    pub max_reliable_distance: u16,
    pub data: Vec<u16>,
}

/// Per-pixel body slot, `NO_PLAYER` where nobody is
#[derive(Debug, Clone)]
pub struct BodyIndexFrame {
    pub size: Size,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct InfraredFrame {
    pub size: Size,
    pub data: Vec<u16>,
}

#[derive(Debug, Clone)]
pub struct LongExposureInfraredFrame {
    pub size: Size,
    pub data: Vec<u16>,
}

/// One record per body slot
#[derive(Debug, Clone, Default)]
pub struct BodyFrame {
    pub bodies: Vec<BodyRecord>,
}

/// Modern multiplexed packet: zero or one frame per source
#[derive(Debug, Clone, Default)]
pub struct MultiSourceFrame {
    pub body: Option<BodyFrame>,
    pub body_index: Option<BodyIndexFrame>,
    pub color: Option<ColorFrame>,
    pub depth: Option<DepthFrame>,
    pub infrared: Option<InfraredFrame>,
    pub long_exposure_infrared: Option<LongExposureInfraredFrame>,
}

/// What a modern frame source hands out per tick
#[derive(Debug, Clone, Default)]
pub struct ModernAcquisition {
    pub packet: Option<MultiSourceFrame>,
    pub face: Option<FaceFrame>,
}

/// Legacy color frame, always 4 bytes per pixel B, G, R, X
#[derive(Debug, Clone)]
pub struct LegacyColorFrame {
    pub size: Size,
    pub data: Bytes,
}

/// Legacy depth frame with the player index packed into the low bits
#[derive(Debug, Clone)]
pub struct LegacyDepthFrame {
    pub size: Size,
    pub min_depth: u16,
    pub max_depth: u16,
    /// `depth << PLAYER_INDEX_BITS | player`, player 0 meaning none
    pub data: Vec<i16>,
}

#[derive(Debug, Clone, Default)]
pub struct LegacySkeletonFrame {
    pub skeletons: Vec<LegacySkeleton>,
}
