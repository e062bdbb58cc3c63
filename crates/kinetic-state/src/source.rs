//! Frame source collaborators
//!
//! Every acquisition is non-blocking: `None` means nothing new right now.
//! Frames are returned by value, so the driver's buffer is released as
//! soon as the decoder drops them.

use kinetic_core::TrackingId;
use kinetic_frame::{FaceFrame, LegacyColorFrame, LegacyDepthFrame, LegacySkeletonFrame, MultiSourceFrame};

/// Modern multiplexed reader
pub trait MultiSourceReader {
    fn acquire_latest_frame(&mut self) -> Option<MultiSourceFrame>;
}

/// Modern face tracker bound to one tracking id at a time
pub trait FaceReader {
    fn acquire_latest_frame(&mut self) -> Option<FaceFrame>;

    fn tracking_id(&self) -> TrackingId;

    fn set_tracking_id(&mut self, tracking_id: TrackingId);
}

/// Legacy sensor with three separately polled streams
pub trait LegacySensor {
    fn is_running(&self) -> bool;

    fn open_next_color_frame(&mut self) -> Option<LegacyColorFrame>;

    fn open_next_depth_frame(&mut self) -> Option<LegacyDepthFrame>;

    fn open_next_skeleton_frame(&mut self) -> Option<LegacySkeletonFrame>;
}

/// What the host hands to `update` each tick
pub enum FrameSourceHandle<'a> {
    Modern {
        reader: &'a mut dyn MultiSourceReader,
        faces: Option<&'a mut dyn FaceReader>,
    },
    Legacy(&'a mut dyn LegacySensor),
}

impl<'a> FrameSourceHandle<'a> {
    pub fn modern(reader: &'a mut dyn MultiSourceReader) -> Self {
        FrameSourceHandle::Modern {
            reader,
            faces: None,
        }
    }

    pub fn modern_with_faces(reader: &'a mut dyn MultiSourceReader, faces: &'a mut dyn FaceReader) -> Self {
        FrameSourceHandle::Modern {
            reader,
            faces: Some(faces),
        }
    }

    pub fn legacy(sensor: &'a mut dyn LegacySensor) -> Self {
        FrameSourceHandle::Legacy(sensor)
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, FrameSourceHandle::Legacy(_))
    }
}
