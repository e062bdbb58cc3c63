//! Per-source decoders
//!
//! Every decoder takes `Option<Frame>`. `None` is the normal "nothing new
//! this tick" case and returns `false` without touching any buffer. A
//! frame that cannot be stored (shape change, truncated data) is logged
//! and also reported as no update.

use kinetic_core::{FrameSourceTypes, KineticError, KineticResult, Size, NO_PLAYER};

use crate::{
    convert_color, unpack_legacy_depth, BodyIndexFrame, ColorFrame, ColorImageFormat, DepthFrame,
    DepthRange, DepthSamples, FaceFrame, FaceFrameResult, FrameBuffer, InfraredFrame, LegacyColorFrame,
    LegacyDepthFrame, LongExposureInfraredFrame, COLOR_BYTES_PER_PIXEL,
};

/// Decoded state of every image source plus the dirty set
#[derive(Debug, Clone)]
pub struct SourceBuffers {
    color: FrameBuffer<u8>,
    depth: FrameBuffer<u16>,
    body_index: FrameBuffer<u8>,
    infrared: FrameBuffer<u16>,
    long_exposure_infrared: FrameBuffer<u16>,
    reliable_range: DepthRange,
    face: Option<FaceFrameResult>,
    dirty: FrameSourceTypes,
}

fn accept(result: KineticResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "frame dropped");
            false
        }
    }
}

impl SourceBuffers {
    pub fn new() -> Self {
        Self {
            color: FrameBuffer::with_channels(FrameSourceTypes::COLOR, COLOR_BYTES_PER_PIXEL),
            depth: FrameBuffer::new(FrameSourceTypes::DEPTH),
            body_index: FrameBuffer::new(FrameSourceTypes::BODY_INDEX),
            infrared: FrameBuffer::new(FrameSourceTypes::INFRARED),
            long_exposure_infrared: FrameBuffer::new(FrameSourceTypes::LONG_EXPOSURE_INFRARED),
            reliable_range: DepthRange::default(),
            face: None,
            dirty: FrameSourceTypes::NONE,
        }
    }

    // ---- Modern decoders ----

    pub fn decode_color(&mut self, frame: Option<ColorFrame>) -> bool {
        let Some(frame) = frame else {
            return false;
        };
        let pixels = frame.size.area();
        let needed = pixels * frame.format.bytes_per_pixel();
        if frame.data.len() < needed {
            return accept(Err(KineticError::FrameTooShort {
                expected: needed,
                actual: frame.data.len(),
            }));
        }
        let ok = accept(self.color.write_with(frame.size, 0, |dst| {
            convert_color(frame.format, &frame.data, dst, pixels)
        }));
        if ok {
            self.dirty |= FrameSourceTypes::COLOR;
        }
        ok
    }

    pub fn decode_depth(&mut self, frame: Option<DepthFrame>) -> bool {
        let Some(frame) = frame else {
            return false;
        };
        if !accept(self.depth.write(frame.size, &frame.data, 0)) {
            return false;
        }
        self.prefill_body_index(frame.size);
        self.reliable_range = DepthRange::new(frame.min_reliable_distance, frame.max_reliable_distance);
        self.dirty |= FrameSourceTypes::DEPTH;
        true
    }

    pub fn decode_body_index(&mut self, frame: Option<BodyIndexFrame>) -> bool {
        let Some(frame) = frame else {
            return false;
        };
        let ok = accept(self.body_index.write(frame.size, &frame.data, NO_PLAYER));
        if ok {
            self.dirty |= FrameSourceTypes::BODY_INDEX;
        }
        ok
    }

    pub fn decode_infrared(&mut self, frame: Option<InfraredFrame>) -> bool {
        let Some(frame) = frame else {
            return false;
        };
        let ok = accept(self.infrared.write(frame.size, &frame.data, 0));
        if ok {
            self.dirty |= FrameSourceTypes::INFRARED;
        }
        ok
    }

    pub fn decode_long_exposure_infrared(&mut self, frame: Option<LongExposureInfraredFrame>) -> bool {
        let Some(frame) = frame else {
            return false;
        };
        let ok = accept(self.long_exposure_infrared.write(frame.size, &frame.data, 0));
        if ok {
            self.dirty |= FrameSourceTypes::LONG_EXPOSURE_INFRARED;
        }
        ok
    }

    /// Store the latest face result; a frame without a result clears it
    pub fn decode_face(&mut self, frame: Option<FaceFrame>) -> bool {
        let Some(frame) = frame else {
            return false;
        };
        self.face = frame.result;
        true
    }

    // ---- Legacy decoders ----

    pub fn decode_legacy_color(&mut self, frame: Option<LegacyColorFrame>) -> bool {
        self.decode_color(frame.map(|f| ColorFrame::new(f.size, ColorImageFormat::Bgra, f.data)))
    }

    /// Unpack depth and player slot into the shared depth and body-index buffers
    pub fn decode_legacy_depth(&mut self, frame: Option<LegacyDepthFrame>) -> bool {
        let Some(frame) = frame else {
            return false;
        };
        let pixels = frame.size.area();
        if frame.data.len() < pixels {
            return accept(Err(KineticError::FrameTooShort {
                expected: pixels,
                actual: frame.data.len(),
            }));
        }
        // Validate both shapes before writing either
        if !accept(self.depth.ensure_sized(frame.size, 0).map(|_| ()))
            || !accept(self.body_index.ensure_sized(frame.size, NO_PLAYER).map(|_| ()))
        {
            return false;
        }
        let depth = self.depth.as_mut_slice();
        let body_index = self.body_index.as_mut_slice();
        for (i, &packed) in frame.data[..pixels].iter().enumerate() {
            let (mm, slot) = unpack_legacy_depth(packed);
            depth[i] = mm;
            body_index[i] = slot;
        }
        self.reliable_range = DepthRange::new(frame.min_depth, frame.max_depth);
        self.dirty |= FrameSourceTypes::DEPTH | FrameSourceTypes::BODY_INDEX;
        true
    }

    /// Depth-only sessions still get a well-defined player lookup
    fn prefill_body_index(&mut self, size: Size) {
        if self.body_index.is_sized() {
            return;
        }
        if let Err(err) = self.body_index.ensure_sized(size, NO_PLAYER) {
            tracing::warn!(error = %err, "body index prefill skipped");
        }
    }

    // ---- Dirty tracking ----

    pub fn dirty(&self) -> FrameSourceTypes {
        self.dirty
    }

    pub fn mark_dirty(&mut self, sources: FrameSourceTypes) {
        self.dirty |= sources;
    }

    /// Return and clear the dirty set
    pub fn take_dirty(&mut self) -> FrameSourceTypes {
        std::mem::take(&mut self.dirty)
    }

    // ---- Accessors ----

    pub fn color(&self) -> &FrameBuffer<u8> {
        &self.color
    }

    /// Mutable color bytes for the post-process hook
    pub fn color_mut(&mut self) -> &mut [u8] {
        self.color.as_mut_slice()
    }

    pub fn depth(&self) -> &FrameBuffer<u16> {
        &self.depth
    }

    pub fn body_index(&self) -> &FrameBuffer<u8> {
        &self.body_index
    }

    pub fn infrared(&self) -> &FrameBuffer<u16> {
        &self.infrared
    }

    pub fn long_exposure_infrared(&self) -> &FrameBuffer<u16> {
        &self.long_exposure_infrared
    }

    pub fn color_size(&self) -> Size {
        self.color.size().unwrap_or(Size::ZERO)
    }

    pub fn depth_size(&self) -> Size {
        self.depth.size().unwrap_or(Size::ZERO)
    }

    pub fn reliable_range(&self) -> DepthRange {
        self.reliable_range
    }

    pub fn face(&self) -> Option<&FaceFrameResult> {
        self.face.as_ref()
    }

    /// Depth at a pixel, `None` outside the image or before the first frame
    pub fn depth_at(&self, x: i32, y: i32) -> Option<u16> {
        let index = self.depth_size().index_of(x, y)?;
        self.depth.as_slice().get(index).copied()
    }

    /// Player slot byte at a depth pixel (`NO_PLAYER` where nobody is)
    pub fn player_index_at(&self, x: i32, y: i32) -> Option<u8> {
        let size = self.body_index.size()?;
        let index = size.index_of(x, y)?;
        self.body_index.as_slice().get(index).copied()
    }

    /// Lazy per-pixel view, empty before the first depth frame
    pub fn depth_samples(&self) -> DepthSamples<'_> {
        match self.depth.size() {
            Some(size) => DepthSamples::new(
                self.depth.as_slice(),
                self.body_index.as_slice(),
                size.width,
                self.reliable_range,
            ),
            None => DepthSamples::empty(),
        }
    }
}

impl Default for SourceBuffers {
    fn default() -> Self {
        Self::new()
    }
}
