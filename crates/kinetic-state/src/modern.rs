//! Modern backend: multiplexed packets

use kinetic_core::KineticResult;
use kinetic_frame::{BodyFrame, MultiSourceFrame};
use kinetic_mapper::CoordinateMapper;

use crate::{EngineConfig, EngineCore, FrameSourceHandle, FrameStateEngine};

#[derive(Debug)]
pub struct ModernEngine {
    core: EngineCore,
}

impl ModernEngine {
    pub fn new(config: EngineConfig, mapper: Box<dyn CoordinateMapper>) -> Self {
        Self {
            core: EngineCore::new(config, mapper),
        }
    }

    /// Fan a packet out to the decoders; true when a packet arrived
    fn apply_packet(&mut self, packet: Option<MultiSourceFrame>) -> bool {
        let Some(packet) = packet else {
            return false;
        };
        self.apply_body_frame(packet.body);
        let buffers = self.core.buffers_mut();
        buffers.decode_body_index(packet.body_index);
        buffers.decode_color(packet.color);
        buffers.decode_depth(packet.depth);
        buffers.decode_infrared(packet.infrared);
        buffers.decode_long_exposure_infrared(packet.long_exposure_infrared);
        true
    }

    fn apply_body_frame(&mut self, frame: Option<BodyFrame>) -> bool {
        let Some(frame) = frame else {
            return false;
        };
        self.core
            .apply_bodies(&frame.bodies, |body, record| body.update_from_record(record));
        true
    }
}

impl FrameStateEngine for ModernEngine {
    fn core(&self) -> &EngineCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EngineCore {
        &mut self.core
    }

    fn is_legacy(&self) -> bool {
        false
    }

    fn update(&mut self, source: FrameSourceHandle<'_>) -> KineticResult<bool> {
        self.core.ensure_streaming()?;
        let mut updated = self.core.take_availability_edge();
        match source {
            FrameSourceHandle::Modern { reader, faces } => {
                updated |= self.apply_packet(reader.acquire_latest_frame());
                if let Some(faces) = faces {
                    updated |= self.core.buffers_mut().decode_face(faces.acquire_latest_frame());
                }
            }
            FrameSourceHandle::Legacy(_) => {
                tracing::warn!("legacy frame source passed to the modern engine");
            }
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MultiSourceReader;
    use kinetic_body::BodyRecord;
    use kinetic_core::{CameraSpacePoint, FrameSourceTypes, Size, TrackingId};
    use kinetic_frame::DepthFrame;
    use kinetic_mapper::PinholeMapper;
    use kinetic_visual::CaptureTarget;

    #[derive(Default)]
    struct Queue(Vec<MultiSourceFrame>);

    impl MultiSourceReader for Queue {
        fn acquire_latest_frame(&mut self) -> Option<MultiSourceFrame> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0))
            }
        }
    }

    fn engine() -> ModernEngine {
        let mut engine = ModernEngine::new(EngineConfig::default(), Box::new(PinholeMapper::modern()));
        engine.start().unwrap();
        engine
    }

    fn bodies_at(points: &[(f32, f32)]) -> BodyFrame {
        BodyFrame {
            bodies: points
                .iter()
                .enumerate()
                .map(|(i, &(x, z))| {
                    BodyRecord::tracked_at(TrackingId::new(i as u64 + 1), CameraSpacePoint::new(x, 0.0, z))
                })
                .collect(),
        }
    }

    #[test]
    fn test_update_requires_streaming() {
        let mut engine = ModernEngine::new(EngineConfig::default(), Box::new(PinholeMapper::modern()));
        let mut reader = Queue::default();
        assert!(engine.update(FrameSourceHandle::modern(&mut reader)).is_err());
        engine.start().unwrap();
        assert!(engine.update(FrameSourceHandle::modern(&mut reader)).is_ok());
        engine.close();
        assert!(engine.update(FrameSourceHandle::modern(&mut reader)).is_err());
    }

    #[test]
    fn test_no_packet_no_update() {
        let mut engine = engine();
        let mut reader = Queue::default();
        assert!(!engine.update(FrameSourceHandle::modern(&mut reader)).unwrap());
    }

    #[test]
    fn test_empty_packet_counts() {
        let mut engine = engine();
        let mut reader = Queue(vec![MultiSourceFrame::default()]);
        assert!(engine.update(FrameSourceHandle::modern(&mut reader)).unwrap());
    }

    #[test]
    fn test_availability_edge_alone() {
        let mut engine = engine();
        let mut reader = Queue::default();
        engine.availability_handle().set(true);
        assert!(engine.update(FrameSourceHandle::modern(&mut reader)).unwrap());
        assert!(!engine.update(FrameSourceHandle::modern(&mut reader)).unwrap());
        assert!(engine.is_available());
    }

    #[test]
    fn test_body_packet_selects() {
        let mut engine = engine();
        let mut reader = Queue(vec![MultiSourceFrame {
            body: Some(bodies_at(&[(3.0, 2.0), (1.0, 2.0), (-1.0, 2.0)])),
            ..Default::default()
        }]);
        engine.update(FrameSourceHandle::modern(&mut reader)).unwrap();
        assert_eq!(engine.players().len(), 6);
        assert_eq!(engine.active_player_index(), Some(1));
        assert_eq!(engine.active_player().map(|b| b.tracking_id()), Some(TrackingId::new(2)));
        assert!(!engine.had_player());
    }

    #[test]
    fn test_render_reports_depth() {
        let mut engine = engine();
        let size = Size::new(4, 2);
        let mut reader = Queue(vec![MultiSourceFrame {
            depth: Some(DepthFrame {
                size,
                min_reliable_distance: 500,
                max_reliable_distance: 4500,
                data: vec![2500; size.area()],
            }),
            ..Default::default()
        }]);
        engine.update(FrameSourceHandle::modern(&mut reader)).unwrap();
        let mut target = CaptureTarget::default();
        assert_eq!(engine.render(&mut target), FrameSourceTypes::DEPTH);
        assert_eq!(engine.depth_image_size(), size);
        assert_eq!(engine.player_index_at(0, 0), Some(kinetic_core::NO_PLAYER));
        assert_eq!(engine.render(&mut target), FrameSourceTypes::NONE);
    }

    #[test]
    fn test_legacy_handle_ignored() {
        struct Idle;
        impl crate::LegacySensor for Idle {
            fn is_running(&self) -> bool {
                true
            }
            fn open_next_color_frame(&mut self) -> Option<kinetic_frame::LegacyColorFrame> {
                None
            }
            fn open_next_depth_frame(&mut self) -> Option<kinetic_frame::LegacyDepthFrame> {
                None
            }
            fn open_next_skeleton_frame(&mut self) -> Option<kinetic_frame::LegacySkeletonFrame> {
                None
            }
        }
        let mut engine = engine();
        let mut sensor = Idle;
        assert!(!engine.update(FrameSourceHandle::legacy(&mut sensor)).unwrap());
    }
}
