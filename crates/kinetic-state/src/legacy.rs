//! Legacy backend: three independently polled streams
//!
//! The legacy API hands out color, depth and skeleton frames on their
//! own schedules. A new frame is only reported once all three have
//! advanced since the previous report.

use kinetic_core::KineticResult;
use kinetic_frame::LegacySkeletonFrame;
use kinetic_mapper::CoordinateMapper;

use crate::{EngineConfig, EngineCore, FrameSourceHandle, FrameStateEngine, LegacySensor};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StreamGate {
    color: bool,
    depth: bool,
    skeleton: bool,
}

impl StreamGate {
    fn is_open(&self) -> bool {
        self.color && self.depth && self.skeleton
    }
}

#[derive(Debug)]
pub struct LegacyEngine {
    core: EngineCore,
    gate: StreamGate,
}

impl LegacyEngine {
    pub fn new(config: EngineConfig, mapper: Box<dyn CoordinateMapper>) -> Self {
        Self {
            core: EngineCore::new(config, mapper),
            gate: StreamGate::default(),
        }
    }

    fn apply_skeleton_frame(&mut self, frame: Option<LegacySkeletonFrame>) -> bool {
        let Some(frame) = frame else {
            return false;
        };
        self.core
            .apply_bodies(&frame.skeletons, |body, skeleton| body.update_from_skeleton(skeleton));
        true
    }

    fn poll(&mut self, sensor: &mut dyn LegacySensor) -> bool {
        // Availability follows the running state, not a callback
        self.core.availability().set(sensor.is_running());
        let availability_changed = self.core.take_availability_edge();

        let buffers = self.core.buffers_mut();
        self.gate.color |= buffers.decode_legacy_color(sensor.open_next_color_frame());
        self.gate.depth |= buffers.decode_legacy_depth(sensor.open_next_depth_frame());
        self.gate.skeleton |= self.apply_skeleton_frame(sensor.open_next_skeleton_frame());

        if self.gate.is_open() {
            self.gate = StreamGate::default();
            return true;
        }
        availability_changed
    }
}

impl FrameStateEngine for LegacyEngine {
    fn core(&self) -> &EngineCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EngineCore {
        &mut self.core
    }

    fn is_legacy(&self) -> bool {
        true
    }

    fn update(&mut self, source: FrameSourceHandle<'_>) -> KineticResult<bool> {
        self.core.ensure_streaming()?;
        match source {
            FrameSourceHandle::Legacy(sensor) => Ok(self.poll(sensor)),
            FrameSourceHandle::Modern { .. } => {
                tracing::warn!("modern frame source passed to the legacy engine");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_body::LegacySkeleton;
    use kinetic_core::{CameraSpacePoint, FrameSourceTypes, Size};
    use kinetic_frame::{pack_legacy_depth, LegacyColorFrame, LegacyDepthFrame};
    use kinetic_mapper::{LegacyColorFormat, LegacyDepthFormat, PinholeMapper};
    use kinetic_visual::{CaptureTarget, DepthImageMode};

    const SIZE: Size = Size {
        width: 4,
        height: 2,
    };

    #[derive(Default)]
    struct Scripted {
        running: bool,
        color: Vec<Option<LegacyColorFrame>>,
        depth: Vec<Option<LegacyDepthFrame>>,
        skeleton: Vec<Option<LegacySkeletonFrame>>,
    }

    fn next<T>(queue: &mut Vec<Option<T>>) -> Option<T> {
        if queue.is_empty() {
            None
        } else {
            queue.remove(0)
        }
    }

    impl LegacySensor for Scripted {
        fn is_running(&self) -> bool {
            self.running
        }
        fn open_next_color_frame(&mut self) -> Option<LegacyColorFrame> {
            next(&mut self.color)
        }
        fn open_next_depth_frame(&mut self) -> Option<LegacyDepthFrame> {
            next(&mut self.depth)
        }
        fn open_next_skeleton_frame(&mut self) -> Option<LegacySkeletonFrame> {
            next(&mut self.skeleton)
        }
    }

    fn color() -> Option<LegacyColorFrame> {
        Some(LegacyColorFrame {
            size: SIZE,
            data: vec![128u8; SIZE.area() * 4].into(),
        })
    }

    fn depth(slot: Option<u8>) -> Option<LegacyDepthFrame> {
        Some(LegacyDepthFrame {
            size: SIZE,
            min_depth: 800,
            max_depth: 4000,
            data: vec![pack_legacy_depth(2000, slot); SIZE.area()],
        })
    }

    fn skeletons() -> Option<LegacySkeletonFrame> {
        Some(LegacySkeletonFrame {
            skeletons: vec![
                LegacySkeleton::untracked(),
                LegacySkeleton::tracked_at(77, CameraSpacePoint::new(0.1, 0.0, 2.2)),
            ],
        })
    }

    fn engine() -> LegacyEngine {
        let mapper = PinholeMapper::legacy(LegacyDepthFormat::default(), LegacyColorFormat::default());
        let mut engine = LegacyEngine::new(EngineConfig::default(), Box::new(mapper));
        engine.start().unwrap();
        engine
    }

    #[test]
    fn test_reports_only_when_all_three_advanced() {
        let mut engine = engine();
        let mut sensor = Scripted {
            running: false,
            color: vec![color(), None, None],
            depth: vec![None, depth(None), None],
            skeleton: vec![None, None, skeletons()],
        };
        assert!(!engine.update(FrameSourceHandle::legacy(&mut sensor)).unwrap());
        assert!(!engine.update(FrameSourceHandle::legacy(&mut sensor)).unwrap());
        assert!(engine.update(FrameSourceHandle::legacy(&mut sensor)).unwrap());
        // Gate reset after the report
        assert!(!engine.update(FrameSourceHandle::legacy(&mut sensor)).unwrap());
    }

    #[test]
    fn test_availability_from_running_state() {
        let mut engine = engine();
        let mut sensor = Scripted {
            running: true,
            ..Default::default()
        };
        assert!(engine.update(FrameSourceHandle::legacy(&mut sensor)).unwrap());
        assert!(engine.is_available());
        assert!(!engine.update(FrameSourceHandle::legacy(&mut sensor)).unwrap());
        sensor.running = false;
        assert!(engine.update(FrameSourceHandle::legacy(&mut sensor)).unwrap());
        assert!(!engine.is_available());
    }

    #[test]
    fn test_skeleton_selection_and_player_lookup() {
        let mut engine = engine();
        let mut sensor = Scripted {
            running: true,
            color: vec![color()],
            depth: vec![depth(Some(1))],
            skeleton: vec![skeletons()],
        };
        assert!(engine.update(FrameSourceHandle::legacy(&mut sensor)).unwrap());
        assert!(engine.is_legacy());
        assert_eq!(engine.active_player_index(), Some(1));
        assert_eq!(engine.active_player().map(|b| b.tracking_id().0), Some(77));
        assert_eq!(engine.depth_at(0, 0), Some(2000));
        assert_eq!(engine.player_index_at(0, 0), Some(1));
        assert!(engine.active_player_face().is_none());
    }

    #[test]
    fn test_render_tints_active_player() {
        let mut engine = engine();
        engine.set_depth_image_mode(DepthImageMode::USER_COLOR);
        let mut sensor = Scripted {
            running: true,
            color: vec![color()],
            depth: vec![depth(Some(1))],
            skeleton: vec![skeletons()],
        };
        engine.update(FrameSourceHandle::legacy(&mut sensor)).unwrap();
        let mut target = CaptureTarget::default();
        let redrawn = engine.render(&mut target);
        assert_eq!(
            redrawn,
            FrameSourceTypes::COLOR | FrameSourceTypes::DEPTH | FrameSourceTypes::BODY_INDEX
        );
        let gray = kinetic_core::ColorBgra::gray(kinetic_visual::depth_intensity(
            2000,
            kinetic_frame::DepthRange::new(800, 4000),
            false,
        ));
        assert_eq!(target.depth[0], gray * engine.user_colors().colors()[0]);
    }
}
