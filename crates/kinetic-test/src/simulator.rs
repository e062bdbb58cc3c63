//! Sensor simulators for both hardware generations

use kinetic_core::{FaceFrameFeatures, FrameSourceTypes, KineticResult, PointF, RectI, TrackingId};
use kinetic_frame::{
    FaceFrame, FaceFrameResult, InfraredFrame, LegacyColorFrame, LegacyDepthFrame, LegacySkeletonFrame,
    MultiSourceFrame,
};
use kinetic_mapper::{LegacyColorFormat, LegacyDepthFormat, PinholeMapper};
use kinetic_runtime::{DeviceHandles, DeviceProbe};
use kinetic_state::{FaceReader, LegacySensor, MultiSourceReader};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scene::{Scene, SceneConfig};

/// Counters shared by the simulators
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulatorStats {
    pub polls: u64,
    pub delivered: u64,
    pub dropped: u64,
}

impl SimulatorStats {
    fn record(&mut self, delivered: bool) {
        self.polls += 1;
        if delivered {
            self.delivered += 1;
        } else {
            self.dropped += 1;
        }
    }
}

/// Modern multiplexed reader over a simulated scene
pub struct ModernSimulator {
    scene: Scene,
    sources: FrameSourceTypes,
    stats: SimulatorStats,
}

impl ModernSimulator {
    pub fn new(config: SceneConfig, sources: FrameSourceTypes) -> Self {
        ModernSimulator {
            scene: Scene::new(config, PinholeMapper::modern()),
            sources,
            stats: SimulatorStats::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn stats(&self) -> &SimulatorStats {
        &self.stats
    }

    /// Build the packet for the current scene step
    pub fn packet(&mut self) -> MultiSourceFrame {
        let mut packet = MultiSourceFrame::default();
        if self.sources.intersects(FrameSourceTypes::DEPTH | FrameSourceTypes::BODY_INDEX | FrameSourceTypes::INFRARED) {
            let raster = self.scene.rasterize();
            if self.sources.contains(FrameSourceTypes::DEPTH) {
                packet.depth = Some(self.scene.depth_frame(&raster));
            }
            if self.sources.contains(FrameSourceTypes::BODY_INDEX) {
                packet.body_index = Some(self.scene.body_index_frame(&raster));
            }
            if self.sources.contains(FrameSourceTypes::INFRARED) {
                // Reflectance falls off with distance
                packet.infrared = Some(InfraredFrame {
                    size: raster.size,
                    data: raster.depth.iter().map(|&mm| u16::MAX / mm.max(1)).collect(),
                });
            }
        }
        if self.sources.contains(FrameSourceTypes::COLOR) {
            packet.color = Some(self.scene.color_frame());
        }
        if self.sources.contains(FrameSourceTypes::BODY) {
            packet.body = Some(self.scene.body_frame());
        }
        packet
    }
}

impl MultiSourceReader for ModernSimulator {
    fn acquire_latest_frame(&mut self) -> Option<MultiSourceFrame> {
        self.scene.step();
        let dropped = self.scene.should_drop();
        self.stats.record(!dropped);
        if dropped {
            tracing::trace!(frame = self.scene.frame_number(), "simulated packet dropped");
            return None;
        }
        Some(self.packet())
    }
}

/// Face tracker that finds a face on its tracked subject with some probability
pub struct SimulatedFaces {
    rng: StdRng,
    features: FaceFrameFeatures,
    tracking_id: TrackingId,
    detect_rate: f64,
    stats: SimulatorStats,
}

impl SimulatedFaces {
    pub fn new(features: FaceFrameFeatures, seed: u64) -> Self {
        SimulatedFaces {
            rng: StdRng::seed_from_u64(seed),
            features,
            tracking_id: TrackingId::NONE,
            detect_rate: 0.9,
            stats: SimulatorStats::default(),
        }
    }

    pub fn with_detect_rate(mut self, detect_rate: f64) -> Self {
        self.detect_rate = detect_rate.clamp(0.0, 1.0);
        self
    }

    pub fn stats(&self) -> &SimulatorStats {
        &self.stats
    }

    fn detect(&mut self) -> Option<FaceFrameResult> {
        if self.tracking_id.is_none() || !self.rng.gen_bool(self.detect_rate) {
            return None;
        }
        let mut result = FaceFrameResult::new(self.tracking_id, self.features);
        let x = self.rng.gen_range(600..1200);
        let y = self.rng.gen_range(200..500);
        result.bounding_box_in_color_space = RectI {
            left: x,
            top: y,
            right: x + 200,
            bottom: y + 240,
        };
        for (i, point) in result.points_in_color_space.iter_mut().enumerate() {
            *point = PointF::new((x + 40 + 30 * i as i32) as f32, (y + 120) as f32);
        }
        Some(result)
    }
}

impl FaceReader for SimulatedFaces {
    fn acquire_latest_frame(&mut self) -> Option<FaceFrame> {
        let result = self.detect();
        self.stats.record(result.is_some());
        Some(FaceFrame {
            tracking_id: self.tracking_id,
            result,
        })
    }

    fn tracking_id(&self) -> TrackingId {
        self.tracking_id
    }

    fn set_tracking_id(&mut self, tracking_id: TrackingId) {
        self.tracking_id = tracking_id;
    }
}

/// Legacy sensor whose three streams become ready independently
pub struct LegacySimulator {
    scene: Scene,
    running: bool,
    color: SimulatorStats,
    depth: SimulatorStats,
    skeleton: SimulatorStats,
}

impl LegacySimulator {
    pub fn new(config: SceneConfig) -> Self {
        let mapper = PinholeMapper::legacy(LegacyDepthFormat::default(), LegacyColorFormat::default());
        LegacySimulator {
            scene: Scene::new(config, mapper),
            running: true,
            color: SimulatorStats::default(),
            depth: SimulatorStats::default(),
            skeleton: SimulatorStats::default(),
        }
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Frames delivered per stream: color, depth, skeleton
    pub fn delivered(&self) -> (u64, u64, u64) {
        (self.color.delivered, self.depth.delivered, self.skeleton.delivered)
    }
}

impl LegacySensor for LegacySimulator {
    fn is_running(&self) -> bool {
        self.running
    }

    // The color stream paces the scene
    fn open_next_color_frame(&mut self) -> Option<LegacyColorFrame> {
        self.scene.step();
        let ready = self.running && !self.scene.should_drop();
        self.color.record(ready);
        ready.then(|| self.scene.legacy_color_frame())
    }

    fn open_next_depth_frame(&mut self) -> Option<LegacyDepthFrame> {
        let ready = self.running && !self.scene.should_drop();
        self.depth.record(ready);
        if !ready {
            return None;
        }
        let raster = self.scene.rasterize();
        Some(self.scene.legacy_depth_frame(&raster))
    }

    fn open_next_skeleton_frame(&mut self) -> Option<LegacySkeletonFrame> {
        let ready = self.running && !self.scene.should_drop();
        self.skeleton.record(ready);
        ready.then(|| self.scene.skeleton_frame())
    }
}

/// Device probe backed by the simulators
#[derive(Clone, Debug)]
pub struct SimulatedProbe {
    pub legacy_attached: bool,
    pub scene: SceneConfig,
}

impl SimulatedProbe {
    pub fn modern(scene: SceneConfig) -> Self {
        SimulatedProbe {
            legacy_attached: false,
            scene,
        }
    }

    pub fn legacy(scene: SceneConfig) -> Self {
        SimulatedProbe {
            legacy_attached: true,
            scene,
        }
    }
}

impl DeviceProbe for SimulatedProbe {
    fn legacy_sensor_attached(&self) -> bool {
        self.legacy_attached
    }

    fn open_modern(
        &mut self,
        sources: FrameSourceTypes,
        face_features: FaceFrameFeatures,
    ) -> KineticResult<DeviceHandles> {
        let faces: Option<Box<dyn FaceReader>> = if face_features.is_empty() {
            None
        } else {
            Some(Box::new(SimulatedFaces::new(face_features, self.scene.seed ^ 0xFACE)))
        };
        Ok(DeviceHandles::Modern {
            reader: Box::new(ModernSimulator::new(self.scene.clone(), sources)),
            faces,
        })
    }

    fn open_legacy(&mut self) -> KineticResult<DeviceHandles> {
        Ok(DeviceHandles::Legacy {
            sensor: Box::new(LegacySimulator::new(self.scene.clone())),
        })
    }
}
