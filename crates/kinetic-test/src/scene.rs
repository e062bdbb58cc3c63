//! Seeded scene of wandering subjects
//!
//! Subjects are upright boxes in camera space. Each step they drift a
//! few centimeters; rasterizing projects them through the sensor's own
//! mapper so depth pixels, body-index pixels and joint positions agree.

use kinetic_body::{BodyRecord, LegacySkeleton};
use kinetic_core::{CameraSpacePoint, Size, TrackingId, NO_PLAYER};
use kinetic_frame::{
    pack_legacy_depth, BodyFrame, BodyIndexFrame, ColorFrame, ColorImageFormat, DepthFrame, DepthRange,
    LegacyColorFrame, LegacyDepthFrame, LegacySkeletonFrame,
};
use kinetic_mapper::{CoordinateMapper, PinholeMapper};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Half extents of a subject's box (meters)
const SUBJECT_HALF_WIDTH: f32 = 0.25;
const SUBJECT_HALF_HEIGHT: f32 = 0.9;

/// Largest depth the legacy packed format carries here
const LEGACY_MAX_DEPTH: u16 = 4095;

const MIN_SUBJECT_Z: f32 = 0.8;
const MAX_SUBJECT_Z: f32 = 3.5;
const MAX_SUBJECT_X: f32 = 1.5;

/// Scene configuration
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Number of subjects, at most six
    pub subjects: usize,
    /// Size of generated color frames
    pub color_size: Size,
    pub reliable_range: DepthRange,
    /// Depth of the back wall (millimeters)
    pub background_mm: u16,
    /// Uniform per-pixel depth noise amplitude (millimeters)
    pub noise_mm: u16,
    /// Probability that a poll returns nothing
    pub drop_rate: f64,
    /// Per-step subject drift (meters)
    pub drift: f32,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::calm()
    }
}

impl SceneConfig {
    /// Two subjects, no noise, no drops
    pub fn calm() -> Self {
        SceneConfig {
            subjects: 2,
            color_size: Size::new(160, 90),
            reliable_range: DepthRange::new(500, 4500),
            background_mm: 4000,
            noise_mm: 0,
            drop_rate: 0.0,
            drift: 0.02,
            seed: 42,
        }
    }

    /// Full house with light noise and occasional drops
    pub fn crowded() -> Self {
        SceneConfig {
            subjects: 6,
            noise_mm: 20,
            drop_rate: 0.1,
            drift: 0.05,
            ..Self::calm()
        }
    }

    /// Frequent drops and heavy noise
    pub fn flaky() -> Self {
        SceneConfig {
            subjects: 3,
            noise_mm: 40,
            drop_rate: 0.5,
            drift: 0.1,
            ..Self::calm()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_subjects(mut self, subjects: usize) -> Self {
        self.subjects = subjects;
        self
    }

    pub fn with_drop_rate(mut self, drop_rate: f64) -> Self {
        self.drop_rate = drop_rate;
        self
    }
}

/// One subject in the scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatedSubject {
    pub tracking_id: TrackingId,
    /// Center of the box; also the reference joint
    pub position: CameraSpacePoint,
    pub present: bool,
}

/// Depth and body-index pixels of one scene step
#[derive(Clone, Debug)]
pub struct SceneRaster {
    pub size: Size,
    pub depth: Vec<u16>,
    pub body_index: Vec<u8>,
}

pub struct Scene {
    config: SceneConfig,
    mapper: PinholeMapper,
    subjects: Vec<SimulatedSubject>,
    rng: StdRng,
    frame: u64,
}

impl Scene {
    pub fn new(config: SceneConfig, mapper: PinholeMapper) -> Self {
        let subjects = (0..config.subjects.min(6))
            .map(|i| SimulatedSubject {
                tracking_id: TrackingId::new(0x1000 + i as u64),
                position: CameraSpacePoint::new(-1.0 + i as f32 * 0.4, 0.0, 1.5 + i as f32 * 0.3),
                present: true,
            })
            .collect();
        Scene {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            mapper,
            subjects,
            frame: 0,
        }
    }

    /// Advance every subject by a random drift
    pub fn step(&mut self) {
        self.frame += 1;
        let drift = self.config.drift;
        if drift <= 0.0 {
            return;
        }
        for subject in &mut self.subjects {
            let dx = self.rng.gen_range(-drift..=drift);
            let dz = self.rng.gen_range(-drift..=drift);
            subject.position.x = (subject.position.x + dx).clamp(-MAX_SUBJECT_X, MAX_SUBJECT_X);
            subject.position.z = (subject.position.z + dz).clamp(MIN_SUBJECT_Z, MAX_SUBJECT_Z);
        }
    }

    /// Roll for a dropped poll
    pub fn should_drop(&mut self) -> bool {
        let rate = self.config.drop_rate;
        rate > 0.0 && self.rng.gen_bool(rate.min(1.0))
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn mapper(&self) -> &PinholeMapper {
        &self.mapper
    }

    pub fn depth_size(&self) -> Size {
        self.mapper.depth_size()
    }

    pub fn frame_number(&self) -> u64 {
        self.frame
    }

    pub fn subjects(&self) -> &[SimulatedSubject] {
        &self.subjects
    }

    pub fn set_present(&mut self, slot: usize, present: bool) {
        if let Some(subject) = self.subjects.get_mut(slot) {
            subject.present = present;
        }
    }

    pub fn move_subject(&mut self, slot: usize, position: CameraSpacePoint) {
        if let Some(subject) = self.subjects.get_mut(slot) {
            subject.position = position;
        }
    }

    pub fn set_reliable_range(&mut self, range: DepthRange) {
        self.config.reliable_range = range;
    }

    /// Project the present subjects into depth and body-index pixels
    pub fn rasterize(&mut self) -> SceneRaster {
        let size = self.depth_size();
        let mut depth = vec![self.config.background_mm; size.area()];
        let mut body_index = vec![NO_PLAYER; size.area()];

        if self.config.noise_mm > 0 {
            let noise = self.config.noise_mm;
            for sample in &mut depth {
                *sample = sample.saturating_add(self.rng.gen_range(0..=noise));
            }
        }

        // Far to near so closer subjects occlude
        let mut order: Vec<usize> = (0..self.subjects.len())
            .filter(|&i| self.subjects[i].present)
            .collect();
        order.sort_by(|&a, &b| {
            self.subjects[b]
                .position
                .z
                .total_cmp(&self.subjects[a].position.z)
        });

        for slot in order {
            let p = self.subjects[slot].position;
            let top_left = self.mapper.map_camera_point_to_depth_space(CameraSpacePoint::new(
                p.x - SUBJECT_HALF_WIDTH,
                p.y + SUBJECT_HALF_HEIGHT,
                p.z,
            ));
            let bottom_right = self.mapper.map_camera_point_to_depth_space(CameraSpacePoint::new(
                p.x + SUBJECT_HALF_WIDTH,
                p.y - SUBJECT_HALF_HEIGHT,
                p.z,
            ));
            if !top_left.is_finite() || !bottom_right.is_finite() {
                continue;
            }
            let x0 = top_left.x.max(0.0) as u32;
            let y0 = top_left.y.max(0.0) as u32;
            let x1 = (bottom_right.x.max(0.0) as u32).min(size.width);
            let y1 = (bottom_right.y.max(0.0) as u32).min(size.height);
            let mm = (p.z * 1000.0) as u16;
            for y in y0..y1 {
                for x in x0..x1 {
                    let i = (y * size.width + x) as usize;
                    depth[i] = mm;
                    body_index[i] = slot as u8;
                }
            }
        }

        SceneRaster {
            size,
            depth,
            body_index,
        }
    }

    pub fn depth_frame(&self, raster: &SceneRaster) -> DepthFrame {
        DepthFrame {
            size: raster.size,
            min_reliable_distance: self.config.reliable_range.min,
            max_reliable_distance: self.config.reliable_range.max,
            data: raster.depth.clone(),
        }
    }

    pub fn body_index_frame(&self, raster: &SceneRaster) -> BodyIndexFrame {
        BodyIndexFrame {
            size: raster.size,
            data: raster.body_index.clone(),
        }
    }

    pub fn body_frame(&self) -> BodyFrame {
        BodyFrame {
            bodies: self
                .subjects
                .iter()
                .map(|s| {
                    if s.present {
                        BodyRecord::tracked_at(s.tracking_id, s.position)
                    } else {
                        BodyRecord::untracked()
                    }
                })
                .collect(),
        }
    }

    /// Flat BGRA frame whose blue channel counts frames
    pub fn color_frame(&self) -> ColorFrame {
        ColorFrame::new(self.config.color_size, ColorImageFormat::Bgra, self.color_bytes())
    }

    pub fn legacy_color_frame(&self) -> LegacyColorFrame {
        LegacyColorFrame {
            size: self.config.color_size,
            data: self.color_bytes().into(),
        }
    }

    fn color_bytes(&self) -> Vec<u8> {
        let pixel = [(self.frame % 256) as u8, 96, 64, 255];
        pixel
            .iter()
            .copied()
            .cycle()
            .take(self.config.color_size.area() * 4)
            .collect()
    }

    pub fn legacy_depth_frame(&self, raster: &SceneRaster) -> LegacyDepthFrame {
        let data = raster
            .depth
            .iter()
            .zip(&raster.body_index)
            .map(|(&mm, &slot)| {
                let slot = (slot != NO_PLAYER).then_some(slot);
                pack_legacy_depth(mm.min(LEGACY_MAX_DEPTH), slot)
            })
            .collect();
        LegacyDepthFrame {
            size: raster.size,
            min_depth: self.config.reliable_range.min,
            max_depth: self.config.reliable_range.max.min(LEGACY_MAX_DEPTH),
            data,
        }
    }

    pub fn skeleton_frame(&self) -> LegacySkeletonFrame {
        LegacySkeletonFrame {
            skeletons: self
                .subjects
                .iter()
                .map(|s| {
                    if s.present {
                        LegacySkeleton::tracked_at(s.tracking_id.0 as u32, s.position)
                    } else {
                        LegacySkeleton::untracked()
                    }
                })
                .collect(),
        }
    }

    /// Subject the selector should pick: nearest to the preferred distance, lowest slot on ties
    pub fn expected_active(&self) -> Option<u8> {
        let mut best: Option<(usize, f32)> = None;
        for (i, s) in self.subjects.iter().enumerate() {
            if !s.present {
                continue;
            }
            let score = kinetic_state::selection_score(s.position);
            if best.map_or(true, |(_, b)| score < b) {
                best = Some((i, score));
            }
        }
        best.map(|(i, _)| i as u8)
    }
}
