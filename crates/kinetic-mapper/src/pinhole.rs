//! Pinhole-model mapper used by both sensor generations

use kinetic_core::{CameraSpacePoint, ColorSpacePoint, DepthSpacePoint, Size};

use crate::{CoordinateMapper, LegacyColorFormat, LegacyDepthFormat, SensorCalibration};

/// Depth values are millimeters
const MILLIMETERS_PER_METER: f32 = 1000.0;

/// Coordinate mapper computed from calibration data
#[derive(Debug, Clone)]
pub struct PinholeMapper {
    calibration: SensorCalibration,
}

impl PinholeMapper {
    pub fn new(calibration: SensorCalibration) -> Self {
        Self { calibration }
    }

    /// Mapper for the modern generation
    pub fn modern() -> Self {
        Self::new(SensorCalibration::modern())
    }

    /// Mapper for the legacy generation at its fixed stream formats
    pub fn legacy(depth_format: LegacyDepthFormat, color_format: LegacyColorFormat) -> Self {
        Self::new(SensorCalibration::legacy(depth_format, color_format))
    }

    pub fn calibration(&self) -> &SensorCalibration {
        &self.calibration
    }

    #[inline]
    fn depth_pixel(&self, point: DepthSpacePoint) -> DepthSpacePoint {
        if self.calibration.integer_depth_pixels {
            DepthSpacePoint::new(point.x.trunc(), point.y.trunc())
        } else {
            point
        }
    }

    #[inline]
    fn to_color_camera(&self, point: CameraSpacePoint) -> CameraSpacePoint {
        let t = self.calibration.depth_to_color;
        CameraSpacePoint::new(point.x + t.x, point.y + t.y, point.z + t.z)
    }

    #[inline]
    fn from_color_camera(&self, point: CameraSpacePoint) -> CameraSpacePoint {
        let t = self.calibration.depth_to_color;
        CameraSpacePoint::new(point.x - t.x, point.y - t.y, point.z - t.z)
    }

    /// Visit every valid depth pixel that lands inside the first `limit`
    /// color pixels, with its color index, source pixel, depth and camera point
    fn scatter_depth_into_color<F>(&self, depth_frame: &[u16], limit: usize, mut visit: F)
    where
        F: FnMut(usize, DepthSpacePoint, u16, CameraSpacePoint),
    {
        let color_size = self.color_size();
        let depth_size = self.depth_size();
        let pixels = depth_frame.len().min(depth_size.area());
        let width = depth_size.width as usize;

        for (i, &depth) in depth_frame[..pixels].iter().enumerate() {
            if depth == 0 {
                continue;
            }
            let source = DepthSpacePoint::new((i % width) as f32, (i / width) as f32);
            let camera = self.map_depth_point_to_camera_space(source, depth);
            if !camera.is_finite() {
                continue;
            }
            let color = self.map_camera_point_to_color_space(camera);
            if !color.is_finite() {
                continue;
            }
            let Some(index) = color_size.index_of(color.x.round() as i32, color.y.round() as i32)
            else {
                continue;
            };
            if index < limit {
                visit(index, source, depth, camera);
            }
        }
    }
}

impl Default for PinholeMapper {
    fn default() -> Self {
        Self::modern()
    }
}

impl CoordinateMapper for PinholeMapper {
    fn depth_size(&self) -> Size {
        self.calibration.depth.size
    }

    fn color_size(&self) -> Size {
        self.calibration.color.size
    }

    fn map_camera_point_to_color_space(&self, point: CameraSpacePoint) -> ColorSpacePoint {
        match self.calibration.color.project(self.to_color_camera(point)) {
            Some((u, v)) => ColorSpacePoint::new(u, v),
            None => ColorSpacePoint::INVALID,
        }
    }

    fn map_camera_point_to_depth_space(&self, point: CameraSpacePoint) -> DepthSpacePoint {
        match self.calibration.depth.project(point) {
            Some((u, v)) => self.depth_pixel(DepthSpacePoint::new(u, v)),
            None => DepthSpacePoint::INVALID,
        }
    }

    fn map_depth_point_to_camera_space(
        &self,
        point: DepthSpacePoint,
        depth: u16,
    ) -> CameraSpacePoint {
        if depth == 0 || !point.is_finite() {
            return CameraSpacePoint::INVALID;
        }
        let pixel = self.depth_pixel(point);
        let z = depth as f32 / MILLIMETERS_PER_METER;
        self.calibration.depth.unproject(pixel.x, pixel.y, z)
    }

    fn map_depth_point_to_color_space(&self, point: DepthSpacePoint, depth: u16) -> ColorSpacePoint {
        let camera = self.map_depth_point_to_camera_space(point, depth);
        if !camera.is_finite() {
            return ColorSpacePoint::INVALID;
        }
        self.map_camera_point_to_color_space(camera)
    }

    fn map_depth_frame_to_camera_space(
        &self,
        depth_frame: &[u16],
        camera_points: &mut [CameraSpacePoint],
    ) -> usize {
        let size = self.depth_size();
        let count = depth_frame.len().min(camera_points.len()).min(size.area());
        let width = size.width as usize;
        for i in 0..count {
            let pixel = DepthSpacePoint::new((i % width) as f32, (i / width) as f32);
            camera_points[i] = self.map_depth_point_to_camera_space(pixel, depth_frame[i]);
        }
        count
    }

    fn map_depth_frame_to_color_space(
        &self,
        depth_frame: &[u16],
        color_points: &mut [ColorSpacePoint],
    ) -> usize {
        let size = self.depth_size();
        let count = depth_frame.len().min(color_points.len()).min(size.area());
        let width = size.width as usize;
        for i in 0..count {
            let pixel = DepthSpacePoint::new((i % width) as f32, (i / width) as f32);
            color_points[i] = self.map_depth_point_to_color_space(pixel, depth_frame[i]);
        }
        count
    }

    fn map_color_frame_to_camera_space(
        &self,
        depth_frame: &[u16],
        camera_points: &mut [CameraSpacePoint],
    ) -> usize {
        let count = camera_points.len().min(self.color_size().area());
        camera_points[..count].fill(CameraSpacePoint::INVALID);
        // Occlusion: the nearest sample wins, the first one on ties
        self.scatter_depth_into_color(depth_frame, count, |index, _, _, camera| {
            let current = camera_points[index];
            if !current.is_finite() || camera.z < current.z {
                camera_points[index] = camera;
            }
        });
        count
    }

    fn map_color_frame_to_depth_space(
        &self,
        depth_frame: &[u16],
        depth_points: &mut [DepthSpacePoint],
    ) -> usize {
        let depth_size = self.depth_size();
        let count = depth_points.len().min(self.color_size().area());
        depth_points[..count].fill(DepthSpacePoint::INVALID);
        self.scatter_depth_into_color(depth_frame, count, |index, source, depth, _| {
            let current = depth_points[index];
            let nearer = !current.is_finite()
                || depth_size
                    .index_of(current.x as i32, current.y as i32)
                    .and_then(|i| depth_frame.get(i))
                    .map_or(true, |&held| depth < held);
            if nearer {
                depth_points[index] = source;
            }
        });
        count
    }
}

impl PinholeMapper {
    /// Inverse of the color projection at a known distance, used by tests
    /// and by hosts that already know the depth of a color pixel
    pub fn map_color_point_to_camera_space(&self, point: ColorSpacePoint, z: f32) -> CameraSpacePoint {
        if !point.is_finite() || z <= 0.0 {
            return CameraSpacePoint::INVALID;
        }
        let t = self.calibration.depth_to_color;
        let in_color = self.calibration.color.unproject(point.x, point.y, z + t.z);
        self.from_color_camera(in_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LEGACY_DEPTH_FOCAL_LENGTH;
    use proptest::prelude::*;

    #[test]
    fn test_zero_depth_is_invalid() {
        let mapper = PinholeMapper::modern();
        let p = mapper.map_depth_point_to_camera_space(DepthSpacePoint::new(10.0, 10.0), 0);
        assert!(!p.is_finite());
        let c = mapper.map_depth_point_to_color_space(DepthSpacePoint::new(10.0, 10.0), 0);
        assert!(!c.is_finite());
    }

    #[test]
    fn test_behind_sensor_is_invalid() {
        let mapper = PinholeMapper::modern();
        let d = mapper.map_camera_point_to_depth_space(CameraSpacePoint::new(0.0, 0.0, -1.0));
        assert_eq!(d, DepthSpacePoint::INVALID);
    }

    #[test]
    fn test_legacy_truncates_depth_pixels() {
        let mapper = PinholeMapper::legacy(LegacyDepthFormat::default(), LegacyColorFormat::default());
        let d = mapper.map_camera_point_to_depth_space(CameraSpacePoint::new(0.123, -0.077, 1.9));
        assert_eq!(d.x, d.x.trunc());
        assert_eq!(d.y, d.y.trunc());
    }

    #[test]
    fn test_batch_truncates_to_shorter() {
        let mapper = PinholeMapper::modern();
        let input = [CameraSpacePoint::new(0.0, 0.0, 2.0); 5];
        let mut output = [DepthSpacePoint::default(); 3];
        assert_eq!(mapper.map_camera_points_to_depth_space(&input, &mut output), 3);

        let mut longer = [DepthSpacePoint::INVALID; 8];
        assert_eq!(mapper.map_camera_points_to_depth_space(&input, &mut longer), 5);
        assert!(!longer[5].is_finite(), "excess output left untouched");
    }

    #[test]
    fn test_depth_frame_to_camera_space() {
        let mapper = PinholeMapper::modern();
        let size = mapper.depth_size();
        let frame = vec![2000u16; size.area()];
        let mut out = vec![CameraSpacePoint::default(); size.area()];
        assert_eq!(mapper.map_depth_frame_to_camera_space(&frame, &mut out), size.area());
        for p in &out {
            assert!((p.z - 2.0).abs() < 1e-6);
        }
        // left column is on the negative X side
        assert!(out[0].x < 0.0);
        assert!(out[size.width as usize - 1].x > 0.0);
    }

    #[test]
    fn test_color_frame_to_depth_space_flat_wall() {
        let mapper = PinholeMapper::modern();
        let depth_size = mapper.depth_size();
        let color_size = mapper.color_size();
        let frame = vec![2500u16; depth_size.area()];
        let mut out = vec![DepthSpacePoint::default(); color_size.area()];
        assert_eq!(mapper.map_color_frame_to_depth_space(&frame, &mut out), color_size.area());

        let matched = out.iter().filter(|p| p.is_finite()).count();
        assert!(matched > 0);
        assert!(matched <= depth_size.area());
        for p in out.iter().filter(|p| p.is_finite()) {
            assert!(p.x >= 0.0 && p.x < depth_size.width as f32);
            assert!(p.y >= 0.0 && p.y < depth_size.height as f32);
        }
    }

    #[test]
    fn test_color_frame_prefers_nearest() {
        let mapper = PinholeMapper::modern();
        let depth_size = mapper.depth_size();
        let mut frame = vec![4000u16; depth_size.area()];
        let center = depth_size.index_of(256, 212).unwrap();
        frame[center] = 800;

        let color_size = mapper.color_size();
        let mut camera = vec![CameraSpacePoint::default(); color_size.area()];
        mapper.map_color_frame_to_camera_space(&frame, &mut camera);
        let near = camera.iter().filter(|p| p.is_finite() && (p.z - 0.8).abs() < 1e-3).count();
        assert!(near >= 1);
    }

    #[test]
    fn test_color_frame_outputs_agree() {
        let mapper = PinholeMapper::legacy(LegacyDepthFormat::Resolution80x60Fps30, LegacyColorFormat::default());
        let depth_size = mapper.depth_size();
        let frame: Vec<u16> = (0..depth_size.area()).map(|i| 900 + (i % 7) as u16 * 300).collect();

        let color_size = mapper.color_size();
        let mut depth_points = vec![DepthSpacePoint::default(); color_size.area()];
        let mut camera_points = vec![CameraSpacePoint::default(); color_size.area()];
        mapper.map_color_frame_to_depth_space(&frame, &mut depth_points);
        mapper.map_color_frame_to_camera_space(&frame, &mut camera_points);

        for (point, camera) in depth_points.iter().zip(&camera_points) {
            assert_eq!(point.is_finite(), camera.is_finite());
            if point.is_finite() {
                let index = depth_size.index_of(point.x as i32, point.y as i32).unwrap();
                let expected = mapper.map_depth_point_to_camera_space(*point, frame[index]);
                assert_eq!(*camera, expected);
            }
        }
    }

    #[test]
    fn test_color_frame_output_shorter_than_color_frame() {
        let mapper = PinholeMapper::modern();
        let frame = vec![2500u16; mapper.depth_size().area()];
        let mut out = vec![DepthSpacePoint::default(); 16];
        assert_eq!(mapper.map_color_frame_to_depth_space(&frame, &mut out), 16);
    }

    #[test]
    fn test_color_point_inverse() {
        let mapper = PinholeMapper::modern();
        let original = CameraSpacePoint::new(0.3, -0.2, 2.2);
        let color = mapper.map_camera_point_to_color_space(original);
        let back = mapper.map_color_point_to_camera_space(color, original.z);
        assert!(original.distance(&back) < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_modern_camera_depth_roundtrip(
            x in -1.5f32..1.5,
            y in -1.0f32..1.0,
            z in 0.5f32..4.5,
        ) {
            let mapper = PinholeMapper::modern();
            let original = CameraSpacePoint::new(x, y, z);
            let depth_point = mapper.map_camera_point_to_depth_space(original);
            let depth = (z * 1000.0).round() as u16;
            let back = mapper.map_depth_point_to_camera_space(depth_point, depth);
            prop_assert!(original.distance(&back) < 0.005, "{:?} -> {:?}", original, back);
        }

        #[test]
        fn prop_legacy_camera_depth_roundtrip(
            x in -1.5f32..1.5,
            y in -1.0f32..1.0,
            z in 0.8f32..4.0,
        ) {
            let mapper = PinholeMapper::legacy(LegacyDepthFormat::default(), LegacyColorFormat::default());
            let original = CameraSpacePoint::new(x, y, z);
            let depth_point = mapper.map_camera_point_to_depth_space(original);
            let depth = (z * 1000.0).round() as u16;
            let back = mapper.map_depth_point_to_camera_space(depth_point, depth);
            // whole-pixel truncation costs up to one pixel at distance z
            let tolerance = 1.5 * z / LEGACY_DEPTH_FOCAL_LENGTH + 0.001;
            prop_assert!(original.distance(&back) < tolerance, "{:?} -> {:?}", original, back);
        }
    }
}
