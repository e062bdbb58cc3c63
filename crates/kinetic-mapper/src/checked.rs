//! Length-checked batch mapping
//!
//! The plain batch operations stop at the shorter slice without
//! complaint. These wrappers reject mismatched lengths up front.

use kinetic_core::{
    CameraSpacePoint, ColorSpacePoint, DepthSpacePoint, KineticError, KineticResult,
};

use crate::CoordinateMapper;

#[inline]
fn require_equal(input: usize, output: usize) -> KineticResult<()> {
    if input != output {
        return Err(KineticError::LengthMismatch { input, output });
    }
    Ok(())
}

/// Strict variants of the batch and frame-wide mapping operations
pub trait CheckedMapping: CoordinateMapper {
    fn try_map_camera_points_to_color_space(
        &self,
        camera_points: &[CameraSpacePoint],
        color_points: &mut [ColorSpacePoint],
    ) -> KineticResult<usize> {
        require_equal(camera_points.len(), color_points.len())?;
        Ok(self.map_camera_points_to_color_space(camera_points, color_points))
    }

    fn try_map_camera_points_to_depth_space(
        &self,
        camera_points: &[CameraSpacePoint],
        depth_points: &mut [DepthSpacePoint],
    ) -> KineticResult<usize> {
        require_equal(camera_points.len(), depth_points.len())?;
        Ok(self.map_camera_points_to_depth_space(camera_points, depth_points))
    }

    fn try_map_depth_points_to_camera_space(
        &self,
        depth_points: &[DepthSpacePoint],
        depths: &[u16],
        camera_points: &mut [CameraSpacePoint],
    ) -> KineticResult<usize> {
        require_equal(depth_points.len(), depths.len())?;
        require_equal(depth_points.len(), camera_points.len())?;
        Ok(self.map_depth_points_to_camera_space(depth_points, depths, camera_points))
    }

    fn try_map_depth_points_to_color_space(
        &self,
        depth_points: &[DepthSpacePoint],
        depths: &[u16],
        color_points: &mut [ColorSpacePoint],
    ) -> KineticResult<usize> {
        require_equal(depth_points.len(), depths.len())?;
        require_equal(depth_points.len(), color_points.len())?;
        Ok(self.map_depth_points_to_color_space(depth_points, depths, color_points))
    }

    fn try_map_depth_frame_to_camera_space(
        &self,
        depth_frame: &[u16],
        camera_points: &mut [CameraSpacePoint],
    ) -> KineticResult<usize> {
        let pixels = self.depth_size().area();
        require_equal(pixels, depth_frame.len())?;
        require_equal(pixels, camera_points.len())?;
        Ok(self.map_depth_frame_to_camera_space(depth_frame, camera_points))
    }

    fn try_map_depth_frame_to_color_space(
        &self,
        depth_frame: &[u16],
        color_points: &mut [ColorSpacePoint],
    ) -> KineticResult<usize> {
        let pixels = self.depth_size().area();
        require_equal(pixels, depth_frame.len())?;
        require_equal(pixels, color_points.len())?;
        Ok(self.map_depth_frame_to_color_space(depth_frame, color_points))
    }

    fn try_map_color_frame_to_camera_space(
        &self,
        depth_frame: &[u16],
        camera_points: &mut [CameraSpacePoint],
    ) -> KineticResult<usize> {
        require_equal(self.depth_size().area(), depth_frame.len())?;
        require_equal(self.color_size().area(), camera_points.len())?;
        Ok(self.map_color_frame_to_camera_space(depth_frame, camera_points))
    }

    fn try_map_color_frame_to_depth_space(
        &self,
        depth_frame: &[u16],
        depth_points: &mut [DepthSpacePoint],
    ) -> KineticResult<usize> {
        require_equal(self.depth_size().area(), depth_frame.len())?;
        require_equal(self.color_size().area(), depth_points.len())?;
        Ok(self.map_color_frame_to_depth_space(depth_frame, depth_points))
    }
}

impl<T: CoordinateMapper + ?Sized> CheckedMapping for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PinholeMapper;

    #[test]
    fn test_mismatch_rejected() {
        let mapper = PinholeMapper::modern();
        let input = [CameraSpacePoint::new(0.0, 0.0, 2.0); 4];
        let mut output = [DepthSpacePoint::default(); 3];
        let err = mapper
            .try_map_camera_points_to_depth_space(&input, &mut output)
            .unwrap_err();
        assert!(matches!(
            err,
            KineticError::LengthMismatch {
                input: 4,
                output: 3
            }
        ));
        assert_eq!(output[0], DepthSpacePoint::default(), "nothing written on error");
    }

    #[test]
    fn test_equal_lengths_pass() {
        let mapper = PinholeMapper::modern();
        let input = [CameraSpacePoint::new(0.1, 0.1, 2.0); 3];
        let mut output = [ColorSpacePoint::default(); 3];
        assert_eq!(
            mapper
                .try_map_camera_points_to_color_space(&input, &mut output)
                .unwrap(),
            3
        );
    }

    #[test]
    fn test_dyn_mapper() {
        let mapper: Box<dyn CoordinateMapper> = Box::new(PinholeMapper::modern());
        let frame = vec![1000u16; 10];
        let mut out = vec![CameraSpacePoint::default(); 10];
        assert!(mapper
            .try_map_depth_frame_to_camera_space(&frame, &mut out)
            .is_err());
    }
}
