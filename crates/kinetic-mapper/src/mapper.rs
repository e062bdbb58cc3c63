//! The coordinate mapper contract shared by both sensor generations

use std::fmt;

use kinetic_core::{CameraSpacePoint, ColorSpacePoint, DepthSpacePoint, Size};

/// Conversions between camera, depth and color spaces
///
/// Batch forms walk both slices index-wise and stop at the shorter one;
/// the return value is the number of elements written. Use
/// [`CheckedMapping`](crate::CheckedMapping) to turn a length mismatch
/// into an error instead.
///
/// Frame-wide forms take a raw depth buffer laid out at the depth
/// resolution and fill an output laid out at the target space's
/// resolution.
pub trait CoordinateMapper: fmt::Debug + Send + Sync {
    /// Depth image resolution the mapper is bound to
    fn depth_size(&self) -> Size;

    /// Color image resolution the mapper is bound to
    fn color_size(&self) -> Size;

    fn map_camera_point_to_color_space(&self, point: CameraSpacePoint) -> ColorSpacePoint;

    fn map_camera_point_to_depth_space(&self, point: CameraSpacePoint) -> DepthSpacePoint;

    fn map_depth_point_to_camera_space(&self, point: DepthSpacePoint, depth: u16)
        -> CameraSpacePoint;

    fn map_depth_point_to_color_space(&self, point: DepthSpacePoint, depth: u16)
        -> ColorSpacePoint;

    fn map_camera_points_to_color_space(
        &self,
        camera_points: &[CameraSpacePoint],
        color_points: &mut [ColorSpacePoint],
    ) -> usize {
        let count = camera_points.len().min(color_points.len());
        for i in 0..count {
            color_points[i] = self.map_camera_point_to_color_space(camera_points[i]);
        }
        count
    }

    fn map_camera_points_to_depth_space(
        &self,
        camera_points: &[CameraSpacePoint],
        depth_points: &mut [DepthSpacePoint],
    ) -> usize {
        let count = camera_points.len().min(depth_points.len());
        for i in 0..count {
            depth_points[i] = self.map_camera_point_to_depth_space(camera_points[i]);
        }
        count
    }

    fn map_depth_points_to_camera_space(
        &self,
        depth_points: &[DepthSpacePoint],
        depths: &[u16],
        camera_points: &mut [CameraSpacePoint],
    ) -> usize {
        let count = depth_points.len().min(depths.len()).min(camera_points.len());
        for i in 0..count {
            camera_points[i] = self.map_depth_point_to_camera_space(depth_points[i], depths[i]);
        }
        count
    }

    fn map_depth_points_to_color_space(
        &self,
        depth_points: &[DepthSpacePoint],
        depths: &[u16],
        color_points: &mut [ColorSpacePoint],
    ) -> usize {
        let count = depth_points.len().min(depths.len()).min(color_points.len());
        for i in 0..count {
            color_points[i] = self.map_depth_point_to_color_space(depth_points[i], depths[i]);
        }
        count
    }

    /// Map every depth pixel to camera space; output sized to the depth frame
    fn map_depth_frame_to_camera_space(
        &self,
        depth_frame: &[u16],
        camera_points: &mut [CameraSpacePoint],
    ) -> usize;

    /// Map every depth pixel to color space; output sized to the depth frame
    fn map_depth_frame_to_color_space(
        &self,
        depth_frame: &[u16],
        color_points: &mut [ColorSpacePoint],
    ) -> usize;

    /// Map every color pixel to camera space; output sized to the color frame
    fn map_color_frame_to_camera_space(
        &self,
        depth_frame: &[u16],
        camera_points: &mut [CameraSpacePoint],
    ) -> usize;

    /// Map every color pixel to depth space; output sized to the color frame
    fn map_color_frame_to_depth_space(
        &self,
        depth_frame: &[u16],
        depth_points: &mut [DepthSpacePoint],
    ) -> usize;
}
