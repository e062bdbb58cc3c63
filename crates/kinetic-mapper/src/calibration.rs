//! Sensor calibration presets
//!
//! Intrinsics are stored at a reference resolution and scaled to the
//! stream resolution in use. The legacy generation only streams at a
//! fixed set of resolution/frame-rate combinations; the modern one
//! reports a single resolution per stream.

use kinetic_core::{CameraSpacePoint, Size};

/// Modern depth stream resolution
pub const MODERN_DEPTH_SIZE: Size = Size {
    width: 512,
    height: 424,
};
/// Modern color stream resolution
pub const MODERN_COLOR_SIZE: Size = Size {
    width: 1920,
    height: 1080,
};

/// Legacy nominal depth focal length (pixels) at 640x480
pub const LEGACY_DEPTH_FOCAL_LENGTH: f32 = 571.26;
/// Legacy nominal color focal length (pixels) at 640x480
pub const LEGACY_COLOR_FOCAL_LENGTH: f32 = 531.15;
/// Reference size for legacy intrinsics
pub const LEGACY_BASE_SIZE: Size = Size {
    width: 640,
    height: 480,
};

/// Pinhole intrinsics of one camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    /// Focal length X (pixels)
    pub fx: f32,
    /// Focal length Y (pixels)
    pub fy: f32,
    /// Principal point X (pixels)
    pub cx: f32,
    /// Principal point Y (pixels)
    pub cy: f32,
    /// Image size these values refer to
    pub size: Size,
}

impl Intrinsics {
    pub fn new(fx: f32, fy: f32, cx: f32, cy: f32, size: Size) -> Self {
        Self {
            fx,
            fy,
            cx,
            cy,
            size,
        }
    }

    /// Centered principal point, square pixels
    pub fn centered(focal_length: f32, size: Size) -> Self {
        Self::new(
            focal_length,
            focal_length,
            size.width as f32 / 2.0,
            size.height as f32 / 2.0,
            size,
        )
    }

    /// Rescale to another resolution of the same sensor
    pub fn scaled(&self, to: Size) -> Self {
        let sx = to.width as f32 / self.size.width as f32;
        let sy = to.height as f32 / self.size.height as f32;
        Self {
            fx: self.fx * sx,
            fy: self.fy * sy,
            cx: self.cx * sx,
            cy: self.cy * sy,
            size: to,
        }
    }

    /// Project a camera-space point; `None` behind or at the sensor plane
    #[inline]
    pub fn project(&self, point: CameraSpacePoint) -> Option<(f32, f32)> {
        if !point.is_finite() || point.z <= 0.0 {
            return None;
        }
        let u = self.cx + self.fx * point.x / point.z;
        let v = self.cy - self.fy * point.y / point.z;
        Some((u, v))
    }

    /// Back-project a pixel at distance `z` meters
    #[inline]
    pub fn unproject(&self, u: f32, v: f32, z: f32) -> CameraSpacePoint {
        CameraSpacePoint {
            x: (u - self.cx) * z / self.fx,
            y: -(v - self.cy) * z / self.fy,
            z,
        }
    }
}

/// Fixed legacy depth stream formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyDepthFormat {
    Resolution80x60Fps30,
    Resolution320x240Fps30,
    #[default]
    Resolution640x480Fps30,
}

impl LegacyDepthFormat {
    pub fn size(self) -> Size {
        match self {
            LegacyDepthFormat::Resolution80x60Fps30 => Size::new(80, 60),
            LegacyDepthFormat::Resolution320x240Fps30 => Size::new(320, 240),
            LegacyDepthFormat::Resolution640x480Fps30 => Size::new(640, 480),
        }
    }

    pub fn fps(self) -> u32 {
        30
    }
}

/// Fixed legacy color stream formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyColorFormat {
    #[default]
    RgbResolution640x480Fps30,
    RgbResolution1280x960Fps12,
    YuvResolution640x480Fps15,
}

impl LegacyColorFormat {
    pub fn size(self) -> Size {
        match self {
            LegacyColorFormat::RgbResolution640x480Fps30 => Size::new(640, 480),
            LegacyColorFormat::RgbResolution1280x960Fps12 => Size::new(1280, 960),
            LegacyColorFormat::YuvResolution640x480Fps15 => Size::new(640, 480),
        }
    }

    pub fn fps(self) -> u32 {
        match self {
            LegacyColorFormat::RgbResolution640x480Fps30 => 30,
            LegacyColorFormat::RgbResolution1280x960Fps12 => 12,
            LegacyColorFormat::YuvResolution640x480Fps15 => 15,
        }
    }
}

/// Everything a pinhole mapper needs for one sensor session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorCalibration {
    /// Depth camera intrinsics
    pub depth: Intrinsics,
    /// Color camera intrinsics
    pub color: Intrinsics,
    /// Position of the depth camera origin in color camera space (meters)
    pub depth_to_color: CameraSpacePoint,
    /// Depth pixel coordinates are whole numbers (legacy API)
    pub integer_depth_pixels: bool,
}

impl SensorCalibration {
    /// Modern generation defaults
    pub fn modern() -> Self {
        Self {
            depth: Intrinsics::new(365.456, 365.456, 254.878, 205.395, MODERN_DEPTH_SIZE),
            color: Intrinsics::new(1081.372, 1081.372, 959.5, 539.5, MODERN_COLOR_SIZE),
            depth_to_color: CameraSpacePoint::new(-0.052, 0.0, 0.0),
            integer_depth_pixels: false,
        }
    }

    /// Legacy generation at one of its fixed stream formats
    pub fn legacy(depth_format: LegacyDepthFormat, color_format: LegacyColorFormat) -> Self {
        let depth = Intrinsics::centered(LEGACY_DEPTH_FOCAL_LENGTH, LEGACY_BASE_SIZE)
            .scaled(depth_format.size());
        let color = Intrinsics::centered(LEGACY_COLOR_FOCAL_LENGTH, LEGACY_BASE_SIZE)
            .scaled(color_format.size());
        Self {
            depth,
            color,
            depth_to_color: CameraSpacePoint::new(0.025, 0.0, 0.0),
            integer_depth_pixels: true,
        }
    }
}

impl Default for SensorCalibration {
    fn default() -> Self {
        Self::modern()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_center() {
        let intr = Intrinsics::centered(500.0, Size::new(640, 480));
        let (u, v) = intr.project(CameraSpacePoint::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!((u, v), (320.0, 240.0));
    }

    #[test]
    fn test_project_behind_sensor() {
        let intr = Intrinsics::centered(500.0, Size::new(640, 480));
        assert!(intr.project(CameraSpacePoint::new(0.0, 0.0, 0.0)).is_none());
        assert!(intr.project(CameraSpacePoint::new(0.0, 0.0, -1.0)).is_none());
        assert!(intr.project(CameraSpacePoint::INVALID).is_none());
    }

    #[test]
    fn test_y_up() {
        let intr = Intrinsics::centered(500.0, Size::new(640, 480));
        let (_, v) = intr.project(CameraSpacePoint::new(0.0, 0.5, 2.0)).unwrap();
        assert!(v < 240.0, "points above the optical axis map to upper rows");
    }

    #[test]
    fn test_scaled() {
        let base = Intrinsics::centered(LEGACY_DEPTH_FOCAL_LENGTH, LEGACY_BASE_SIZE);
        let half = base.scaled(Size::new(320, 240));
        assert!((half.fx - LEGACY_DEPTH_FOCAL_LENGTH / 2.0).abs() < 1e-3);
        assert_eq!(half.cx, 160.0);
        assert_eq!(half.cy, 120.0);
    }

    #[test]
    fn test_legacy_formats() {
        let calib = SensorCalibration::legacy(
            LegacyDepthFormat::Resolution320x240Fps30,
            LegacyColorFormat::RgbResolution1280x960Fps12,
        );
        assert_eq!(calib.depth.size, Size::new(320, 240));
        assert_eq!(calib.color.size, Size::new(1280, 960));
        assert!(calib.integer_depth_pixels);
        assert_eq!(LegacyColorFormat::RgbResolution1280x960Fps12.fps(), 12);
    }
}
