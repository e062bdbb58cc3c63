//! Joint marker sprite and its rasterization

use kinetic_core::{ColorBgra, DepthSpacePoint, Size};

/// Default marker edge length in pixels
pub const DEFAULT_MARKER_SIZE: u32 = 4;

/// Solid image stamped at every joint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSprite {
    size: Size,
    pixels: Vec<ColorBgra>,
}

impl MarkerSprite {
    /// Returns `None` when `pixels` does not match `size`
    pub fn new(size: Size, pixels: Vec<ColorBgra>) -> Option<Self> {
        (pixels.len() == size.area()).then_some(Self { size, pixels })
    }

    pub fn solid(size: Size, color: ColorBgra) -> Self {
        Self {
            size,
            pixels: vec![color; size.area()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixels(&self) -> &[ColorBgra] {
        &self.pixels
    }

    /// Top-left pixel when centered on `point`; `None` for sentinel points
    pub fn origin_for(&self, point: DepthSpacePoint) -> Option<(i32, i32)> {
        if !point.is_finite() {
            return None;
        }
        let x = (point.x - (self.size.width / 2) as f32).floor() as i32;
        let y = (point.y - (self.size.height / 2) as f32).floor() as i32;
        Some((x, y))
    }

    /// Stamp the sprite into `image` with its top-left at `origin`,
    /// clipped to the image. Returns the number of pixels written.
    pub fn stamp(&self, image: &mut [ColorBgra], image_size: Size, origin: (i32, i32)) -> usize {
        let mut written = 0;
        let width = self.size.width as i32;
        for (i, &color) in self.pixels.iter().enumerate() {
            // Origins far outside the image saturate instead of wrapping
            let x = origin.0.saturating_add(i as i32 % width);
            let y = origin.1.saturating_add(i as i32 / width);
            if let Some(index) = image_size.index_of(x, y) {
                if let Some(pixel) = image.get_mut(index) {
                    *pixel = color;
                    written += 1;
                }
            }
        }
        written
    }
}

impl Default for MarkerSprite {
    fn default() -> Self {
        Self::solid(Size::new(DEFAULT_MARKER_SIZE, DEFAULT_MARKER_SIZE), ColorBgra::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sprite() {
        let sprite = MarkerSprite::default();
        assert_eq!(sprite.size(), Size::new(4, 4));
        assert!(sprite.pixels().iter().all(|&p| p == ColorBgra::WHITE));
    }

    #[test]
    fn test_centered_origin() {
        let sprite = MarkerSprite::default();
        assert_eq!(sprite.origin_for(DepthSpacePoint::new(10.0, 20.0)), Some((8, 18)));
        assert_eq!(sprite.origin_for(DepthSpacePoint::INVALID), None);
    }

    #[test]
    fn test_stamp_clipped() {
        let sprite = MarkerSprite::default();
        let size = Size::new(8, 8);
        let mut image = vec![ColorBgra::BLACK; size.area()];
        assert_eq!(sprite.stamp(&mut image, size, (2, 2)), 16);
        assert_eq!(image[size.index_of(2, 2).unwrap()], ColorBgra::WHITE);
        assert_eq!(image[size.index_of(5, 5).unwrap()], ColorBgra::WHITE);
        assert_eq!(image[size.index_of(6, 6).unwrap()], ColorBgra::BLACK);

        let mut image = vec![ColorBgra::BLACK; size.area()];
        assert_eq!(sprite.stamp(&mut image, size, (-2, 6)), 4);
        assert_eq!(sprite.stamp(&mut image, size, (100, 100)), 0);
    }

    #[test]
    fn test_stamp_at_extreme_origin() {
        let sprite = MarkerSprite::default();
        let size = Size::new(8, 8);
        let mut image = vec![ColorBgra::BLACK; size.area()];
        let origin = sprite
            .origin_for(DepthSpacePoint::new(1.8e10, 205.0))
            .unwrap();
        assert_eq!(origin.0, i32::MAX);
        assert_eq!(sprite.stamp(&mut image, size, origin), 0);
        assert_eq!(sprite.stamp(&mut image, size, (i32::MAX, i32::MAX)), 0);
        assert_eq!(sprite.stamp(&mut image, size, (i32::MIN, i32::MIN)), 0);
        assert!(image.iter().all(|&p| p == ColorBgra::BLACK));
    }

    #[test]
    fn test_new_checks_length() {
        assert!(MarkerSprite::new(Size::new(2, 2), vec![ColorBgra::WHITE; 3]).is_none());
        assert!(MarkerSprite::new(Size::new(2, 2), vec![ColorBgra::WHITE; 4]).is_some());
    }
}
