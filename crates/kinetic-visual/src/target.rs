//! Graphics collaborator boundary

use kinetic_core::{ColorBgra, Size};

use crate::MarkerSprite;

/// Receives finished images from the compositor
///
/// Implementations own the actual textures. Every call hands over a
/// complete image; nothing is streamed.
pub trait GraphicsTarget {
    /// Color image, 4 bytes per pixel in B, G, R, A order
    fn upload_color(&mut self, size: Size, bgra: &[u8]);

    /// Depth visualization, markers already stamped in
    fn upload_depth(&mut self, size: Size, pixels: &[ColorBgra]);

    /// Top-left positions of the joint markers drawn this frame
    fn draw_overlay(&mut self, sprite: &MarkerSprite, positions: &[(i32, i32)]) {
        let _ = (sprite, positions);
    }
}

/// Target that discards everything, for headless sessions
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTarget;

impl GraphicsTarget for NullTarget {
    fn upload_color(&mut self, _size: Size, _bgra: &[u8]) {}

    fn upload_depth(&mut self, _size: Size, _pixels: &[ColorBgra]) {}
}

/// Target that keeps a copy of the last upload of each kind
#[derive(Debug, Clone, Default)]
pub struct CaptureTarget {
    pub color_size: Size,
    pub color: Vec<u8>,
    pub depth_size: Size,
    pub depth: Vec<ColorBgra>,
    pub overlay: Vec<(i32, i32)>,
    pub color_uploads: usize,
    pub depth_uploads: usize,
}

impl GraphicsTarget for CaptureTarget {
    fn upload_color(&mut self, size: Size, bgra: &[u8]) {
        self.color_size = size;
        self.color.clear();
        self.color.extend_from_slice(bgra);
        self.color_uploads += 1;
    }

    fn upload_depth(&mut self, size: Size, pixels: &[ColorBgra]) {
        self.depth_size = size;
        self.depth.clear();
        self.depth.extend_from_slice(pixels);
        self.depth_uploads += 1;
    }

    fn draw_overlay(&mut self, _sprite: &MarkerSprite, positions: &[(i32, i32)]) {
        self.overlay.clear();
        self.overlay.extend_from_slice(positions);
    }
}
