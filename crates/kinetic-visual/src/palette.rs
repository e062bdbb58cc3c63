//! Player tint palette

use kinetic_core::{ColorBgra, DEFAULT_USER_COLORS};

/// Ordered tint colors; slot 0 belongs to the active player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<ColorBgra>,
}

impl Palette {
    pub fn new(colors: Vec<ColorBgra>) -> Self {
        Self { colors }
    }

    /// Build from packed `0xAARRGGBB` values
    pub fn from_packed(packed: &[u32]) -> Self {
        Self::new(packed.iter().map(|&argb| ColorBgra::from_packed(argb)).collect())
    }

    pub fn colors(&self) -> &[ColorBgra] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a palette slot, wrapping past the end
    #[inline]
    pub fn color(&self, slot: u8) -> Option<ColorBgra> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[slot as usize % self.colors.len()])
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_USER_COLORS.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 6);
        assert_eq!(palette.color(0), Some(ColorBgra::from_packed(0xFFFF_FF00)));
        assert_eq!(palette.color(5), Some(ColorBgra::from_packed(0xFFFF_8888)));
    }

    #[test]
    fn test_wraps() {
        let palette = Palette::from_packed(&[0xFF00_0000, 0xFFFF_FFFF]);
        assert_eq!(palette.color(2), palette.color(0));
        assert_eq!(palette.color(3), Some(ColorBgra::WHITE));
    }

    #[test]
    fn test_empty() {
        assert_eq!(Palette::new(Vec::new()).color(0), None);
    }
}
