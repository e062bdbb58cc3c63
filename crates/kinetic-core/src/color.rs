//! Pixel colors and the default player palette

use std::ops::{Mul, MulAssign};

/// 4-byte pixel in B, G, R, A byte order (packed as `0xAARRGGBB`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct ColorBgra {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl ColorBgra {
    pub const BLACK: ColorBgra = ColorBgra::from_packed(0xFF00_0000);
    pub const WHITE: ColorBgra = ColorBgra::from_packed(0xFFFF_FFFF);
    pub const TRANSPARENT: ColorBgra = ColorBgra::from_packed(0);

    pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// From a packed `0xAARRGGBB` value
    pub const fn from_packed(argb: u32) -> Self {
        Self {
            b: (argb & 0xFF) as u8,
            g: ((argb >> 8) & 0xFF) as u8,
            r: ((argb >> 16) & 0xFF) as u8,
            a: ((argb >> 24) & 0xFF) as u8,
        }
    }

    /// Packed `0xAARRGGBB` value
    pub const fn to_packed(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// All four channels set to `intensity`
    pub const fn gray(intensity: u8) -> Self {
        Self {
            b: intensity,
            g: intensity,
            r: intensity,
            a: intensity,
        }
    }

    /// Component-wise modulation, each channel `a * b / 255` rounded down
    pub fn modulate(self, other: ColorBgra) -> ColorBgra {
        #[inline]
        fn channel(a: u8, b: u8) -> u8 {
            (a as u16 * b as u16 / 255) as u8
        }
        ColorBgra {
            b: channel(self.b, other.b),
            g: channel(self.g, other.g),
            r: channel(self.r, other.r),
            a: channel(self.a, other.a),
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }
}

impl Mul for ColorBgra {
    type Output = ColorBgra;

    fn mul(self, rhs: ColorBgra) -> ColorBgra {
        self.modulate(rhs)
    }
}

impl MulAssign for ColorBgra {
    fn mul_assign(&mut self, rhs: ColorBgra) {
        *self = self.modulate(rhs);
    }
}

/// Palette used to tint players, slot 0 is always the active player
pub const DEFAULT_USER_COLORS: [ColorBgra; 6] = [
    ColorBgra::from_packed(0xFFFF_FF00), // yellow
    ColorBgra::from_packed(0xFF00_FFFF), // cyan
    ColorBgra::from_packed(0xFFFF_00FF), // magenta
    ColorBgra::from_packed(0xFF88_FF88), // light green
    ColorBgra::from_packed(0xFF88_88FF), // light blue
    ColorBgra::from_packed(0xFFFF_8888), // light red
];
