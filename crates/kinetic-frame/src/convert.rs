//! Pixel format conversion into the internal layouts

use kinetic_core::NO_PLAYER;

use crate::ColorImageFormat;

/// Bytes per pixel of the internal color format
pub const COLOR_BYTES_PER_PIXEL: usize = 4;

/// Low bits of a legacy depth sample that carry the player index
pub const PLAYER_INDEX_BITS: u32 = 3;
const PLAYER_INDEX_MASK: i16 = (1 << PLAYER_INDEX_BITS) - 1;

/// Convert `pixels` worth of native color data into B, G, R, A bytes
///
/// `src` must hold at least `pixels * format.bytes_per_pixel()` bytes and
/// `dst` at least `pixels * 4`.
pub fn convert_color(format: ColorImageFormat, src: &[u8], dst: &mut [u8], pixels: usize) {
    let dst = &mut dst[..pixels * COLOR_BYTES_PER_PIXEL];
    match format {
        ColorImageFormat::Bgra => dst.copy_from_slice(&src[..pixels * COLOR_BYTES_PER_PIXEL]),
        ColorImageFormat::Rgba => {
            for (out, px) in dst
                .chunks_exact_mut(COLOR_BYTES_PER_PIXEL)
                .zip(src.chunks_exact(COLOR_BYTES_PER_PIXEL))
            {
                out[0] = px[2];
                out[1] = px[1];
                out[2] = px[0];
                out[3] = px[3];
            }
        }
        ColorImageFormat::Yuy2 => {
            // One Y0 U Y1 V quad covers two output pixels
            for (out, quad) in dst.chunks_exact_mut(8).zip(src.chunks_exact(4)) {
                let (u, v) = (quad[1], quad[3]);
                write_bgra(&mut out[..4], yuv_to_rgb(quad[0], u, v));
                write_bgra(&mut out[4..], yuv_to_rgb(quad[2], u, v));
            }
        }
    }
}

#[inline]
fn write_bgra(out: &mut [u8], (r, g, b): (u8, u8, u8)) {
    out[0] = b;
    out[1] = g;
    out[2] = r;
    out[3] = u8::MAX;
}

/// BT.601 studio-swing YUV to RGB, integer arithmetic
#[inline]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let c = i32::from(y) - 16;
    let d = i32::from(u) - 128;
    let e = i32::from(v) - 128;
    let clamp = |x: i32| (x >> 8).clamp(0, 255) as u8;
    (
        clamp(298 * c + 409 * e + 128),
        clamp(298 * c - 100 * d - 208 * e + 128),
        clamp(298 * c + 516 * d + 128),
    )
}

/// Split a legacy packed depth sample into millimeters and a player slot
#[inline]
pub fn unpack_legacy_depth(packed: i16) -> (u16, u8) {
    let depth = (packed as u16) >> PLAYER_INDEX_BITS;
    let player = (packed & PLAYER_INDEX_MASK) as u8;
    let slot = if player == 0 { NO_PLAYER } else { player - 1 };
    (depth, slot)
}

/// Build a legacy packed depth sample; `slot` of `None` means no player
#[inline]
pub fn pack_legacy_depth(depth: u16, slot: Option<u8>) -> i16 {
    let player = slot.map_or(0, |s| i16::from(s + 1) & PLAYER_INDEX_MASK);
    ((depth << PLAYER_INDEX_BITS) as i16) | player
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bgra_copied() {
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut dst = [0u8; 8];
        convert_color(ColorImageFormat::Bgra, &src, &mut dst, 2);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_rgba_swizzled() {
        let src = [10u8, 20, 30, 40];
        let mut dst = [0u8; 4];
        convert_color(ColorImageFormat::Rgba, &src, &mut dst, 1);
        assert_eq!(dst, [30, 20, 10, 40]);
    }

    #[test]
    fn test_yuy2_gray() {
        // Mid gray with neutral chroma
        let src = [128u8, 128, 128, 128];
        let mut dst = [0u8; 8];
        convert_color(ColorImageFormat::Yuy2, &src, &mut dst, 2);
        assert_eq!(dst[0], dst[1]);
        assert_eq!(dst[1], dst[2]);
        assert_eq!(dst[3], 255);
        assert_eq!(&dst[..4], &dst[4..]);
    }

    #[test]
    fn test_yuv_extremes() {
        assert_eq!(yuv_to_rgb(16, 128, 128), (0, 0, 0));
        assert_eq!(yuv_to_rgb(235, 128, 128), (255, 255, 255));
    }

    #[test]
    fn test_unpack_legacy_depth() {
        assert_eq!(unpack_legacy_depth(pack_legacy_depth(1500, None)), (1500, NO_PLAYER));
        assert_eq!(unpack_legacy_depth(pack_legacy_depth(1500, Some(0))), (1500, 0));
        assert_eq!(unpack_legacy_depth((2000 << 3) | 6), (2000, 5));
    }

    proptest! {
        #[test]
        fn prop_legacy_depth_packing(depth in 0u16..4096, slot in proptest::option::of(0u8..6)) {
            let (d, s) = unpack_legacy_depth(pack_legacy_depth(depth, slot));
            prop_assert_eq!(d, depth);
            prop_assert_eq!(s, slot.unwrap_or(NO_PLAYER));
        }
    }
}
