//! Depth quantization and player tinting

use kinetic_core::{ColorBgra, NO_PLAYER};
use kinetic_frame::DepthRange;

use crate::Palette;

/// Grayscale intensity of one depth sample
///
/// Samples below the reliable minimum are black. Above it the distance
/// from the minimum is clamped to the range, then either wrapped modulo
/// 255 or stretched linearly over the range.
#[inline]
pub fn depth_intensity(depth: u16, range: DepthRange, wrapped: bool) -> u8 {
    if depth < range.min {
        return 0;
    }
    let span = u32::from(range.span());
    let distance = u32::from(depth - range.min).min(span);
    if wrapped {
        (distance % 255) as u8
    } else if span == 0 {
        0
    } else {
        (255 * distance / span) as u8
    }
}

/// Fill `out` with the grayscale visualization of `depth`
pub fn compose_depth(depth: &[u16], range: DepthRange, wrapped: bool, out: &mut [ColorBgra]) {
    for (pixel, &sample) in out.iter_mut().zip(depth) {
        *pixel = ColorBgra::gray(depth_intensity(sample, range, wrapped));
    }
}

/// Palette slot for a body index given the active player
///
/// The active player takes slot 0 and players ranked below it shift up
/// by one. `None` for the no-player sentinel.
#[inline]
pub fn remap_player_index(body_index: u8, active: Option<u8>) -> Option<u8> {
    if body_index == NO_PLAYER {
        return None;
    }
    Some(match active {
        Some(active) if body_index == active => 0,
        Some(active) if body_index < active => body_index + 1,
        _ => body_index,
    })
}

/// Multiply each pixel by its player's palette color
///
/// Only body indices for which `is_tracked` holds are tinted.
pub fn tint_players<F>(
    out: &mut [ColorBgra],
    body_index: &[u8],
    active: Option<u8>,
    palette: &Palette,
    is_tracked: F,
) where
    F: Fn(u8) -> bool,
{
    if palette.is_empty() {
        return;
    }
    for (pixel, &index) in out.iter_mut().zip(body_index) {
        if index == NO_PLAYER || !is_tracked(index) {
            continue;
        }
        if let Some(color) = remap_player_index(index, active).and_then(|slot| palette.color(slot)) {
            *pixel *= color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RANGE: DepthRange = DepthRange {
        min: 500,
        max: 4500,
    };

    #[test]
    fn test_linear_intensity() {
        assert_eq!(depth_intensity(2500, RANGE, false), 127);
        assert_eq!(depth_intensity(500, RANGE, false), 0);
        assert_eq!(depth_intensity(4500, RANGE, false), 255);
        // Clamped to the range
        assert_eq!(depth_intensity(8000, RANGE, false), 255);
    }

    #[test]
    fn test_wrapped_intensity() {
        // 2000 mod 255
        assert_eq!(depth_intensity(2500, RANGE, true), 215);
        assert_eq!(depth_intensity(500 + 255, RANGE, true), 0);
        assert_eq!(depth_intensity(500 + 254, RANGE, true), 254);
    }

    #[test]
    fn test_below_minimum_black() {
        assert_eq!(depth_intensity(400, RANGE, false), 0);
        assert_eq!(depth_intensity(400, RANGE, true), 0);
        assert_eq!(depth_intensity(0, RANGE, false), 0);
    }

    #[test]
    fn test_zero_range() {
        let range = DepthRange::new(1000, 1000);
        assert_eq!(depth_intensity(1000, range, false), 0);
        assert_eq!(depth_intensity(3000, range, false), 0);
        assert_eq!(depth_intensity(3000, range, true), 0);
    }

    #[test]
    fn test_remap_with_active() {
        let active = Some(2);
        assert_eq!(remap_player_index(2, active), Some(0));
        assert_eq!(remap_player_index(0, active), Some(1));
        assert_eq!(remap_player_index(1, active), Some(2));
        assert_eq!(remap_player_index(3, active), Some(3));
        assert_eq!(remap_player_index(NO_PLAYER, active), None);
    }

    #[test]
    fn test_remap_without_active() {
        assert_eq!(remap_player_index(0, None), Some(0));
        assert_eq!(remap_player_index(5, None), Some(5));
    }

    #[test]
    fn test_tint_active_first() {
        let palette = Palette::default();
        let mut out = [ColorBgra::WHITE; 4];
        let body_index = [2u8, 0, 4, NO_PLAYER];
        // Slots 0..=2 tracked, 4 not
        tint_players(&mut out, &body_index, Some(2), &palette, |i| i <= 2);
        assert_eq!(out[0], palette.colors()[0]);
        assert_eq!(out[1], palette.colors()[1]);
        assert_eq!(out[2], ColorBgra::WHITE);
        assert_eq!(out[3], ColorBgra::WHITE);
    }

    #[test]
    fn test_empty_palette_disables_tint() {
        let mut out = [ColorBgra::WHITE; 1];
        tint_players(&mut out, &[0], None, &Palette::new(Vec::new()), |_| true);
        assert_eq!(out[0], ColorBgra::WHITE);
    }

    proptest! {
        #[test]
        fn prop_linear_monotonic(a in 0u16..6000, b in 0u16..6000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(depth_intensity(lo, RANGE, false) <= depth_intensity(hi, RANGE, false));
        }

        #[test]
        fn prop_remap_is_injective(active in proptest::option::of(0u8..6), a in 0u8..6, b in 0u8..6) {
            prop_assume!(a != b);
            prop_assert_ne!(remap_player_index(a, active), remap_player_index(b, active));
        }
    }
}
