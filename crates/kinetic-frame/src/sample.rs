//! Lazy per-pixel view over the depth and body-index buffers

use std::iter::FusedIterator;

use kinetic_core::NO_PLAYER;

/// Reliable depth interval of the latest depth frame (millimeters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepthRange {
    pub min: u16,
    pub max: u16,
}

impl DepthRange {
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// Width of the interval, 0 when the bounds are inverted
    #[inline]
    pub fn span(&self) -> u16 {
        self.max.saturating_sub(self.min)
    }

    #[inline]
    pub fn contains(&self, depth: u16) -> bool {
        self.min <= depth && depth <= self.max
    }
}

/// One depth pixel with its player slot and the reliable range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthSample {
    pub index: usize,
    pub x: u32,
    pub y: u32,
    pub depth: u16,
    pub player_index: u8,
    pub min_reliable_depth: u16,
    pub max_reliable_depth: u16,
}

impl DepthSample {
    #[inline]
    pub fn is_valid_depth(&self) -> bool {
        self.min_reliable_depth <= self.depth && self.depth <= self.max_reliable_depth
    }

    #[inline]
    pub fn has_player(&self) -> bool {
        self.player_index != NO_PLAYER
    }
}

/// Iterator produced by `SourceBuffers::depth_samples`
///
/// Nothing is stored; every traversal reads the buffers as they are now.
#[derive(Debug, Clone)]
pub struct DepthSamples<'a> {
    depth: &'a [u16],
    body_index: &'a [u8],
    width: usize,
    range: DepthRange,
    index: usize,
}

impl<'a> DepthSamples<'a> {
    pub fn new(depth: &'a [u16], body_index: &'a [u8], width: u32, range: DepthRange) -> Self {
        Self {
            depth,
            body_index,
            width: (width as usize).max(1),
            range,
            index: 0,
        }
    }

    pub fn empty() -> Self {
        Self::new(&[], &[], 1, DepthRange::default())
    }
}

impl Iterator for DepthSamples<'_> {
    type Item = DepthSample;

    fn next(&mut self) -> Option<DepthSample> {
        let index = self.index;
        let depth = *self.depth.get(index)?;
        self.index += 1;
        Some(DepthSample {
            index,
            x: (index % self.width) as u32,
            y: (index / self.width) as u32,
            depth,
            player_index: self.body_index.get(index).copied().unwrap_or(NO_PLAYER),
            min_reliable_depth: self.range.min,
            max_reliable_depth: self.range.max,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.depth.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DepthSamples<'_> {}

impl FusedIterator for DepthSamples<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_coordinates() {
        let depth = [100u16, 200, 300, 400, 500, 600];
        let body = [0u8, NO_PLAYER, 1, NO_PLAYER, NO_PLAYER, 2];
        let samples: Vec<_> = DepthSamples::new(&depth, &body, 3, DepthRange::new(150, 550)).collect();
        assert_eq!(samples.len(), 6);
        assert_eq!((samples[4].x, samples[4].y), (1, 1));
        assert!(samples[0].has_player());
        assert!(!samples[1].has_player());
        assert!(!samples[0].is_valid_depth());
        assert!(samples[1].is_valid_depth());
        assert!(!samples[5].is_valid_depth());
    }

    #[test]
    fn test_empty_view() {
        assert_eq!(DepthSamples::empty().count(), 0);
    }

    #[test]
    fn test_span_saturates() {
        assert_eq!(DepthRange::new(500, 4500).span(), 4000);
        assert_eq!(DepthRange::new(500, 400).span(), 0);
    }

    proptest! {
        #[test]
        fn prop_validity_matches_range(depth in any::<u16>(), min in any::<u16>(), max in any::<u16>()) {
            let depths = [depth];
            let mut view = DepthSamples::new(&depths, &[], 1, DepthRange::new(min, max));
            let sample = view.next().unwrap();
            prop_assert_eq!(sample.is_valid_depth(), min <= depth && depth <= max);
            prop_assert_eq!(sample.is_valid_depth(), DepthRange::new(min, max).contains(depth));
        }
    }
}
