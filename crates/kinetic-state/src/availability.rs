//! Device availability signal shared with driver callbacks

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The one value driver threads may write
///
/// Clones share the same flag. Driver callbacks call [`set`](Self::set);
/// the engine reads it during `update`.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityFlag {
    inner: Arc<AtomicBool>,
}

impl AvailabilityFlag {
    pub fn new(available: bool) -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(available)),
        }
    }

    #[inline]
    pub fn set(&self, available: bool) {
        self.inner.store(available, Ordering::Release);
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }
}

/// Last availability seen by `update`, for one-shot change detection
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityEdge {
    last: bool,
}

impl AvailabilityEdge {
    /// Record `current`; true when it differs from the previous value
    #[inline]
    pub fn observe(&mut self, current: bool) -> bool {
        let changed = current != self.last;
        self.last = current;
        changed
    }

    pub fn last(&self) -> bool {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let flag = AvailabilityFlag::new(false);
        let driver = flag.clone();
        driver.set(true);
        assert!(flag.get());
    }

    #[test]
    fn test_set_from_other_thread() {
        let flag = AvailabilityFlag::default();
        let driver = flag.clone();
        thread::spawn(move || driver.set(true)).join().unwrap();
        assert!(flag.get());
    }

    #[test]
    fn test_edge_fires_once() {
        let mut edge = AvailabilityEdge::default();
        assert!(!edge.observe(false));
        assert!(edge.observe(true));
        assert!(!edge.observe(true));
        assert!(edge.observe(false));
    }
}
