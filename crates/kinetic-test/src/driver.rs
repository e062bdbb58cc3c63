//! Driver-thread simulator
//!
//! A real sensor driver produces frames on its own thread and raises
//! availability callbacks asynchronously. This simulator does the same:
//! it writes the newest packet into a shared slot, overwriting any packet
//! the consumer has not picked up yet, and flips the availability flag on
//! start and stop. The consumer never blocks on the slot.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use kinetic_core::FrameSourceTypes;
use kinetic_frame::MultiSourceFrame;
use kinetic_state::{AvailabilityFlag, MultiSourceReader};
use parking_lot::Mutex;

use crate::scene::SceneConfig;
use crate::simulator::ModernSimulator;

type FrameSlot = Arc<Mutex<Option<MultiSourceFrame>>>;

/// Consumer side of the driver thread
#[derive(Clone, Default)]
pub struct SharedFrameReader {
    slot: FrameSlot,
    contended: Arc<AtomicU64>,
}

impl SharedFrameReader {
    /// Reader with no producer attached
    pub fn detached() -> Self {
        Self::default()
    }

    /// Polls that found the slot locked by the producer
    pub fn contended(&self) -> u64 {
        self.contended.load(Ordering::Relaxed)
    }

    /// Hand a packet to the slot directly, replacing any pending one
    pub fn publish(&self, packet: MultiSourceFrame) {
        *self.slot.lock() = Some(packet);
    }
}

impl MultiSourceReader for SharedFrameReader {
    fn acquire_latest_frame(&mut self) -> Option<MultiSourceFrame> {
        match self.slot.try_lock() {
            Some(mut pending) => pending.take(),
            None => {
                self.contended.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }
}

/// Producer thread handle
pub struct DriverThread {
    running: Arc<AtomicBool>,
    availability: AvailabilityFlag,
    handle: Option<JoinHandle<u64>>,
}

impl DriverThread {
    /// Start producing a packet every `interval` into a fresh slot
    pub fn spawn(
        config: SceneConfig,
        sources: FrameSourceTypes,
        interval: Duration,
        availability: AvailabilityFlag,
    ) -> (DriverThread, SharedFrameReader) {
        let reader = SharedFrameReader::default();
        let driver = Self::attach(&reader, config, sources, interval, availability);
        (driver, reader)
    }

    /// Start producing into the slot behind an existing reader
    pub fn attach(
        reader: &SharedFrameReader,
        config: SceneConfig,
        sources: FrameSourceTypes,
        interval: Duration,
        availability: AvailabilityFlag,
    ) -> DriverThread {
        let running = Arc::new(AtomicBool::new(true));
        let slot = reader.slot.clone();
        let flag = running.clone();
        let handle = thread::spawn(move || {
            let mut simulator = ModernSimulator::new(config, sources);
            let mut produced = 0u64;
            while flag.load(Ordering::Acquire) {
                if let Some(packet) = simulator.acquire_latest_frame() {
                    *slot.lock() = Some(packet);
                    produced += 1;
                }
                thread::sleep(interval);
            }
            produced
        });

        availability.set(true);
        tracing::debug!(?interval, "driver thread started");
        DriverThread {
            running,
            availability,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop the thread and report the sensor gone; returns packets produced
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        self.running.store(false, Ordering::Release);
        let produced = match self.handle.take() {
            Some(handle) => handle.join().unwrap_or(0),
            None => 0,
        };
        self.availability.set(false);
        produced
    }
}

impl Drop for DriverThread {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_detached_reader_is_empty() {
        let mut reader = SharedFrameReader::detached();
        assert!(reader.acquire_latest_frame().is_none());
        reader.publish(MultiSourceFrame::default());
        assert!(reader.acquire_latest_frame().is_some());
        assert!(reader.acquire_latest_frame().is_none());
    }

    #[test]
    fn test_locked_slot_does_not_block() {
        let mut reader = SharedFrameReader::detached();
        reader.publish(MultiSourceFrame::default());
        let slot = reader.slot.clone();
        let guard = slot.lock();
        assert!(reader.acquire_latest_frame().is_none());
        assert_eq!(reader.contended(), 1);
        drop(guard);
        assert!(reader.acquire_latest_frame().is_some());
    }

    #[test]
    fn test_thread_produces_and_toggles_availability() {
        let availability = AvailabilityFlag::default();
        let (driver, mut reader) = DriverThread::spawn(
            SceneConfig::calm(),
            FrameSourceTypes::BODY,
            Duration::from_millis(1),
            availability.clone(),
        );
        assert!(availability.get());
        assert!(driver.is_running());

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut received = None;
        while received.is_none() && Instant::now() < deadline {
            received = reader.acquire_latest_frame();
            thread::sleep(Duration::from_millis(1));
        }
        assert!(received.is_some_and(|packet| packet.body.is_some()));

        assert!(driver.stop() >= 1);
        assert!(!availability.get());
    }
}
