//! End-to-end scenario runs
//!
//! A scenario opens a full session on a simulated probe and drives the
//! tick/draw loop for a number of host frames, recording what the
//! session reported along the way.

use std::time::Duration;

use kinetic_core::{FrameSourceTypes, KineticResult, Size};
use kinetic_runtime::{Session, SessionConfig};
use kinetic_state::FrameStateEngine;
use kinetic_visual::CaptureTarget;

use crate::simulator::SimulatedProbe;

/// Summary of one scenario run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioReport {
    pub frames: u64,
    pub updates: u64,
    /// Union of every redrawn source set
    pub redrawn: FrameSourceTypes,
    /// Active player index after each reported update
    pub active_history: Vec<Option<u8>>,
    pub depth_uploads: usize,
    pub color_uploads: usize,
}

impl ScenarioReport {
    pub fn active_changes(&self) -> usize {
        self.active_history.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

/// Session plus capture target driven at a fixed frame time
pub struct ScenarioRunner {
    session: Session,
    target: CaptureTarget,
    frame_time: Duration,
}

impl ScenarioRunner {
    pub fn open(config: SessionConfig, mut probe: SimulatedProbe, display: Option<Size>) -> KineticResult<Self> {
        let session = Session::open(config, &mut probe, display)?;
        Ok(ScenarioRunner {
            session,
            target: CaptureTarget::default(),
            frame_time: Duration::from_micros(16_667),
        })
    }

    pub fn with_frame_time(mut self, frame_time: Duration) -> Self {
        self.frame_time = frame_time;
        self
    }

    /// Run `frames` host frames of tick then draw
    pub fn run(&mut self, frames: u64) -> KineticResult<ScenarioReport> {
        let mut report = ScenarioReport::default();
        for _ in 0..frames {
            report.frames += 1;
            if self.session.tick()? {
                report.updates += 1;
                report.active_history.push(self.session.engine().active_player_index());
            }
            report.redrawn |= self.session.draw(&mut self.target, self.frame_time);
        }
        report.depth_uploads = self.target.depth_uploads;
        report.color_uploads = self.target.color_uploads;
        Ok(report)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn target(&self) -> &CaptureTarget {
        &self.target
    }
}
