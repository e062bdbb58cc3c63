//! Host session: tick, draw and runtime stats

use std::path::{Path, PathBuf};
use std::time::Duration;

use kinetic_core::{FrameSourceTypes, KineticResult, Size, TrackingId};
use kinetic_state::{FrameStateEngine, SensorEngine, SensorGeneration};
use kinetic_visual::GraphicsTarget;

use crate::{save_screenshot, DeviceHandles, DeviceProbe, DeviceSelection, RenderPlan, ScreenshotSink, SessionConfig};

/// FPS the smoothed estimate starts from
pub const INITIAL_FPS: f32 = 60.0;

/// Weight of each new frame time in the smoothed FPS
pub const FPS_SMOOTHING: f32 = 0.01;

/// Application callbacks
pub trait SessionHooks {
    /// Called after a tick that reported new sensor data
    fn on_sensor_updated(&mut self, engine: &SensorEngine) {
        let _ = engine;
    }
}

#[derive(Clone, Debug)]
pub struct RuntimeStats {
    pub ticks: u64,
    pub updates: u64,
    pub renders: u64,
    /// Smoothed frames per second
    pub fps: f32,
    pub last_redrawn: FrameSourceTypes,
}

impl Default for RuntimeStats {
    fn default() -> Self {
        RuntimeStats {
            ticks: 0,
            updates: 0,
            renders: 0,
            fps: INITIAL_FPS,
            last_redrawn: FrameSourceTypes::NONE,
        }
    }
}

impl RuntimeStats {
    fn record_frame_time(&mut self, elapsed: Duration) {
        let seconds = elapsed.as_secs_f32();
        if seconds > 0.0 {
            self.fps += (1.0 / seconds - self.fps) * FPS_SMOOTHING;
        }
    }
}

/// One sensor session
pub struct Session {
    config: SessionConfig,
    engine: SensorEngine,
    devices: DeviceHandles,
    plan: RenderPlan,
    hooks: Option<Box<dyn SessionHooks>>,
    stats: RuntimeStats,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("engine", &self.engine)
            .field("devices", &self.devices)
            .field("plan", &self.plan)
            .field("stats", &self.stats)
            .finish()
    }
}

impl Session {
    /// Detect the sensor, open its streams and start the engine
    pub fn open(config: SessionConfig, probe: &mut dyn DeviceProbe, display: Option<Size>) -> KineticResult<Self> {
        config.validate()?;
        let generation = DeviceSelection::detect(probe);
        let devices = DeviceSelection::open(probe, generation, config.sources, config.face_features)?;
        Self::with_devices(config, devices, display)
    }

    /// Start a session on already opened streams
    pub fn with_devices(config: SessionConfig, devices: DeviceHandles, display: Option<Size>) -> KineticResult<Self> {
        let generation = devices.generation();
        let mut engine = SensorEngine::new(
            generation,
            config.to_engine_config(),
            DeviceSelection::mapper(generation),
        );
        engine.start()?;
        let plan = RenderPlan::resolve(display, &config);
        tracing::info!(?generation, direct = plan.direct, "session opened");
        Ok(Session {
            config,
            engine,
            devices,
            plan,
            hooks: None,
            stats: RuntimeStats::default(),
        })
    }

    pub fn set_hooks(&mut self, hooks: Box<dyn SessionHooks>) {
        self.hooks = Some(hooks);
    }

    /// Update phase of one host frame
    ///
    /// Returns whether the engine reported new data.
    pub fn tick(&mut self) -> KineticResult<bool> {
        self.stats.ticks += 1;
        let updated = self.engine.update(self.devices.frame_source())?;
        if !updated {
            return Ok(false);
        }
        self.stats.updates += 1;
        self.sync_face_tracking();
        if let Some(hooks) = self.hooks.as_mut() {
            hooks.on_sensor_updated(&self.engine);
        }
        Ok(true)
    }

    /// Keep the face tracker on the active player
    fn sync_face_tracking(&mut self) {
        let wanted = self
            .engine
            .active_player()
            .map(|body| body.tracking_id())
            .unwrap_or(TrackingId::NONE);
        if let Some(faces) = self.devices.face_reader_mut() {
            if faces.tracking_id() != wanted {
                tracing::debug!(from = %faces.tracking_id(), to = %wanted, "face tracker retargeted");
                faces.set_tracking_id(wanted);
            }
        }
    }

    /// Draw phase of one host frame
    pub fn draw(&mut self, target: &mut dyn GraphicsTarget, elapsed: Duration) -> FrameSourceTypes {
        let redrawn = self.engine.render(target);
        self.stats.renders += 1;
        self.stats.last_redrawn = redrawn;
        self.stats.record_frame_time(elapsed);
        redrawn
    }

    pub fn save_screenshot(&self, sink: &mut dyn ScreenshotSink, path: Option<&Path>) -> KineticResult<PathBuf> {
        save_screenshot(&self.plan, sink, &self.config.screenshot_dir, path)
    }

    pub fn close(&mut self) {
        self.engine.close();
        tracing::info!(ticks = self.stats.ticks, updates = self.stats.updates, "session closed");
    }

    pub fn engine(&self) -> &SensorEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SensorEngine {
        &mut self.engine
    }

    pub fn generation(&self) -> SensorGeneration {
        self.engine.generation()
    }

    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    pub fn fps(&self) -> f32 {
        self.stats.fps
    }
}
