//! State shared by both backends and the engine contract

use kinetic_body::Body;
use kinetic_core::{ColorBgra, FrameSourceTypes, KineticError, KineticResult, Size};
use kinetic_frame::{DepthSamples, FaceFrameResult, SourceBuffers};
use kinetic_mapper::CoordinateMapper;
use kinetic_visual::{
    ColorHook, Compositor, DepthImageMode, GraphicsTarget, MarkerSprite, Palette, Subjects,
};

use crate::{ActiveSubjectState, AvailabilityEdge, AvailabilityFlag, FrameSourceHandle};

/// Maximum number of tracked subjects
pub const DEFAULT_BODY_CAPACITY: usize = 6;

/// Engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub depth_mode: DepthImageMode,
    pub palette: Palette,
    pub marker: MarkerSprite,
    /// Subject slots allocated on the first body frame
    pub body_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth_mode: DepthImageMode::NORMAL,
            palette: Palette::default(),
            marker: MarkerSprite::default(),
            body_capacity: DEFAULT_BODY_CAPACITY,
        }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Streaming,
    Terminated,
}

/// Buffers, subjects and render state common to both backends
pub struct EngineCore {
    lifecycle: Lifecycle,
    body_capacity: usize,
    buffers: SourceBuffers,
    compositor: Compositor,
    players: Vec<Body>,
    selection: ActiveSubjectState,
    availability: AvailabilityFlag,
    availability_edge: AvailabilityEdge,
    mapper: Box<dyn CoordinateMapper>,
    color_hook: Option<ColorHook>,
}

impl std::fmt::Debug for EngineCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCore")
            .field("lifecycle", &self.lifecycle)
            .field("players", &self.players.len())
            .field("selection", &self.selection)
            .field("available", &self.availability.get())
            .field("mapper", &self.mapper)
            .field("color_hook", &self.color_hook.is_some())
            .finish()
    }
}

impl EngineCore {
    pub fn new(config: EngineConfig, mapper: Box<dyn CoordinateMapper>) -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            body_capacity: config.body_capacity,
            buffers: SourceBuffers::new(),
            compositor: Compositor::new(config.depth_mode, config.palette, config.marker),
            players: Vec::new(),
            selection: ActiveSubjectState::default(),
            availability: AvailabilityFlag::default(),
            availability_edge: AvailabilityEdge::default(),
            mapper,
            color_hook: None,
        }
    }

    // ---- Lifecycle ----

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Sensor opened
    pub fn start(&mut self) -> KineticResult<()> {
        match self.lifecycle {
            Lifecycle::Uninitialized => {
                self.lifecycle = Lifecycle::Streaming;
                tracing::info!("engine streaming");
                Ok(())
            }
            Lifecycle::Streaming => Ok(()),
            Lifecycle::Terminated => Err(KineticError::NotStreaming),
        }
    }

    /// Sensor closed; the engine cannot be restarted
    pub fn close(&mut self) {
        if self.lifecycle != Lifecycle::Terminated {
            self.lifecycle = Lifecycle::Terminated;
            self.color_hook = None;
            tracing::info!("engine terminated");
        }
    }

    pub fn ensure_streaming(&self) -> KineticResult<()> {
        if self.lifecycle == Lifecycle::Streaming {
            Ok(())
        } else {
            Err(KineticError::NotStreaming)
        }
    }

    // ---- Update helpers ----

    pub fn buffers_mut(&mut self) -> &mut SourceBuffers {
        &mut self.buffers
    }

    /// Availability flag handle for driver callbacks
    pub fn availability(&self) -> &AvailabilityFlag {
        &self.availability
    }

    /// Compare the flag against the previous update
    pub fn take_availability_edge(&mut self) -> bool {
        let current = self.availability.get();
        let changed = self.availability_edge.observe(current);
        if changed {
            tracing::info!(available = current, "sensor availability changed");
        }
        changed
    }

    /// Overwrite subject slots from per-slot records and reselect
    ///
    /// Slots are allocated on the first call. Records past the capacity
    /// are ignored; slots without a record keep their data.
    pub fn apply_bodies<R, F>(&mut self, records: &[R], mut apply: F)
    where
        F: FnMut(&mut Body, Option<&R>),
    {
        if self.players.is_empty() {
            self.players = vec![Body::new(); self.body_capacity];
            tracing::debug!(capacity = self.body_capacity, "subject slots allocated");
        }
        for (index, body) in self.players.iter_mut().enumerate() {
            apply(body, records.get(index));
        }
        let previous = self.selection.active_index;
        self.selection.update(&self.players);
        if previous != self.selection.active_index {
            tracing::debug!(from = ?previous, to = ?self.selection.active_index, "active player changed");
        }
        self.buffers.mark_dirty(FrameSourceTypes::BODY);
    }

    // ---- Render ----

    pub fn render(&mut self, target: &mut dyn GraphicsTarget) -> FrameSourceTypes {
        if self.lifecycle == Lifecycle::Terminated {
            return FrameSourceTypes::NONE;
        }
        self.compositor.render(
            &mut self.buffers,
            Subjects::new(&self.players, self.selection.active_index),
            self.mapper.as_ref(),
            target,
            self.color_hook.as_mut(),
        )
    }

    // ---- Accessors ----

    pub fn players(&self) -> &[Body] {
        &self.players
    }

    pub fn selection(&self) -> ActiveSubjectState {
        self.selection
    }

    pub fn mapper(&self) -> &dyn CoordinateMapper {
        self.mapper.as_ref()
    }

    pub fn buffers(&self) -> &SourceBuffers {
        &self.buffers
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut Compositor {
        &mut self.compositor
    }

    pub fn set_color_hook(&mut self, hook: Option<ColorHook>) {
        self.color_hook = hook;
    }
}

/// Contract shared by both sensor generations
pub trait FrameStateEngine {
    fn core(&self) -> &EngineCore;

    fn core_mut(&mut self) -> &mut EngineCore;

    fn is_legacy(&self) -> bool;

    /// Pull whatever is new from `source`
    ///
    /// Returns whether anything visually relevant changed, including an
    /// availability transition. Fails with `NotStreaming` outside the
    /// streaming state.
    fn update(&mut self, source: FrameSourceHandle<'_>) -> KineticResult<bool>;

    /// Publish dirty sources to `target`; returns what was redrawn
    fn render(&mut self, target: &mut dyn GraphicsTarget) -> FrameSourceTypes {
        self.core_mut().render(target)
    }

    fn start(&mut self) -> KineticResult<()> {
        self.core_mut().start()
    }

    fn close(&mut self) {
        self.core_mut().close()
    }

    fn lifecycle(&self) -> Lifecycle {
        self.core().lifecycle()
    }

    fn players(&self) -> &[Body] {
        self.core().players()
    }

    fn active_player_index(&self) -> Option<u8> {
        self.core().selection().active_index
    }

    fn active_player(&self) -> Option<&Body> {
        let core = self.core();
        core.selection()
            .active_index
            .and_then(|index| core.players().get(index as usize))
    }

    fn had_player(&self) -> bool {
        self.core().selection().had_player_previous_frame
    }

    fn is_available(&self) -> bool {
        self.core().availability().get()
    }

    fn availability_handle(&self) -> AvailabilityFlag {
        self.core().availability().clone()
    }

    fn coordinate_mapper(&self) -> &dyn CoordinateMapper {
        self.core().mapper()
    }

    /// Decoded color bytes, B, G, R, A per pixel
    fn color_image(&self) -> &[u8] {
        self.core().buffers().color().as_slice()
    }

    fn color_image_size(&self) -> Size {
        self.core().buffers().color_size()
    }

    fn depth_image(&self) -> &[ColorBgra] {
        self.core().compositor().depth_image()
    }

    fn depth_image_size(&self) -> Size {
        self.core().buffers().depth_size()
    }

    fn depth_image_mode(&self) -> DepthImageMode {
        self.core().compositor().mode()
    }

    fn set_depth_image_mode(&mut self, mode: DepthImageMode) {
        self.core_mut().compositor_mut().set_mode(mode)
    }

    fn user_colors(&self) -> &Palette {
        self.core().compositor().palette()
    }

    fn set_user_colors(&mut self, palette: Palette) {
        self.core_mut().compositor_mut().set_palette(palette)
    }

    fn marker_sprite(&self) -> &MarkerSprite {
        self.core().compositor().sprite()
    }

    fn set_marker_sprite(&mut self, sprite: MarkerSprite) {
        self.core_mut().compositor_mut().set_sprite(sprite)
    }

    fn depth_at(&self, x: i32, y: i32) -> Option<u16> {
        self.core().buffers().depth_at(x, y)
    }

    fn player_index_at(&self, x: i32, y: i32) -> Option<u8> {
        self.core().buffers().player_index_at(x, y)
    }

    fn depth_samples(&self) -> DepthSamples<'_> {
        self.core().buffers().depth_samples()
    }

    fn active_player_face(&self) -> Option<&FaceFrameResult> {
        self.core().buffers().face()
    }

    fn set_color_hook(&mut self, hook: Option<ColorHook>) {
        self.core_mut().set_color_hook(hook)
    }
}
