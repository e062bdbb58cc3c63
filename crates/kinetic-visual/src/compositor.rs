//! Per-render compositing pass

use kinetic_body::{Body, JointType};
use kinetic_core::{CameraSpacePoint, ColorBgra, DepthSpacePoint, FrameSourceTypes, Size};
use kinetic_frame::SourceBuffers;
use kinetic_mapper::CoordinateMapper;

use crate::{compose_depth, tint_players, DepthImageMode, GraphicsTarget, MarkerSprite, Palette};

/// Host transform applied to the decoded color bytes right before upload
pub type ColorHook = Box<dyn FnMut(&mut [u8]) + Send>;

/// Subject slots and the active selection, as seen by the compositor
#[derive(Debug, Clone, Copy)]
pub struct Subjects<'a> {
    pub players: &'a [Body],
    pub active_index: Option<u8>,
}

impl<'a> Subjects<'a> {
    pub fn new(players: &'a [Body], active_index: Option<u8>) -> Self {
        Self {
            players,
            active_index,
        }
    }

    pub fn active(&self) -> Option<&'a Body> {
        self.active_index
            .and_then(|index| self.players.get(index as usize))
    }

    /// Before the first body frame there are no slots and every index
    /// counts as tracked.
    pub fn is_tracked(&self, index: u8) -> bool {
        if self.players.is_empty() {
            return true;
        }
        self.players
            .get(index as usize)
            .map_or(false, |body| body.is_tracked())
    }
}

/// Owns the depth visualization target and the drawing options
#[derive(Debug, Clone)]
pub struct Compositor {
    mode: DepthImageMode,
    palette: Palette,
    sprite: MarkerSprite,
    depth_image: Vec<ColorBgra>,
    depth_image_size: Option<Size>,
    camera_points: Vec<CameraSpacePoint>,
    depth_points: Vec<DepthSpacePoint>,
    overlay: Vec<(i32, i32)>,
}

impl Compositor {
    pub fn new(mode: DepthImageMode, palette: Palette, sprite: MarkerSprite) -> Self {
        Self {
            mode,
            palette,
            sprite,
            depth_image: Vec::new(),
            depth_image_size: None,
            camera_points: Vec::with_capacity(JointType::COUNT),
            depth_points: Vec::with_capacity(JointType::COUNT),
            overlay: Vec::with_capacity(JointType::COUNT),
        }
    }

    pub fn mode(&self) -> DepthImageMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DepthImageMode) {
        self.mode = mode;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn sprite(&self) -> &MarkerSprite {
        &self.sprite
    }

    pub fn set_sprite(&mut self, sprite: MarkerSprite) {
        self.sprite = sprite;
    }

    /// Last composed depth visualization, empty before the first depth frame
    pub fn depth_image(&self) -> &[ColorBgra] {
        &self.depth_image
    }

    pub fn depth_image_size(&self) -> Size {
        self.depth_image_size.unwrap_or(Size::ZERO)
    }

    /// Marker positions drawn by the last depth pass
    pub fn overlay(&self) -> &[(i32, i32)] {
        &self.overlay
    }

    /// Whether a render with this dirty set has to recompose the depth image
    pub fn needs_depth_redraw(&self, dirty: FrameSourceTypes) -> bool {
        dirty.contains(FrameSourceTypes::DEPTH)
            || (self.mode.user_color() && dirty.contains(FrameSourceTypes::BODY_INDEX))
            || (self.mode.include_joints() && dirty.contains(FrameSourceTypes::BODY))
    }

    /// Publish everything that changed since the last render
    ///
    /// Clears the dirty set and returns the categories actually redrawn:
    /// `COLOR` for a color upload, `DEPTH` for a depth pass, plus
    /// `BODY_INDEX` when the pass tinted and `BODY` when it drew joints.
    pub fn render(
        &mut self,
        buffers: &mut SourceBuffers,
        subjects: Subjects<'_>,
        mapper: &dyn CoordinateMapper,
        target: &mut dyn GraphicsTarget,
        hook: Option<&mut ColorHook>,
    ) -> FrameSourceTypes {
        let dirty = buffers.take_dirty();
        let mut redrawn = FrameSourceTypes::NONE;

        if dirty.contains(FrameSourceTypes::COLOR) && buffers.color().is_sized() {
            if let Some(hook) = hook {
                hook(buffers.color_mut());
            }
            target.upload_color(buffers.color_size(), buffers.color().as_slice());
            redrawn |= FrameSourceTypes::COLOR;
        }

        if self.needs_depth_redraw(dirty) {
            if let Some(size) = buffers.depth().size() {
                redrawn |= self.render_depth(buffers, size, subjects, mapper, target);
            }
        }
        redrawn
    }

    fn render_depth(
        &mut self,
        buffers: &SourceBuffers,
        size: Size,
        subjects: Subjects<'_>,
        mapper: &dyn CoordinateMapper,
        target: &mut dyn GraphicsTarget,
    ) -> FrameSourceTypes {
        if self.depth_image_size.is_none() {
            self.depth_image = vec![ColorBgra::BLACK; size.area()];
            self.depth_image_size = Some(size);
            tracing::debug!(%size, "depth visualization target created");
        }
        let mut redrawn = FrameSourceTypes::DEPTH;

        compose_depth(
            buffers.depth().as_slice(),
            buffers.reliable_range(),
            self.mode.is_wrapped(),
            &mut self.depth_image,
        );

        if self.mode.user_color() && buffers.body_index().is_sized() && !self.palette.is_empty() {
            tint_players(
                &mut self.depth_image,
                buffers.body_index().as_slice(),
                subjects.active_index,
                &self.palette,
                |index| subjects.is_tracked(index),
            );
            redrawn |= FrameSourceTypes::BODY_INDEX;
        }

        self.overlay.clear();
        let active = subjects.active().filter(|_| self.mode.include_joints());
        if let Some(body) = active {
            self.draw_joints(body, size, mapper);
        }

        target.upload_depth(size, &self.depth_image);
        if active.is_some() {
            target.draw_overlay(&self.sprite, &self.overlay);
            redrawn |= FrameSourceTypes::BODY;
        }
        redrawn
    }

    fn draw_joints(&mut self, body: &Body, size: Size, mapper: &dyn CoordinateMapper) {
        self.camera_points.clear();
        self.camera_points
            .extend(body.joints().iter().map(|joint| joint.position));
        self.depth_points.clear();
        self.depth_points
            .resize(self.camera_points.len(), DepthSpacePoint::INVALID);
        mapper.map_camera_points_to_depth_space(&self.camera_points, &mut self.depth_points);

        for &point in &self.depth_points {
            if let Some(origin) = self.sprite.origin_for(point) {
                self.sprite.stamp(&mut self.depth_image, size, origin);
                self.overlay.push(origin);
            }
        }
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(DepthImageMode::NORMAL, Palette::default(), MarkerSprite::default())
    }
}
