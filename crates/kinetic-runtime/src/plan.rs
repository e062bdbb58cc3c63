//! Back buffer planning

use kinetic_core::Size;

use crate::SessionConfig;

/// How frames reach the screen
///
/// In direct mode the scene is drawn straight into the back buffer at the
/// requested render size. Otherwise it is drawn into an off-screen buffer
/// of the render size and scaled down by `scale` to `draw_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPlan {
    pub direct: bool,
    pub render_size: Size,
    pub draw_size: Size,
    pub scale: f32,
    pub fullscreen: bool,
}

impl RenderPlan {
    /// `display` is the current display mode, `None` when the adapter reports none
    pub fn resolve(display: Option<Size>, config: &SessionConfig) -> Self {
        let render = config.render_size();
        let fullscreen = config.fullscreen;
        let unscaled = |direct: bool| RenderPlan {
            direct,
            render_size: render,
            draw_size: render,
            scale: 1.0,
            fullscreen,
        };

        let Some(display) = display else {
            return unscaled(!config.force_render_buffer);
        };

        let fits = if fullscreen {
            display == render
        } else {
            display.width >= render.width && display.height >= render.height
        };
        if fits && !config.force_render_buffer {
            return unscaled(true);
        }

        let ratio = (display.width as f32 / render.width as f32)
            .min(display.height as f32 / render.height as f32)
            .min(1.0);
        let draw_size = Size::new(
            (render.width as f32 * ratio) as u32,
            (render.height as f32 * ratio) as u32,
        );
        let plan = RenderPlan {
            direct: false,
            render_size: render,
            draw_size,
            scale: ratio,
            fullscreen: fullscreen || draw_size == display,
        };
        let display_mode = display;
        tracing::debug!(?plan, display = ?display_mode, "render buffer scaled");
        plan
    }
}
