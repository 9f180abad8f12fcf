//! Stage 4: a transparent, frameless, always-on-top, click-through overlay.
//!
//! The surface clears to alpha 0 every frame, so the compositor shows the
//! desktop through the whole window. Pointer input falls through; close the
//! overlay from the shell, or with Escape while it still has keyboard focus.

use std::error::Error;

use render_surface::host::{self, WindowConfig};
use render_surface::{gl, FrameRenderer, RenderState, RenderSurface};
use winit::event_loop::EventLoop;

struct OverlayScene {
    renderer: FrameRenderer,
}

impl RenderSurface for OverlayScene {
    fn on_init(gl: &gl::Gl) -> render_surface::Result<Self> {
        let renderer = FrameRenderer::new(gl, RenderState::overlay());
        Ok(Self { renderer })
    }

    fn on_resize(&self, width: i32, height: i32) {
        self.renderer.resize(width, height);
    }

    fn on_paint(&self) {
        self.renderer.clear();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    host::run::<OverlayScene>(event_loop, WindowConfig::overlay("Transparent overlay"))
}
