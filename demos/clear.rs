//! Stage 1: an embedded GL surface that only clears its background.

use std::error::Error;

use render_surface::host::{self, WindowConfig};
use render_surface::{gl, FrameRenderer, RenderState, RenderSurface};
use winit::event_loop::EventLoop;

struct ClearScene {
    renderer: FrameRenderer,
}

impl RenderSurface for ClearScene {
    fn on_init(gl: &gl::Gl) -> render_surface::Result<Self> {
        let renderer = FrameRenderer::new(gl, RenderState::clear_to([0.2, 0.3, 0.4, 1.0]));
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
    host::run::<ClearScene>(
        event_loop,
        WindowConfig::windowed("Minimal render surface").with_inner_size(640, 480),
    )
}
