//! Stage 2: a solid quad drawn from an interleaved vertex buffer.

use std::error::Error;

use render_surface::host::{self, WindowConfig};
use render_surface::{
    gl, quad_layout, BufferUsage, FrameRenderer, GeometryBuffer, RenderState, RenderSurface,
    ShaderProgram, UNIT_QUAD,
};
use winit::event_loop::EventLoop;

const VERTEX_SHADER: &str = "
#version 100
precision mediump float;

attribute vec2 position;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
";

const FRAGMENT_SHADER: &str = "
#version 100
precision mediump float;

void main() {
    gl_FragColor = vec4(0.2, 0.8, 0.3, 1.0);
}
";

struct QuadScene {
    renderer: FrameRenderer,
    program: ShaderProgram,
    quad: GeometryBuffer,
}

impl RenderSurface for QuadScene {
    fn on_init(gl: &gl::Gl) -> render_surface::Result<Self> {
        let renderer = FrameRenderer::new(gl, RenderState::clear_to([0.1, 0.1, 0.15, 1.0]));

        let program = ShaderProgram::new(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let position = program.attrib_location("position").expect("quad shader declares `position`");
        let quad = GeometryBuffer::upload(gl, &UNIT_QUAD, &quad_layout(position), BufferUsage::Static)?;

        Ok(Self { renderer, program, quad })
    }

    fn on_resize(&self, width: i32, height: i32) {
        self.renderer.resize(width, height);
    }

    fn on_paint(&self) {
        self.renderer.draw_frame(&self.program, &self.quad, None);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    host::run::<QuadScene>(
        event_loop,
        WindowConfig::windowed("Quad (VAO + VBO)").with_inner_size(600, 400),
    )
}
