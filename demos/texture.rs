//! Stage 3: a textured quad with alpha blending.
//!
//! Takes the sprite path as the first argument, defaulting to `sprite.png`
//! in the working directory. A missing or unreadable sprite is a fatal
//! decode error, not a blank texture.

use std::env;
use std::error::Error;

use render_surface::host::{self, WindowConfig};
use render_surface::{
    gl, quad_uv_layout, Blend, BufferUsage, DecodedImage, FrameRenderer, GeometryBuffer,
    RenderState, RenderSurface, ShaderProgram, Texture, UNIT_QUAD_UV,
};
use winit::event_loop::EventLoop;

const VERTEX_SHADER: &str = "
#version 100
precision mediump float;

attribute vec2 position;
attribute vec2 texcoord;

varying vec2 v_texcoord;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
    v_texcoord = texcoord;
}
";

const FRAGMENT_SHADER: &str = "
#version 100
precision mediump float;

varying vec2 v_texcoord;

uniform sampler2D u_texture;

void main() {
    gl_FragColor = texture2D(u_texture, v_texcoord);
}
";

struct SpriteScene {
    renderer: FrameRenderer,
    program: ShaderProgram,
    quad: GeometryBuffer,
    sprite: Texture,
}

impl RenderSurface for SpriteScene {
    fn on_init(gl: &gl::Gl) -> render_surface::Result<Self> {
        let renderer = FrameRenderer::new(
            gl,
            RenderState::clear_to([0.0, 0.0, 0.0, 0.0]).with_blend(Blend::alpha()),
        );

        let program = ShaderProgram::new(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let position = program.attrib_location("position").expect("sprite shader declares `position`");
        let texcoord = program.attrib_location("texcoord").expect("sprite shader declares `texcoord`");
        let quad = GeometryBuffer::upload(
            gl,
            &UNIT_QUAD_UV,
            &quad_uv_layout(position, texcoord),
            BufferUsage::Static,
        )?;

        let path = env::args().nth(1).unwrap_or_else(|| "sprite.png".into());
        let sprite = Texture::upload(gl, DecodedImage::decode(path)?)?;

        Ok(Self { renderer, program, quad, sprite })
    }

    fn on_resize(&self, width: i32, height: i32) {
        self.renderer.resize(width, height);
    }

    fn on_paint(&self) {
        self.renderer.draw_frame(&self.program, &self.quad, Some(&self.sprite));
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    host::run::<SpriteScene>(
        event_loop,
        WindowConfig::windowed("Textured quad").with_inner_size(800, 600),
    )
}
