//! Per-frame draw sequencing.

use crate::geometry::GeometryBuffer;
use crate::gl;
use crate::shader::ShaderProgram;
use crate::state::RenderState;
use crate::texture::Texture;

// A GLSL sampler uniform defaults to 0, so the demo shaders never set it.
const SAMPLER_UNIT: u32 = 0;

/// Issues the per-frame draw sequence against a configured context.
///
/// The global "current program", "current buffer" and "current texture"
/// device state never leaks into this type: everything a frame draws is
/// passed to [`FrameRenderer::draw_frame`] explicitly.
pub struct FrameRenderer {
    state: RenderState,
    gl: gl::Gl,
}

impl FrameRenderer {
    /// Applies `state` to the context and returns the renderer. Must run
    /// before the first frame.
    pub fn new(gl: &gl::Gl, state: RenderState) -> Self {
        state.apply(gl);
        Self { state, gl: gl.clone() }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Clears the color buffer to the configured clear color.
    pub fn clear(&self) {
        unsafe { self.gl.Clear(gl::COLOR_BUFFER_BIT) };
    }

    /// Draws one frame: clear, bind program and geometry, bind the texture
    /// if present, then draw the buffer's full vertex range. Bindings are
    /// left active; the next frame of the same content may rely on them.
    pub fn draw_frame(
        &self,
        program: &ShaderProgram,
        geometry: &GeometryBuffer,
        texture: Option<&Texture>,
    ) {
        self.clear();
        program.bind();
        geometry.bind();
        if let Some(texture) = texture {
            texture.bind(SAMPLER_UNIT);
        }
        unsafe { self.gl.DrawArrays(gl::TRIANGLES, 0, geometry.vertex_count()) };
    }

    /// Matches the viewport to the new surface dimensions. Must run after
    /// every size change the host reports, before the next frame.
    pub fn resize(&self, width: i32, height: i32) {
        unsafe { self.gl.Viewport(0, 0, width, height) };
    }
}
