//! Embeddable OpenGL render surface.
//!
//! A small core for putting an OpenGL surface inside a desktop window:
//! one-time GPU setup (shader compilation and linking, interleaved vertex
//! buffers, texture upload, clear and blend state) and the per-frame draw
//! sequence, driven by a host window through the three [`RenderSurface`]
//! hooks. The [`host`] module provides such a host on top of winit and
//! glutin; the `demos/` examples walk the progression from a cleared
//! background up to a transparent, click-through desktop overlay.

pub mod gl {
    #![allow(clippy::all)]
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));

    pub use Gles2 as Gl;
}

mod error;
mod geometry;
pub mod host;
mod renderer;
mod shader;
mod state;
mod surface;
mod texture;

pub use error::{Error, Result};
pub use geometry::{
    quad_layout, quad_uv_layout, BufferUsage, GeometryBuffer, VertexAttribute, VertexLayout,
    UNIT_QUAD, UNIT_QUAD_UV,
};
pub use renderer::FrameRenderer;
pub use shader::{ShaderProgram, ShaderStage};
pub use state::{Blend, BlendFactor, RenderState};
pub use surface::RenderSurface;
pub use texture::{DecodedImage, Texture};

use std::ffi::{CStr, CString};

use glutin::prelude::GlDisplay;

/// Loads the GL function table from the display the context was created on.
pub fn load_gl<D: GlDisplay>(gl_display: &D) -> gl::Gl {
    let gl = gl::Gl::load_with(|symbol| {
        let symbol = CString::new(symbol).unwrap();
        gl_display.get_proc_address(symbol.as_c_str()).cast()
    });

    if let Some(renderer) = get_gl_string(&gl, gl::RENDERER) {
        log::info!("running on {}", renderer.to_string_lossy());
    }
    if let Some(version) = get_gl_string(&gl, gl::VERSION) {
        log::info!("OpenGL version {}", version.to_string_lossy());
    }
    if let Some(shaders_version) = get_gl_string(&gl, gl::SHADING_LANGUAGE_VERSION) {
        log::info!("shading language version {}", shaders_version.to_string_lossy());
    }

    gl
}

fn get_gl_string(gl: &gl::Gl, variant: gl::types::GLenum) -> Option<&'static CStr> {
    unsafe {
        let s = gl.GetString(variant);
        (!s.is_null()).then(|| CStr::from_ptr(s.cast()))
    }
}
