//! Vertex buffers and their interleaved attribute layout.

use std::mem;

use crate::error::{Error, Result};
use crate::gl;
use crate::gl::types::{GLenum, GLint, GLsizei, GLsizeiptr, GLuint};

const FLOAT_SIZE: usize = mem::size_of::<f32>();

/// One attribute slot inside an interleaved vertex buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute location the shader declares for this input.
    pub location: u32,
    /// Number of `f32` components, 1 to 4.
    pub components: u32,
    /// Byte offset of the first component inside a vertex.
    pub offset: usize,
}

/// Interleaving description for one vertex buffer.
///
/// All attributes of a buffer share a single stride; each attribute must fit
/// inside it at its offset. [`VertexLayout::validate`] checks both without
/// touching the device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    stride: usize,
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// An empty layout with the given per-vertex stride in bytes.
    pub fn new(stride: usize) -> Self {
        Self { stride, attributes: Vec::new() }
    }

    /// Appends an attribute at `offset` bytes into each vertex.
    pub fn with_attribute(mut self, location: u32, components: u32, offset: usize) -> Self {
        self.attributes.push(VertexAttribute { location, components, offset });
        self
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Checks the structural invariants of the interleaving:
    /// `offset + components * 4 <= stride` for every attribute.
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(Error::InvalidLayout("stride must be non-zero".into()));
        }
        if self.attributes.is_empty() {
            return Err(Error::InvalidLayout("layout declares no attributes".into()));
        }
        for attr in &self.attributes {
            if attr.components == 0 || attr.components > 4 {
                return Err(Error::InvalidLayout(format!(
                    "attribute {} has {} components, expected 1 to 4",
                    attr.location, attr.components
                )));
            }
            let end = attr.offset + attr.components as usize * FLOAT_SIZE;
            if end > self.stride {
                return Err(Error::InvalidLayout(format!(
                    "attribute {} ends at byte {end} but the stride is {}",
                    attr.location, self.stride
                )));
            }
        }
        Ok(())
    }

    /// Number of whole vertices `vertices` holds under this layout.
    pub fn vertex_count(&self, vertices: &[f32]) -> Result<usize> {
        let byte_len = mem::size_of_val(vertices);
        if byte_len == 0 || byte_len % self.stride != 0 {
            return Err(Error::InvalidLayout(format!(
                "{byte_len} bytes of vertex data is not a whole number of {}-byte vertices",
                self.stride
            )));
        }
        Ok(byte_len / self.stride)
    }
}

/// Buffer update frequency hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times.
    Static,
    /// Rewritten between draws.
    Dynamic,
}

impl BufferUsage {
    fn to_gl(self) -> GLenum {
        match self {
            BufferUsage::Static => gl::STATIC_DRAW,
            BufferUsage::Dynamic => gl::DYNAMIC_DRAW,
        }
    }
}

/// A device-resident interleaved vertex buffer plus the vertex-array
/// descriptor binding its attributes. Immutable after upload.
pub struct GeometryBuffer {
    vao: GLuint,
    vbo: GLuint,
    vertex_count: GLsizei,
    gl: gl::Gl,
}

impl GeometryBuffer {
    /// Copies `vertices` to the device and records the attribute pointers
    /// described by `layout` in a fresh vertex array.
    pub fn upload(
        gl: &gl::Gl,
        vertices: &[f32],
        layout: &VertexLayout,
        usage: BufferUsage,
    ) -> Result<Self> {
        layout.validate()?;
        let vertex_count = layout.vertex_count(vertices)? as GLsizei;
        let byte_len = mem::size_of_val(vertices);

        unsafe {
            let mut vao = 0;
            gl.GenVertexArrays(1, &mut vao);
            gl.BindVertexArray(vao);

            let mut vbo = 0;
            gl.GenBuffers(1, &mut vbo);
            gl.BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl.BufferData(
                gl::ARRAY_BUFFER,
                byte_len as GLsizeiptr,
                vertices.as_ptr() as *const _,
                usage.to_gl(),
            );
            if gl.GetError() == gl::OUT_OF_MEMORY {
                gl.DeleteBuffers(1, &vbo);
                gl.DeleteVertexArrays(1, &vao);
                return Err(Error::DeviceOutOfMemory("vertex buffer"));
            }

            for attr in layout.attributes() {
                gl.EnableVertexAttribArray(attr.location);
                gl.VertexAttribPointer(
                    attr.location,
                    attr.components as GLint,
                    gl::FLOAT,
                    0,
                    layout.stride() as GLsizei,
                    attr.offset as *const () as *const _,
                );
            }

            gl.BindVertexArray(0);

            Ok(Self { vao, vbo, vertex_count, gl: gl.clone() })
        }
    }

    /// Activates the vertex array for subsequent draw calls.
    ///
    /// Device binds are global state, not buffer-local: a draw is only valid
    /// between this call and the next bind of a different buffer.
    pub fn bind(&self) {
        unsafe {
            self.gl.BindVertexArray(self.vao);
            self.gl.BindBuffer(gl::ARRAY_BUFFER, self.vbo);
        }
    }

    /// Clears the vertex-array binding.
    pub fn unbind(&self) {
        unsafe {
            self.gl.BindVertexArray(0);
            self.gl.BindBuffer(gl::ARRAY_BUFFER, 0);
        }
    }

    /// Vertex count supplied at upload time; the full draw range.
    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }
}

impl Drop for GeometryBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.DeleteBuffers(1, &self.vbo);
            self.gl.DeleteVertexArrays(1, &self.vao);
        }
    }
}

/// Unit quad: two counter-clockwise triangles sharing the diagonal, six
/// vertices forming a square of side 1 centered at the origin.
#[rustfmt::skip]
pub static UNIT_QUAD: [f32; 12] = [
    -0.5, -0.5,
     0.5, -0.5,
     0.5,  0.5,

    -0.5, -0.5,
     0.5,  0.5,
    -0.5,  0.5,
];

/// [`UNIT_QUAD`] interleaved with normalized texture coordinates;
/// (-0.5, -0.5) samples (0, 0) and (0.5, 0.5) samples (1, 1).
#[rustfmt::skip]
pub static UNIT_QUAD_UV: [f32; 24] = [
    -0.5, -0.5,  0.0,  0.0,
     0.5, -0.5,  1.0,  0.0,
     0.5,  0.5,  1.0,  1.0,

    -0.5, -0.5,  0.0,  0.0,
     0.5,  0.5,  1.0,  1.0,
    -0.5,  0.5,  0.0,  1.0,
];

/// Layout for [`UNIT_QUAD`]: one vec2 position.
pub fn quad_layout(position: u32) -> VertexLayout {
    VertexLayout::new(2 * FLOAT_SIZE).with_attribute(position, 2, 0)
}

/// Layout for [`UNIT_QUAD_UV`]: vec2 position followed by vec2 texcoord.
pub fn quad_uv_layout(position: u32, texcoord: u32) -> VertexLayout {
    VertexLayout::new(4 * FLOAT_SIZE)
        .with_attribute(position, 2, 0)
        .with_attribute(texcoord, 2, 2 * FLOAT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_layouts_are_valid() {
        quad_layout(0).validate().unwrap();
        quad_uv_layout(0, 1).validate().unwrap();
    }

    #[test]
    fn attribute_must_fit_within_stride() {
        let too_wide = VertexLayout::new(8).with_attribute(0, 3, 0);
        assert!(matches!(too_wide.validate(), Err(Error::InvalidLayout(_))));

        let past_the_end = VertexLayout::new(16).with_attribute(0, 2, 0).with_attribute(1, 2, 12);
        assert!(matches!(past_the_end.validate(), Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn degenerate_layouts_are_rejected() {
        assert!(VertexLayout::new(0).with_attribute(0, 2, 0).validate().is_err());
        assert!(VertexLayout::new(8).validate().is_err());
        assert!(VertexLayout::new(8).with_attribute(0, 0, 0).validate().is_err());
        assert!(VertexLayout::new(32).with_attribute(0, 5, 0).validate().is_err());
    }

    #[test]
    fn vertex_count_requires_whole_vertices() {
        assert_eq!(quad_layout(0).vertex_count(&UNIT_QUAD).unwrap(), 6);
        assert_eq!(quad_uv_layout(0, 1).vertex_count(&UNIT_QUAD_UV).unwrap(), 6);
        assert!(quad_uv_layout(0, 1).vertex_count(&UNIT_QUAD).is_err());
        assert!(quad_layout(0).vertex_count(&UNIT_QUAD[..3]).is_err());
        assert!(quad_layout(0).vertex_count(&[]).is_err());
    }

    #[test]
    fn quad_is_six_vertices_forming_a_unit_square() {
        let positions: Vec<&[f32]> = UNIT_QUAD.chunks(2).collect();
        assert_eq!(positions.len(), 6);
        for p in &positions {
            assert_eq!(p[0].abs(), 0.5);
            assert_eq!(p[1].abs(), 0.5);
        }
        // Every corner of the centered square shows up.
        for corner in [[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]] {
            assert!(positions.iter().any(|p| p == &corner));
        }
    }

    #[test]
    fn quad_triangles_wind_counter_clockwise() {
        for tri in UNIT_QUAD.chunks(6) {
            let signed_area = (tri[2] - tri[0]) * (tri[5] - tri[1])
                - (tri[3] - tri[1]) * (tri[4] - tri[0]);
            assert!(signed_area > 0.0);
        }
    }

    #[test]
    fn uv_quad_maps_corners_to_texture_corners() {
        for v in UNIT_QUAD_UV.chunks(4) {
            assert_eq!(v[2], v[0] + 0.5);
            assert_eq!(v[3], v[1] + 0.5);
        }
    }
}
