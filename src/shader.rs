//! Shader compilation and program linking.

use std::ffi::CString;
use std::fmt;

use crate::error::{Error, Result};
use crate::gl;
use crate::gl::types::{GLenum, GLint, GLuint};

/// The two programmable stages a surface program is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_gl(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// A linked GL program.
///
/// A value of this type always refers to a program that compiled and linked
/// successfully; the failure paths of [`ShaderProgram::new`] delete every
/// intermediate object, so no unusable handle can escape.
pub struct ShaderProgram {
    program: GLuint,
    gl: gl::Gl,
}

impl ShaderProgram {
    /// Compiles both stages and links them into a program.
    ///
    /// The stage objects are deleted once linking finished; their machine
    /// code lives in the program from then on.
    pub fn new(gl: &gl::Gl, vertex_source: &str, fragment_source: &str) -> Result<Self> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_source) {
            Ok(fragment) => fragment,
            Err(err) => {
                unsafe { gl.DeleteShader(vertex) };
                return Err(err);
            },
        };

        unsafe {
            let program = gl.CreateProgram();
            gl.AttachShader(program, vertex);
            gl.AttachShader(program, fragment);
            gl.LinkProgram(program);

            gl.DeleteShader(vertex);
            gl.DeleteShader(fragment);

            let mut linked = 0;
            gl.GetProgramiv(program, gl::LINK_STATUS, &mut linked);
            if linked == 0 {
                let log = program_info_log(gl, program);
                gl.DeleteProgram(program);
                return Err(Error::Link(log));
            }

            Ok(Self { program, gl: gl.clone() })
        }
    }

    /// Makes the program the active pipeline for subsequent draw calls.
    pub fn bind(&self) {
        unsafe { self.gl.UseProgram(self.program) };
    }

    /// Location of a named vertex attribute, or `None` if the linker never
    /// saw it or optimized it away.
    pub fn attrib_location(&self, name: &str) -> Option<u32> {
        let name = CString::new(name).ok()?;
        let location = unsafe { self.gl.GetAttribLocation(self.program, name.as_ptr()) };
        u32::try_from(location).ok()
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { self.gl.DeleteProgram(self.program) };
    }
}

fn compile_stage(gl: &gl::Gl, stage: ShaderStage, source: &str) -> Result<GLuint> {
    unsafe {
        let shader = gl.CreateShader(stage.to_gl());
        gl.ShaderSource(shader, 1, [source.as_ptr().cast()].as_ptr(), &(source.len() as GLint));
        gl.CompileShader(shader);

        let mut compiled = 0;
        gl.GetShaderiv(shader, gl::COMPILE_STATUS, &mut compiled);
        if compiled == 0 {
            let log = shader_info_log(gl, shader);
            gl.DeleteShader(shader);
            return Err(Error::Compile { stage, log });
        }

        Ok(shader)
    }
}

fn shader_info_log(gl: &gl::Gl, shader: GLuint) -> String {
    unsafe {
        let mut len = 0;
        gl.GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        let mut log = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        gl.GetShaderInfoLog(shader, len, &mut written, log.as_mut_ptr().cast());
        log.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&log).trim_end().to_owned()
    }
}

fn program_info_log(gl: &gl::Gl, program: GLuint) -> String {
    unsafe {
        let mut len = 0;
        gl.GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut log = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        gl.GetProgramInfoLog(program, len, &mut written, log.as_mut_ptr().cast());
        log.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&log).trim_end().to_owned()
    }
}
