//! Error handling for surface initialization.

use thiserror::Error;

use crate::shader::ShaderStage;

/// A specialized [`Result`] type for render-surface operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal initialization-phase failures.
///
/// Every variant aborts surface setup before the first frame; the
/// steady-state paint path has no error states of its own, so a host must
/// stop calling into the surface once one of these surfaced.
#[derive(Debug, Error)]
pub enum Error {
    /// The driver rejected a shader stage; carries the compiler's info log.
    #[error("{stage} shader compilation failed: {log}")]
    Compile {
        /// Stage whose source was rejected.
        stage: ShaderStage,
        /// Diagnostic text reported by the shader compiler.
        log: String,
    },

    /// Program linking failed; carries the linker's info log.
    #[error("shader program link failed: {0}")]
    Link(String),

    /// The device could not allocate a buffer or texture.
    #[error("device out of memory allocating {0}")]
    DeviceOutOfMemory(&'static str),

    /// An interleaved vertex layout that cannot describe the uploaded data.
    #[error("invalid vertex layout: {0}")]
    InvalidLayout(String),

    /// A texture source could not be read or decoded.
    #[error("failed to decode texture image: {0}")]
    Decode(String),
}

impl From<png::DecodingError> for Error {
    fn from(err: png::DecodingError) -> Self {
        Error::Decode(err.to_string())
    }
}
