//! Lifecycle hooks a host window drives.

use crate::error::Result;
use crate::gl;

/// The three entry points a host window calls into a rendering surface.
///
/// The host creates a GL context, makes it current on the calling thread,
/// then invokes [`on_init`] exactly once. [`on_resize`] follows immediately
/// with the initial dimensions and again on every size change, always before
/// the next paint. [`on_paint`] runs once per frame until the window closes;
/// the host presents the color buffer after it returns.
///
/// A failed [`on_init`] is fatal: the surface cannot render and the host
/// must not call the other hooks afterwards.
///
/// [`on_init`]: RenderSurface::on_init
/// [`on_resize`]: RenderSurface::on_resize
/// [`on_paint`]: RenderSurface::on_paint
pub trait RenderSurface: Sized {
    /// One-time GPU setup: compile and link programs, upload geometry and
    /// textures, apply the context-wide render state.
    fn on_init(gl: &gl::Gl) -> Result<Self>;

    /// The surface dimensions changed.
    fn on_resize(&self, width: i32, height: i32);

    /// Renders one frame into the color buffer.
    fn on_paint(&self);
}
