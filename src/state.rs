//! Per-context render state: clear color and blending.

use crate::gl;
use crate::gl::types::GLenum;

/// Source or destination blend factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

impl BlendFactor {
    fn to_gl(self) -> GLenum {
        match self {
            BlendFactor::Zero => gl::ZERO,
            BlendFactor::One => gl::ONE,
            BlendFactor::SrcAlpha => gl::SRC_ALPHA,
            BlendFactor::OneMinusSrcAlpha => gl::ONE_MINUS_SRC_ALPHA,
        }
    }
}

/// Blend configuration applied during initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    Disabled,
    Enabled { src: BlendFactor, dst: BlendFactor },
}

impl Blend {
    /// Classic alpha compositing: `SRC_ALPHA, ONE_MINUS_SRC_ALPHA`.
    pub fn alpha() -> Self {
        Blend::Enabled { src: BlendFactor::SrcAlpha, dst: BlendFactor::OneMinusSrcAlpha }
    }
}

/// Context-wide configuration, mutated only during initialization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    pub clear_color: [f32; 4],
    pub blend: Blend,
}

impl RenderState {
    /// State clearing to the given color, blending off.
    pub fn clear_to(clear_color: [f32; 4]) -> Self {
        Self { clear_color, blend: Blend::Disabled }
    }

    /// Overlay state: clears to fully transparent black so the compositor
    /// shows the desktop through the surface, blending off until content
    /// actually draws partially transparent pixels.
    pub fn overlay() -> Self {
        Self::clear_to([0.0, 0.0, 0.0, 0.0])
    }

    pub fn with_blend(mut self, blend: Blend) -> Self {
        self.blend = blend;
        self
    }

    /// Applies the state to the current context. Idempotent; runs before
    /// the first frame.
    pub(crate) fn apply(&self, gl: &gl::Gl) {
        let [red, green, blue, alpha] = self.clear_color;
        unsafe {
            gl.ClearColor(red, green, blue, alpha);
            match self.blend {
                Blend::Disabled => gl.Disable(gl::BLEND),
                Blend::Enabled { src, dst } => {
                    gl.Enable(gl::BLEND);
                    gl.BlendFunc(src.to_gl(), dst.to_gl());
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_state_clears_fully_transparent() {
        let state = RenderState::overlay();
        assert_eq!(state.clear_color[3], 0.0);
        assert_eq!(state.blend, Blend::Disabled);
    }

    #[test]
    fn alpha_blend_uses_classic_factors() {
        let Blend::Enabled { src, dst } = Blend::alpha() else {
            panic!("alpha blending must be enabled");
        };
        assert_eq!(src.to_gl(), gl::SRC_ALPHA);
        assert_eq!(dst.to_gl(), gl::ONE_MINUS_SRC_ALPHA);
    }
}
