//! Host-window collaborator: winit event loop plus glutin bootstrap.
//!
//! The render core deliberately owns none of this. The host creates the
//! display, picks a config, builds the context with a fallback chain, makes
//! it current, then drives a [`RenderSurface`] through its three hooks and
//! presents each painted frame.

use std::error::Error as StdError;
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentContext, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowLevel};

use crate::surface::RenderSurface;

/// Host window description.
#[derive(Clone, Debug)]
pub struct WindowConfig {
    title: String,
    inner_size: Option<(u32, u32)>,
    overlay: bool,
}

impl WindowConfig {
    /// A regular decorated window.
    pub fn windowed(title: impl Into<String>) -> Self {
        Self { title: title.into(), inner_size: None, overlay: false }
    }

    /// A frameless, always-on-top, fullscreen, click-through surface with an
    /// 8-bit alpha channel, for compositing over the desktop.
    pub fn overlay(title: impl Into<String>) -> Self {
        Self { title: title.into(), inner_size: None, overlay: true }
    }

    /// Requested logical inner size. Overlays ignore it and span the
    /// monitor.
    pub fn with_inner_size(mut self, width: u32, height: u32) -> Self {
        self.inner_size = Some((width, height));
        self
    }
}

/// Runs the event loop until the window closes, driving `S` through init,
/// resize and paint. Returns the first fatal error, if any.
pub fn run<S: RenderSurface>(
    event_loop: EventLoop<()>,
    config: WindowConfig,
) -> Result<(), Box<dyn StdError>> {
    // Always ask for an alpha-capable config; the picker below prefers ones
    // that can actually composite. Forcing transparency in the template is
    // only reliable on CGL, where a single config is queried at a time.
    let template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_transparency(config.overlay || cfg!(cgl_backend));

    let display_builder =
        DisplayBuilder::new().with_window_attributes(Some(window_attributes(&config)));

    let mut app =
        App::<S> { template, display_builder, config, running: None, exit_state: Ok(()) };
    event_loop.run_app(&mut app)?;

    app.exit_state
}

struct App<S: RenderSurface> {
    template: ConfigTemplateBuilder,
    display_builder: DisplayBuilder,
    config: WindowConfig,
    running: Option<Running<S>>,
    exit_state: Result<(), Box<dyn StdError>>,
}

impl<S: RenderSurface> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match Running::initialize(self, event_loop) {
            Ok(running) => self.running = Some(running),
            Err(err) => {
                self.exit_state = Err(err);
                event_loop.exit();
            },
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(running) = self.running.as_ref() else { return };
        match event {
            WindowEvent::Resized(size) => {
                if let (Some(width), Some(height)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                {
                    running.resize(width, height);
                }
            },
            WindowEvent::RedrawRequested => {
                if let Err(err) = running.redraw() {
                    self.exit_state = Err(err);
                    event_loop.exit();
                }
            },
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event: KeyEvent { logical_key: Key::Named(NamedKey::Escape), .. },
                ..
            } => event_loop.exit(),
            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Tear down GL objects, surface and window before the context.
        self.running = None;
    }
}

struct Running<S> {
    // Field order is teardown order: the scene's GL objects go first, the
    // window only after every resource created from its raw handle, the
    // context last.
    surface: S,
    gl_surface: Surface<WindowSurface>,
    window: Window,
    gl_context: PossiblyCurrentContext,
}

impl<S: RenderSurface> Running<S> {
    fn initialize(app: &App<S>, event_loop: &ActiveEventLoop) -> Result<Self, Box<dyn StdError>> {
        let (window, gl_config) =
            app.display_builder.clone().build(event_loop, app.template.clone(), config_picker)?;
        let window = window.ok_or("failed to create window")?;
        log::debug!("picked a config with {} samples", gl_config.num_samples());

        if app.config.overlay {
            // Pointer input falls through to whatever is underneath.
            if let Err(err) = window.set_cursor_hittest(false) {
                log::warn!("cannot make the overlay click-through: {err}");
            }
        }

        let gl_context = create_context(&window, &gl_config)?;

        let attrs = window.build_surface_attributes(Default::default())?;
        let gl_surface =
            unsafe { gl_config.display().create_window_surface(&gl_config, &attrs)? };

        let gl_context = gl_context.make_current(&gl_surface)?;

        if let Err(err) =
            gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
        {
            log::warn!("failed to enable vsync: {err}");
        }

        let gl = crate::load_gl(&gl_config.display());
        let surface = S::on_init(&gl)?;

        let size = window.inner_size();
        surface.on_resize(size.width as i32, size.height as i32);

        Ok(Self { surface, gl_surface, window, gl_context })
    }

    fn resize(&self, width: NonZeroU32, height: NonZeroU32) {
        // EGL and CGL need the GL surface resized along with the window;
        // elsewhere this is a no-op.
        self.gl_surface.resize(&self.gl_context, width, height);
        self.surface.on_resize(width.get() as i32, height.get() as i32);
    }

    fn redraw(&self) -> Result<(), Box<dyn StdError>> {
        self.window.pre_present_notify();
        self.surface.on_paint();
        self.window.request_redraw();
        self.gl_surface.swap_buffers(&self.gl_context)?;
        Ok(())
    }
}

fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    let mut attributes = Window::default_attributes()
        .with_title(config.title.clone())
        .with_transparent(config.overlay);

    if let Some((width, height)) = config.inner_size {
        attributes = attributes.with_inner_size(LogicalSize::new(width, height));
    }

    if config.overlay {
        attributes = attributes
            .with_decorations(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    attributes
}

fn create_context(
    window: &Window,
    gl_config: &Config,
) -> Result<NotCurrentContext, glutin::error::Error> {
    let raw_window_handle = window.window_handle().ok().map(|handle| handle.as_raw());

    let context_attributes = ContextAttributesBuilder::new().build(raw_window_handle);

    // Modern OpenGL first, then GLES, then a 2.1 context for the old
    // devices supporting neither.
    let fallback_context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(None))
        .build(raw_window_handle);
    let legacy_context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(2, 1))))
        .build(raw_window_handle);

    let gl_display = gl_config.display();

    unsafe {
        gl_display.create_context(gl_config, &context_attributes).or_else(|_| {
            gl_display.create_context(gl_config, &fallback_context_attributes).or_else(|_| {
                gl_display.create_context(gl_config, &legacy_context_attributes)
            })
        })
    }
}

// Prefer configs that can actually composite, then the highest sample count.
fn config_picker(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|accum, config| {
            let transparency_check = config.supports_transparency().unwrap_or(false)
                && !accum.supports_transparency().unwrap_or(false);

            if transparency_check || config.num_samples() > accum.num_samples() {
                config
            } else {
                accum
            }
        })
        .expect("at least one matching config")
}
