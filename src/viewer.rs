//! Standalone gallery window backed by winit.
//!
//! ```no_run
//! # use nave::Viewer;
//! Viewer::builder()
//!     .with_title("Nave")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorIcon, Window, WindowId},
};

use crate::{
    engine::GalleryEngine, error::NaveError, options::Options, InputEvent,
    MouseButton,
};

/// Pixels of page scroll per wheel line.
const LINE_HEIGHT: f32 = 100.0;

/// Title suffix shown until the first click.
const START_PROMPT: &str = "click to begin";

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Nave", default
    /// options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Nave".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that flies through the gallery.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`NaveError::Viewer`] if the event loop cannot start, and any
    /// error that stopped the engine from initializing.
    pub fn run(self) -> Result<(), NaveError> {
        let event_loop =
            EventLoop::new().map_err(|e| NaveError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
            init_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| NaveError::Viewer(e.to_string()))?;
        app.init_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<GalleryEngine>,
    options: Option<Options>,
    title: String,
    init_error: Option<NaveError>,
}

/// Compute the wgpu surface size from the window's inner size.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Page-style scroll pixels for a wheel event; positive advances the tour.
fn scroll_pixels(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    }
}

impl ViewerApp {
    /// Mirror hover and modal state in the cursor and title.
    fn refresh_chrome(&self) {
        let (Some(window), Some(engine)) = (&self.window, &self.engine) else {
            return;
        };
        let cursor = if engine.hovered().is_some() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        };
        window.set_cursor(cursor);
        if !engine.state().is_started() {
            window.set_title(&format!("{}: {START_PROMPT}", self.title));
            return;
        }
        match engine.modal().current() {
            Some(entry) => {
                log::info!("{}: {}", entry.title, entry.description);
                window.set_title(&format!("{}: {}", self.title, entry.title));
            }
            None => window.set_title(&self.title),
        }
    }

    /// Forward an event; refresh the window chrome when it changed the UI.
    fn forward(&mut self, event: InputEvent) {
        let changed = self
            .engine
            .as_mut()
            .is_some_and(|engine| engine.handle_input(event));
        if changed {
            self.refresh_chrome();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                self.init_error = Some(NaveError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let options = self.options.take().unwrap_or_default();
        let engine = match pollster::block_on(GalleryEngine::new(
            window.clone(),
            size,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                self.init_error = Some(e);
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.refresh_chrome();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let (Some(engine), Some(window)) =
                    (&mut self.engine, &self.window)
                {
                    let (vp_w, vp_h) = viewport_size(window.inner_size());
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    engine.update();
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let (vp_w, vp_h) =
                                    viewport_size(w.inner_size());
                                engine.resize(vp_w, vp_h);
                            }
                            engine.recover_surface();
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.forward(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.forward(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                self.forward(InputEvent::CursorLeft);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.forward(InputEvent::Scroll {
                    delta: scroll_pixels(delta),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    self.forward(InputEvent::Cancel);
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_down_advances() {
        assert_eq!(scroll_pixels(MouseScrollDelta::LineDelta(0.0, -1.0)), 100.0);
        assert_eq!(
            scroll_pixels(MouseScrollDelta::PixelDelta(
                winit::dpi::PhysicalPosition::new(0.0, 42.0)
            )),
            -42.0
        );
    }
}
