mod input;
mod state;

pub use self::state::GalleryState;
use crate::error::NaveError;
use crate::gallery::InfoModal;
use crate::gpu::render_context::RenderContext;
use crate::input::InputEvent;
use crate::options::Options;
use crate::renderer::{GalleryRenderer, SurfaceTextures};
use crate::util::frame_timing::FrameTiming;

/// The gallery engine: session state plus the GPU resources that draw it.
///
/// # Frame loop
///
/// Each redraw, call [`update`](Self::update) to advance the camera and
/// textures, then [`render`](Self::render) to draw and present. Call
/// [`resize`](Self::resize) when the window size changes. Input is
/// forwarded via [`handle_input`](Self::handle_input).
pub struct GalleryEngine {
    context: RenderContext,
    renderer: GalleryRenderer,
    state: GalleryState,
    frame_timing: FrameTiming,
}

impl GalleryEngine {
    /// Validate `options`, build the scene, and set up the GPU for the
    /// given window.
    ///
    /// # Errors
    ///
    /// [`NaveError::Config`] for invalid options (checked before any GPU
    /// work) and [`NaveError::Gpu`] when the surface, adapter or device
    /// cannot be created.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, NaveError> {
        let state = GalleryState::new(options, size)?;
        let context = RenderContext::new(window, size).await?;
        let renderer = GalleryRenderer::new(
            &context,
            &state.scene().scene,
            state.options(),
            &SurfaceTextures {
                glyph: state.glyph_rain().canvas(),
                label: state.label(),
            },
        );
        log::info!(
            "engine ready: {}x{} {:?}",
            context.config.width,
            context.config.height,
            context.format()
        );
        Ok(Self {
            context,
            renderer,
            state,
            frame_timing: FrameTiming::new(),
        })
    }

    /// Process a platform-agnostic input event. See
    /// [`GalleryState::handle_input`].
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.state.handle_input(event)
    }

    /// Advance one frame and push the changes to the GPU.
    pub fn update(&mut self) {
        let _ = self.state.update();
        let queue = &self.context.queue;
        self.renderer
            .upload_glyphs(queue, self.state.glyph_rain().canvas());
        let scene = self.state.scene();
        self.renderer.sync_objects(
            queue,
            &scene.scene,
            scene.placards.iter().map(|handle| handle.object),
        );
        self.renderer.update_camera(queue, self.state.camera());
    }

    /// Draw the current frame and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        self.renderer
            .render(&mut encoder, &view, self.state.camera().eye);
        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Resize the surface, depth buffer and camera projection to match the
    /// new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.renderer.resize(&self.context.device, width, height);
            self.state.resize(width, height);
        }
    }

    /// Reconfigure the surface at its current size after it was lost or
    /// went out of date.
    pub fn recover_surface(&self) {
        log::debug!("reconfiguring surface");
        self.context.reconfigure();
    }

    /// Session state.
    #[must_use]
    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    /// The info modal.
    #[must_use]
    pub fn modal(&self) -> &InfoModal {
        self.state.modal()
    }

    /// Placard under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.state.hovered()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }
}
