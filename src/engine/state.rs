//! Everything the engine animates, independent of the GPU.

use glam::Vec2;

use crate::camera::{Camera, Flythrough, OrbitCamera, Pose};
use crate::error::NaveError;
use crate::gallery::{Gallery, InfoModal, Ray};
use crate::glyph::{placard_label, GlyphRain, GlyphRasterizer, PixelCanvas};
use crate::input::PointerState;
use crate::options::Options;
use crate::scene::GalleryScene;

/// Camera, textures, gallery and scene of one session.
///
/// [`GalleryEngine`](super::GalleryEngine) owns one of these next to the
/// GPU resources; on its own it runs headless, which is how the input and
/// animation behavior is tested.
pub struct GalleryState {
    options: Options,
    pub(super) flythrough: Flythrough,
    pub(super) orbit: OrbitCamera,
    glyph_rain: GlyphRain,
    label: PixelCanvas,
    pub(super) gallery: Gallery,
    scene: GalleryScene,
    pub(super) pointer: PointerState,
    viewport: Vec2,
    started: bool,
}

impl GalleryState {
    /// Validate options and build the session with an OS-seeded glyph rain.
    ///
    /// The session starts gated: input other than pointer tracking waits
    /// for the first tap (see [`start`](Self::start)).
    ///
    /// # Errors
    ///
    /// [`NaveError::Config`] when the camera, camera path or glyph rain
    /// options are invalid.
    pub fn new(options: Options, size: (u32, u32)) -> Result<Self, NaveError> {
        let mut glyphs = GlyphRasterizer::new();
        let glyph_rain = GlyphRain::new(&options.glyph_rain, &mut glyphs)?;
        Self::with_glyph_rain(options, size, glyph_rain, &mut glyphs)
    }

    /// Like [`new`](Self::new) with a reproducible glyph rain.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn seeded(
        options: Options,
        size: (u32, u32),
        seed: u64,
    ) -> Result<Self, NaveError> {
        let mut glyphs = GlyphRasterizer::new();
        let glyph_rain =
            GlyphRain::seeded(&options.glyph_rain, &mut glyphs, seed)?;
        Self::with_glyph_rain(options, size, glyph_rain, &mut glyphs)
    }

    fn with_glyph_rain(
        options: Options,
        size: (u32, u32),
        glyph_rain: GlyphRain,
        glyphs: &mut GlyphRasterizer,
    ) -> Result<Self, NaveError> {
        let mut flythrough = Flythrough::from_options(&options)?;
        let viewport = Vec2::new(size.0.max(1) as f32, size.1.max(1) as f32);
        let mut orbit = OrbitCamera::new(
            &options.camera,
            viewport.x / viewport.y,
            flythrough.path().start(),
        )?;
        let _ = flythrough.drive(&mut orbit);

        let gallery = Gallery::from_options(&options);
        let scene = GalleryScene::build(&options, &gallery);
        let label = placard_label(&options.pictures.placard_label, glyphs);
        log::info!(
            "gallery session: {} pictures, max progress {}",
            gallery.pictures().len(),
            flythrough.max_progress()
        );
        Ok(Self {
            options,
            flythrough,
            orbit,
            glyph_rain,
            label,
            gallery,
            scene,
            pointer: PointerState::new(),
            viewport,
            started: false,
        })
    }

    /// Lift the start gate. Returns `true` the first time only.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        log::info!("tour started");
        self.started = true;
        true
    }

    /// Whether the first tap has been seen.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Track a new viewport size. Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport = Vec2::new(width as f32, height as f32);
            self.orbit.resize(width, height);
        }
    }

    /// Per-frame tick: ease the camera, repaint the glyph rain, animate
    /// placards, and copy their state into the scene.
    pub fn update(&mut self) -> Pose {
        let pose = self.flythrough.drive(&mut self.orbit);
        self.glyph_rain.on_frame_tick();
        self.gallery.on_frame_tick();
        self.scene.sync_placards(&self.gallery);
        pose
    }

    /// Ray under the cursor, if the cursor is inside the window.
    #[must_use]
    pub fn pointer_ray(&self) -> Option<Ray> {
        let position = self.pointer.position()?;
        Ray::from_screen(position, self.viewport, self.orbit.camera.build_matrix())
    }

    /// Options the session was built from.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current projection state.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.orbit.camera
    }

    /// Scroll controller.
    #[must_use]
    pub fn flythrough(&self) -> &Flythrough {
        &self.flythrough
    }

    /// Wall texture animator.
    #[must_use]
    pub fn glyph_rain(&self) -> &GlyphRain {
        &self.glyph_rain
    }

    /// Static placard label texture.
    #[must_use]
    pub fn label(&self) -> &PixelCanvas {
        &self.label
    }

    /// Pictures, placards and modal.
    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// The info modal.
    #[must_use]
    pub fn modal(&self) -> &InfoModal {
        self.gallery.modal()
    }

    /// Placard under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.gallery.hovered()
    }

    /// Drawable scene.
    #[must_use]
    pub fn scene(&self) -> &GalleryScene {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn state() -> GalleryState {
        GalleryState::seeded(Options::default(), (800, 600), 7).unwrap()
    }

    #[test]
    fn starts_at_entrance() {
        let state = state();
        assert_eq!(state.flythrough().current_progress(), 0.0);
        assert_eq!(state.camera().target, state.flythrough().path().start());
        assert!((state.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!(state.pointer_ray().is_none());
    }

    #[test]
    fn invalid_options_fail_before_anything_is_built() {
        let mut options = Options::default();
        options.camera.smooth_factor = 1.5;
        assert!(matches!(
            GalleryState::seeded(options, (800, 600), 1),
            Err(NaveError::Config(ConfigError::SmoothFactorOutOfRange(_)))
        ));

        let mut options = Options::default();
        options.glyph_rain.columns = 0;
        assert!(matches!(
            GalleryState::new(options, (800, 600)),
            Err(NaveError::Config(ConfigError::NoColumns))
        ));
    }

    #[test]
    fn rejects_a_pitch_margin_that_closes_the_look_range() {
        let mut options = Options::default();
        options.camera.pitch_margin = 2.0;
        assert!(matches!(
            GalleryState::seeded(options, (800, 600), 1),
            Err(NaveError::Config(ConfigError::PitchMarginOutOfRange(_)))
        ));
    }

    #[test]
    fn starts_gated_and_starts_once() {
        let mut state = state();
        assert!(!state.is_started());
        assert!(state.start());
        assert!(state.is_started());
        assert!(!state.start());
    }

    #[test]
    fn update_advances_camera_and_texture() {
        let mut state = state();
        let _ = state.flythrough.on_scroll(1000.0);
        let before = state.glyph_rain().drops().to_vec();
        let pose = state.update();
        assert!(state.flythrough().current_progress() > 0.0);
        assert_eq!(state.camera().target, pose.target);
        assert_ne!(state.glyph_rain().drops(), before.as_slice());
    }

    #[test]
    fn resize_ignores_zero() {
        let mut state = state();
        state.resize(0, 100);
        assert!((state.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
        state.resize(1000, 500);
        assert!((state.camera().aspect - 2.0).abs() < 1e-6);
    }
}
