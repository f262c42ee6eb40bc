//! Falling-glyph texture animation.
//!
//! Each tick darkens the whole canvas with a translucent black wash, then
//! draws one bright head glyph and one green trail glyph per column and
//! moves every column down one cell. Columns that fell past the bottom edge
//! restart at the top with a small probability, which is what breaks the
//! rain up into uneven streaks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::canvas::{PixelCanvas, Rgba};
use super::font::{GlyphMask, GlyphRasterizer};
use crate::error::ConfigError;
use crate::options::GlyphRainOptions;

const TRAIL_ALPHA: f32 = 0.8;
const TRAIL_GREEN_MIN: f32 = 150.0;
const TRAIL_GREEN_SPAN: f32 = 105.0;

/// Animated glyph-rain canvas.
///
/// Generic over the random source so tests and benchmarks can seed it;
/// [`GlyphRain::new`] seeds from the OS. Alphabet masks are rasterized once,
/// at construction.
#[derive(Debug, Clone)]
pub struct GlyphRain<R = StdRng> {
    canvas: PixelCanvas,
    drops: Vec<f32>,
    alphabet: Vec<char>,
    glyphs: Vec<GlyphMask>,
    font_size: u32,
    fade: Rgba,
    reset_chance: f32,
    rng: R,
}

impl GlyphRain<StdRng> {
    /// Rain seeded from operating-system entropy.
    ///
    /// # Errors
    ///
    /// See [`GlyphRain::with_rng`].
    pub fn new(
        options: &GlyphRainOptions,
        glyphs: &mut GlyphRasterizer,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(options, glyphs, StdRng::from_os_rng())
    }

    /// Rain with a reproducible sequence.
    ///
    /// # Errors
    ///
    /// See [`GlyphRain::with_rng`].
    pub fn seeded(
        options: &GlyphRainOptions,
        glyphs: &mut GlyphRasterizer,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(options, glyphs, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GlyphRain<R> {
    /// Rain drawing its randomness from `rng`.
    ///
    /// Drop positions start scattered up to `initial_spread` cells above
    /// the top edge; the canvas starts opaque black.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoColumns`] for zero columns,
    /// [`ConfigError::TextureTooSmall`] when a column would be narrower
    /// than one pixel, [`ConfigError::EmptyAlphabet`], and
    /// [`ConfigError::NonPositive`] for a fade, reset chance or spread that
    /// is not finite and positive.
    pub fn with_rng(
        options: &GlyphRainOptions,
        glyphs: &mut GlyphRasterizer,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        if options.columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        if options.texture_size < options.columns {
            return Err(ConfigError::TextureTooSmall {
                size: options.texture_size,
                columns: options.columns,
            });
        }
        let alphabet: Vec<char> = options.alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        for (field, value) in [
            ("fade_alpha", options.fade_alpha),
            ("reset_chance", options.reset_chance),
            ("initial_spread", options.initial_spread),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let font_size = options.font_size();
        let masks: Vec<GlyphMask> = alphabet
            .iter()
            .map(|&c| glyphs.mask(c, font_size).clone())
            .collect();
        let blank = masks.iter().filter(|m| m.is_empty()).count();
        if blank > 0 {
            log::warn!("glyph rain: {blank} of {} glyphs are blank", masks.len());
        }
        let drops = (0..options.columns)
            .map(|_| rng.random::<f32>() * -options.initial_spread)
            .collect();
        let size = options.texture_size;
        log::debug!(
            "glyph rain: {size}px, {} columns, {} glyphs",
            options.columns,
            alphabet.len()
        );

        Ok(Self {
            canvas: PixelCanvas::new(size, size, Rgba::BLACK),
            drops,
            alphabet,
            glyphs: masks,
            font_size,
            fade: Rgba::new(0.0, 0.0, 0.0, options.fade_alpha.min(1.0)),
            reset_chance: options.reset_chance.min(1.0),
            rng,
        })
    }

    /// Advance the animation by one frame.
    pub fn on_frame_tick(&mut self) {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        self.canvas.fill_rect(0, 0, width, height, self.fade);

        let cell = self.font_size as f32;
        let size = height as f32;
        for i in 0..self.drops.len() {
            let x = i as f32 * cell;
            let y = self.drops[i] * cell;

            let head = self.rng.random_range(0..self.glyphs.len());
            self.canvas.draw_mask(&self.glyphs[head], x, y, Rgba::WHITE);

            let green =
                TRAIL_GREEN_MIN + self.rng.random::<f32>() * TRAIL_GREEN_SPAN;
            let trail_color = Rgba::from_bytes(0.0, green, 0.0, TRAIL_ALPHA);
            let trail = self.rng.random_range(0..self.glyphs.len());
            self.canvas
                .draw_mask(&self.glyphs[trail], x, y - cell, trail_color);

            self.drops[i] += 1.0;
            if self.drops[i] * cell > size
                && self.rng.random::<f32>() > 1.0 - self.reset_chance
            {
                self.drops[i] = 0.0;
            }
        }
    }

    /// Current drop position of each column, in cells from the top.
    #[must_use]
    pub fn drops(&self) -> &[f32] {
        &self.drops
    }

    /// The animated pixels.
    #[must_use]
    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    /// Characters glyphs are drawn from.
    #[must_use]
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    /// Cell size in pixels.
    #[must_use]
    pub fn font_size(&self) -> u32 {
        self.font_size
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore;

    use super::*;

    /// Returns zero forever: every uniform draw is 0.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn options() -> GlyphRainOptions {
        GlyphRainOptions::default()
    }

    /// Every alphabet character drawn as a solid cell.
    fn blocks() -> GlyphRasterizer {
        let options = options();
        let mut glyphs = GlyphRasterizer::without_fonts();
        for c in options.alphabet.chars() {
            glyphs.insert(c, options.font_size(), GlyphMask::block(options.font_size()));
        }
        glyphs
    }

    #[test]
    fn default_geometry() {
        let rain = GlyphRain::seeded(&options(), &mut blocks(), 1).unwrap();
        assert_eq!(rain.columns(), 32);
        assert_eq!(rain.font_size(), 16);
        assert_eq!(rain.canvas().width(), 512);
        assert_eq!(rain.canvas().pixel(100, 100), Some([0, 0, 0, 255]));
    }

    #[test]
    fn drops_start_above_the_top() {
        let rain = GlyphRain::seeded(&options(), &mut blocks(), 9).unwrap();
        assert!(rain.drops().iter().all(|&d| (-50.0..=0.0).contains(&d)));
    }

    #[test]
    fn drops_advance_one_cell_per_tick() {
        let mut rain = GlyphRain::seeded(&options(), &mut blocks(), 3).unwrap();
        let initial = rain.drops().to_vec();
        // No column can pass the 32-cell bottom edge within 30 ticks.
        for _ in 0..30 {
            rain.on_frame_tick();
        }
        for (now, start) in rain.drops().iter().zip(&initial) {
            assert!((now - (start + 30.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn same_seed_same_rain() {
        let mut a = GlyphRain::seeded(&options(), &mut blocks(), 42).unwrap();
        let mut b = GlyphRain::seeded(&options(), &mut blocks(), 42).unwrap();
        for _ in 0..300 {
            a.on_frame_tick();
            b.on_frame_tick();
        }
        assert_eq!(a.drops(), b.drops());
        assert_eq!(a.canvas(), b.canvas());
        // Several hundred ticks in, columns have wrapped back to the top.
        assert!(a.drops().iter().any(|&d| d < 250.0));
    }

    #[test]
    fn columns_never_reset_when_draws_are_low() {
        let mut rain = GlyphRain::with_rng(&options(), &mut blocks(), ZeroRng).unwrap();
        assert!(rain.drops().iter().all(|&d| d == 0.0));
        for _ in 0..100 {
            rain.on_frame_tick();
        }
        assert!(rain.drops().iter().all(|&d| d == 100.0));
    }

    #[test]
    fn head_glyph_is_drawn_white() {
        let mut rain = GlyphRain::with_rng(&options(), &mut blocks(), ZeroRng).unwrap();
        // Tick one draws above the canvas; tick two lands in the top row.
        rain.on_frame_tick();
        rain.on_frame_tick();
        let canvas = rain.canvas();
        let white = (0..16)
            .flat_map(|y| (0..16).map(move |x| (x, y)))
            .any(|(x, y)| canvas.pixel(x, y) == Some([255, 255, 255, 255]));
        assert!(white);
    }

    #[test]
    fn blank_glyphs_still_animate() {
        let mut glyphs = GlyphRasterizer::without_fonts();
        let mut rain = GlyphRain::with_rng(&options(), &mut glyphs, ZeroRng).unwrap();
        rain.on_frame_tick();
        rain.on_frame_tick();
        assert!(rain.drops().iter().all(|&d| d == 2.0));
        assert_eq!(rain.canvas().pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn alphabet_is_rasterized_once() {
        let mut glyphs = blocks();
        let cached = glyphs.cached();
        let _rain = GlyphRain::seeded(&options(), &mut glyphs, 5).unwrap();
        let _again = GlyphRain::seeded(&options(), &mut glyphs, 6).unwrap();
        assert_eq!(glyphs.cached(), cached);
    }

    #[test]
    fn rejects_bad_options() {
        let mut o = options();
        o.columns = 0;
        assert_eq!(GlyphRain::seeded(&o, &mut blocks(), 0).err(), Some(ConfigError::NoColumns));

        let mut o = options();
        o.texture_size = 16;
        assert!(matches!(
            GlyphRain::seeded(&o, &mut blocks(), 0),
            Err(ConfigError::TextureTooSmall { size: 16, columns: 32 })
        ));

        let mut o = options();
        o.alphabet.clear();
        assert_eq!(
            GlyphRain::seeded(&o, &mut blocks(), 0).err(),
            Some(ConfigError::EmptyAlphabet)
        );

        let mut o = options();
        o.reset_chance = 0.0;
        assert!(matches!(
            GlyphRain::seeded(&o, &mut blocks(), 0),
            Err(ConfigError::NonPositive { field: "reset_chance", .. })
        ));
    }
}
