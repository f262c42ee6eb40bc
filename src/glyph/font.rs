//! Glyph rasterization backed by cosmic-text.
//!
//! Each character is shaped with the monospace family, falling back to
//! whichever installed face covers it, then rasterized once per pixel size
//! into an 8-bit coverage mask. Masks are cached, so the rain pays for
//! shaping only while it is being built.

use cosmic_text::{
    fontdb, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache,
    SwashContent, SwashImage,
};
use rustc_hash::FxHashMap;

/// 8-bit coverage of one rasterized character.
///
/// Offsets are relative to the pen position on the baseline: the mask's
/// top-left pixel sits `left` pixels right of the pen and `top` pixels
/// above the baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphMask {
    left: i32,
    top: i32,
    width: u32,
    height: u32,
    advance: u32,
    coverage: Vec<u8>,
}

impl GlyphMask {
    /// Mask from row-major coverage bytes. A short buffer is padded with
    /// empty coverage and a long one truncated.
    #[must_use]
    pub fn from_coverage(
        left: i32,
        top: i32,
        width: u32,
        height: u32,
        advance: u32,
        mut coverage: Vec<u8>,
    ) -> Self {
        coverage.resize(width as usize * height as usize, 0);
        Self {
            left,
            top,
            width,
            height,
            advance,
            coverage,
        }
    }

    /// Fully covered `size` x `size` square standing on the baseline.
    #[must_use]
    pub fn block(size: u32) -> Self {
        Self::from_coverage(
            0,
            size as i32,
            size,
            size,
            size,
            vec![u8::MAX; size as usize * size as usize],
        )
    }

    fn from_image(
        image: &SwashImage,
        pen_x: i32,
        pen_y: i32,
        advance: u32,
    ) -> Self {
        let (width, height) = (image.placement.width, image.placement.height);
        let pixels = width as usize * height as usize;
        let stride = if pixels == 0 {
            1
        } else {
            (image.data.len() / pixels).max(1)
        };
        let coverage = match image.content {
            SwashContent::Mask => image.data.clone(),
            // Color bitmaps (emoji) keep only their alpha.
            SwashContent::Color => image
                .data
                .chunks_exact(stride)
                .map(|px| px[stride - 1])
                .collect(),
            SwashContent::SubpixelMask => image
                .data
                .chunks_exact(stride)
                .map(|px| {
                    let channels = &px[..stride.min(3)];
                    let sum: u32 = channels.iter().map(|&c| u32::from(c)).sum();
                    (sum / channels.len() as u32) as u8
                })
                .collect(),
        };
        Self::from_coverage(
            pen_x + image.placement.left,
            image.placement.top - pen_y,
            width,
            height,
            advance,
            coverage,
        )
    }

    /// Horizontal offset of the mask from the pen.
    #[must_use]
    pub fn left(&self) -> i32 {
        self.left
    }

    /// Height of the mask's top edge above the baseline.
    #[must_use]
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Mask width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pen advance in pixels.
    #[must_use]
    pub fn advance(&self) -> u32 {
        self.advance
    }

    /// Coverage at `(x, y)` inside the mask; zero outside.
    #[must_use]
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }

    /// Number of pixels with any coverage.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.coverage.iter().filter(|&&c| c > 0).count()
    }

    /// True when nothing would be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lit_count() == 0
    }
}

/// Shapes and rasterizes characters, caching one mask per character and
/// pixel size.
pub struct GlyphRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    masks: FxHashMap<(char, u32), GlyphMask>,
}

impl GlyphRasterizer {
    /// Rasterizer over the system's installed fonts.
    #[must_use]
    pub fn new() -> Self {
        Self::with_font_system(FontSystem::new())
    }

    /// Rasterizer over a prepared font system.
    #[must_use]
    pub fn with_font_system(font_system: FontSystem) -> Self {
        let faces = font_system.db().faces().count();
        if faces == 0 {
            log::warn!("no fonts available; glyphs will render blank");
        } else {
            log::debug!("glyph rasterizer: {faces} font faces");
        }
        Self {
            font_system,
            swash_cache: SwashCache::new(),
            masks: FxHashMap::default(),
        }
    }

    /// Rasterizer with an empty font database. Every character renders
    /// blank unless a mask is [`insert`](Self::insert)ed for it.
    #[must_use]
    pub fn without_fonts() -> Self {
        Self::with_font_system(FontSystem::new_with_locale_and_db(
            "en-US".to_owned(),
            fontdb::Database::new(),
        ))
    }

    /// Use `mask` for `c` at `size` pixels instead of rasterizing it.
    pub fn insert(&mut self, c: char, size: u32, mask: GlyphMask) {
        let _ = self.masks.insert((c, size), mask);
    }

    /// Mask for `c` at `size` pixels, rasterizing it on first use.
    pub fn mask(&mut self, c: char, size: u32) -> &GlyphMask {
        let Self {
            font_system,
            swash_cache,
            masks,
        } = self;
        masks
            .entry((c, size))
            .or_insert_with(|| rasterize(font_system, swash_cache, c, size))
    }

    /// Number of cached masks.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.masks.len()
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

fn rasterize(
    font_system: &mut FontSystem,
    swash_cache: &mut SwashCache,
    c: char,
    size: u32,
) -> GlyphMask {
    if size == 0 || font_system.db().faces().next().is_none() {
        return GlyphMask::default();
    }
    let px = size as f32;
    let mut buffer = Buffer::new(font_system, Metrics::new(px, px));
    buffer.set_size(font_system, Some(px * 4.0), Some(px * 2.0));
    let mut utf8 = [0; 4];
    buffer.set_text(
        font_system,
        c.encode_utf8(&mut utf8),
        Attrs::new().family(Family::Monospace),
        Shaping::Advanced,
    );
    buffer.shape_until_scroll(font_system, false);

    let mut blank = GlyphMask::default();
    for run in buffer.layout_runs() {
        for glyph in run.glyphs {
            let physical = glyph.physical((0.0, 0.0), 1.0);
            let advance = glyph.w.round().max(0.0) as u32;
            blank.advance = blank.advance.max(advance);
            let image = swash_cache
                .get_image(font_system, physical.cache_key)
                .as_ref()
                .filter(|image| {
                    image.placement.width > 0 && image.placement.height > 0
                });
            if let Some(image) = image {
                return GlyphMask::from_image(
                    image, physical.x, physical.y, advance,
                );
            }
        }
    }
    if !c.is_whitespace() {
        log::debug!("no glyph image for {c:?} at {size}px");
    }
    blank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_is_padded_and_bounded() {
        let mask = GlyphMask::from_coverage(1, 3, 2, 2, 4, vec![255, 0, 128]);
        assert_eq!(mask.coverage(0, 0), 255);
        assert_eq!(mask.coverage(0, 1), 128);
        assert_eq!(mask.coverage(1, 1), 0);
        assert_eq!(mask.coverage(5, 0), 0);
        assert_eq!(mask.lit_count(), 2);
        assert!(!mask.is_empty());
        assert!(GlyphMask::default().is_empty());
    }

    #[test]
    fn block_stands_on_the_baseline() {
        let block = GlyphMask::block(8);
        assert_eq!((block.left(), block.top()), (0, 8));
        assert_eq!((block.width(), block.height(), block.advance()), (8, 8, 8));
        assert_eq!(block.lit_count(), 64);
    }

    #[test]
    fn without_fonts_everything_is_blank() {
        let mut glyphs = GlyphRasterizer::without_fonts();
        assert!(glyphs.mask('A', 16).is_empty());
        assert!(glyphs.mask('ア', 16).is_empty());
        assert_eq!(glyphs.cached(), 2);
    }

    #[test]
    fn inserted_masks_win_and_are_keyed_by_size() {
        let mut glyphs = GlyphRasterizer::without_fonts();
        glyphs.insert('A', 16, GlyphMask::block(16));
        assert_eq!(glyphs.mask('A', 16), &GlyphMask::block(16));
        assert!(glyphs.mask('A', 8).is_empty());
    }

    #[test]
    fn system_masks_fit_their_cell() {
        let mut glyphs = GlyphRasterizer::new();
        for c in "0123456789ABCXYZ:=*+-<>".chars() {
            let mask = glyphs.mask(c, 16).clone();
            assert!(mask.width() <= 64 && mask.height() <= 64, "{c:?}");
            assert!(mask.advance() <= 64, "{c:?}");
        }
        let cached = glyphs.cached();
        let _ = glyphs.mask('0', 16);
        assert_eq!(glyphs.cached(), cached);
    }
}
