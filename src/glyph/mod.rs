//! Procedural textures drawn on the CPU and uploaded every frame.
//!
//! The falling-glyph wall texture and the placard label share one small
//! raster toolkit: an RGBA8 canvas with source-over blending, and glyph
//! coverage masks rasterized with cosmic-text.

/// RGBA8 canvas and colors.
pub mod canvas;
/// Glyph shaping, rasterization and mask caching.
pub mod font;
/// Falling-glyph animation.
pub mod rain;

pub use canvas::{PixelCanvas, Rgba};
pub use font::{GlyphMask, GlyphRasterizer};
pub use rain::GlyphRain;

/// Placard label texture width in pixels.
pub const LABEL_WIDTH: u32 = 256;
/// Placard label texture height in pixels.
pub const LABEL_HEIGHT: u32 = 64;

/// Placard caption size in pixels.
pub const LABEL_FONT_SIZE: u32 = 24;

/// Render the static placard label: dark green panel, bright green frame,
/// caption centered on the ink of its glyphs.
#[must_use]
pub fn placard_label(text: &str, glyphs: &mut GlyphRasterizer) -> PixelCanvas {
    let green = Rgba::new(0.0, 1.0, 0.0, 1.0);
    let mut canvas = PixelCanvas::new(
        LABEL_WIDTH,
        LABEL_HEIGHT,
        Rgba::from_bytes(0.0, 17.0, 0.0, 1.0),
    );
    canvas.stroke_rect(2, 2, LABEL_WIDTH - 4, LABEL_HEIGHT - 4, 3, green);

    let masks: Vec<GlyphMask> = text
        .chars()
        .map(|c| glyphs.mask(c, LABEL_FONT_SIZE).clone())
        .collect();
    let line_width: u32 = masks.iter().map(GlyphMask::advance).sum();
    let inked = masks.iter().filter(|m| !m.is_empty());
    let ascent = inked.clone().map(GlyphMask::top).max().unwrap_or(0);
    let descent = inked
        .map(|m| m.height() as i32 - m.top())
        .max()
        .unwrap_or(0);

    let mut pen = (LABEL_WIDTH as f32 - line_width as f32) / 2.0;
    let baseline = LABEL_HEIGHT as f32 / 2.0 + (ascent - descent) as f32 / 2.0;
    for mask in &masks {
        canvas.draw_mask(mask, pen, baseline, green);
        pen += mask.advance() as f32;
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Option<[u8; 4]> = Some([0, 255, 0, 255]);
    const PANEL: Option<[u8; 4]> = Some([0, 17, 0, 255]);

    #[test]
    fn label_has_frame_and_centered_text() {
        let mut glyphs = GlyphRasterizer::without_fonts();
        glyphs.insert('H', LABEL_FONT_SIZE, GlyphMask::block(16));
        let label = placard_label("HH", &mut glyphs);
        assert_eq!(label.pixel(0, 0), PANEL);
        assert_eq!(label.pixel(3, 30), GREEN);
        assert_eq!(label.pixel(10, 30), PANEL);
        // Two 16 px blocks: columns 112..144, rows 24..40.
        assert_eq!(label.pixel(112, 24), GREEN);
        assert_eq!(label.pixel(143, 39), GREEN);
        assert_eq!(label.pixel(111, 30), PANEL);
        assert_eq!(label.pixel(144, 30), PANEL);
        assert_eq!(label.pixel(128, 23), PANEL);
        assert_eq!(label.pixel(128, 40), PANEL);
    }

    #[test]
    fn label_is_mirror_symmetric_for_symmetric_text() {
        let mut glyphs = GlyphRasterizer::without_fonts();
        let bar = GlyphMask::from_coverage(2, 12, 4, 16, 8, vec![255; 64]);
        let space = GlyphMask::from_coverage(0, 0, 0, 0, 8, Vec::new());
        glyphs.insert('I', LABEL_FONT_SIZE, bar);
        glyphs.insert(' ', LABEL_FONT_SIZE, space);
        let label = placard_label("I I", &mut glyphs);
        for y in 0..LABEL_HEIGHT {
            for x in 0..LABEL_WIDTH / 2 {
                let mirrored = label.pixel(LABEL_WIDTH - 1 - x, y);
                assert_eq!(label.pixel(x, y), mirrored, "({x}, {y})");
            }
        }
    }

    #[test]
    fn label_without_fonts_keeps_its_frame() {
        let mut glyphs = GlyphRasterizer::without_fonts();
        let label = placard_label("Matrix has you", &mut glyphs);
        assert_eq!(label.pixel(3, 30), GREEN);
        assert_eq!(label.pixel(128, 32), PANEL);
    }
}
