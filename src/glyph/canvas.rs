//! CPU-side RGBA8 drawing surface.
//!
//! Mirrors the handful of 2D-context operations the gallery textures need:
//! translucent rectangle fills, rectangle outlines and glyph masks, all
//! composited source-over.

use super::font::GlyphMask;

/// Straight (non-premultiplied) color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Coverage.
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Color from unit-range channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from byte-range RGB and unit-range alpha, like CSS `rgba()`.
    #[must_use]
    pub fn from_bytes(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r / 255.0, g / 255.0, b / 255.0, a)
    }
}

/// Row-major RGBA8 pixel buffer, origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 255.0) + 0.5) as u8
}

impl PixelCanvas {
    /// Canvas filled with `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        };
        canvas.clear(background);
        canvas
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, `width * 4` bytes per row.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA bytes at `(x, y)`, or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: Rgba) {
        let px = [
            to_byte(color.r * 255.0),
            to_byte(color.g * 255.0),
            to_byte(color.b * 255.0),
            to_byte(color.a * 255.0),
        ];
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Composite `color` over the pixel at `(x, y)`; off-canvas is a no-op.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height)
        {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let a = color.a.clamp(0.0, 1.0);
        let keep = 1.0 - a;
        let dst = &mut self.pixels[i..i + 4];
        for (channel, src) in dst.iter_mut().zip([color.r, color.g, color.b]) {
            *channel = to_byte(src * 255.0 * a + f32::from(*channel) * keep);
        }
        dst[3] = to_byte(a * 255.0 + f32::from(dst[3]) * keep);
    }

    /// Composite `color` over a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(w)).min(i64::from(self.width));
        let y1 = (y + i64::from(h)).min(i64::from(self.height));
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color);
            }
        }
    }

    /// Outline a rectangle with a border `line_width` pixels thick, drawn
    /// inside the rectangle.
    pub fn stroke_rect(
        &mut self,
        x: i64,
        y: i64,
        w: u32,
        h: u32,
        line_width: u32,
        color: Rgba,
    ) {
        let lw = line_width.min(w / 2).min(h / 2);
        self.fill_rect(x, y, w, lw, color);
        self.fill_rect(x, y + i64::from(h - lw), w, lw, color);
        self.fill_rect(x, y + i64::from(lw), lw, h - 2 * lw, color);
        self.fill_rect(x + i64::from(w - lw), y + i64::from(lw), lw, h - 2 * lw, color);
    }

    /// Composite `mask` with its pen at `x` on the line `baseline`, tinting
    /// it `color`. Coverage scales the color's alpha.
    pub fn draw_mask(
        &mut self,
        mask: &GlyphMask,
        x: f32,
        baseline: f32,
        color: Rgba,
    ) {
        let origin_x = x.round() as i64 + i64::from(mask.left());
        let origin_y = baseline.round() as i64 - i64::from(mask.top());
        for row in 0..mask.height() {
            for col in 0..mask.width() {
                let coverage = mask.coverage(col, row);
                if coverage == 0 {
                    continue;
                }
                let alpha = color.a * f32::from(coverage) / 255.0;
                self.blend_pixel(
                    origin_x + i64::from(col),
                    origin_y + i64::from(row),
                    Rgba { a: alpha, ..color },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_filled() {
        let canvas = PixelCanvas::new(4, 3, Rgba::BLACK);
        assert_eq!(canvas.as_bytes().len(), 4 * 3 * 4);
        assert_eq!(canvas.pixel(3, 2), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn translucent_fill_blends_source_over() {
        let mut canvas = PixelCanvas::new(2, 2, Rgba::WHITE);
        canvas.fill_rect(0, 0, 1, 1, Rgba::new(0.0, 0.0, 0.0, 0.5));
        assert_eq!(canvas.pixel(0, 0), Some([128, 128, 128, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn repeated_fade_darkens() {
        let mut canvas = PixelCanvas::new(1, 1, Rgba::WHITE);
        for _ in 0..20 {
            canvas.fill_rect(0, 0, 1, 1, Rgba::new(0.0, 0.0, 0.0, 0.05));
        }
        let [r, g, b, _] = canvas.pixel(0, 0).unwrap();
        assert!(r < 100 && r == g && g == b, "got {r}");
    }

    #[test]
    fn fill_rect_clips_to_canvas() {
        let mut canvas = PixelCanvas::new(4, 4, Rgba::BLACK);
        canvas.fill_rect(-2, -2, 4, 4, Rgba::WHITE);
        assert_eq!(canvas.pixel(1, 1), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(2, 2), Some([0, 0, 0, 255]));
        canvas.fill_rect(10, 10, 4, 4, Rgba::WHITE);
    }

    #[test]
    fn stroke_leaves_interior_untouched() {
        let mut canvas = PixelCanvas::new(10, 10, Rgba::BLACK);
        canvas.stroke_rect(0, 0, 10, 10, 2, Rgba::WHITE);
        assert_eq!(canvas.pixel(0, 5), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(8, 9), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(5, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn mask_sits_above_baseline() {
        let mut canvas = PixelCanvas::new(16, 32, Rgba::BLACK);
        canvas.draw_mask(&GlyphMask::block(8), 4.0, 16.0, Rgba::WHITE);
        assert_eq!(canvas.pixel(4, 8), Some([255; 4]));
        assert_eq!(canvas.pixel(11, 15), Some([255; 4]));
        assert_eq!(canvas.pixel(4, 16), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(3, 10), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(12, 10), Some([0, 0, 0, 255]));
    }

    #[test]
    fn partial_coverage_blends_partially() {
        let mut canvas = PixelCanvas::new(2, 1, Rgba::BLACK);
        let mask = GlyphMask::from_coverage(0, 1, 2, 1, 2, vec![255, 128]);
        canvas.draw_mask(&mask, 0.0, 1.0, Rgba::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(canvas.pixel(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(canvas.pixel(1, 0), Some([0, 128, 0, 255]));
    }

    #[test]
    fn mask_offsets_and_clipping() {
        let mut canvas = PixelCanvas::new(4, 4, Rgba::BLACK);
        let mask = GlyphMask::from_coverage(-1, 2, 2, 2, 2, vec![255; 4]);
        canvas.draw_mask(&mask, 0.0, 2.0, Rgba::WHITE);
        assert_eq!(canvas.pixel(0, 0), Some([255; 4]));
        assert_eq!(canvas.pixel(0, 1), Some([255; 4]));
        assert_eq!(canvas.pixel(1, 0), Some([0, 0, 0, 255]));
    }
}
