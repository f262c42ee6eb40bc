use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Katakana row, digits, Latin capitals and a few symbols.
pub const DEFAULT_ALPHABET: &str = "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ@#$%^&*";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Glyph Rain", inline)]
#[serde(default)]
/// Falling-glyph wall texture parameters.
pub struct GlyphRainOptions {
    /// Edge length of the square texture in pixels.
    #[schemars(title = "Texture Size", range(min = 64, max = 2048))]
    pub texture_size: u32,
    /// Number of glyph columns across the texture.
    #[schemars(title = "Columns", range(min = 1, max = 128))]
    pub columns: u32,
    /// Characters sampled for each drawn glyph.
    #[schemars(skip)]
    pub alphabet: String,
    /// Opacity of the black overlay that fades the previous frame.
    #[schemars(title = "Fade", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub fade_alpha: f32,
    /// Per-frame chance that a column past the bottom restarts at the top.
    #[schemars(title = "Reset Chance", range(min = 0.001, max = 1.0))]
    pub reset_chance: f32,
    /// Drops start up to this many cells above the top edge.
    #[schemars(skip)]
    pub initial_spread: f32,
}

impl Default for GlyphRainOptions {
    fn default() -> Self {
        Self {
            texture_size: 512,
            columns: 32,
            alphabet: DEFAULT_ALPHABET.to_owned(),
            fade_alpha: 0.05,
            reset_chance: 0.025,
            initial_spread: 50.0,
        }
    }
}

impl GlyphRainOptions {
    /// Pixel size of one glyph cell.
    #[must_use]
    pub fn font_size(&self) -> u32 {
        self.texture_size / self.columns.max(1)
    }
}
