//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Invalid configuration detected while constructing a component.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The fly-through needs at least two pictures to sweep between.
    TooFewPictures(usize),
    /// Smoothing factor must lie strictly between 0 and 1.
    SmoothFactorOutOfRange(f32),
    /// Pitch margin must lie in `[0, π/2)` so the pitch range stays open.
    PitchMarginOutOfRange(f32),
    /// Scroll sensitivity must be finite and positive.
    InvalidScrollSensitivity(f32),
    /// A distance or radius that must be finite and positive.
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A coordinate that must be finite was NaN or infinite.
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The glyph texture has no columns.
    NoColumns,
    /// The glyph texture is narrower than one pixel per column.
    TextureTooSmall {
        /// Requested texture edge length in pixels.
        size: u32,
        /// Requested column count.
        columns: u32,
    },
    /// The glyph alphabet is empty.
    EmptyAlphabet,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPictures(n) => {
                write!(f, "need at least 2 pictures, got {n}")
            }
            Self::SmoothFactorOutOfRange(v) => {
                write!(f, "smooth factor must be in (0, 1), got {v}")
            }
            Self::PitchMarginOutOfRange(v) => {
                write!(f, "pitch margin must be in [0, pi/2), got {v}")
            }
            Self::InvalidScrollSensitivity(v) => {
                write!(f, "scroll sensitivity must be positive, got {v}")
            }
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::NoColumns => write!(f, "glyph rain needs at least 1 column"),
            Self::TextureTooSmall { size, columns } => write!(
                f,
                "glyph texture of {size}px cannot hold {columns} columns"
            ),
            Self::EmptyAlphabet => write!(f, "glyph alphabet is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors produced by the nave crate.
#[derive(Debug)]
pub enum NaveError {
    /// Invalid options rejected at construction time.
    Config(ConfigError),
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for NaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for NaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for NaveError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RenderContextError> for NaveError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for NaveError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
