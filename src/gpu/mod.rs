//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, canvas-backed textures,
//! and bind group layout helpers.

/// Shared wgpu boilerplate helpers for layouts and samplers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Canvas-backed and depth textures.
pub mod texture;

pub use render_context::{RenderContext, RenderContextError};
pub use texture::{DepthTexture, DynamicTexture, DEPTH_FORMAT};
