// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-driven fly-through of a picture gallery inside a cathedral,
//! rendered with wgpu.
//!
//! The camera follows a three-phase path down the nave (enter, approach,
//! orbit the picture arc) driven by page-style scroll input, and the walls
//! carry a procedurally animated "glyph rain" texture repainted every frame.
//! Tapping a picture's placard opens an info modal with its title and
//! description.
//!
//! # Key entry points
//!
//! - [`GalleryEngine`] - GPU engine: scene, textures and the draw loop
//! - [`GalleryState`] - the headless session (camera, glyph rain, gallery)
//! - [`camera::Flythrough`] - scroll to camera pose mapping
//! - [`glyph::GlyphRain`] - the procedural texture animator
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Input arrives as [`InputEvent`]s and mutates only scroll targets, pointer
//! state and the modal. Each frame, [`GalleryEngine::update`] eases the
//! camera toward its target, advances the glyph rain and placard hover
//! animations, and uploads the changed texture and object slots; then
//! [`GalleryEngine::render`] draws the cathedral in a single forward pass
//! with exponential fog.

/// Camera projection, fly-through path and scroll controller.
pub mod camera;
/// GPU-backed gallery engine and its headless session state.
pub mod engine;
/// Error types.
pub mod error;
/// Pictures, placards, hover picking and the info modal.
pub mod gallery;
/// Procedural glyph textures.
pub mod glyph;
/// wgpu device, surface and texture plumbing.
pub mod gpu;
/// Platform-agnostic input events and click detection.
pub mod input;
/// Serializable runtime options.
pub mod options;
/// The forward renderer.
pub mod renderer;
/// Cathedral geometry, materials and scene objects.
pub mod scene;
/// Small shared helpers.
pub mod util;
/// Standalone winit window.
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{GalleryEngine, GalleryState};
pub use error::NaveError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
