//! Camera system for the gallery fly-through.
//!
//! A pure three-phase path maps scroll progress to a pose, a smoothing
//! controller turns raw scroll input into progress, and an arc-rotate
//! camera turns poses into view/projection matrices.

/// Perspective camera, GPU uniform, and the arc-rotate camera handle.
pub mod core;
/// Scroll accumulation and per-frame smoothing.
pub mod flythrough;
/// Progress-to-pose mapping.
pub mod path;

pub use self::core::{Camera, CameraUniform, OrbitCamera};
pub use flythrough::{CameraHandle, Flythrough};
pub use path::{FlightPath, FlightPhase, Pose};
