//! Shared utilities: per-frame smoothing and frame timing.

/// Frame rate bookkeeping and periodic frame statistics.
pub mod frame_timing;
/// Exponential approach toward a target value.
pub mod smoothing;
