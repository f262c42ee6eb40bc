//! Frame-rate coupled exponential smoothing.
//!
//! Every animated value in the gallery (fly-through progress, placard hover
//! scale and glow, the FPS readout) chases its target by a fixed fraction
//! of the remaining distance once per frame.

/// Move `current` toward `target` by `factor` of the remaining distance.
///
/// For `factor` in `[0, 1]` the result is a convex combination of the two
/// inputs, so it never overshoots `target`.
#[inline]
#[must_use]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Like [`approach`], but lands exactly on `target` once within `epsilon`.
#[inline]
#[must_use]
pub fn approach_settled(
    current: f32,
    target: f32,
    factor: f32,
    epsilon: f32,
) -> f32 {
    let next = approach(current, target, factor);
    if (target - next).abs() < epsilon {
        target
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_covers_fraction_of_gap() {
        assert_eq!(approach(0.0, 10.0, 0.1), 1.0);
        assert_eq!(approach(10.0, 0.0, 0.5), 5.0);
        assert_eq!(approach(3.0, 3.0, 0.5), 3.0);
    }

    #[test]
    fn settled_snaps_inside_epsilon() {
        assert_eq!(approach_settled(5.99999, 6.0, 0.05, 1e-4), 6.0);
        assert!(approach_settled(5.0, 6.0, 0.05, 1e-4) < 6.0);
    }
}
