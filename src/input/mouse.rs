//! Pointer tracking and tap detection.

use glam::Vec2;

/// Pointer travel, in pixels, beyond which a press becomes a drag.
pub const DRAG_THRESHOLD: f32 = 10.0;

/// Result of releasing the primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickResult {
    /// The press turned into a drag, or started and ended on different
    /// targets.
    NoAction,
    /// Tap on placard `n`.
    Placard(usize),
    /// Tap on anything else.
    Background,
}

/// Tracks cursor position, the press origin, and drag state.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Option<Vec2>,
    press: Option<Press>,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Vec2,
    target: Option<usize>,
    dragging: bool,
}

impl PointerState {
    /// No cursor seen yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position inside the window.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Whether the current press has become a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.dragging)
    }

    /// Record a cursor move and return the delta since the previous one.
    pub fn move_to(&mut self, position: Vec2) -> Vec2 {
        let delta = self.position.map_or(Vec2::ZERO, |last| position - last);
        self.position = Some(position);
        if let Some(press) = &mut self.press {
            if press.origin.distance(position) > DRAG_THRESHOLD {
                press.dragging = true;
            }
        }
        delta
    }

    /// Forget the cursor after it left the window. A held press is kept so
    /// a drag can continue when it returns.
    pub fn leave(&mut self) {
        self.position = None;
    }

    /// Start a press over `target` (the placard under the cursor, if any).
    pub fn press(&mut self, target: Option<usize>) {
        self.press = Some(Press {
            origin: self.position.unwrap_or_default(),
            target,
            dragging: false,
        });
    }

    /// End the press over `target` and classify it.
    pub fn release(&mut self, target: Option<usize>) -> ClickResult {
        let Some(press) = self.press.take() else {
            return ClickResult::NoAction;
        };
        if press.dragging || press.target != target {
            return ClickResult::NoAction;
        }
        target.map_or(ClickResult::Background, ClickResult::Placard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_on_placard() {
        let mut pointer = PointerState::new();
        let _ = pointer.move_to(Vec2::new(100.0, 100.0));
        pointer.press(Some(2));
        let _ = pointer.move_to(Vec2::new(104.0, 103.0));
        assert!(!pointer.is_dragging());
        assert_eq!(pointer.release(Some(2)), ClickResult::Placard(2));
        assert!(!pointer.is_pressed());
    }

    #[test]
    fn drag_cancels_tap() {
        let mut pointer = PointerState::new();
        let _ = pointer.move_to(Vec2::ZERO);
        pointer.press(Some(1));
        let delta = pointer.move_to(Vec2::new(30.0, 0.0));
        assert_eq!(delta, Vec2::new(30.0, 0.0));
        assert!(pointer.is_dragging());
        assert_eq!(pointer.release(Some(1)), ClickResult::NoAction);
    }

    #[test]
    fn different_targets_do_nothing() {
        let mut pointer = PointerState::new();
        pointer.press(Some(0));
        assert_eq!(pointer.release(Some(1)), ClickResult::NoAction);
        pointer.press(None);
        assert_eq!(pointer.release(None), ClickResult::Background);
        assert_eq!(pointer.release(None), ClickResult::NoAction);
    }

    #[test]
    fn first_move_has_no_delta() {
        let mut pointer = PointerState::new();
        assert_eq!(pointer.move_to(Vec2::new(5.0, 5.0)), Vec2::ZERO);
        pointer.leave();
        assert_eq!(pointer.position(), None);
        assert_eq!(pointer.move_to(Vec2::new(8.0, 5.0)), Vec2::ZERO);
    }
}
