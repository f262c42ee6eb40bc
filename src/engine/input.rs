//! Input dispatch for the gallery session.

use glam::Vec2;

use super::GalleryState;
use crate::input::{ClickResult, InputEvent, MouseButton};

impl GalleryState {
    /// Process a platform-agnostic input event.
    ///
    /// Until the session is [started](Self::start) only the pointer
    /// position is tracked, and the first left-button release starts it
    /// without counting as a click.
    ///
    /// While the info modal is open the scene behind it is inert: scrolling,
    /// mouse look and hover are ignored, and a tap anywhere or
    /// [`InputEvent::Cancel`] closes it.
    ///
    /// Returns `true` when the hovered placard or the modal changed, so the
    /// host can refresh its cursor and title.
    ///
    /// # Example
    ///
    /// ```ignore
    /// state.handle_input(InputEvent::Scroll { delta: 100.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if !self.is_started() {
            return self.dispatch_before_start(event);
        }
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.dispatch_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::CursorLeft => {
                self.pointer.leave();
                self.gallery.hover(None)
            }
            InputEvent::MouseButton { button, pressed } => {
                self.dispatch_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => {
                if !self.gallery.modal().is_open() {
                    let _ = self.flythrough.on_scroll(delta);
                }
                false
            }
            InputEvent::Cancel => self.gallery.modal_mut().close(),
        }
    }

    fn dispatch_before_start(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let _ = self.pointer.move_to(Vec2::new(x, y));
                false
            }
            InputEvent::CursorLeft => {
                self.pointer.leave();
                false
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            } => self.start(),
            InputEvent::MouseButton { .. }
            | InputEvent::Scroll { .. }
            | InputEvent::Cancel => false,
        }
    }

    /// Cursor moved: drag-look while pressed, then re-pick the hover.
    fn dispatch_cursor_moved(&mut self, position: Vec2) -> bool {
        let delta = self.pointer.move_to(position);
        if self.gallery.modal().is_open() {
            return false;
        }
        if self.pointer.is_pressed() {
            self.orbit.look(delta);
        }
        let ray = self.pointer_ray();
        self.gallery.hover(ray.as_ref())
    }

    /// Left button only: press records the target, release classifies the
    /// gesture.
    fn dispatch_mouse_button(&mut self, button: MouseButton, pressed: bool) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        let target = if self.gallery.modal().is_open() {
            None
        } else {
            self.gallery.hovered()
        };
        if pressed {
            self.pointer.press(target);
            return false;
        }

        let click = self.pointer.release(target);
        if self.gallery.modal().is_open() {
            return click != ClickResult::NoAction && self.gallery.modal_mut().close();
        }
        match click {
            ClickResult::Placard(placard) => {
                if !self.gallery.activate(placard) {
                    return false;
                }
                // The modal covers the scene; nothing stays hovered.
                let _ = self.gallery.hover(None);
                true
            }
            ClickResult::Background | ClickResult::NoAction => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    /// A session turned to face the middle picture, with the cursor on
    /// its placard.
    fn facing_middle_placard() -> (GalleryState, Vec2) {
        let mut state = started();
        let placard = state.gallery().placards()[2].center;
        let view_proj = state.camera().build_matrix();
        let ndc = view_proj.project_point3(placard);
        let screen = Vec2::new((ndc.x + 1.0) * 400.0, (1.0 - ndc.y) * 300.0);
        (state, screen)
    }

    fn started() -> GalleryState {
        let mut state =
            GalleryState::seeded(Options::default(), (800, 600), 3).unwrap();
        assert!(state.start());
        state
    }

    fn tap(state: &mut GalleryState) -> bool {
        let down = state.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let up = state.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        down || up
    }

    #[test]
    fn scroll_moves_target_progress() {
        let mut state = started();
        assert!(!state.handle_input(InputEvent::Scroll { delta: 500.0 }));
        assert!((state.flythrough().target_progress() - 0.5).abs() < 1e-6);
        let _ = state.handle_input(InputEvent::Scroll { delta: f32::NAN });
        assert!((state.flythrough().target_progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn hover_then_tap_opens_modal() {
        let (mut state, screen) = facing_middle_placard();
        assert!(state.handle_input(InputEvent::CursorMoved {
            x: screen.x,
            y: screen.y,
        }));
        assert_eq!(state.hovered(), Some(2));

        assert!(tap(&mut state));
        assert_eq!(state.modal().current_index(), Some(2));
        assert_eq!(state.hovered(), None);

        // Scroll is swallowed while the modal is open.
        let _ = state.handle_input(InputEvent::Scroll { delta: 500.0 });
        assert_eq!(state.flythrough().target_progress(), 0.0);

        assert!(tap(&mut state));
        assert!(!state.modal().is_open());
    }

    #[test]
    fn cancel_closes_modal() {
        let (mut state, screen) = facing_middle_placard();
        let _ = state.handle_input(InputEvent::CursorMoved {
            x: screen.x,
            y: screen.y,
        });
        let _ = tap(&mut state);
        assert!(state.handle_input(InputEvent::Cancel));
        assert!(!state.modal().is_open());
        assert!(!state.handle_input(InputEvent::Cancel));
    }

    #[test]
    fn drag_looks_without_opening() {
        let (mut state, screen) = facing_middle_placard();
        let _ = state.handle_input(InputEvent::CursorMoved {
            x: screen.x,
            y: screen.y,
        });
        let beta = state.orbit.beta();
        let _ = state.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let _ = state.handle_input(InputEvent::CursorMoved {
            x: screen.x,
            y: screen.y + 40.0,
        });
        let _ = state.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        assert!(state.orbit.beta() < beta);
        assert!(!state.modal().is_open());
    }

    #[test]
    fn leaving_window_clears_hover() {
        let (mut state, screen) = facing_middle_placard();
        let _ = state.handle_input(InputEvent::CursorMoved {
            x: screen.x,
            y: screen.y,
        });
        assert!(state.handle_input(InputEvent::CursorLeft));
        assert_eq!(state.hovered(), None);
        assert!(!tap(&mut state));
    }

    #[test]
    fn first_tap_only_starts_the_tour() {
        let mut state =
            GalleryState::seeded(Options::default(), (800, 600), 3).unwrap();
        let placard = state.gallery().placards()[2].center;
        let ndc = state.camera().build_matrix().project_point3(placard);
        let screen = Vec2::new((ndc.x + 1.0) * 400.0, (1.0 - ndc.y) * 300.0);

        // Before the tap nothing but the pointer position reacts.
        assert!(!state.handle_input(InputEvent::Scroll { delta: 500.0 }));
        assert!(!state.handle_input(InputEvent::CursorMoved {
            x: screen.x,
            y: screen.y,
        }));
        assert_eq!(state.flythrough().target_progress(), 0.0);
        assert_eq!(state.hovered(), None);
        assert!(state.pointer_ray().is_some());

        // Tapping on a placard starts the tour without opening it.
        assert!(tap(&mut state));
        assert!(state.is_started());
        assert!(!state.modal().is_open());

        let _ = state.handle_input(InputEvent::Scroll { delta: 500.0 });
        assert!((state.flythrough().target_progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn other_buttons_do_not_start() {
        let mut state =
            GalleryState::seeded(Options::default(), (800, 600), 3).unwrap();
        for pressed in [true, false] {
            assert!(!state.handle_input(InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed,
            }));
        }
        assert!(!state.handle_input(InputEvent::Cancel));
        assert!(!state.is_started());
    }
}
