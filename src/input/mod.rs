//! Input handling: platform-agnostic event types and the pointer state
//! machine that separates taps from drags.

/// Platform-agnostic input events.
pub mod event;
/// Pointer tracking and tap detection.
pub mod mouse;

pub use event::{InputEvent, MouseButton};
pub use mouse::{ClickResult, PointerState, DRAG_THRESHOLD};
