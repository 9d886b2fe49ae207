//! Pointer and keyboard state for the workspace.
//!
//! The shell feeds window events in; the workspace side reads the pointer
//! position, the press in progress and what finished during the frame.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer travel below which a press and release count as a click.
const CLICK_DISTANCE: f64 = 4.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer input in workspace coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

/// Keys the workspace reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
}

/// A button held down somewhere on the workspace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Press {
    pub button: MouseButton,
    pub origin: Point,
    /// Furthest the pointer has been from `origin`.
    pub travel: f64,
}

impl Press {
    fn new(button: MouseButton, origin: Point) -> Self {
        Self {
            button,
            origin,
            travel: 0.0,
        }
    }

    /// True while the pointer has stayed within click distance.
    pub fn is_click(&self) -> bool {
        self.travel < CLICK_DISTANCE
    }
}

/// Input state, updated per event and reset per frame.
///
/// Only one press is tracked at a time: other buttons going down while one
/// is held are ignored.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: Point,
    press: Option<Press>,
    /// Press that ended since the last `begin_frame`.
    released: Option<Press>,
    keys: Vec<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what happened during the previous frame.
    pub fn begin_frame(&mut self) {
        self.released = None;
        self.keys.clear();
    }

    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer = position;
                if self.press.is_none() {
                    self.press = Some(Press::new(button, position));
                }
            }
            PointerEvent::Up { position, button } => {
                self.move_to(position);
                if self.press.is_some_and(|p| p.button == button) {
                    self.released = self.press.take();
                }
            }
            PointerEvent::Move { position } => self.move_to(position),
        }
    }

    fn move_to(&mut self, position: Point) {
        self.pointer = position;
        if let Some(press) = &mut self.press {
            press.travel = press.travel.max(press.origin.distance(position));
        }
    }

    pub fn handle_key_pressed(&mut self, key: Key) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    /// Last known pointer position.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// The press that ended this frame.
    pub fn released(&self) -> Option<Press> {
        self.released
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}
