//! Manipulation widget attached to the selected tile.
//!
//! [`Moveable`] turns pointer input over its target into drag and resize
//! events. Clamping and committing are left to the tile view that receives
//! them.

mod direction;
mod events;
mod gesture;
mod options;

pub use direction::{Direction, Handle, handles, hit_test_edges, hit_test_handles};
pub use events::{DragEvent, DragInfo, MoveableEvent, ResizeEndEvent, ResizeEvent};
pub use gesture::{GestureKind, Moveable};
pub use options::{MoveableOptions, Padding};
