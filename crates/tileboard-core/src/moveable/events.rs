//! Events emitted by the manipulation widget.

use super::Direction;
use crate::tile::TileId;
use kurbo::Vec2;

/// Translation accompanying a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragInfo {
    /// How far the anchored top-left corner has shifted from its origin.
    pub before_translate: Vec2,
}

/// The target is being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub target: TileId,
    /// Proposed top edge.
    pub top: f64,
    /// Proposed left edge.
    pub left: f64,
    pub before_translate: Vec2,
}

/// The target is being resized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub target: TileId,
    /// Proposed width.
    pub width: f64,
    /// Proposed height.
    pub height: f64,
    /// Handle the gesture started from.
    pub direction: Direction,
    pub drag: DragInfo,
}

/// A resize gesture finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEndEvent {
    pub target: TileId,
    /// The last resize event of the gesture, if the pointer moved at all.
    pub last_event: Option<ResizeEvent>,
    pub drag: Option<DragInfo>,
}

impl ResizeEndEvent {
    /// The final anchor shift, `(0, 0)` when absent.
    pub fn before_translate(&self) -> Vec2 {
        self.drag.map(|d| d.before_translate).unwrap_or(Vec2::ZERO)
    }
}

/// Any event emitted by [`Moveable`](super::Moveable).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveableEvent {
    Drag(DragEvent),
    Resize(ResizeEvent),
    ResizeEnd(ResizeEndEvent),
}

impl MoveableEvent {
    pub fn target(&self) -> TileId {
        match self {
            MoveableEvent::Drag(e) => e.target,
            MoveableEvent::Resize(e) => e.target,
            MoveableEvent::ResizeEnd(e) => e.target,
        }
    }
}
