//! Capability flags for the manipulation widget.

use super::Direction;
use serde::{Deserialize, Serialize};

/// Extra space between the target and its control box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// What the widget allows and how it measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveableOptions {
    pub resizable: bool,
    pub draggable: bool,
    /// Preserve the start aspect ratio while resizing.
    pub keep_ratio: bool,
    /// Resize sizes are rounded to multiples of this (0 disables).
    pub throttle_resize: f64,
    /// Directions that get a handle.
    pub render_directions: Vec<Direction>,
    /// Treat whole edges as resize handles, not just their midpoints.
    pub edge: bool,
    /// Scale of the control box. Pointer deltas are divided by it.
    pub zoom: f64,
    /// Draw the transform origin marker.
    pub origin: bool,
    pub padding: Padding,
}

impl Default for MoveableOptions {
    fn default() -> Self {
        Self {
            resizable: true,
            draggable: true,
            keep_ratio: false,
            throttle_resize: 1.0,
            render_directions: Direction::ALL.to_vec(),
            edge: false,
            zoom: 1.0,
            origin: false,
            padding: Padding::default(),
        }
    }
}
