//! Resize directions and the handles drawn for them.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A compass direction a tile can be resized towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Nw,
    N,
    Ne,
    W,
    E,
    Sw,
    S,
    Se,
}

impl Direction {
    /// All eight directions, corners and edges.
    pub const ALL: [Direction; 8] = [
        Direction::Nw,
        Direction::N,
        Direction::Ne,
        Direction::W,
        Direction::E,
        Direction::Sw,
        Direction::S,
        Direction::Se,
    ];

    /// Unit vector of the direction: -1 is top/left, 0 is center, 1 is
    /// bottom/right.
    pub fn vector(self) -> (i8, i8) {
        match self {
            Direction::Nw => (-1, -1),
            Direction::N => (0, -1),
            Direction::Ne => (1, -1),
            Direction::W => (-1, 0),
            Direction::E => (1, 0),
            Direction::Sw => (-1, 1),
            Direction::S => (0, 1),
            Direction::Se => (1, 1),
        }
    }

    /// Whether this is a corner (moves two edges at once).
    pub fn is_corner(self) -> bool {
        let (x, y) = self.vector();
        x != 0 && y != 0
    }

    /// Position of this direction's handle on `rect`.
    pub fn anchor(self, rect: Rect) -> Point {
        let (x, y) = self.vector();
        let center = rect.center();
        let px = match x {
            -1 => rect.x0,
            1 => rect.x1,
            _ => center.x,
        };
        let py = match y {
            -1 => rect.y0,
            1 => rect.y1,
            _ => center.y,
        };
        Point::new(px, py)
    }
}

/// A resize handle with its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub direction: Direction,
    /// Position in workspace coordinates.
    pub position: Point,
}

impl Handle {
    pub fn new(direction: Direction, position: Point) -> Self {
        Self {
            direction,
            position,
        }
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Handles for the given directions on `rect`.
pub fn handles(rect: Rect, directions: &[Direction]) -> Vec<Handle> {
    directions
        .iter()
        .map(|&direction| Handle::new(direction, direction.anchor(rect)))
        .collect()
}

/// Find the handle hit at `point`. Corners win over edges where they overlap.
pub fn hit_test_handles(
    rect: Rect,
    directions: &[Direction],
    point: Point,
    tolerance: f64,
) -> Option<Direction> {
    let all = handles(rect, directions);
    all.iter()
        .filter(|h| h.direction.is_corner())
        .chain(all.iter().filter(|h| !h.direction.is_corner()))
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.direction)
}

/// Find the edge of `rect` that `point` lies on, for edge-resize mode.
pub fn hit_test_edges(
    rect: Rect,
    directions: &[Direction],
    point: Point,
    tolerance: f64,
) -> Option<Direction> {
    if !rect.inflate(tolerance, tolerance).contains(point) {
        return None;
    }
    let near_left = (point.x - rect.x0).abs() <= tolerance;
    let near_right = (point.x - rect.x1).abs() <= tolerance;
    let near_top = (point.y - rect.y0).abs() <= tolerance;
    let near_bottom = (point.y - rect.y1).abs() <= tolerance;

    let x = if near_left {
        -1
    } else if near_right {
        1
    } else {
        0
    };
    let y = if near_top {
        -1
    } else if near_bottom {
        1
    } else {
        0
    };
    directions
        .iter()
        .copied()
        .find(|d| d.vector() == (x, y) && (x, y) != (0, 0))
}
