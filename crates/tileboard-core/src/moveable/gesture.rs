//! Gesture recognition for the selected tile.

use super::direction::{handles, hit_test_edges, hit_test_handles};
use super::{
    Direction, DragEvent, DragInfo, Handle, MoveableEvent, MoveableOptions, ResizeEndEvent,
    ResizeEvent,
};
use crate::tile::TileId;
use kurbo::{Point, Rect, Vec2};

/// Kind of gesture started by a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(Direction),
}

/// State of an active gesture.
#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    Dragging {
        start_point: Point,
        start_rect: Rect,
    },
    Resizing {
        direction: Direction,
        start_point: Point,
        start_rect: Rect,
        last_event: Option<ResizeEvent>,
    },
}

/// Drag/resize widget attached to at most one tile.
///
/// The widget reads pointer positions and reports proposed geometry through
/// [`MoveableEvent`]s. It never touches the workspace itself.
#[derive(Debug, Clone)]
pub struct Moveable {
    options: MoveableOptions,
    target: Option<TileId>,
    gesture: Gesture,
}

impl Default for Moveable {
    fn default() -> Self {
        Self::new(MoveableOptions::default())
    }
}

impl Moveable {
    pub fn new(options: MoveableOptions) -> Self {
        Self {
            options,
            target: None,
            gesture: Gesture::Idle,
        }
    }

    pub fn options(&self) -> &MoveableOptions {
        &self.options
    }

    /// The tile the widget is attached to.
    pub fn target(&self) -> Option<TileId> {
        self.target
    }

    /// Attach to a tile (or detach with `None`). Switching targets cancels
    /// any gesture in flight.
    pub fn set_target(&mut self, target: Option<TileId>) {
        if self.target != target {
            self.cancel();
            self.target = target;
        }
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Kind of the gesture in progress.
    pub fn gesture_kind(&self) -> Option<GestureKind> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging { .. } => Some(GestureKind::Drag),
            Gesture::Resizing { direction, .. } => Some(GestureKind::Resize(direction)),
        }
    }

    /// Control box around the target, including padding.
    pub fn control_box(&self, target_rect: Rect) -> Rect {
        let p = self.options.padding;
        Rect::new(
            target_rect.x0 - p.left,
            target_rect.y0 - p.top,
            target_rect.x1 + p.right,
            target_rect.y1 + p.bottom,
        )
    }

    /// Resize handles to draw for the target.
    pub fn handles(&self, target_rect: Rect) -> Vec<Handle> {
        if !self.options.resizable {
            return Vec::new();
        }
        handles(
            self.control_box(target_rect),
            &self.options.render_directions,
        )
    }

    /// What a press at `point` would start, without starting it.
    pub fn hit_test(&self, target_rect: Rect, point: Point, tolerance: f64) -> Option<GestureKind> {
        self.target?;
        let tolerance = tolerance * self.options.zoom;
        let control = self.control_box(target_rect);

        if self.options.resizable {
            let directions = &self.options.render_directions;
            let hit = hit_test_handles(control, directions, point, tolerance).or_else(|| {
                if self.options.edge {
                    hit_test_edges(control, directions, point, tolerance)
                } else {
                    None
                }
            });
            if let Some(direction) = hit {
                return Some(GestureKind::Resize(direction));
            }
        }

        if self.options.draggable && control.contains(point) {
            return Some(GestureKind::Drag);
        }
        None
    }

    /// Start a gesture if `point` hits the target's handles or body.
    pub fn pointer_down(
        &mut self,
        point: Point,
        target_rect: Rect,
        tolerance: f64,
    ) -> Option<GestureKind> {
        let kind = self.hit_test(target_rect, point, tolerance)?;
        self.gesture = match kind {
            GestureKind::Drag => Gesture::Dragging {
                start_point: point,
                start_rect: target_rect,
            },
            GestureKind::Resize(direction) => Gesture::Resizing {
                direction,
                start_point: point,
                start_rect: target_rect,
                last_event: None,
            },
        };
        log::debug!("Gesture started: {:?} on {:?}", kind, self.target);
        Some(kind)
    }

    /// Report the proposed geometry for the pointer at `point`.
    pub fn pointer_move(&mut self, point: Point) -> Option<MoveableEvent> {
        let target = self.target?;
        let zoom = if self.options.zoom > 0.0 {
            self.options.zoom
        } else {
            1.0
        };

        match &mut self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging {
                start_point,
                start_rect,
            } => {
                let delta = (point - *start_point) / zoom;
                Some(MoveableEvent::Drag(DragEvent {
                    target,
                    top: start_rect.y0 + delta.y,
                    left: start_rect.x0 + delta.x,
                    before_translate: delta,
                }))
            }
            Gesture::Resizing {
                direction,
                start_point,
                start_rect,
                last_event,
            } => {
                let delta = (point - *start_point) / zoom;
                let (width, height) = resized(*start_rect, *direction, delta, &self.options);
                let event = ResizeEvent {
                    target,
                    width,
                    height,
                    direction: *direction,
                    drag: DragInfo {
                        before_translate: anchor_shift(*start_rect, *direction, width, height),
                    },
                };
                *last_event = Some(event);
                Some(MoveableEvent::Resize(event))
            }
        }
    }

    /// Finish the gesture. Only a resize reports an end event.
    pub fn pointer_up(&mut self) -> Option<MoveableEvent> {
        let target = self.target?;
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Resizing { last_event, .. } => Some(MoveableEvent::ResizeEnd(ResizeEndEvent {
                target,
                last_event,
                drag: last_event.map(|e| e.drag),
            })),
            Gesture::Dragging { .. } | Gesture::Idle => None,
        }
    }

    /// Abort the gesture without emitting anything.
    pub fn cancel(&mut self) {
        if self.is_active() {
            log::debug!("Gesture cancelled on {:?}", self.target);
        }
        self.gesture = Gesture::Idle;
    }
}

/// New size after moving `direction`'s handle by `delta`.
fn resized(start: Rect, direction: Direction, delta: Vec2, options: &MoveableOptions) -> (f64, f64) {
    let (sx, sy) = direction.vector();
    let (w, h) = (start.width(), start.height());
    let mut width = w + f64::from(sx) * delta.x;
    let mut height = h + f64::from(sy) * delta.y;

    if options.keep_ratio && w > 0.0 && h > 0.0 {
        let ratio = w / h;
        if sx == 0 {
            width = height * ratio;
        } else if sy == 0 || (width / w - 1.0).abs() >= (height / h - 1.0).abs() {
            height = width / ratio;
        } else {
            width = height * ratio;
        }
    }

    let throttle = options.throttle_resize;
    if throttle > 0.0 {
        width = (width / throttle).round() * throttle;
        height = (height / throttle).round() * throttle;
    }
    (width.max(0.0), height.max(0.0))
}

/// Shift of the top-left corner when the west or north edge is the one moving.
fn anchor_shift(start: Rect, direction: Direction, width: f64, height: f64) -> Vec2 {
    let (sx, sy) = direction.vector();
    Vec2::new(
        if sx < 0 { start.width() - width } else { 0.0 },
        if sy < 0 { start.height() - height } else { 0.0 },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 8.0;

    fn attached() -> Moveable {
        let mut m = Moveable::default();
        m.set_target(Some(42));
        m
    }

    fn rect() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 200.0)
    }

    #[test]
    fn test_no_target_no_gesture() {
        let mut m = Moveable::default();
        assert_eq!(m.pointer_down(Point::new(150.0, 150.0), rect(), TOL), None);
        assert!(m.pointer_move(Point::new(160.0, 160.0)).is_none());
    }

    #[test]
    fn test_drag_reports_absolute_position() {
        let mut m = attached();
        assert_eq!(
            m.pointer_down(Point::new(150.0, 150.0), rect(), TOL),
            Some(GestureKind::Drag)
        );
        let Some(MoveableEvent::Drag(e)) = m.pointer_move(Point::new(130.0, 170.0)) else {
            panic!("Expected drag event");
        };
        assert_eq!(e.target, 42);
        assert!((e.left - 80.0).abs() < f64::EPSILON);
        assert!((e.top - 120.0).abs() < f64::EPSILON);
        assert_eq!(e.before_translate, Vec2::new(-20.0, 20.0));
        // No drag-end event.
        assert!(m.pointer_up().is_none());
        assert!(!m.is_active());
    }

    #[test]
    fn test_resize_southeast() {
        let mut m = attached();
        assert_eq!(
            m.pointer_down(Point::new(200.0, 200.0), rect(), TOL),
            Some(GestureKind::Resize(Direction::Se))
        );
        let Some(MoveableEvent::Resize(e)) = m.pointer_move(Point::new(250.0, 230.0)) else {
            panic!("Expected resize event");
        };
        assert!((e.width - 150.0).abs() < f64::EPSILON);
        assert!((e.height - 130.0).abs() < f64::EPSILON);
        assert_eq!(e.drag.before_translate, Vec2::ZERO);
    }

    #[test]
    fn test_resize_northwest_translates_anchor() {
        let mut m = attached();
        m.pointer_down(Point::new(100.0, 100.0), rect(), TOL);
        let Some(MoveableEvent::Resize(e)) = m.pointer_move(Point::new(80.0, 90.0)) else {
            panic!("Expected resize event");
        };
        assert!((e.width - 120.0).abs() < f64::EPSILON);
        assert!((e.height - 110.0).abs() < f64::EPSILON);
        assert_eq!(e.drag.before_translate, Vec2::new(-20.0, -10.0));
    }

    #[test]
    fn test_resize_end_carries_last_event() {
        let mut m = attached();
        m.pointer_down(Point::new(100.0, 150.0), rect(), TOL);
        m.pointer_move(Point::new(90.0, 150.0));
        m.pointer_move(Point::new(70.0, 150.0));
        let Some(MoveableEvent::ResizeEnd(end)) = m.pointer_up() else {
            panic!("Expected resize end");
        };
        let last = end.last_event.expect("moved at least once");
        assert_eq!(last.direction, Direction::W);
        assert!((last.width - 130.0).abs() < f64::EPSILON);
        assert_eq!(end.before_translate(), Vec2::new(-30.0, 0.0));
    }

    #[test]
    fn test_resize_end_without_move() {
        let mut m = attached();
        m.pointer_down(Point::new(200.0, 200.0), rect(), TOL);
        let Some(MoveableEvent::ResizeEnd(end)) = m.pointer_up() else {
            panic!("Expected resize end");
        };
        assert!(end.last_event.is_none());
        assert_eq!(end.before_translate(), Vec2::ZERO);
    }

    #[test]
    fn test_size_never_negative() {
        let mut m = attached();
        m.pointer_down(Point::new(200.0, 200.0), rect(), TOL);
        let Some(MoveableEvent::Resize(e)) = m.pointer_move(Point::new(0.0, 0.0)) else {
            panic!("Expected resize event");
        };
        assert_eq!(e.width, 0.0);
        assert_eq!(e.height, 0.0);
    }

    #[test]
    fn test_throttle_rounds() {
        let mut m = Moveable::new(MoveableOptions {
            throttle_resize: 10.0,
            ..MoveableOptions::default()
        });
        m.set_target(Some(1));
        m.pointer_down(Point::new(200.0, 200.0), rect(), TOL);
        let Some(MoveableEvent::Resize(e)) = m.pointer_move(Point::new(213.0, 207.0)) else {
            panic!("Expected resize event");
        };
        assert!((e.width - 110.0).abs() < f64::EPSILON);
        assert!((e.height - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_keep_ratio() {
        let mut m = Moveable::new(MoveableOptions {
            keep_ratio: true,
            ..MoveableOptions::default()
        });
        m.set_target(Some(1));
        let wide = Rect::new(0.0, 0.0, 200.0, 100.0);
        m.pointer_down(Point::new(200.0, 100.0), wide, TOL);
        let Some(MoveableEvent::Resize(e)) = m.pointer_move(Point::new(300.0, 110.0)) else {
            panic!("Expected resize event");
        };
        assert!((e.width / e.height - 2.0).abs() < 0.05);
    }

    #[test]
    fn test_not_draggable() {
        let mut m = Moveable::new(MoveableOptions {
            draggable: false,
            ..MoveableOptions::default()
        });
        m.set_target(Some(1));
        assert_eq!(m.pointer_down(Point::new(150.0, 150.0), rect(), TOL), None);
    }

    #[test]
    fn test_retarget_cancels() {
        let mut m = attached();
        m.pointer_down(Point::new(150.0, 150.0), rect(), TOL);
        assert!(m.is_active());
        m.set_target(Some(7));
        assert!(!m.is_active());
        assert!(m.pointer_up().is_none());
    }

    #[test]
    fn test_zoom_scales_deltas() {
        let mut m = Moveable::new(MoveableOptions {
            zoom: 2.0,
            ..MoveableOptions::default()
        });
        m.set_target(Some(1));
        m.pointer_down(Point::new(150.0, 150.0), rect(), TOL);
        let Some(MoveableEvent::Drag(e)) = m.pointer_move(Point::new(170.0, 150.0)) else {
            panic!("Expected drag event");
        };
        assert!((e.left - 110.0).abs() < f64::EPSILON);
    }
}
