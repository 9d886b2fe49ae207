//! Per-tile gesture handling.
//!
//! A [`TileView`] receives the widget's events for one tile, clamps the
//! proposed geometry against the workspace bounds and reports it back to
//! the [`Workspace`]. It also keeps a local mirror of the geometry for live
//! feedback while a resize is in flight, since the committed tile does not
//! move until the gesture ends.
//!
//! Only the in-progress resize is clamped on both edges. The final resize
//! position and drag positions are committed as reported.

use crate::moveable::{DragEvent, ResizeEndEvent, ResizeEvent};
use crate::tile::{Tile, TileFields, TileId};
use crate::workspace::Workspace;
use kurbo::{Rect, Size, Vec2};

/// Clamp a proposed size so the tile does not cross the far edges of
/// `parent`, keeping `top`/`left` fixed.
///
/// A tile already past a far edge (after an unclamped drag) gets a zero
/// extent on that axis, never a negative one.
pub fn clamp_size(top: f64, left: f64, width: f64, height: f64, parent: Size) -> (f64, f64) {
    let height = if top + height > parent.height {
        (parent.height - top).max(0.0)
    } else {
        height
    };
    let width = if left + width > parent.width {
        (parent.width - left).max(0.0)
    } else {
        width
    };
    (width, height)
}

/// Clamp a resize translation against both edges of `parent`, given the
/// already clamped size.
pub fn clamp_translate(
    top: f64,
    left: f64,
    width: f64,
    height: f64,
    translate: Vec2,
    parent: Size,
) -> Vec2 {
    let mut t = translate;
    if top + t.y < 0.0 {
        t.y = -top;
    }
    if left + t.x < 0.0 {
        t.x = -left;
    }
    if top + t.y + height > parent.height {
        t.y = parent.height - top - height;
    }
    if left + t.x + width > parent.width {
        t.x = parent.width - left - width;
    }
    t
}

/// Style applied to the rendered element during a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    pub width: f64,
    pub height: f64,
    pub translate: Vec2,
}

/// Gesture handler and live geometry mirror for one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    id: TileId,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub translate: Vec2,
    /// Committed fields from before the gesture started.
    start: Option<TileFields>,
    resizing: bool,
}

impl TileView {
    pub fn new(tile: &Tile) -> Self {
        Self {
            id: tile.id(),
            top: tile.top,
            left: tile.left,
            width: tile.width,
            height: tile.height,
            translate: Vec2::ZERO,
            start: None,
            resizing: false,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    /// Whether a drag or resize has moved the tile since the last sync.
    pub fn in_gesture(&self) -> bool {
        self.start.is_some()
    }

    /// Reset the mirror from the stored tile.
    pub fn sync(&mut self, tile: &Tile) {
        self.top = tile.top;
        self.left = tile.left;
        self.width = tile.width;
        self.height = tile.height;
        self.translate = Vec2::ZERO;
        self.start = None;
        self.resizing = false;
    }

    /// Rectangle to draw for the tile. Follows the mirror during a resize and
    /// the stored tile otherwise.
    pub fn preview_rect(&self, tile: &Tile) -> Rect {
        if self.is_resizing() {
            Rect::new(
                self.left,
                self.top,
                self.left + self.width,
                self.top + self.height,
            )
        } else {
            tile.bounds()
        }
    }

    /// Handle an in-progress resize.
    ///
    /// Pushes the clamped size (at the unchanged position) as a
    /// non-committed update and returns the style for immediate feedback.
    pub fn on_resize(&mut self, workspace: &mut Workspace, event: &ResizeEvent) -> Option<ElementStyle> {
        if event.target != self.id {
            return None;
        }
        let parent = workspace.bounds();
        let tile = workspace.tile(self.id)?;
        let (top, left) = (tile.top, tile.left);
        let fields = tile.fields();

        let (width, height) = clamp_size(top, left, event.width, event.height, parent);
        let translate = clamp_translate(
            top,
            left,
            width,
            height,
            event.drag.before_translate,
            parent,
        );

        if self.start.is_none() {
            self.start = Some(fields.clone());
        }
        self.resizing = true;
        workspace.update_tile(self.id, fields.with_geometry(top, left, width, height), false);

        self.width = width;
        self.height = height;
        self.translate = translate;
        self.top = (top + translate.y).max(0.0);
        self.left = (left + translate.x).max(0.0);

        Some(ElementStyle {
            width,
            height,
            translate,
        })
    }

    /// Commit the final geometry of a resize.
    ///
    /// The size is clamped like [`on_resize`](Self::on_resize) but the
    /// translated position is committed as is, even when it leaves the
    /// workspace. Returns `false` if nothing was committed.
    pub fn on_resize_end(&mut self, workspace: &mut Workspace, event: &ResizeEndEvent) -> bool {
        if event.target != self.id {
            return false;
        }
        let committed = self.commit_resize(workspace, event);
        if let Some(tile) = workspace.tile(self.id) {
            self.sync(tile);
        }
        committed
    }

    fn commit_resize(&self, workspace: &mut Workspace, event: &ResizeEndEvent) -> bool {
        let Some(last) = event.last_event else {
            return false;
        };
        let parent = workspace.bounds();
        let Some(tile) = workspace.tile(self.id) else {
            return false;
        };
        let (top, left) = (tile.top, tile.left);
        let (width, height) = clamp_size(top, left, last.width, last.height, parent);
        let shift = event.before_translate();
        let fields = tile
            .fields()
            .with_geometry(top + shift.y, left + shift.x, width, height);
        workspace.update_tile(self.id, fields, true)
    }

    /// Move the tile to the dragged position, without clamping.
    pub fn on_drag(&mut self, workspace: &mut Workspace, event: &DragEvent) -> bool {
        if event.target != self.id {
            return false;
        }
        let Some(tile) = workspace.tile(self.id) else {
            return false;
        };
        let start = tile.fields();
        let fields = start.with_geometry(event.top, event.left, tile.width, tile.height);
        if !workspace.update_tile(self.id, fields, false) {
            return false;
        }
        self.start.get_or_insert(start);
        self.top = event.top;
        self.left = event.left;
        true
    }

    /// Forget the drag start once the pointer is released. Drags leave the
    /// tile where it was dropped, uncommitted.
    pub fn finish_drag(&mut self) {
        if !self.resizing {
            self.start = None;
        }
    }

    /// Abandon a gesture and restore the tile as it was before it started.
    pub fn cancel(&mut self, workspace: &mut Workspace) {
        if let Some(start) = self.start.take() {
            workspace.update_tile(self.id, start, true);
        }
        if let Some(tile) = workspace.tile(self.id) {
            self.sync(tile);
        }
    }
}
