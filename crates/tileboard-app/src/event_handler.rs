//! Event handling: routes pointer and key input to the widget, the tile view
//! and the workspace.

use kurbo::Point;
use tileboard_core::config::WorkspaceConfig;
use tileboard_core::input::{InputState, Key};
use tileboard_core::moveable::{Direction, GestureKind, Moveable, MoveableEvent};
use tileboard_core::tile::{TileId, delete_button_rect};
use tileboard_core::tile_view::TileView;
use tileboard_core::workspace::Workspace;
use winit::window::CursorIcon;

/// What a pointer press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// A tile's delete button removed it.
    Removed(TileId),
    /// A drag or resize started on the selected tile.
    Gesture(GestureKind),
    /// A tile became selected without starting a gesture.
    Selected(TileId),
    /// Empty space cleared the selection.
    Cleared,
}

/// Handles high-level events and translates them to workspace operations.
pub struct EventHandler {
    moveable: Moveable,
    /// Gesture handler for the selected tile.
    tile_view: Option<TileView>,
    handle_tolerance: f64,
    delete_button_size: f64,
}

impl EventHandler {
    pub fn new(config: &WorkspaceConfig) -> Self {
        Self {
            moveable: Moveable::new(config.moveable.clone()),
            tile_view: None,
            handle_tolerance: config.handle_hit_tolerance,
            delete_button_size: config.delete_button_size,
        }
    }

    pub fn moveable(&self) -> &Moveable {
        &self.moveable
    }

    pub fn tile_view(&self) -> Option<&TileView> {
        self.tile_view.as_ref()
    }

    pub fn is_manipulating(&self) -> bool {
        self.moveable.is_active()
    }

    /// Attach the widget and tile view to the workspace's selection.
    pub fn sync_selection(&mut self, workspace: &Workspace) {
        let selected = workspace.selected();
        self.moveable.set_target(selected);
        let previous = self.tile_view.take();
        self.tile_view = selected
            .and_then(|id| workspace.tile(id))
            .map(|tile| match previous {
                Some(mut view) if view.id() == tile.id() => {
                    if !view.in_gesture() {
                        view.sync(tile);
                    }
                    view
                }
                _ => TileView::new(tile),
            });
    }

    /// Rectangle the selected tile is drawn at.
    fn selected_rect(&self, workspace: &Workspace) -> Option<kurbo::Rect> {
        let tile = workspace.selected_tile()?;
        Some(match &self.tile_view {
            Some(view) => view.preview_rect(tile),
            None => tile.bounds(),
        })
    }

    /// Front-most tile whose delete button is under `point`.
    fn delete_button_at(&self, workspace: &Workspace, point: Point) -> Option<TileId> {
        workspace
            .tiles()
            .iter()
            .rev()
            .find(|tile| {
                let rect = match &self.tile_view {
                    Some(view) if view.id() == tile.id() => view.preview_rect(tile),
                    _ => tile.bounds(),
                };
                delete_button_rect(rect, self.delete_button_size).contains(point)
            })
            .map(|tile| tile.id())
    }

    /// What a press at `point` would start on the selected tile.
    fn selected_hit(&self, workspace: &Workspace, point: Point) -> Option<(kurbo::Rect, GestureKind)> {
        let rect = self.selected_rect(workspace)?;
        let kind = self.moveable.hit_test(rect, point, self.handle_tolerance)?;
        Some((rect, kind))
    }

    /// Handle a left-button press at `point`.
    ///
    /// Resize handles sit above everything, then delete buttons, then tile
    /// bodies.
    pub fn handle_press(&mut self, workspace: &mut Workspace, point: Point) -> PressOutcome {
        let selected_hit = self.selected_hit(workspace, point);

        if let Some((rect, GestureKind::Resize(_))) = selected_hit {
            if let Some(kind) = self.moveable.pointer_down(point, rect, self.handle_tolerance) {
                return PressOutcome::Gesture(kind);
            }
        }

        if let Some(id) = self.delete_button_at(workspace, point) {
            self.moveable.cancel();
            workspace.remove_tile(id);
            self.sync_selection(workspace);
            log::info!("Tile {} removed", id);
            return PressOutcome::Removed(id);
        }

        if let Some((rect, GestureKind::Drag)) = selected_hit.filter(|_| !covered(workspace, point)) {
            if let Some(kind) = self.moveable.pointer_down(point, rect, self.handle_tolerance) {
                return PressOutcome::Gesture(kind);
            }
        }

        match workspace.tile_at(point) {
            Some(id) => {
                workspace.select(id);
                self.sync_selection(workspace);
                // Pressing an unselected tile grabs it right away.
                match self.selected_rect(workspace).and_then(|rect| {
                    self.moveable.pointer_down(point, rect, self.handle_tolerance)
                }) {
                    Some(kind) => PressOutcome::Gesture(kind),
                    None => PressOutcome::Selected(id),
                }
            }
            None => {
                workspace.clear_selection();
                self.sync_selection(workspace);
                PressOutcome::Cleared
            }
        }
    }

    /// Handle pointer movement.
    pub fn handle_move(&mut self, workspace: &mut Workspace, point: Point) {
        if let Some(event) = self.moveable.pointer_move(point) {
            self.dispatch(workspace, event);
        }
    }

    /// Handle a left-button release.
    pub fn handle_release(&mut self, workspace: &mut Workspace) {
        let kind = self.moveable.gesture_kind();
        if let Some(event) = self.moveable.pointer_up() {
            self.dispatch(workspace, event);
        }
        if kind == Some(GestureKind::Drag) {
            if let Some(view) = &mut self.tile_view {
                view.finish_drag();
            }
        }
    }

    fn dispatch(&mut self, workspace: &mut Workspace, event: MoveableEvent) {
        let Some(view) = self.tile_view.as_mut().filter(|v| v.id() == event.target()) else {
            log::warn!("Dropping widget event for detached tile {}", event.target());
            return;
        };
        match event {
            MoveableEvent::Drag(e) => {
                view.on_drag(workspace, &e);
            }
            MoveableEvent::Resize(e) => {
                view.on_resize(workspace, &e);
            }
            MoveableEvent::ResizeEnd(e) => {
                if view.on_resize_end(workspace, &e) {
                    log::debug!("Resize of tile {} committed", e.target);
                }
            }
        }
    }

    /// Abort the gesture in flight, restoring the tile.
    pub fn cancel(&mut self, workspace: &mut Workspace) -> bool {
        if !self.moveable.is_active() {
            return false;
        }
        self.moveable.cancel();
        if let Some(view) = &mut self.tile_view {
            view.cancel(workspace);
        }
        true
    }

    /// Remove the selected tile, if any.
    pub fn remove_selected(&mut self, workspace: &mut Workspace) -> Option<TileId> {
        let id = workspace.selected()?;
        self.cancel(workspace);
        workspace.remove_tile(id)?;
        self.sync_selection(workspace);
        Some(id)
    }

    /// Act on the keys pressed since the last batch of events.
    ///
    /// Delete and Backspace remove the selected tile. Escape cancels the
    /// gesture in flight, or clears the selection when there is none.
    pub fn handle_keys(&mut self, workspace: &mut Workspace, input: &InputState) {
        if input.key_pressed(Key::Delete) || input.key_pressed(Key::Backspace) {
            if let Some(id) = self.remove_selected(workspace) {
                log::info!("Tile {} removed", id);
            }
        }
        if input.key_pressed(Key::Escape) && !self.cancel(workspace) {
            workspace.clear_selection();
            self.sync_selection(workspace);
        }
    }

    /// Cursor to show for the pointer at `point`.
    pub fn cursor_for_position(&self, workspace: &Workspace, point: Point) -> CursorIcon {
        if let Some(kind) = self.moveable.gesture_kind() {
            return gesture_cursor(kind);
        }
        let selected_hit = self.selected_hit(workspace, point).map(|(_, kind)| kind);
        if let Some(kind @ GestureKind::Resize(_)) = selected_hit {
            return gesture_cursor(kind);
        }
        if self.delete_button_at(workspace, point).is_some() {
            return CursorIcon::Pointer;
        }
        if let Some(kind) = selected_hit.filter(|_| !covered(workspace, point)) {
            return gesture_cursor(kind);
        }
        if workspace.tile_at(point).is_some() {
            return CursorIcon::Pointer;
        }
        CursorIcon::Default
    }
}

/// Whether another tile is painted over the selection at `point`. That tile
/// takes presses there.
fn covered(workspace: &Workspace, point: Point) -> bool {
    workspace
        .tile_at(point)
        .is_some_and(|id| Some(id) != workspace.selected())
}

fn gesture_cursor(kind: GestureKind) -> CursorIcon {
    match kind {
        GestureKind::Drag => CursorIcon::Move,
        GestureKind::Resize(direction) => match direction {
            Direction::Nw => CursorIcon::NwResize,
            Direction::N => CursorIcon::NResize,
            Direction::Ne => CursorIcon::NeResize,
            Direction::W => CursorIcon::WResize,
            Direction::E => CursorIcon::EResize,
            Direction::Sw => CursorIcon::SwResize,
            Direction::S => CursorIcon::SResize,
            Direction::Se => CursorIcon::SeResize,
        },
    }
}
