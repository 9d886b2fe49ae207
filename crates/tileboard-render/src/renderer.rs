//! Renderer trait abstraction.

use kurbo::{Rect, Size};
use peniko::Color;
use tileboard_core::moveable::Moveable;
use tileboard_core::tile::Tile;
use tileboard_core::tile_view::TileView;
use tileboard_core::workspace::Workspace;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The workspace to render.
    pub workspace: &'a Workspace,
    /// The manipulation widget, drawn around its target.
    pub moveable: Option<&'a Moveable>,
    /// Live geometry of the tile being resized, if any.
    pub tile_view: Option<&'a TileView>,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Resize handle diameter in logical pixels.
    pub handle_size: f64,
    /// Delete button side in logical pixels.
    pub delete_button_size: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(workspace: &'a Workspace, viewport_size: Size) -> Self {
        Self {
            workspace,
            moveable: None,
            tile_view: None,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::BLACK,
            selection_color: Color::from_rgba8(68, 170, 255, 255),
            handle_size: 10.0,
            delete_button_size: 30.0,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_moveable(mut self, moveable: Option<&'a Moveable>) -> Self {
        self.moveable = moveable;
        self
    }

    pub fn with_tile_view(mut self, view: Option<&'a TileView>) -> Self {
        self.tile_view = view;
        self
    }

    pub fn with_handle_size(mut self, size: f64) -> Self {
        self.handle_size = size;
        self
    }

    pub fn with_delete_button_size(mut self, size: f64) -> Self {
        self.delete_button_size = size;
        self
    }

    /// Rectangle a tile is drawn at this frame.
    pub fn tile_rect(&self, tile: &Tile) -> Rect {
        match self.tile_view {
            Some(view) if view.id() == tile.id() => view.preview_rect(tile),
            _ => tile.bounds(),
        }
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileboard_core::moveable::{Direction, DragInfo, ResizeEvent};
    use tileboard_core::tile::{ObjectFit, TileColor, TileFields};

    #[test]
    fn test_tile_rect_follows_resize_preview() {
        let mut ws = Workspace::new(Size::new(500.0, 500.0));
        let id = ws.insert_tile(TileFields {
            top: 50.0,
            left: 50.0,
            width: 100.0,
            height: 100.0,
            color: TileColor::Red,
            image: None,
            object_fit: ObjectFit::Cover,
        });
        let mut view = TileView::new(ws.tile(id).unwrap());
        view.on_resize(
            &mut ws,
            &ResizeEvent {
                target: id,
                width: 120.0,
                height: 100.0,
                direction: Direction::W,
                drag: DragInfo {
                    before_translate: kurbo::Vec2::new(-20.0, 0.0),
                },
            },
        );

        let tile = ws.tile(id).unwrap();
        let plain = RenderContext::new(&ws, Size::new(800.0, 600.0));
        assert_eq!(plain.tile_rect(tile), tile.bounds());

        let live = RenderContext::new(&ws, Size::new(800.0, 600.0)).with_tile_view(Some(&view));
        assert_eq!(live.tile_rect(tile), Rect::new(30.0, 50.0, 150.0, 150.0));
    }
}
