//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, BezPath, Circle, Point, Rect, RoundedRect, Shape as KurboShape, Stroke};
use peniko::{Color, Fill};
use tileboard_core::images::PlaceholderImage;
use tileboard_core::moveable::{Handle, Moveable};
use tileboard_core::tile::{Tile, delete_button_rect};
use vello::Scene;

/// Delete button colors.
const DELETE_FILL: Color = Color::from_rgba8(255, 0, 0, 51);
const DELETE_BORDER: Color = Color::from_rgba8(255, 0, 0, 255);

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Selection highlight color.
    selection_color: Color,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            selection_color: Color::from_rgba8(68, 170, 255, 255),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn render_tile(&mut self, tile: &Tile, rect: Rect, transform: Affine, button_size: f64) {
        let path = rect.to_path(0.1);
        self.scene
            .fill(Fill::NonZero, transform, tile.color.to_color(), None, &path);

        if let Some(url) = &tile.image {
            match PlaceholderImage::parse(url) {
                Some(image) => self.render_image(&image, tile, rect, transform),
                None => log::trace!("No offline rendition for image {}", url),
            }
        }

        self.render_delete_button(rect, transform, button_size);
    }

    /// Draw a placeholder image fitted into the tile. Cover overflow is cut
    /// at the tile edges.
    fn render_image(&mut self, image: &PlaceholderImage, tile: &Tile, rect: Rect, transform: Affine) {
        let fitted = tile.object_fit.fit(rect, image.size).intersect(rect);
        if fitted.width() <= 0.0 || fitted.height() <= 0.0 {
            return;
        }
        self.scene.fill(
            Fill::NonZero,
            transform,
            image.color,
            None,
            &fitted.to_path(0.1),
        );
    }

    fn render_delete_button(&mut self, tile_rect: Rect, transform: Affine, size: f64) {
        let button = delete_button_rect(tile_rect, size);
        let shape = RoundedRect::from_rect(button, size * 0.1);

        self.scene
            .fill(Fill::NonZero, transform, DELETE_FILL, None, &shape);
        self.scene
            .stroke(&Stroke::new(2.0), transform, DELETE_BORDER, None, &shape);

        // The "X" glyph
        let inset = size * 0.35;
        let glyph = button.inset(-inset);
        let mut path = BezPath::new();
        path.move_to(Point::new(glyph.x0, glyph.y0));
        path.line_to(Point::new(glyph.x1, glyph.y1));
        path.move_to(Point::new(glyph.x1, glyph.y0));
        path.line_to(Point::new(glyph.x0, glyph.y1));
        self.scene
            .stroke(&Stroke::new(2.0), transform, Color::WHITE, None, &path);
    }

    /// Render the widget's control box and handles around `target`.
    fn render_controls(&mut self, moveable: &Moveable, target: Rect, transform: Affine, handle_size: f64) {
        let control = moveable.control_box(target);
        self.scene.stroke(
            &Stroke::new(1.0),
            transform,
            self.selection_color,
            None,
            &control.to_path(0.1),
        );

        for handle in moveable.handles(target) {
            self.render_handle(&handle, transform, handle_size);
        }

        if moveable.options().origin {
            let marker = Circle::new(control.center(), handle_size / 4.0);
            self.scene.stroke(
                &Stroke::new(1.5),
                transform,
                Color::from_rgba8(255, 70, 70, 255),
                None,
                &marker,
            );
        }
    }

    /// Render a single round handle: white fill with a blue border.
    fn render_handle(&mut self, handle: &Handle, transform: Affine, size: f64) {
        let circle = Circle::new(handle.position, size / 2.0);
        self.scene
            .fill(Fill::NonZero, transform, Color::WHITE, None, &circle);
        self.scene.stroke(
            &Stroke::new(1.5),
            transform,
            self.selection_color,
            None,
            &circle,
        );
    }

    /// Render a thin dashed outline around the workspace bounds.
    fn render_workspace_bounds(&mut self, bounds: Rect, transform: Affine) {
        let stroke = Stroke::new(1.0).with_dashes(0.0, [4.0, 4.0]);
        self.scene.stroke(
            &stroke,
            transform,
            Color::from_rgba8(80, 80, 80, 255),
            None,
            &bounds.to_path(0.1),
        );
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.selection_color = ctx.selection_color;

        let transform = Affine::scale(ctx.scale_factor);

        let bounds = Rect::from_origin_size(Point::ZERO, ctx.workspace.bounds());
        self.scene.fill(
            Fill::NonZero,
            transform,
            ctx.background_color,
            None,
            &bounds.to_path(0.1),
        );
        self.render_workspace_bounds(bounds, transform);

        // Creation order is back-to-front.
        for tile in ctx.workspace.tiles() {
            let rect = ctx.tile_rect(tile);
            self.render_tile(tile, rect, transform, ctx.delete_button_size);
        }

        if let Some(moveable) = ctx.moveable {
            let target = moveable.target().and_then(|id| ctx.workspace.tile(id));
            if let Some(tile) = target {
                let rect = ctx.tile_rect(tile);
                self.render_controls(moveable, rect, transform, ctx.handle_size);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use tileboard_core::tile::{ObjectFit, TileColor, TileFields};
    use tileboard_core::workspace::Workspace;

    fn workspace_with_tile() -> (Workspace, u64) {
        let mut ws = Workspace::new(Size::new(800.0, 600.0));
        let id = ws.insert_tile(TileFields {
            top: 100.0,
            left: 100.0,
            width: 200.0,
            height: 150.0,
            color: TileColor::Purple,
            image: Some("https://via.placeholder.com/600/d32776".to_string()),
            object_fit: ObjectFit::Contain,
        });
        (ws, id)
    }

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_scene() {
        let mut renderer = VelloRenderer::new();
        let ws = Workspace::new(Size::new(800.0, 600.0));
        let ctx = RenderContext::new(&ws, Size::new(800.0, 600.0));
        renderer.build_scene(&ctx);
        // Background is always drawn.
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_tiles() {
        let mut renderer = VelloRenderer::new();
        let (mut ws, id) = workspace_with_tile();
        ws.insert_tile(TileFields {
            image: Some("not a placeholder".to_string()),
            ..ws.tile(id).unwrap().fields()
        });
        let ctx = RenderContext::new(&ws, Size::new(800.0, 600.0));
        renderer.build_scene(&ctx);
        assert!(!renderer.take_scene().encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_selection() {
        let mut renderer = VelloRenderer::new();
        let (ws, id) = workspace_with_tile();
        let mut moveable = Moveable::default();
        moveable.set_target(Some(id));

        let ctx = RenderContext::new(&ws, Size::new(800.0, 600.0))
            .with_scale_factor(2.0)
            .with_moveable(Some(&moveable));
        renderer.build_scene(&ctx);
        assert!(!renderer.scene().encoding().is_empty());
    }
}
