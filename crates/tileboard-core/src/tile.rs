//! Tile definitions for the workspace.

use kurbo::{Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Unique identifier for tiles.
pub type TileId = u64;

/// Background color of a tile, drawn behind (or instead of) its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileColor {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
}

impl TileColor {
    /// The fixed palette new tiles pick from.
    pub const PALETTE: [TileColor; 5] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Yellow,
        TileColor::Green,
        TileColor::Purple,
    ];

    /// CSS keyword for this color.
    pub fn name(&self) -> &'static str {
        match self {
            TileColor::Red => "red",
            TileColor::Blue => "blue",
            TileColor::Yellow => "yellow",
            TileColor::Green => "green",
            TileColor::Purple => "purple",
        }
    }

    /// RGB value of the CSS keyword.
    pub fn to_color(self) -> Color {
        match self {
            TileColor::Red => Color::from_rgba8(255, 0, 0, 255),
            TileColor::Blue => Color::from_rgba8(0, 0, 255, 255),
            TileColor::Yellow => Color::from_rgba8(255, 255, 0, 255),
            TileColor::Green => Color::from_rgba8(0, 128, 0, 255),
            TileColor::Purple => Color::from_rgba8(128, 0, 128, 255),
        }
    }
}

/// How a tile's image is scaled into the tile bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    /// Scale to fill the tile, cropping the overflow.
    #[default]
    Cover,
    /// Scale to fit inside the tile, letterboxing the rest.
    Contain,
}

impl ObjectFit {
    /// Compute the rectangle an image of `source` size occupies inside
    /// `container`, centered. For `Cover` the result may exceed the container
    /// and should be clipped by the caller.
    pub fn fit(self, container: Rect, source: Size) -> Rect {
        if source.width <= 0.0 || source.height <= 0.0 {
            return container;
        }
        let scale_x = container.width() / source.width;
        let scale_y = container.height() / source.height;
        let scale = match self {
            ObjectFit::Cover => scale_x.max(scale_y),
            ObjectFit::Contain => scale_x.min(scale_y),
        };
        let size = Size::new(source.width * scale, source.height * scale);
        Rect::from_center_size(container.center(), size)
    }
}

/// The complete replaceable field set of a tile.
///
/// `Workspace::update_tile` replaces a tile with these values wholesale, so
/// every field has to be supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileFields {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub color: TileColor,
    pub image: Option<String>,
    pub object_fit: ObjectFit,
}

impl TileFields {
    /// Copy of these fields with a new geometry.
    pub fn with_geometry(&self, top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
            ..self.clone()
        }
    }
}

/// A partial update merged onto a stored tile by `Workspace::patch_tile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TilePatch {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color: Option<TileColor>,
    /// `Some(None)` clears the image.
    pub image: Option<Option<String>>,
    pub object_fit: Option<ObjectFit>,
}

impl TilePatch {
    /// Patch that only moves the tile.
    pub fn position(top: f64, left: f64) -> Self {
        Self {
            top: Some(top),
            left: Some(left),
            ..Self::default()
        }
    }

    /// Patch that only resizes the tile.
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Apply this patch to a full field set.
    pub fn apply(&self, fields: &mut TileFields) {
        if let Some(top) = self.top {
            fields.top = top;
        }
        if let Some(left) = self.left {
            fields.left = left;
        }
        if let Some(width) = self.width {
            fields.width = width;
        }
        if let Some(height) = self.height {
            fields.height = height;
        }
        if let Some(color) = self.color {
            fields.color = color;
        }
        if let Some(image) = &self.image {
            fields.image = image.clone();
        }
        if let Some(object_fit) = self.object_fit {
            fields.object_fit = object_fit;
        }
    }
}

/// One user-manipulable rectangle on the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) id: TileId,
    /// Distance from the workspace top edge.
    pub top: f64,
    /// Distance from the workspace left edge.
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub color: TileColor,
    /// Image URL, if the image source produced one.
    pub image: Option<String>,
    pub object_fit: ObjectFit,
    /// Whether the last update was a committed (gesture finished) one.
    pub update_end: bool,
}

impl Tile {
    /// Build a tile from a full field set. New tiles count as committed.
    pub fn new(id: TileId, fields: TileFields) -> Self {
        Self {
            id,
            top: fields.top,
            left: fields.left,
            width: fields.width,
            height: fields.height,
            color: fields.color,
            image: fields.image,
            object_fit: fields.object_fit,
            update_end: true,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    /// Snapshot of the replaceable fields.
    pub fn fields(&self) -> TileFields {
        TileFields {
            top: self.top,
            left: self.left,
            width: self.width,
            height: self.height,
            color: self.color,
            image: self.image.clone(),
            object_fit: self.object_fit,
        }
    }

    /// Replace every field and record whether the update was committed.
    pub(crate) fn replace(&mut self, fields: TileFields, committed: bool) {
        self.top = fields.top;
        self.left = fields.left;
        self.width = fields.width;
        self.height = fields.height;
        self.color = fields.color;
        self.image = fields.image;
        self.object_fit = fields.object_fit;
        self.update_end = committed;
    }

    /// Bounding rectangle in workspace coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    /// Check if a point (in workspace coordinates) hits this tile.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }
}

/// The delete button sits in the top-left corner of a tile's rectangle.
pub fn delete_button_rect(tile: Rect, size: f64) -> Rect {
    Rect::new(tile.x0, tile.y0, tile.x0 + size, tile.y0 + size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_button_hit() {
        let tile = Tile::new(1, fields());
        let button = delete_button_rect(tile.bounds(), 30.0);
        assert_eq!(button, Rect::new(20.0, 10.0, 50.0, 40.0));
        assert!(button.contains(Point::new(25.0, 15.0)));
        assert!(!button.contains(Point::new(100.0, 50.0)));
    }

    fn fields() -> TileFields {
        TileFields {
            top: 10.0,
            left: 20.0,
            width: 100.0,
            height: 50.0,
            color: TileColor::Green,
            image: Some("https://via.placeholder.com/600/92c952".to_string()),
            object_fit: ObjectFit::Contain,
        }
    }

    #[test]
    fn test_bounds() {
        let tile = Tile::new(1, fields());
        let bounds = tile.bounds();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 120.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_tile_is_committed() {
        let tile = Tile::new(7, fields());
        assert!(tile.update_end);
        assert_eq!(tile.id(), 7);
        assert_eq!(tile.fields(), fields());
    }

    #[test]
    fn test_hit_test() {
        let tile = Tile::new(1, fields());
        assert!(tile.hit_test(Point::new(50.0, 30.0), 0.0));
        assert!(!tile.hit_test(Point::new(5.0, 5.0), 0.0));
        assert!(tile.hit_test(Point::new(18.0, 30.0), 3.0));
    }

    #[test]
    fn test_patch_keeps_unspecified_fields() {
        let mut f = fields();
        TilePatch::position(0.0, 0.0).apply(&mut f);
        assert_eq!(f.width, 100.0);
        assert_eq!(f.color, TileColor::Green);
        assert!(f.image.is_some());

        TilePatch {
            image: Some(None),
            ..TilePatch::default()
        }
        .apply(&mut f);
        assert!(f.image.is_none());
    }

    #[test]
    fn test_fit_contain_letterboxes() {
        let container = Rect::new(0.0, 0.0, 200.0, 100.0);
        let fitted = ObjectFit::Contain.fit(container, Size::new(600.0, 600.0));
        assert!((fitted.width() - 100.0).abs() < 0.01);
        assert!((fitted.height() - 100.0).abs() < 0.01);
        assert!((fitted.x0 - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_fit_cover_overflows() {
        let container = Rect::new(0.0, 0.0, 200.0, 100.0);
        let fitted = ObjectFit::Cover.fit(container, Size::new(600.0, 600.0));
        assert!((fitted.width() - 200.0).abs() < 0.01);
        assert!((fitted.height() - 200.0).abs() < 0.01);
        assert!((fitted.y0 + 50.0).abs() < 0.01);
    }

    #[test]
    fn test_color_serde_uses_css_names() {
        let json = serde_json::to_string(&TileColor::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
        assert_eq!(TileColor::Purple.name(), "purple");
    }
}
