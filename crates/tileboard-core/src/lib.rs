//! Tileboard Core Library
//!
//! Platform-agnostic core data structures and logic for the Tileboard canvas
//! editor.

pub mod config;
pub mod images;
pub mod input;
pub mod moveable;
pub mod tile;
pub mod tile_view;
pub mod workspace;

pub use config::{ConfigError, ConfigResult, TileGeometry, WorkspaceConfig};
pub use images::{CatalogImageSource, ImageError, ImageResult, ImageSource, PlaceholderImage};
pub use input::{InputState, Key, MouseButton, PointerEvent, Press};
pub use moveable::{Direction, GestureKind, Moveable, MoveableEvent, MoveableOptions};
pub use tile::{ObjectFit, Tile, TileColor, TileFields, TileId, TilePatch, delete_button_rect};
pub use tile_view::{ElementStyle, TileView};
pub use workspace::{Workspace, random_tile_fields};
