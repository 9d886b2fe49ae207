//! Workspace controller: the ordered tile collection and the selection.

use crate::config::{TileGeometry, WorkspaceConfig};
use crate::images::{ImageSource, pick_image};
use crate::tile::{ObjectFit, Tile, TileColor, TileFields, TileId, TilePatch};
use kurbo::{Point, Size};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Largest id handed out. Ids stay exactly representable as `f64`.
const MAX_TILE_ID: TileId = (1 << 53) - 1;

/// Build the fields of a new tile: a random palette color, a random image
/// from `source` and a random object fit, at `geometry`.
///
/// This is the only async step of tile creation. It does not borrow the
/// workspace, so callers on a single-threaded executor can await it and
/// insert the result later.
pub async fn random_tile_fields<R: Rng + ?Sized>(
    source: &dyn ImageSource,
    geometry: TileGeometry,
    rng: &mut R,
) -> TileFields {
    let color = TileColor::PALETTE
        .choose(rng)
        .copied()
        .unwrap_or(TileColor::Red);
    let image = pick_image(source, rng).await;
    let object_fit = if rng.random_bool(0.5) {
        ObjectFit::Cover
    } else {
        ObjectFit::Contain
    };
    TileFields {
        top: geometry.top,
        left: geometry.left,
        width: geometry.width,
        height: geometry.height,
        color,
        image,
        object_fit,
    }
}

/// Owns every tile on the canvas and the selection pointer.
///
/// Tiles are kept in creation order, which is also back-to-front paint
/// order. All mutation goes through the methods here.
#[derive(Debug, Clone)]
pub struct Workspace {
    tiles: Vec<Tile>,
    selected: Option<TileId>,
    bounds: Size,
    default_tile: TileGeometry,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl Workspace {
    /// Create an empty workspace of the given parent size.
    pub fn new(bounds: Size) -> Self {
        Self {
            tiles: Vec::new(),
            selected: None,
            bounds,
            default_tile: TileGeometry::default(),
        }
    }

    pub fn with_config(bounds: Size, config: &WorkspaceConfig) -> Self {
        Self {
            default_tile: config.default_tile,
            ..Self::new(bounds)
        }
    }

    /// Parent dimensions every tile is clamped against.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Size) {
        if self.bounds != bounds {
            log::debug!("Workspace resized to {}x{}", bounds.width, bounds.height);
            self.bounds = bounds;
        }
    }

    pub fn default_tile(&self) -> TileGeometry {
        self.default_tile
    }

    /// Add a new random tile and return its id.
    ///
    /// The image fetch is awaited before the tile is appended; a failed
    /// fetch leaves the tile without an image.
    pub async fn add_tile(&mut self, source: &dyn ImageSource) -> TileId {
        let mut rng = rand::rng();
        self.add_tile_with_rng(source, &mut rng).await
    }

    /// [`add_tile`](Self::add_tile) with an injected random source.
    pub async fn add_tile_with_rng<R: Rng + ?Sized>(
        &mut self,
        source: &dyn ImageSource,
        rng: &mut R,
    ) -> TileId {
        let fields = random_tile_fields(source, self.default_tile, rng).await;
        self.insert_tile_with_rng(fields, rng)
    }

    /// Append a tile built from `fields` under a fresh id.
    pub fn insert_tile(&mut self, fields: TileFields) -> TileId {
        let mut rng = rand::rng();
        self.insert_tile_with_rng(fields, &mut rng)
    }

    pub fn insert_tile_with_rng<R: Rng + ?Sized>(
        &mut self,
        fields: TileFields,
        rng: &mut R,
    ) -> TileId {
        let id = self.fresh_id(rng);
        log::debug!(
            "Added tile {} ({}, image: {:?})",
            id,
            fields.color.name(),
            fields.image
        );
        self.tiles.push(Tile::new(id, fields));
        id
    }

    fn fresh_id<R: Rng + ?Sized>(&self, rng: &mut R) -> TileId {
        loop {
            let id = rng.random_range(1..=MAX_TILE_ID);
            if !self.contains(id) {
                return id;
            }
        }
    }

    /// Replace every field of tile `id` and set its commit flag.
    ///
    /// Returns `false` if no such tile exists.
    pub fn update_tile(&mut self, id: TileId, fields: TileFields, committed: bool) -> bool {
        match self.tile_mut(id) {
            Some(tile) => {
                tile.replace(fields, committed);
                log::debug!("Updated tile {} (committed: {})", id, committed);
                true
            }
            None => false,
        }
    }

    /// Merge `patch` onto tile `id`, keeping the fields it leaves out.
    pub fn patch_tile(&mut self, id: TileId, patch: &TilePatch, committed: bool) -> bool {
        let Some(tile) = self.tile(id) else {
            return false;
        };
        let mut fields = tile.fields();
        patch.apply(&mut fields);
        self.update_tile(id, fields, committed)
    }

    /// Remove tile `id`, clearing the selection if it pointed there.
    pub fn remove_tile(&mut self, id: TileId) -> Option<Tile> {
        let index = self.tiles.iter().position(|t| t.id() == id)?;
        let tile = self.tiles.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::debug!("Removed tile {}", id);
        Some(tile)
    }

    /// Select tile `id`. Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: TileId) -> bool {
        if !self.contains(id) {
            log::debug!("Ignoring selection of unknown tile {}", id);
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        self.selected.and_then(|id| self.tile(id))
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id() == id)
    }

    fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.id() == id)
    }

    /// Tiles in creation (back-to-front) order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.iter().any(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Front-most tile under `point`.
    pub fn tile_at(&self, point: Point) -> Option<TileId> {
        self.tiles
            .iter()
            .rev()
            .find(|t| t.hit_test(point, 0.0))
            .map(Tile::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::{BoxFuture, CatalogImageSource, ImageError, ImageRecord, ImageResult};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    struct OfflineSource;

    impl ImageSource for OfflineSource {
        fn fetch(&self) -> BoxFuture<'_, ImageResult<Vec<ImageRecord>>> {
            Box::pin(async { Err(ImageError::Unavailable("offline".to_string())) })
        }
    }

    fn fields() -> TileFields {
        TileFields {
            top: 0.0,
            left: 0.0,
            width: 100.0,
            height: 100.0,
            color: TileColor::Blue,
            image: None,
            object_fit: ObjectFit::Cover,
        }
    }

    fn workspace() -> Workspace {
        Workspace::new(Size::new(500.0, 500.0))
    }

    #[test]
    fn test_add_tile_defaults() {
        let mut ws = workspace();
        let source = CatalogImageSource::embedded();
        let mut rng = StdRng::seed_from_u64(3);
        let id = pollster::block_on(ws.add_tile_with_rng(&source, &mut rng));

        let tile = ws.tile(id).unwrap();
        assert_eq!((tile.top, tile.left), (0.0, 0.0));
        assert_eq!((tile.width, tile.height), (100.0, 100.0));
        assert!(tile.update_end);
        assert!(tile.image.is_some());
        assert!(TileColor::PALETTE.contains(&tile.color));
        assert!(id >= 1 && id <= MAX_TILE_ID);
    }

    #[test]
    fn test_add_tile_without_image() {
        let mut ws = workspace();
        let id = pollster::block_on(ws.add_tile(&OfflineSource));
        assert_eq!(ws.len(), 1);
        assert!(ws.tile(id).unwrap().image.is_none());
    }

    #[test]
    fn test_add_tile_uses_configured_geometry() {
        let config = WorkspaceConfig {
            default_tile: TileGeometry {
                top: 5.0,
                left: 6.0,
                width: 40.0,
                height: 30.0,
            },
            ..WorkspaceConfig::default()
        };
        let mut ws = Workspace::with_config(Size::new(500.0, 500.0), &config);
        let id = pollster::block_on(ws.add_tile(&OfflineSource));
        let tile = ws.tile(id).unwrap();
        assert_eq!((tile.top, tile.left, tile.width, tile.height), (5.0, 6.0, 40.0, 30.0));
    }

    #[test]
    fn test_creation_order_is_kept() {
        let mut ws = workspace();
        let a = ws.insert_tile(fields());
        let b = ws.insert_tile(fields());
        let c = ws.insert_tile(fields());
        let order: Vec<_> = ws.tiles().iter().map(Tile::id).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn test_update_replaces_and_flags() {
        let mut ws = workspace();
        let id = ws.insert_tile(fields());
        let moved = fields().with_geometry(10.0, 20.0, 30.0, 40.0);
        assert!(ws.update_tile(id, moved.clone(), false));

        let tile = ws.tile(id).unwrap();
        assert_eq!(tile.fields(), moved);
        assert!(!tile.update_end);
        assert_eq!(tile.id(), id);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut ws = workspace();
        let id = ws.insert_tile(fields());
        let before = ws.tiles().to_vec();
        assert!(!ws.update_tile(id.wrapping_add(1), fields().with_geometry(1.0, 1.0, 1.0, 1.0), true));
        assert_eq!(ws.tiles(), before.as_slice());
    }

    #[test]
    fn test_patch_keeps_other_fields() {
        let mut ws = workspace();
        let id = ws.insert_tile(TileFields {
            image: Some("https://via.placeholder.com/600/771796".to_string()),
            ..fields()
        });
        assert!(ws.patch_tile(id, &TilePatch::size(50.0, 60.0), true));
        let tile = ws.tile(id).unwrap();
        assert_eq!((tile.width, tile.height), (50.0, 60.0));
        assert!(tile.image.is_some());
        assert_eq!(tile.color, TileColor::Blue);
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut ws = workspace();
        let id = ws.insert_tile(fields());
        let next = fields().with_geometry(5.0, 5.0, 50.0, 50.0);
        ws.update_tile(id, next.clone(), true);
        let once = ws.tile(id).cloned();
        ws.update_tile(id, next, true);
        assert_eq!(ws.tile(id).cloned(), once);
    }

    #[test]
    fn test_select_validates() {
        let mut ws = workspace();
        let id = ws.insert_tile(fields());
        assert!(!ws.select(id.wrapping_add(1)));
        assert_eq!(ws.selected(), None);
        assert!(ws.select(id));
        assert_eq!(ws.selected_tile().map(Tile::id), Some(id));
        ws.clear_selection();
        assert_eq!(ws.selected(), None);
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let mut ws = workspace();
        let a = ws.insert_tile(fields());
        let b = ws.insert_tile(fields());
        ws.select(a);

        assert!(ws.remove_tile(b).is_some());
        assert_eq!(ws.selected(), Some(a));
        assert!(ws.remove_tile(a).is_some());
        assert_eq!(ws.selected(), None);
        assert!(ws.remove_tile(a).is_none());
    }

    #[test]
    fn test_tile_at_picks_front_most() {
        let mut ws = workspace();
        let back = ws.insert_tile(fields());
        let front = ws.insert_tile(fields().with_geometry(50.0, 50.0, 100.0, 100.0));
        assert_eq!(ws.tile_at(Point::new(75.0, 75.0)), Some(front));
        assert_eq!(ws.tile_at(Point::new(10.0, 10.0)), Some(back));
        assert_eq!(ws.tile_at(Point::new(400.0, 400.0)), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
        RemoveUnknown,
        Select(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Add),
            2 => (0usize..32).prop_map(Op::Remove),
            1 => Just(Op::RemoveUnknown),
            2 => (0usize..32).prop_map(Op::Select),
        ]
    }

    proptest! {
        #[test]
        fn prop_count_is_adds_minus_removes(ops in prop::collection::vec(op(), 0..64), seed in any::<u64>()) {
            let mut ws = workspace();
            let mut rng = StdRng::seed_from_u64(seed);
            let (mut adds, mut removes) = (0usize, 0usize);

            for op in ops {
                match op {
                    Op::Add => {
                        ws.insert_tile_with_rng(fields(), &mut rng);
                        adds += 1;
                    }
                    Op::Remove(i) if !ws.is_empty() => {
                        let id = ws.tiles()[i % ws.len()].id();
                        prop_assert!(ws.remove_tile(id).is_some());
                        removes += 1;
                    }
                    Op::RemoveUnknown => {
                        prop_assert!(ws.remove_tile(0).is_none());
                    }
                    Op::Select(i) if !ws.is_empty() => {
                        let id = ws.tiles()[i % ws.len()].id();
                        prop_assert!(ws.select(id));
                    }
                    _ => {}
                }
                let ids: HashSet<TileId> = ws.tiles().iter().map(Tile::id).collect();
                prop_assert_eq!(ids.len(), ws.len());
            }
            prop_assert_eq!(ws.len(), adds - removes);
        }

        #[test]
        fn prop_removal_clears_only_its_own_selection(count in 1usize..8, selected in 0usize..8, removed in 0usize..8) {
            let mut ws = workspace();
            let ids: Vec<TileId> = (0..count).map(|_| ws.insert_tile(fields())).collect();
            let selected = ids[selected % count];
            let removed = ids[removed % count];
            ws.select(selected);

            ws.remove_tile(removed);
            if removed == selected {
                prop_assert_eq!(ws.selected(), None);
            } else {
                prop_assert_eq!(ws.selected(), Some(selected));
            }
        }

        #[test]
        fn prop_commit_twice_is_idempotent(top in -100.0f64..600.0, left in -100.0f64..600.0, w in 0.0f64..600.0, h in 0.0f64..600.0) {
            let mut ws = workspace();
            let id = ws.insert_tile(fields());
            let next = fields().with_geometry(top, left, w, h);
            ws.update_tile(id, next.clone(), true);
            let once = ws.tile(id).cloned();
            ws.update_tile(id, next, true);
            prop_assert_eq!(ws.tile(id).cloned(), once);
        }
    }
}
