//! UI components using egui.

use egui::{Align2, Color32, Context, Vec2};
use tileboard_core::tile::{ObjectFit, Tile, TileId};
use tileboard_core::workspace::Workspace;
use tileboard_widgets::{ColorSwatch, TextButton, muted_label, toolbar_frame, vertical_separator};

/// Summary of the selected tile for the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedTileInfo {
    pub id: TileId,
    pub color: Color32,
    pub color_name: &'static str,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub object_fit: ObjectFit,
    pub has_image: bool,
    /// Whether the last update was committed.
    pub committed: bool,
}

impl SelectedTileInfo {
    pub fn from_tile(tile: &Tile) -> Self {
        let rgba = tile.color.to_color().to_rgba8();
        Self {
            id: tile.id(),
            color: Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a),
            color_name: tile.color.name(),
            top: tile.top,
            left: tile.left,
            width: tile.width,
            height: tile.height,
            object_fit: tile.object_fit,
            has_image: tile.image.is_some(),
            committed: tile.update_end,
        }
    }

    /// One-line geometry description.
    pub fn geometry_label(&self) -> String {
        format!(
            "{:.0}×{:.0} at ({:.0}, {:.0})",
            self.width, self.height, self.left, self.top
        )
    }
}

/// UI state that persists across frames.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tile_count: usize,
    pub selected: Option<SelectedTileInfo>,
    /// Tile creations still waiting on their image fetch.
    pub pending_tiles: usize,
}

impl UiState {
    /// Refresh the mirrored workspace summary.
    pub fn update(&mut self, workspace: &Workspace) {
        self.tile_count = workspace.len();
        self.selected = workspace.selected_tile().map(SelectedTileInfo::from_tile);
    }
}

/// Actions triggered by UI interactions.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    AddTile,
    RemoveTile(TileId),
    ClearSelection,
}

/// Render all UI panels and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("toolbar"))
        .anchor(Align2::LEFT_TOP, Vec2::new(12.0, 12.0))
        .show(ctx, |ui| {
            toolbar_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(6.0, 0.0);

                    if TextButton::new("Add tile").primary().show(ui) {
                        action = Some(UiAction::AddTile);
                    }

                    vertical_separator(ui);
                    muted_label(ui, &tile_count_label(ui_state.tile_count));
                    if ui_state.pending_tiles > 0 {
                        muted_label(ui, "(loading…)");
                    }

                    if let Some(selected) = &ui_state.selected {
                        vertical_separator(ui);
                        ColorSwatch::new(selected.color, selected.color_name).show(ui);
                        muted_label(ui, &selected.geometry_label());
                        muted_label(
                            ui,
                            match selected.object_fit {
                                ObjectFit::Cover => "cover",
                                ObjectFit::Contain => "contain",
                            },
                        );
                        if !selected.has_image {
                            muted_label(ui, "no image");
                        }
                        if TextButton::new("Remove").shortcut("Del").show(ui) {
                            action = Some(UiAction::RemoveTile(selected.id));
                        }
                        if TextButton::new("Deselect").shortcut("Esc").show(ui) {
                            action = Some(UiAction::ClearSelection);
                        }
                    }
                });
            });
        });

    action
}

fn tile_count_label(count: usize) -> String {
    match count {
        1 => "1 tile".to_string(),
        n => format!("{} tiles", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use tileboard_core::tile::{TileColor, TileFields};

    #[test]
    fn test_state_mirrors_workspace() {
        let mut ws = Workspace::new(Size::new(500.0, 500.0));
        let id = ws.insert_tile(TileFields {
            top: 10.0,
            left: 20.0,
            width: 100.0,
            height: 80.0,
            color: TileColor::Red,
            image: None,
            object_fit: ObjectFit::Contain,
        });
        let mut state = UiState::default();
        state.update(&ws);
        assert_eq!(state.tile_count, 1);
        assert!(state.selected.is_none());

        ws.select(id);
        state.update(&ws);
        let selected = state.selected.as_ref().unwrap();
        assert_eq!(selected.id, id);
        assert_eq!(selected.color, Color32::from_rgb(255, 0, 0));
        assert_eq!(selected.color_name, "red");
        assert_eq!(selected.geometry_label(), "100×80 at (20, 10)");
        assert!(!selected.has_image);
    }

    #[test]
    fn test_tile_count_label() {
        assert_eq!(tile_count_label(0), "0 tiles");
        assert_eq!(tile_count_label(1), "1 tile");
        assert_eq!(tile_count_label(3), "3 tiles");
    }
}
