//! Layout helpers.

use egui::{Sense, Stroke, Ui, vec2};

use crate::{sizing, theme};

/// Thin vertical rule between toolbar groups.
pub fn vertical_separator(ui: &mut Ui) {
    let (rect, _) = ui.allocate_exact_size(vec2(7.0, sizing::SMALL), Sense::hover());
    let x = rect.center().x;
    ui.painter()
        .vline(x, rect.y_range(), Stroke::new(1.0, theme::BORDER));
}

/// Small muted text.
pub fn muted_label(ui: &mut Ui, text: &str) {
    ui.label(egui::RichText::new(text).size(11.0).color(theme::TEXT_MUTED));
}
