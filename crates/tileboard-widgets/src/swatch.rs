//! Color chip with a label.

use egui::{Color32, CornerRadius, Sense, Stroke, StrokeKind, Ui, vec2};

use crate::{sizing, theme};

/// A square color chip followed by its name.
pub struct ColorSwatch<'a> {
    color: Color32,
    label: &'a str,
}

impl<'a> ColorSwatch<'a> {
    pub fn new(color: Color32, label: &'a str) -> Self {
        Self { color, label }
    }

    pub fn show(self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(vec2(sizing::SMALL, sizing::SMALL), Sense::hover());
            if ui.is_rect_visible(rect) {
                let radius = CornerRadius::same(sizing::CORNER_RADIUS);
                ui.painter().rect_filled(rect, radius, self.color);
                ui.painter()
                    .rect_stroke(rect, radius, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);
            }
            ui.label(egui::RichText::new(self.label).size(12.0).color(theme::TEXT));
        });
    }
}
