//! Floating panel frame.

use egui::{Color32, CornerRadius, Frame, Margin, Stroke, epaint::Shadow};

use crate::{sizing, theme};

/// Frame for the floating toolbar over the canvas.
pub fn toolbar_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(Shadow {
            spread: 1,
            blur: 12,
            offset: [0, 3],
            color: Color32::from_black_alpha(90),
        })
        .inner_margin(Margin::symmetric(10, 5))
}
