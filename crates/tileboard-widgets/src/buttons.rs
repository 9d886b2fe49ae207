//! Text buttons.

use egui::{Color32, CornerRadius, CursorIcon, FontId, Pos2, Sense, Stroke, Ui, vec2};

use crate::{sizing, theme};

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    /// Transparent until hovered.
    #[default]
    Plain,
    /// Filled with the accent color.
    Primary,
}

/// A text button with an optional shortcut hint.
pub struct TextButton<'a> {
    label: &'a str,
    shortcut: Option<&'a str>,
    style: ButtonStyle,
    enabled: bool,
}

impl<'a> TextButton<'a> {
    /// Create a new text button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            shortcut: None,
            style: ButtonStyle::Plain,
            enabled: true,
        }
    }

    /// Add a shortcut hint.
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn primary(mut self) -> Self {
        self.style = ButtonStyle::Primary;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn width(&self) -> f32 {
        // Rough glyph width estimate; egui lays out the text itself.
        let chars = self.label.chars().count() + self.shortcut.map_or(0, |s| s.chars().count() + 2);
        16.0 + chars as f32 * 7.0
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let size = vec2(self.width(), sizing::MEDIUM);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let hovered = self.enabled && response.hovered();
            let (bg_color, text_color, border) = match self.style {
                ButtonStyle::Plain => (
                    if hovered { theme::HOVER_BG } else { Color32::TRANSPARENT },
                    if self.enabled { theme::TEXT } else { theme::TEXT_DISABLED },
                    Stroke::NONE,
                ),
                ButtonStyle::Primary => (
                    if hovered { theme::ACCENT_HOVER } else { theme::ACCENT },
                    Color32::WHITE,
                    Stroke::new(1.0, theme::ACCENT_HOVER),
                ),
            };

            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, bg_color);
            if border != Stroke::NONE {
                ui.painter()
                    .rect_stroke(rect, radius, border, egui::StrokeKind::Inside);
            }

            ui.painter().text(
                Pos2::new(rect.left() + 8.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.label,
                FontId::proportional(12.0),
                text_color,
            );

            if let Some(shortcut) = self.shortcut {
                ui.painter().text(
                    Pos2::new(rect.right() - 8.0, rect.center().y),
                    egui::Align2::RIGHT_CENTER,
                    shortcut,
                    FontId::proportional(11.0),
                    theme::TEXT_MUTED,
                );
            }
        }

        let clicked = self.enabled && response.clicked();
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        }
        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let button = TextButton::new("Add tile").shortcut("N").primary().enabled(false);
        assert_eq!(button.style, ButtonStyle::Primary);
        assert!(!button.enabled);
        assert!(button.width() > TextButton::new("Add tile").width());
    }
}
