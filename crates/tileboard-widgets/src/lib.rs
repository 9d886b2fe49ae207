//! Small egui component set used by the Tileboard toolbar.
//!
//! Everything is styled for a dark canvas.

pub mod buttons;
pub mod frames;
pub mod layout;
pub mod swatch;

pub use buttons::{ButtonStyle, TextButton};
pub use frames::toolbar_frame;
pub use layout::{muted_label, vertical_separator};
pub use swatch::ColorSwatch;

pub mod sizing {
    /// Swatch side and separator height
    pub const SMALL: f32 = 14.0;
    /// Toolbar button height
    pub const MEDIUM: f32 = 24.0;
    pub const CORNER_RADIUS: u8 = 3;
    pub const PANEL_RADIUS: u8 = 6;
}

/// Dark palette shared by the widgets.
pub mod theme {
    use egui::Color32;

    pub const TEXT: Color32 = Color32::from_rgb(230, 230, 232);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(158, 158, 166);
    pub const TEXT_DISABLED: Color32 = Color32::from_rgb(94, 94, 102);
    pub const BORDER: Color32 = Color32::from_rgb(62, 62, 70);
    /// Matches the canvas selection outline
    pub const ACCENT: Color32 = Color32::from_rgb(68, 170, 255);
    pub const ACCENT_HOVER: Color32 = Color32::from_rgb(38, 138, 228);
    pub const HOVER_BG: Color32 = Color32::from_rgb(50, 50, 58);
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 30, 236);
}
