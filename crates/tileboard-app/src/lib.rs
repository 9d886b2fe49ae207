//! Tileboard Application
//!
//! The application shell: windowing, the egui toolbar, and routing of
//! pointer and key input to the workspace.

mod app;
mod event_handler;
mod ui;

pub use app::{App, AppConfig, CONFIG_ENV};
pub use event_handler::{EventHandler, PressOutcome};
pub use ui::{SelectedTileInfo, UiAction, UiState, render_ui};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
