//! Workspace configuration.

use crate::images::CatalogImageSource;
use crate::moveable::MoveableOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Geometry new tiles are created with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileGeometry {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for TileGeometry {
    fn default() -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }
}

/// Settings shared by the workspace, the widget and the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub default_tile: TileGeometry,
    /// Diameter of a resize handle in screen pixels.
    pub handle_size: f64,
    /// Extra radius around a handle that still counts as a hit.
    pub handle_hit_tolerance: f64,
    /// Side of the square delete button in a tile's corner.
    pub delete_button_size: f64,
    /// JSON catalog to pick images from instead of the embedded one.
    pub image_catalog: Option<PathBuf>,
    pub moveable: MoveableOptions,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            default_tile: TileGeometry::default(),
            handle_size: 10.0,
            handle_hit_tolerance: 8.0,
            delete_button_size: 30.0,
            image_catalog: None,
            moveable: MoveableOptions::default(),
        }
    }
}

impl WorkspaceConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded workspace config from {}", path.display());
        Ok(config)
    }

    /// Image source for new tiles. Falls back to the embedded catalog when
    /// the configured one cannot be read.
    pub fn image_source(&self) -> CatalogImageSource {
        match &self.image_catalog {
            Some(path) => CatalogImageSource::load(path).unwrap_or_else(|e| {
                log::warn!(
                    "Failed to load image catalog {}: {}, using embedded catalog",
                    path.display(),
                    e
                );
                CatalogImageSource::embedded()
            }),
            None => CatalogImageSource::embedded(),
        }
    }
}
