//! Image catalog backed by a JSON list of photos.

use super::{BoxFuture, ImageRecord, ImageResult, ImageSource};
use std::path::Path;

/// Mock photo catalog bundled with the crate.
static EMBEDDED_CATALOG: &str = include_str!("../../mocks/response.json");

/// An in-memory catalog of images, loaded from the bundled mock list or from
/// a JSON file on disk.
#[derive(Debug, Clone, Default)]
pub struct CatalogImageSource {
    records: Vec<ImageRecord>,
}

impl CatalogImageSource {
    /// Catalog built from the bundled mock response.
    pub fn embedded() -> Self {
        // The bundled file is checked by `test_embedded_catalog_parses`.
        let records = serde_json::from_str(EMBEDDED_CATALOG).unwrap_or_else(|e| {
            log::error!("Bundled image catalog is invalid: {}", e);
            Vec::new()
        });
        Self { records }
    }

    /// Catalog from an explicit list.
    pub fn from_records(records: Vec<ImageRecord>) -> Self {
        Self { records }
    }

    /// Parse a catalog from a JSON array of image records.
    pub fn from_json(json: &str) -> ImageResult<Self> {
        let records = serde_json::from_str(json)?;
        Ok(Self { records })
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> ImageResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let source = Self::from_json(&json)?;
        log::info!("Loaded {} images from {}", source.len(), path.display());
        Ok(source)
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ImageSource for CatalogImageSource {
    fn fetch(&self) -> BoxFuture<'_, ImageResult<Vec<ImageRecord>>> {
        Box::pin(async move { Ok(self.records.clone()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageError;
    use std::io::Write;

    #[test]
    fn test_embedded_catalog_parses() {
        let source = CatalogImageSource::embedded();
        assert!(!source.is_empty());
        assert!(source.records().iter().all(|r| !r.url.is_empty()));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"url": "https://via.placeholder.com/300/ff0000"}}]"#).unwrap();

        let source = CatalogImageSource::load(file.path()).unwrap();
        assert_eq!(source.len(), 1);
        let records = pollster::block_on(source.fetch()).unwrap();
        assert_eq!(records[0].url, "https://via.placeholder.com/300/ff0000");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = CatalogImageSource::from_json("{not json");
        assert!(matches!(result, Err(ImageError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CatalogImageSource::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ImageError::Io(_))));
    }
}
