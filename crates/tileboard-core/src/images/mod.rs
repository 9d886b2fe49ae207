//! Image sources for new tiles.
//!
//! A tile gets its image URL from an [`ImageSource`]. Fetching may fail; the
//! workspace never propagates that failure and creates the tile without an
//! image instead.

mod catalog;
mod placeholder;

pub use catalog::CatalogImageSource;
pub use placeholder::PlaceholderImage;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Image source errors.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid image catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Image catalog is empty")]
    Empty,
    #[error("Image source unavailable: {0}")]
    Unavailable(String),
}

/// Result type for image source operations.
pub type ImageResult<T> = Result<T, ImageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// One entry of an image catalog, in the jsonplaceholder photo shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(default)]
    pub album_id: u32,
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// A provider of candidate image URLs.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait ImageSource: Send + Sync {
    /// Fetch every candidate image.
    fn fetch(&self) -> BoxFuture<'_, ImageResult<Vec<ImageRecord>>>;
}

/// A provider of candidate image URLs (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait ImageSource {
    /// Fetch every candidate image.
    fn fetch(&self) -> BoxFuture<'_, ImageResult<Vec<ImageRecord>>>;
}

/// Fetch candidates from `source` and pick one URL uniformly at random.
///
/// Failures are logged and yield `None`.
pub async fn pick_image<R: Rng + ?Sized>(source: &dyn ImageSource, rng: &mut R) -> Option<String> {
    let records = match source.fetch().await {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Error fetching image: {}", e);
            return None;
        }
    };
    match records.choose(rng) {
        Some(record) => Some(record.url.clone()),
        None => {
            log::warn!("Error fetching image: {}", ImageError::Empty);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct FailingSource;

    impl ImageSource for FailingSource {
        fn fetch(&self) -> BoxFuture<'_, ImageResult<Vec<ImageRecord>>> {
            Box::pin(async { Err(ImageError::Unavailable("offline".to_string())) })
        }
    }

    #[test]
    fn test_pick_from_catalog() {
        let source = CatalogImageSource::embedded();
        let mut rng = StdRng::seed_from_u64(7);
        let url = pollster::block_on(pick_image(&source, &mut rng));
        let url = url.expect("embedded catalog should yield an image");
        assert!(url.starts_with("https://via.placeholder.com/600/"));
    }

    #[test]
    fn test_failure_degrades_to_none() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pollster::block_on(pick_image(&FailingSource, &mut rng)).is_none());
    }

    #[test]
    fn test_empty_catalog_degrades_to_none() {
        let source = CatalogImageSource::from_records(Vec::new());
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pollster::block_on(pick_image(&source, &mut rng)).is_none());
    }

    #[test]
    fn test_record_parses_camel_case() {
        let json = r#"{"albumId": 2, "id": 51, "title": "t", "url": "u", "thumbnailUrl": "th"}"#;
        let record: ImageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.album_id, 2);
        assert_eq!(record.thumbnail_url.as_deref(), Some("th"));
    }
}
