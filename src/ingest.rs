//! Image ingestion: turn a user-selected file into a stable, re-renderable
//! image handle.
//!
//! The handle is `Arc`-shared so the same decoded pixels back both
//! inference calls and the preview rendering without re-decoding. Ingestion
//! does no resizing, cropping, or color work; the capabilities do their own
//! input preparation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, ImageReader};

use crate::error::IngestError;

/// An opaque reference to decoded pixel data. Cheap to clone; usable an
/// unbounded number of times. Released when the session resets.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    image: Arc<DynamicImage>,
    path: PathBuf,
}

impl ImageHandle {
    /// Build a handle from an already-decoded image. Used by callers that
    /// produce images in memory (tests, mostly).
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: Arc::new(image),
            path: PathBuf::new(),
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// The file the handle was decoded from, for display purposes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Decode exactly one user-selected file into an [`ImageHandle`].
///
/// The selection UI filters on image types before this is called; decode
/// failures still surface as [`IngestError`] rather than being assumed
/// away. No session state is touched here.
pub fn ingest(path: &Path) -> Result<ImageHandle, IngestError> {
    let reader = ImageReader::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let image = reader.decode().map_err(|source| IngestError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ImageHandle {
        image: Arc::new(image),
        path: path.to_path_buf(),
    })
}
