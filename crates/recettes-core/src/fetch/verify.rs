//! Cheap check that downloaded bytes are an image.

use std::path::Path;

use super::FetchError;

/// Sniffs the format from magic bytes and reads the dimensions from the header.
pub fn check_image(path: &Path) -> Result<(u32, u32), FetchError> {
    let reader = image::ImageReader::open(path)
        .map_err(|e| FetchError::Storage(anyhow::Error::new(e).context("reopen downloaded file")))?
        .with_guessed_format()
        .map_err(|e| FetchError::NotImage(e.to_string()))?;
    if reader.format().is_none() {
        return Err(FetchError::NotImage("unknown format".to_string()));
    }
    reader
        .into_dimensions()
        .map_err(|e| FetchError::NotImage(e.to_string()))
}
