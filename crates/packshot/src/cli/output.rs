//! Writing a finished batch to disk.

use packshot_core::RenderedImage;
use packshot_error::{BackendError, PackshotResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name for a rendered image, numbered by task position from 1.
pub fn shot_file_name(image: &RenderedImage) -> String {
    format!("shot-{:02}.{}", image.index() + 1, image.extension())
}

/// Writes every image into `dir`, creating it if needed.
pub fn write_images(dir: &Path, images: &[RenderedImage]) -> PackshotResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| {
        BackendError::new(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    images
        .iter()
        .map(|image| -> PackshotResult<PathBuf> {
            let path = dir.join(shot_file_name(image));
            std::fs::write(&path, image.bytes()).map_err(|e| {
                BackendError::new(format!("Failed to write {}: {}", path.display(), e))
            })?;
            debug!(path = %path.display(), "Image written");
            Ok(path)
        })
        .collect()
}
