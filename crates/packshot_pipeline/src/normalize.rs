//! Asset normalization: bound the payload size before any inference call.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::ImageReader;
use packshot_core::SourceAsset;
use packshot_error::{ImageError, ImageErrorKind};
use std::io::Cursor;
use tracing::{debug, instrument, warn};

/// Downscales `asset` so its longer edge is at most `max_edge`.
///
/// Oversized images are resized so the longer edge equals `max_edge` and
/// re-encoded as JPEG at `quality`. Anything else, including images that fail
/// to decode or encode, is returned unchanged.
#[instrument(skip(asset), fields(role = %asset.role(), media_type = asset.media_type(), len = asset.len()))]
pub fn normalize(asset: &SourceAsset, max_edge: u32, quality: u8) -> SourceAsset {
    match try_normalize(asset, max_edge, quality) {
        Ok(Some(resized)) => resized,
        Ok(None) => asset.clone(),
        Err(e) => {
            warn!(error = %e, "Normalization failed, passing original bytes through");
            asset.clone()
        }
    }
}

/// Runs [`normalize`] on the blocking pool.
///
/// A panicked or cancelled worker is treated like any other normalization
/// failure: the original asset comes back.
pub async fn normalize_blocking(asset: SourceAsset, max_edge: u32, quality: u8) -> SourceAsset {
    let fallback = asset.clone();
    match tokio::task::spawn_blocking(move || normalize(&asset, max_edge, quality)).await {
        Ok(normalized) => normalized,
        Err(e) => {
            let err = ImageError::new(ImageErrorKind::Worker(e.to_string()));
            warn!(error = %err, "Normalization worker failed, passing original bytes through");
            fallback
        }
    }
}

/// Resizes and re-encodes `asset` if it is larger than `max_edge`.
///
/// Returns `Ok(None)` when the asset already fits. Only the header is read
/// for that check.
pub fn try_normalize(
    asset: &SourceAsset,
    max_edge: u32,
    quality: u8,
) -> Result<Option<SourceAsset>, ImageError> {
    let (width, height) = ImageReader::new(Cursor::new(asset.bytes()))
        .with_guessed_format()
        .map_err(|e| ImageError::new(ImageErrorKind::Decode(e.to_string())))?
        .into_dimensions()
        .map_err(|e| ImageError::new(ImageErrorKind::Decode(e.to_string())))?;

    if width.max(height) <= max_edge {
        debug!(width, height, "Asset within bounds");
        return Ok(None);
    }

    let (target_width, target_height) = fit_longer_edge(width, height, max_edge);

    let decoded = ImageReader::new(Cursor::new(asset.bytes()))
        .with_guessed_format()
        .map_err(|e| ImageError::new(ImageErrorKind::Decode(e.to_string())))?
        .decode()
        .map_err(|e| ImageError::new(ImageErrorKind::Decode(e.to_string())))?;

    let resized = decoded
        .resize_exact(target_width, target_height, FilterType::Lanczos3)
        .to_rgb8();

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality.clamp(1, 100))
        .encode_image(&resized)
        .map_err(|e| ImageError::new(ImageErrorKind::Encode(e.to_string())))?;

    debug!(
        from_width = width,
        from_height = height,
        to_width = target_width,
        to_height = target_height,
        bytes = encoded.len(),
        "Asset downscaled"
    );

    Ok(Some(asset.with_payload(encoded, "image/jpeg")))
}

/// Dimensions with the longer edge set to `max_edge` and the shorter edge
/// scaled proportionally, rounded to the nearest pixel.
pub fn fit_longer_edge(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let scale = |short: u32, long: u32| -> u32 {
        let scaled = (u64::from(short) * u64::from(max_edge) + u64::from(long) / 2) / u64::from(long);
        (scaled as u32).max(1)
    };
    if width >= height {
        (max_edge, scale(height, width))
    } else {
        (scale(width, height), max_edge)
    }
}
