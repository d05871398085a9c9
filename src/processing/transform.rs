//! Local image transforms: decode → resize/crop → encode
//!
//! Everything here is synchronous buffer-in/buffer-out; the remote service
//! never sees these intermediate pixels except through an upload.

use std::io::Cursor;

use image::imageops::FilterType;
use image::io::Reader as ImageReader;
use image::DynamicImage;
use tracing::warn;

use super::bbox::PaddedBox;
use super::encoder::{encode, OutputFormat};
use crate::error::{MediaError, Result};

/// Parameters for [`optimize`]: fit within a box, never enlarging
#[derive(Debug, Clone)]
pub struct OptimizeParams {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
    pub format: OutputFormat,
}

impl Default for OptimizeParams {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            quality: 85,
            format: OutputFormat::WebP,
        }
    }
}

/// Parameters for [`thumbnail`]: cover an exact box, center-anchored
#[derive(Debug, Clone)]
pub struct ThumbnailParams {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub format: OutputFormat,
}

impl Default for ThumbnailParams {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            quality: 80,
            format: OutputFormat::WebP,
        }
    }
}

/// Read image dimensions from the header without a full decode
///
/// Returns `None` when the format cannot be guessed or the header is
/// unreadable; callers fall back to their own bounds in that case.
pub fn probe_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Decode image bytes into a [`DynamicImage`]
pub fn decode(data: &[u8]) -> Result<DynamicImage> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| MediaError::decode(e.to_string()))?
        .decode()
        .map_err(|e| MediaError::decode(e.to_string()))
}

/// Resize to fit within `{max_width, max_height}` and re-encode
///
/// Aspect ratio is preserved and the source is never upscaled; an image
/// already inside the box is only re-encoded.
pub fn optimize(data: &[u8], params: &OptimizeParams) -> Result<Vec<u8>> {
    if params.max_width == 0 || params.max_height == 0 {
        return Err(MediaError::process("target box cannot be zero-sized"));
    }

    let img = decode(data)?;

    let resized = if img.width() > params.max_width || img.height() > params.max_height {
        img.resize(params.max_width, params.max_height, FilterType::Lanczos3)
    } else {
        img
    };

    encode(&resized, params.format, params.quality)
}

/// Best-effort variant of [`optimize`]
///
/// On any processing error the original bytes are returned unchanged, so a
/// corrupt or exotic input degrades to "stored as-is" instead of failing
/// the caller's pipeline. The error is logged, not surfaced.
pub fn optimize_or_original(data: &[u8], params: &OptimizeParams) -> Vec<u8> {
    match optimize(data, params) {
        Ok(optimized) => optimized,
        Err(e) => {
            warn!(error = %e, "image optimization failed, keeping original bytes");
            data.to_vec()
        }
    }
}

/// Resize to exactly `{width, height}`, cropping overflow around the center
pub fn thumbnail(data: &[u8], params: &ThumbnailParams) -> Result<Vec<u8>> {
    if params.width == 0 || params.height == 0 {
        return Err(MediaError::process("thumbnail box cannot be zero-sized"));
    }

    let img = decode(data)?;
    let filled = img.resize_to_fill(params.width, params.height, FilterType::Lanczos3);

    encode(&filled, params.format, params.quality)
}

/// Extract a pixel region described by an already-clamped [`PaddedBox`]
///
/// The region is intersected with the decoded dimensions once more in case
/// the box was clamped against stale bounds.
pub fn extract_region(data: &[u8], region: PaddedBox) -> Result<DynamicImage> {
    let img = decode(data)?;

    let x = region.x.min(img.width());
    let y = region.y.min(img.height());
    let width = region.width.min(img.width() - x);
    let height = region.height.min(img.height() - y);

    if width == 0 || height == 0 {
        return Err(MediaError::process(format!(
            "crop region {}x{} at ({}, {}) is outside the {}x{} image",
            region.width,
            region.height,
            region.x,
            region.y,
            img.width(),
            img.height()
        )));
    }

    Ok(img.crop_imm(x, y, width, height))
}
