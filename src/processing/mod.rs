//! Local image processing
//!
//! Pure, synchronous pixel work backed by the `image` crate:
//! - Bounding box padding/clamping for region crops
//! - Fit-within optimization and cover-crop thumbnails
//! - Re-encoding to PNG/JPEG/WebP

pub mod bbox;
pub mod encoder;
pub mod transform;

// Re-export commonly used types
pub use bbox::{pad_and_clamp, BoundingBox, PaddedBox, DEFAULT_PADDING, FALLBACK_BOUND};
pub use encoder::{encode, OutputFormat};
pub use transform::{
    decode, extract_region, optimize, optimize_or_original, probe_dimensions, thumbnail,
    OptimizeParams, ThumbnailParams,
};
