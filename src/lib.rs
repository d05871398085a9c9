//! Mediavault client library
//!
//! Integrates a hosted image-storage/CDN service with a local image
//! processing pipeline:
//!
//! - Upload raw image bytes with folder/tag/transformation directives
//! - Crop a padded bounding box out of an image and upload the region
//! - Optimize (fit-within resize + re-encode) and thumbnail (cover crop)
//! - Fetch resource metadata, delete objects, read account usage
//! - Build time-limited HMAC-signed delivery URLs (no network call)
//!
//! All remote calls go through the [`api::StorageBackend`] trait so the
//! result-shaping logic can be exercised against mock backends.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod processing;

// Re-export commonly used types
pub use api::{
    CropParams, CropUploadResult, DeleteOutcome, MediaClient, ResourceInfo, SignedUrlParams,
    StorageBackend, UploadParams, UploadResult, UsageCategory, UsageStats,
};
pub use config::ServiceConfig;
pub use error::{MediaError, Result};
pub use processing::{
    pad_and_clamp, BoundingBox, OptimizeParams, OutputFormat, PaddedBox, ThumbnailParams,
    FALLBACK_BOUND,
};
