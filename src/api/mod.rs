//! Remote storage service integration
//!
//! - [`backend`]: the [`StorageBackend`] trait and its reqwest-based
//!   production implementation
//! - [`client`]: [`MediaClient`], parameter assembly and response shaping
//! - [`signing`]: locally computed signed delivery URLs
//! - [`types`]: wire shapes and the records returned to callers

pub mod backend;
pub mod client;
pub mod signing;
pub mod types;

// Re-export commonly used types
pub use backend::{HttpBackend, StorageBackend, UploadRequest};
pub use client::{
    generate_public_id, CropParams, MediaClient, UploadParams, CROP_FOLDER, DEFAULT_UPLOAD_FOLDER,
};
pub use signing::{signed_url, verify_signature, SignedUrlParams, DEFAULT_EXPIRY_SECS};
pub use types::{
    CropUploadResult, DeleteOutcome, DestroyResponse, ResourceInfo, ResourceResponse,
    UploadResponse, UploadResult, UsageCategory, UsageCounters, UsageResponse, UsageStats,
};
