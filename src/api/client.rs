//! High-level client over the storage backend
//!
//! [`MediaClient`] assembles upload parameters (default identifiers,
//! default transformation directives, folder/tag conventions), runs the
//! crop pipeline, and reshapes backend responses into the public records.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::backend::{HttpBackend, StorageBackend, UploadRequest};
use super::signing::{self, SignedUrlParams};
use super::types::{CropUploadResult, DeleteOutcome, ResourceInfo, UploadResult, UsageStats};
use crate::config::ServiceConfig;
use crate::error::{MediaError, Result};
use crate::processing::{
    self, encode, pad_and_clamp, BoundingBox, OutputFormat, DEFAULT_PADDING,
};

/// Folder used when an upload names none
pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";

/// Folder used for region crops, kept apart from plain uploads
pub const CROP_FOLDER: &str = "crops";

/// Tags applied to crops when the caller supplies none
const CROP_DEFAULT_TAGS: &[&str] = &["crop", "evidence"];

/// Quality used when re-encoding an extracted crop region
const CROP_QUALITY: u8 = 90;

/// Transformation directives every upload requests by default
const DEFAULT_DIRECTIVES: &[&str] = &["quality=auto", "fetch_format=auto"];

/// Optional parameters for [`MediaClient::upload`]
#[derive(Debug, Clone, Default)]
pub struct UploadParams {
    /// Storage folder; defaults to [`DEFAULT_UPLOAD_FOLDER`]
    pub folder: Option<String>,
    /// Caller-assigned identifier; a unique one is generated when absent
    pub public_id: Option<String>,
    pub tags: Vec<String>,
    /// Directives applied in addition to the automatic quality/format pair
    pub transformations: Vec<String>,
    /// Force a specific stored format (e.g. "png")
    pub format: Option<String>,
}

/// Optional parameters for [`MediaClient::upload_crop`]
#[derive(Debug, Clone)]
pub struct CropParams {
    /// Margin added to each side of the bounding box
    pub padding: u32,
    /// Storage folder; defaults to [`CROP_FOLDER`]
    pub folder: Option<String>,
    /// Caller tags; `None` selects the crop defaults, `Some(vec![])` means
    /// no caller tags. "cropped" is appended either way.
    pub tags: Option<Vec<String>>,
    /// Image dimensions if the caller already decoded them; used only when
    /// probing the bytes fails
    pub bounds: Option<(u32, u32)>,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            folder: None,
            tags: None,
            bounds: None,
        }
    }
}

/// Stateless client for the storage service
///
/// Cheap to clone; every method is independently invocable and safe to call
/// concurrently. No retry, throttling or caching is performed.
#[derive(Clone)]
pub struct MediaClient {
    config: ServiceConfig,
    backend: Arc<dyn StorageBackend>,
}

impl MediaClient {
    /// Create a client backed by the production HTTP backend
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        let backend = Arc::new(HttpBackend::new(config.clone()));
        Ok(Self { config, backend })
    }

    /// Create a client with a custom backend (mock backends in tests)
    pub fn with_backend(config: ServiceConfig, backend: Arc<dyn StorageBackend>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    /// Upload image bytes to the storage service
    ///
    /// A unique public identifier is generated when the caller supplies
    /// none. The upload always requests automatic quality and automatic
    /// format selection; caller directives are applied on top.
    pub async fn upload(&self, data: Bytes, params: UploadParams) -> Result<UploadResult> {
        let public_id = params.public_id.unwrap_or_else(generate_public_id);
        let folder = params
            .folder
            .unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string());

        debug!(%public_id, %folder, bytes = data.len(), "uploading image");

        let request = UploadRequest {
            data,
            public_id,
            folder,
            tags: params.tags,
            transformation: merge_transformations(&params.transformations),
            format: params.format,
        };

        let response = self.backend.upload(request).await.map_err(|e| {
            warn!(error = %e, "upload failed");
            e
        })?;

        Ok(response.into())
    }

    /// Extract a padded region from `data` and upload it as a PNG
    ///
    /// The bounding box is grown by `params.padding` on each side and
    /// clamped to the image bounds (probed from the bytes; caller-supplied
    /// bounds and finally the fallback constant are used when probing
    /// fails). The region is re-encoded losslessly and tagged with the
    /// caller tags plus "cropped".
    pub async fn upload_crop(
        &self,
        data: Bytes,
        bbox: BoundingBox,
        params: CropParams,
    ) -> Result<CropUploadResult> {
        let bounds = processing::probe_dimensions(&data).or(params.bounds);
        let padded = pad_and_clamp(bbox, params.padding, bounds);

        debug!(?bbox, ?padded, "extracting crop region");

        let region = processing::extract_region(&data, padded)?;
        let png = encode(&region, OutputFormat::Png, CROP_QUALITY)?;

        let upload_params = UploadParams {
            folder: Some(params.folder.unwrap_or_else(|| CROP_FOLDER.to_string())),
            public_id: None,
            tags: crop_tags(params.tags),
            transformations: vec![format!("quality={}", CROP_QUALITY)],
            format: Some(OutputFormat::Png.as_str().to_string()),
        };

        let upload = self.upload(Bytes::from(png), upload_params).await?;

        Ok(CropUploadResult {
            upload,
            requested: bbox,
            padded,
        })
    }

    /// Fetch metadata for a stored object
    pub async fn resource(&self, public_id: &str) -> Result<ResourceInfo> {
        debug!(%public_id, "fetching resource metadata");
        let response = self.backend.resource(public_id).await?;
        Ok(response.into())
    }

    /// Delete a stored object
    ///
    /// Succeeds only when the service reports an "ok" outcome. Deleting a
    /// nonexistent identifier surfaces as [`MediaError::DeleteRejected`];
    /// callers wanting idempotent delete must treat that case themselves.
    pub async fn delete(&self, public_id: &str) -> Result<DeleteOutcome> {
        debug!(%public_id, "deleting resource");
        let response = self.backend.destroy(public_id).await?;

        if response.result == "ok" {
            Ok(DeleteOutcome {
                public_id: public_id.to_string(),
            })
        } else {
            warn!(%public_id, outcome = %response.result, "delete rejected");
            Err(MediaError::DeleteRejected {
                outcome: response.result,
            })
        }
    }

    /// Fetch account usage counters; always fresh, never cached
    pub async fn usage(&self) -> Result<UsageStats> {
        debug!("fetching account usage");
        let response = self.backend.usage().await?;
        Ok(response.into())
    }

    /// Build a time-limited signed delivery URL; purely local, no network
    pub fn signed_url(&self, public_id: &str, params: &SignedUrlParams) -> Result<String> {
        signing::signed_url(&self.config, public_id, params)
    }
}

/// Generate a human-traceable unique identifier: `img_{unix_ms}_{uuid}`
pub fn generate_public_id() -> String {
    format!(
        "img_{}_{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

/// Join the default directives with caller extras, defaults first
fn merge_transformations(extra: &[String]) -> String {
    let mut directives: Vec<&str> = DEFAULT_DIRECTIVES.to_vec();
    directives.extend(extra.iter().map(String::as_str));
    directives.join(",")
}

/// Caller tags (or the crop defaults) with "cropped" appended once
fn crop_tags(caller: Option<Vec<String>>) -> Vec<String> {
    let mut tags =
        caller.unwrap_or_else(|| CROP_DEFAULT_TAGS.iter().map(|t| t.to_string()).collect());
    if !tags.iter().any(|t| t == "cropped") {
        tags.push("cropped".to_string());
    }
    tags
}
