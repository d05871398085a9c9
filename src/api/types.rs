//! Wire shapes and public result records
//!
//! The `*Response` structs mirror the storage service's JSON bodies; the
//! remaining types are the records handed back to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::processing::{BoundingBox, PaddedBox};

// === Wire shapes ===

/// Body returned by the upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub public_id: String,
    pub secure_url: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub bytes: u64,
    pub created_at: DateTime<Utc>,
}

/// Body returned by the resource-info endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceResponse {
    pub public_id: String,
    pub secure_url: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub bytes: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Body returned by the destroy endpoint
///
/// `result` is "ok" on success; anything else ("not found" included) means
/// the service rejected the delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestroyResponse {
    pub result: String,
}

/// Raw used/limit counters for one resource category
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UsageCounters {
    pub used: u64,
    pub limit: u64,
}

/// Body returned by the account-usage endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageResponse {
    pub plan: String,
    pub credits: UsageCounters,
    pub objects: UsageCounters,
    pub bandwidth: UsageCounters,
}

// === Public records ===

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    /// Key the object is stored under at the remote service
    pub public_id: String,
    /// HTTPS delivery URL
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub byte_size: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<UploadResponse> for UploadResult {
    fn from(resp: UploadResponse) -> Self {
        Self {
            public_id: resp.public_id,
            url: resp.secure_url,
            width: resp.width,
            height: resp.height,
            format: resp.format,
            byte_size: resp.bytes,
            uploaded_at: resp.created_at,
        }
    }
}

/// Upload result for a region crop, with both boxes that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropUploadResult {
    pub upload: UploadResult,
    /// Box as requested by the caller
    pub requested: BoundingBox,
    /// Box actually extracted after padding and clamping
    pub padded: PaddedBox,
}

/// Metadata for a stored object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub public_id: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub byte_size: u64,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl From<ResourceResponse> for ResourceInfo {
    fn from(resp: ResourceResponse) -> Self {
        Self {
            public_id: resp.public_id,
            url: resp.secure_url,
            width: resp.width,
            height: resp.height,
            format: resp.format,
            byte_size: resp.bytes,
            created_at: resp.created_at,
            tags: resp.tags,
        }
    }
}

/// Confirmation of a delete the service accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub public_id: String,
}

/// One account resource category with locally derived headroom
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UsageCategory {
    pub used: u64,
    pub limit: u64,
}

impl UsageCategory {
    /// Headroom left in this category, computed at read time
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }
}

impl From<UsageCounters> for UsageCategory {
    fn from(c: UsageCounters) -> Self {
        Self {
            used: c.used,
            limit: c.limit,
        }
    }
}

/// Account usage snapshot; always fetched fresh, never cached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageStats {
    pub plan: String,
    pub credits: UsageCategory,
    pub objects: UsageCategory,
    pub bandwidth: UsageCategory,
}

impl From<UsageResponse> for UsageStats {
    fn from(resp: UsageResponse) -> Self {
        Self {
            plan: resp.plan,
            credits: resp.credits.into(),
            objects: resp.objects.into(),
            bandwidth: resp.bandwidth.into(),
        }
    }
}
