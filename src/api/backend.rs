//! Remote storage backend
//!
//! [`StorageBackend`] is the seam between result-shaping logic and the
//! wire: the production [`HttpBackend`] talks to the hosted service over
//! reqwest, while tests substitute mocks.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{DestroyResponse, ResourceResponse, UploadResponse, UsageResponse};
use crate::config::ServiceConfig;
use crate::error::{MediaError, Result};

/// Fully assembled upload call, ready for the wire
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data: Bytes,
    pub public_id: String,
    pub folder: String,
    pub tags: Vec<String>,
    /// Comma-joined transformation directives, defaults first
    pub transformation: String,
    /// Forced output format, if any (e.g. "png" for crops)
    pub format: Option<String>,
}

/// The remote service's public contract, one method per endpoint
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Stream bytes and parameters to the upload endpoint
    async fn upload(&self, request: UploadRequest) -> Result<UploadResponse>;

    /// Read object metadata from the resource-info endpoint
    async fn resource(&self, public_id: &str) -> Result<ResourceResponse>;

    /// Ask the service to destroy an object
    async fn destroy(&self, public_id: &str) -> Result<DestroyResponse>;

    /// Read account usage counters
    async fn usage(&self) -> Result<UsageResponse>;
}

/// Production backend speaking HTTPS to the hosted service
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpBackend {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/v1/{}/{}",
            self.config.api_root(),
            self.config.cloud_name,
            path
        )
    }

    /// Map a response to a typed body, folding HTTP statuses into error kinds
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        public_id: Option<&str>,
    ) -> Result<T> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(MediaError::NotFound {
                public_id: public_id.unwrap_or("<unknown>").to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::api(status.as_u16(), message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MediaError::http(format!("invalid response body: {}", e)))
    }
}

#[async_trait]
impl StorageBackend for HttpBackend {
    async fn upload(&self, request: UploadRequest) -> Result<UploadResponse> {
        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(request.data.to_vec()).file_name("file"),
            )
            .text("public_id", request.public_id)
            .text("folder", request.folder)
            .text("transformation", request.transformation);

        if !request.tags.is_empty() {
            form = form.text("tags", request.tags.join(","));
        }
        if let Some(format) = request.format {
            form = form.text("format", format);
        }

        let response = self
            .client
            .post(self.endpoint("image/upload"))
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::http(e.to_string()))?;

        Self::read_json(response, None).await
    }

    async fn resource(&self, public_id: &str) -> Result<ResourceResponse> {
        let response = self
            .client
            .get(self.endpoint(&format!("resources/image/{}", public_id)))
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await
            .map_err(|e| MediaError::http(e.to_string()))?;

        Self::read_json(response, Some(public_id)).await
    }

    async fn destroy(&self, public_id: &str) -> Result<DestroyResponse> {
        let response = self
            .client
            .post(self.endpoint("image/destroy"))
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(&json!({ "public_id": public_id }))
            .send()
            .await
            .map_err(|e| MediaError::http(e.to_string()))?;

        Self::read_json(response, Some(public_id)).await
    }

    async fn usage(&self) -> Result<UsageResponse> {
        let response = self
            .client
            .get(self.endpoint("usage"))
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await
            .map_err(|e| MediaError::http(e.to_string()))?;

        Self::read_json(response, None).await
    }
}
