//! Crate-wide error type
//!
//! Every fallible operation returns `Result<T, MediaError>` so callers never
//! have to guess, per function, whether to catch or check a flag. Variants
//! are grouped by failure class: local processing, remote API, signing.

use thiserror::Error;

/// Errors produced by storage calls and local image processing
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    /// Invalid or incomplete service configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Image bytes could not be decoded
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// A local transform (resize, crop, region extraction) failed
    #[error("image processing failed: {0}")]
    Process(String),

    /// Re-encoding to the target format failed
    #[error("failed to encode to {format}: {message}")]
    Encode { format: String, message: String },

    /// Transport-level failure talking to the storage service
    #[error("request to storage service failed: {0}")]
    Http(String),

    /// The storage service answered with a non-success status
    #[error("storage service error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The requested object does not exist at the storage service
    #[error("resource not found: {public_id}")]
    NotFound { public_id: String },

    /// Destroy call completed but the service reported a non-ok outcome
    #[error("delete rejected by storage service: {outcome}")]
    DeleteRejected { outcome: String },

    /// Signed URL construction failed
    #[error("url signing failed: {0}")]
    Signing(String),
}

impl MediaError {
    pub fn decode(message: impl Into<String>) -> Self {
        MediaError::Decode(message.into())
    }

    pub fn process(message: impl Into<String>) -> Self {
        MediaError::Process(message.into())
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        MediaError::Encode {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>) -> Self {
        MediaError::Http(message.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        MediaError::Api {
            status,
            message: message.into(),
        }
    }

    /// True for errors the caller can fix by changing the request rather
    /// than retrying (bad input, missing object, rejected delete).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MediaError::Config(_)
                | MediaError::Decode(_)
                | MediaError::NotFound { .. }
                | MediaError::DeleteRejected { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MediaError>;
