//! MediaClient behavior against a mocked storage backend
//!
//! These tests exercise parameter assembly and response shaping without a
//! network: the `StorageBackend` trait is mocked with mockall.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use mockall::mock;
use mockall::predicate::eq;

use mediavault::api::{
    DestroyResponse, ResourceResponse, StorageBackend, UploadRequest, UploadResponse,
    UsageCounters, UsageResponse,
};
use mediavault::{
    BoundingBox, CropParams, MediaClient, MediaError, ServiceConfig, SignedUrlParams, UploadParams,
};

mock! {
    Backend {}

    #[async_trait]
    impl StorageBackend for Backend {
        async fn upload(&self, request: UploadRequest) -> Result<UploadResponse, MediaError>;
        async fn resource(&self, public_id: &str) -> Result<ResourceResponse, MediaError>;
        async fn destroy(&self, public_id: &str) -> Result<DestroyResponse, MediaError>;
        async fn usage(&self) -> Result<UsageResponse, MediaError>;
    }
}

fn test_config() -> ServiceConfig {
    ServiceConfig::new("demo", "key123", "secret456")
}

fn client_with(backend: MockBackend) -> MediaClient {
    MediaClient::with_backend(test_config(), Arc::new(backend)).unwrap()
}

fn canned_upload_response(public_id: &str, bytes: u64) -> UploadResponse {
    UploadResponse {
        public_id: public_id.to_string(),
        secure_url: format!("https://cdn.mediavault.io/demo/image/{}", public_id),
        width: 64,
        height: 64,
        format: "png".to_string(),
        bytes,
        created_at: Utc::now(),
    }
}

fn test_png(width: u32, height: u32) -> Bytes {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    Bytes::from(buffer.into_inner())
}

#[tokio::test]
async fn upload_applies_defaults_and_maps_response() {
    let mut backend = MockBackend::new();
    backend
        .expect_upload()
        .withf(|req: &UploadRequest| {
            req.folder == "x"
                && req.tags == vec!["a".to_string()]
                && req.transformation == "quality=auto,fetch_format=auto"
                && req.public_id.starts_with("img_")
                && req.format.is_none()
        })
        .times(1)
        .returning(|req| Ok(canned_upload_response(&req.public_id, req.data.len() as u64)));

    let client = client_with(backend);
    let data = Bytes::from_static(b"not really pixels but the backend is mocked");
    let size = data.len() as u64;

    let result = client
        .upload(
            data,
            UploadParams {
                folder: Some("x".to_string()),
                tags: vec!["a".to_string()],
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(result.url.starts_with("https://"));
    assert_eq!(result.byte_size, size);
    assert!(result.public_id.starts_with("img_"));
}

#[tokio::test]
async fn upload_without_folder_uses_uploads_default() {
    let mut backend = MockBackend::new();
    backend
        .expect_upload()
        .withf(|req: &UploadRequest| req.folder == "uploads")
        .times(1)
        .returning(|req| Ok(canned_upload_response(&req.public_id, 1)));

    let client = client_with(backend);
    client
        .upload(Bytes::from_static(b"bytes"), UploadParams::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn upload_keeps_caller_directives_after_defaults() {
    let mut backend = MockBackend::new();
    backend
        .expect_upload()
        .withf(|req: &UploadRequest| {
            req.transformation == "quality=auto,fetch_format=auto,w=100,crop=fill"
        })
        .times(1)
        .returning(|req| Ok(canned_upload_response(&req.public_id, 1)));

    let client = client_with(backend);
    client
        .upload(
            Bytes::from_static(b"bytes"),
            UploadParams {
                transformations: vec!["w=100".to_string(), "crop=fill".to_string()],
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn upload_respects_caller_public_id() {
    let mut backend = MockBackend::new();
    backend
        .expect_upload()
        .withf(|req: &UploadRequest| req.public_id == "my-id")
        .times(1)
        .returning(|req| Ok(canned_upload_response(&req.public_id, 1)));

    let client = client_with(backend);
    let result = client
        .upload(
            Bytes::from_static(b"bytes"),
            UploadParams {
                public_id: Some("my-id".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(result.public_id, "my-id");
}

#[tokio::test]
async fn upload_surfaces_backend_errors() {
    let mut backend = MockBackend::new();
    backend
        .expect_upload()
        .returning(|_| Err(MediaError::http("connection refused")));

    let client = client_with(backend);
    let result = client
        .upload(Bytes::from_static(b"bytes"), UploadParams::default())
        .await;

    assert!(matches!(result, Err(MediaError::Http(_))));
}

#[tokio::test]
async fn crop_clamps_box_and_uploads_png_with_cropped_tag() {
    let mut backend = MockBackend::new();
    backend
        .expect_upload()
        .withf(|req: &UploadRequest| {
            req.folder == "crops"
                && req.format.as_deref() == Some("png")
                && req.tags == vec!["crop", "evidence", "cropped"]
                && req.transformation == "quality=auto,fetch_format=auto,quality=90"
                // Extracted region is re-encoded as PNG locally
                && req.data.starts_with(&[0x89, 0x50, 0x4E, 0x47])
        })
        .times(1)
        .returning(|req| Ok(canned_upload_response(&req.public_id, req.data.len() as u64)));

    let client = client_with(backend);
    let result = client
        .upload_crop(
            test_png(64, 64),
            BoundingBox::new(5, 5, 100, 100),
            CropParams::default(),
        )
        .await
        .unwrap();

    assert_eq!(result.requested, BoundingBox::new(5, 5, 100, 100));
    // Padded 10px each side, then clamped to the decoded 64x64 bounds
    assert_eq!(result.padded.x, 0);
    assert_eq!(result.padded.y, 0);
    assert_eq!(result.padded.width, 64);
    assert_eq!(result.padded.height, 64);
}

#[tokio::test]
async fn crop_unions_caller_tags_with_cropped() {
    let mut backend = MockBackend::new();
    backend
        .expect_upload()
        .withf(|req: &UploadRequest| req.tags == vec!["case-42", "cropped"])
        .times(1)
        .returning(|req| Ok(canned_upload_response(&req.public_id, 1)));

    let client = client_with(backend);
    client
        .upload_crop(
            test_png(64, 64),
            BoundingBox::new(10, 10, 20, 20),
            CropParams {
                tags: Some(vec!["case-42".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn crop_with_empty_tag_list_still_tags_cropped() {
    let mut backend = MockBackend::new();
    backend
        .expect_upload()
        .withf(|req: &UploadRequest| req.tags == vec!["cropped"])
        .times(1)
        .returning(|req| Ok(canned_upload_response(&req.public_id, 1)));

    let client = client_with(backend);
    client
        .upload_crop(
            test_png(64, 64),
            BoundingBox::new(10, 10, 20, 20),
            CropParams {
                tags: Some(Vec::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn crop_fails_on_undecodable_bytes_without_calling_backend() {
    let mut backend = MockBackend::new();
    backend.expect_upload().times(0);

    let client = client_with(backend);
    let result = client
        .upload_crop(
            Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
            BoundingBox::new(0, 0, 10, 10),
            CropParams::default(),
        )
        .await;

    assert!(matches!(result, Err(MediaError::Decode(_))));
}

#[tokio::test]
async fn delete_succeeds_on_ok_outcome() {
    let mut backend = MockBackend::new();
    backend
        .expect_destroy()
        .with(eq("uploads/img_1"))
        .times(1)
        .returning(|_| {
            Ok(DestroyResponse {
                result: "ok".to_string(),
            })
        });

    let client = client_with(backend);
    let outcome = client.delete("uploads/img_1").await.unwrap();
    assert_eq!(outcome.public_id, "uploads/img_1");
}

#[tokio::test]
async fn delete_of_missing_object_is_rejected_not_thrown() {
    let mut backend = MockBackend::new();
    backend.expect_destroy().times(1).returning(|_| {
        Ok(DestroyResponse {
            result: "not found".to_string(),
        })
    });

    let client = client_with(backend);
    let result = client.delete("uploads/gone").await;

    match result {
        Err(MediaError::DeleteRejected { outcome }) => assert_eq!(outcome, "not found"),
        other => panic!("expected DeleteRejected, got {:?}", other),
    }
}

#[tokio::test]
async fn resource_reshapes_metadata() {
    let mut backend = MockBackend::new();
    backend
        .expect_resource()
        .with(eq("uploads/img_1"))
        .times(1)
        .returning(|_| {
            Ok(ResourceResponse {
                public_id: "uploads/img_1".to_string(),
                secure_url: "https://cdn.mediavault.io/demo/image/uploads/img_1".to_string(),
                width: 800,
                height: 600,
                format: "webp".to_string(),
                bytes: 4321,
                created_at: Utc::now(),
                tags: vec!["a".to_string()],
            })
        });

    let client = client_with(backend);
    let info = client.resource("uploads/img_1").await.unwrap();

    assert_eq!(info.public_id, "uploads/img_1");
    assert_eq!(info.byte_size, 4321);
    assert_eq!(info.tags, vec!["a"]);
}

#[tokio::test]
async fn resource_not_found_passes_through() {
    let mut backend = MockBackend::new();
    backend.expect_resource().returning(|id| {
        Err(MediaError::NotFound {
            public_id: id.to_string(),
        })
    });

    let client = client_with(backend);
    let result = client.resource("uploads/missing").await;

    assert!(matches!(result, Err(MediaError::NotFound { .. })));
}

#[tokio::test]
async fn usage_derives_remaining_per_category() {
    let mut backend = MockBackend::new();
    backend.expect_usage().times(1).returning(|| {
        Ok(UsageResponse {
            plan: "advanced".to_string(),
            credits: UsageCounters {
                used: 10,
                limit: 100,
            },
            objects: UsageCounters {
                used: 500,
                limit: 10_000,
            },
            bandwidth: UsageCounters {
                used: 1_024,
                limit: 4_096,
            },
        })
    });

    let client = client_with(backend);
    let stats = client.usage().await.unwrap();

    assert_eq!(stats.plan, "advanced");
    assert_eq!(stats.credits.remaining(), stats.credits.limit - stats.credits.used);
    assert_eq!(stats.objects.remaining(), 9_500);
    assert_eq!(stats.bandwidth.remaining(), 3_072);
}

#[tokio::test]
async fn signed_url_needs_no_backend_call() {
    // A mock with zero expectations panics on any call
    let client = client_with(MockBackend::new());

    let url = client
        .signed_url("uploads/img_1", &SignedUrlParams::default())
        .unwrap();

    assert!(url.starts_with("https://cdn.mediavault.io/demo/image/uploads/img_1?exp="));
    assert!(url.contains("&sig="));
}
