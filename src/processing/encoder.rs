//! Re-encoding of decoded images to delivery formats
//!
//! PNG and JPEG go through the `image` crate codecs; lossy WebP uses the
//! `webp` crate because the `image` crate only encodes lossless WebP.

use std::io::Cursor;

use image::DynamicImage;

use crate::error::{MediaError, Result};

/// Target encoding for processed images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
}

impl OutputFormat {
    /// Content-Type header value for the format
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// File extension / remote format directive
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::WebP => "webp",
        }
    }
}

/// Encode `img` to `format` at the given quality (1-100)
///
/// Quality is clamped to 1-100. PNG is lossless and ignores it.
pub fn encode(img: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    let quality = quality.clamp(1, 100);

    match format {
        OutputFormat::Png => encode_png(img),
        OutputFormat::Jpeg => encode_jpeg(img, quality),
        OutputFormat::WebP => encode_webp(img, quality),
    }
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    use image::codecs::png::PngEncoder;
    use image::ImageEncoder as _;

    let rgba = img.to_rgba8();
    let mut output = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut output);

    encoder
        .write_image(&rgba, img.width(), img.height(), image::ColorType::Rgba8)
        .map_err(|e| MediaError::encode_failed("png", e.to_string()))?;

    Ok(output.into_inner())
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    use image::codecs::jpeg::JpegEncoder;
    use image::ImageEncoder as _;

    // JPEG has no alpha channel
    let rgb = img.to_rgb8();
    let mut output = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut output, quality);

    encoder
        .write_image(&rgb, img.width(), img.height(), image::ColorType::Rgb8)
        .map_err(|e| MediaError::encode_failed("jpeg", e.to_string()))?;

    Ok(output.into_inner())
}

fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(&rgba, img.width(), img.height());
    let encoded = encoder.encode(quality as f32);

    Ok(encoded.to_vec())
}
