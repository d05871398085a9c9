//! Bounding box arithmetic for region crops
//!
//! A caller-supplied [`BoundingBox`] is grown by a fixed margin on each side
//! and clamped so the result always stays inside the image bounds.

use serde::{Deserialize, Serialize};

/// Margin added to each side of a crop box when none is specified
pub const DEFAULT_PADDING: u32 = 10;

/// Clamp bound used only when the image dimensions cannot be determined
pub const FALLBACK_BOUND: u32 = 2048;

/// Pixel-unit rectangle selecting a region of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A bounding box grown by padding and clamped to image bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddedBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Grow `bbox` by `padding` on every side and clamp to `bounds`
///
/// `x`/`y` floor at zero; `width`/`height` are capped so the box never
/// extends past the bounds. When `bounds` is `None` the image dimensions
/// are unknown and [`FALLBACK_BOUND`] caps both axes.
pub fn pad_and_clamp(bbox: BoundingBox, padding: u32, bounds: Option<(u32, u32)>) -> PaddedBox {
    let (bound_w, bound_h) = bounds.unwrap_or((FALLBACK_BOUND, FALLBACK_BOUND));

    let x = bbox.x.saturating_sub(padding).min(bound_w);
    let y = bbox.y.saturating_sub(padding).min(bound_h);

    let width = bbox
        .width
        .saturating_add(padding.saturating_mul(2))
        .min(bound_w - x);
    let height = bbox
        .height
        .saturating_add(padding.saturating_mul(2))
        .min(bound_h - y);

    PaddedBox {
        x,
        y,
        width,
        height,
    }
}
