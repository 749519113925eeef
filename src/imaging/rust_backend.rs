//! Pure Rust decode path + libwebp encode path.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → WebP | `webp::Encoder` (libwebp) |
//!
//! The `image` crate's own WebP encoder is lossless-only, so lossy
//! quality-controlled output goes through libwebp via the `webp` crate.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{EncodeParams, ResizeParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};

/// Production backend. See the [module docs](self) for the crate mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| BackendError::Decode(format!("{}: {}", path.display(), e)))
}

/// Normalize to a layout the WebP encoder accepts: 8-bit RGBA when the source
/// carries an alpha channel, 8-bit RGB otherwise. Must run before resize or
/// encode; libwebp rejects everything else.
fn normalize_color(img: DynamicImage) -> DynamicImage {
    if img.color().has_alpha() {
        DynamicImage::ImageRgba8(img.into_rgba8())
    } else {
        DynamicImage::ImageRgb8(img.into_rgb8())
    }
}

/// Encode as lossy WebP and write via a temp-file + rename so an interrupted
/// encode never leaves a truncated output under the final name.
fn save_webp(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    // from_image only accepts Rgb8/Rgba8, which normalize_color guarantees
    let encoder = webp::Encoder::from_image(img)
        .map_err(|e| BackendError::Encode(format!("{}: {}", path.display(), e)))?;
    let encoded = encoder.encode(quality as f32);
    write_atomic(path, &encoded)
}

/// Write to a `.tmp` sibling, then rename onto the final path.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), BackendError> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);
    std::fs::write(&tmp, bytes).map_err(BackendError::Io)?;
    std::fs::rename(&tmp, path).map_err(BackendError::Io)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path)
            .map_err(|e| BackendError::Decode(format!("{}: {}", path.display(), e)))?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = normalize_color(load_image(&params.source)?);
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_webp(&resized, &params.output, params.quality.value())
    }

    fn encode(&self, params: &EncodeParams) -> Result<(), BackendError> {
        let img = normalize_color(load_image(&params.source)?);
        save_webp(&img, &params.output, params.quality.value())
    }
}
