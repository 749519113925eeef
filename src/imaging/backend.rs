//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, resize, and encode.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use the recording
//! [`MockBackend`](tests::MockBackend) so pipeline logic can be exercised
//! without decoding a single pixel.

use super::params::{EncodeParams, ResizeParams};
use std::path::Path;
use thiserror::Error;

/// Errors split along the batch-containment boundary the pipeline cares
/// about: a `Decode` failure abandons the rest of the file, an `Encode` or
/// `Io` failure only loses the one variant.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Every backend must implement all three operations so the pipeline modules
/// stay backend-agnostic.
pub trait ImageBackend {
    /// Get image dimensions without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode, scale to exactly the given dimensions, encode to WebP.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Decode and re-encode to WebP at the source's own dimensions.
    fn encode(&self, params: &EncodeParams) -> Result<(), BackendError>;
}
