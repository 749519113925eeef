//! Image processing: decode, dimension math, WebP encode.
//!
//! The module is split into:
//! - **Calculations**: pure functions for dimension math (unit testable)
//! - **Parameters**: data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::variant_dimensions;
pub use params::{EncodeParams, Quality, ResizeParams};
pub use rust_backend::RustBackend;
