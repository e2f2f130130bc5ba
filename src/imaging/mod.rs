//! Image processing: the single-image transform.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader`, EXIF orientation applied |
//! | **Resize** | Lanczos3, height derived from width |
//! | **Encode** | JPEG (`image`), PNG (`png`), WebP (`webp`), all at 72 dpi where the format allows |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`resize_image`], output naming + backend call

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, ResizeReport};
pub use calculations::{scaled_height, target_dimensions};
pub use operations::{ResizedImage, resize_image};
pub use params::{OutputFormat, Quality, ResizeParams, UnknownFormat};
pub use rust_backend::{OUTPUT_DPI, RustBackend, supported_input_extensions};
