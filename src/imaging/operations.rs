//! High-level image operations.
//!
//! These functions combine naming and calculations with backend execution.
//! They take settings, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend, ResizeReport};
use super::params::{OutputFormat, Quality, ResizeParams};
use crate::naming::with_format_extension;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// A written output file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizedImage {
    /// Final path, extension replaced by the output format's.
    pub path: PathBuf,
    pub report: ResizeReport,
}

/// Resize one image and write it next to `output` with the format's extension.
///
/// `output` may carry any extension (typically the source file's); it is
/// replaced, so `out/photo.PNG` with [`OutputFormat::Jpg`] writes `out/photo.jpg`.
/// Each call is a single attempt; errors are returned, never retried.
pub fn resize_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    quality: Quality,
    width: Option<u32>,
    format: OutputFormat,
) -> Result<ResizedImage> {
    let path = with_format_extension(output, format);
    let report = backend.resize(&ResizeParams {
        source: source.to_path_buf(),
        output: path.clone(),
        width,
        quality,
        format,
    })?;
    Ok(ResizedImage { path, report })
}
