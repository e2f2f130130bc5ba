//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the one seam between "which file goes where"
//! and "how pixels get decoded, resampled and encoded".
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): `image` for decoding and
//! resampling, `png`/`webp` for the encoders that need options `image` does not
//! expose.

use super::params::ResizeParams;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("Failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },
    #[error("Refusing to resize {path} to {width}x{height}: too large to fit in memory")]
    TooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

impl BackendError {
    pub fn decode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn encode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Encode {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// What a resize call did: dimensions before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeReport {
    pub source: Dimensions,
    pub output: Dimensions,
}

/// Trait for image processing backends.
///
/// `resize` owns the decoded image for the duration of the call; nothing
/// outlives it but the written file.
pub trait ImageBackend {
    /// Decode `params.source`, resample if a width is given, encode to
    /// `params.output`.
    fn resize(&self, params: &ResizeParams) -> Result<ResizeReport, BackendError>;
}
