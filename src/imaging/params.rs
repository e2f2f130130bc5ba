//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides where an output goes) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 95). Clamped on construction.
//! - [`OutputFormat`]: The four encodable targets: `jpg`, `jpeg`, `png`, `webp`.
//! - [`ResizeParams`]: Everything one transform needs: source, output path,
//!   optional target width, quality, format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Quality setting for lossy image encoding (1-100).
///
/// Range checking with a user-facing message happens at the CLI/config
/// boundary; by the time a value gets here it is only clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Quality as the `u8` most encoders take. Never truncates, the value is at most 100.
    pub fn as_u8(self) -> u8 {
        self.0 as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// Output encoding. `Jpg` and `Jpeg` encode identically and differ only in the
/// file extension they produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpg,
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [Self::Jpg, Self::Jpeg, Self::Png, Self::Webp];

    /// File extension written for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    pub fn is_jpeg_family(self) -> bool {
        matches!(self, Self::Jpg | Self::Jpeg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Returned when a format string is not one of [`OutputFormat::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| s.eq_ignore_ascii_case(f.extension()))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Parameters for a single resize-and-encode operation.
///
/// `output` is the final path, extension already matching `format`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Target width; `None` keeps the decoded dimensions.
    pub width: Option<u32>,
    pub quality: Quality,
    pub format: OutputFormat,
}
