//! # rp-resize
//!
//! Batch-resizes every image in a folder, optionally converting format and
//! adjusting quality, and writes the results at 72 DPI into a fresh
//! timestamped directory.
//!
//! # Pipeline
//!
//! ```text
//! 1. Settings   args + config.toml  →  ResizeSettings   (validated up front)
//! 2. Scan       images/             →  [SourceImage]     (filtered, sorted)
//! 3. Process    each image          →  resized_images_YYYYMMDD_HHMMSS/
//! ```
//!
//! Every file is attempted exactly once. A file that fails to decode or
//! encode is reported and skipped; it never stops the rest of the batch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Stock defaults, `config.toml`, positional-argument dispatch and validation |
//! | [`scan`] | Lists recognized images in the input directory |
//! | [`naming`] | Timestamped output directory name, output extension replacement |
//! | [`imaging`] | The single-image transform: decode, orient, resize, encode |
//! | [`process`] | Batch driver with per-file failure isolation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Decoding
//!
//! Decoding and resampling use the `image` crate (Lanczos3). JPEG is encoded
//! by `image` as well; PNG goes through `png` directly because `image` does
//! not expose the `pHYs` chunk, and WebP through `webp` because `image` only
//! encodes lossless WebP.
//!
//! ## Orientation Before Width
//!
//! EXIF orientation is applied right after decoding, so the requested width
//! is the width the photo is viewed at. Since the pixels are then upright,
//! no EXIF is written to outputs.
//!
//! ## Deterministic Order
//!
//! Input files are processed in file-name order rather than whatever order
//! the filesystem lists them in, so progress output and overwrite behavior
//! are the same on every machine.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
