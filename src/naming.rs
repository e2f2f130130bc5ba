//! Output naming: the timestamped batch directory and per-file extensions.
//!
//! ## Directory
//!
//! Every run writes into a fresh sibling directory named after the local
//! wall-clock time at second resolution:
//!
//! ```text
//! resized_images_20261018_142530/
//! ```
//!
//! Two runs within the same second share a directory.
//!
//! ## Files
//!
//! Output files keep the source file name with only the last extension
//! swapped for the output format's:
//! - `IMG_0042.JPG` → `IMG_0042.jpg`
//! - `logo.png` (→ webp) → `logo.webp`
//! - `archive.tar.gif` → `archive.tar.jpg`

use crate::imaging::OutputFormat;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Prefix of every batch output directory.
pub const OUTPUT_DIR_PREFIX: &str = "resized_images";

/// Name of the output directory for a run started at `started`.
pub fn output_dir_name(started: NaiveDateTime) -> String {
    format!("{}_{}", OUTPUT_DIR_PREFIX, started.format("%Y%m%d_%H%M%S"))
}

/// `path` with its last extension (if any) replaced by `format`'s.
pub fn with_format_extension(path: &Path, format: OutputFormat) -> PathBuf {
    path.with_extension(format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn dir_name_is_zero_padded() {
        assert_eq!(
            output_dir_name(at(2026, 1, 2, 3, 4, 5)),
            "resized_images_20260102_030405"
        );
    }

    #[test]
    fn dir_name_afternoon_is_24h() {
        assert_eq!(
            output_dir_name(at(2026, 10, 18, 14, 25, 30)),
            "resized_images_20261018_142530"
        );
    }

    #[test]
    fn dir_name_ignores_subseconds() {
        let t = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_milli_opt(9, 0, 0, 999)
            .unwrap();
        assert_eq!(output_dir_name(t), "resized_images_20261018_090000");
    }

    #[test]
    fn uppercase_extension_replaced() {
        assert_eq!(
            with_format_extension(Path::new("out/IMG_0042.JPG"), OutputFormat::Jpg),
            PathBuf::from("out/IMG_0042.jpg")
        );
    }

    #[test]
    fn only_last_extension_replaced() {
        assert_eq!(
            with_format_extension(Path::new("out/archive.tar.gif"), OutputFormat::Png),
            PathBuf::from("out/archive.tar.png")
        );
    }

    #[test]
    fn dotfile_gets_extension_appended() {
        assert_eq!(
            with_format_extension(Path::new("out/.hidden"), OutputFormat::Webp),
            PathBuf::from("out/.hidden.webp")
        );
    }

    #[test]
    fn no_extension_gets_one() {
        assert_eq!(
            with_format_extension(Path::new("out/scan"), OutputFormat::Jpeg),
            PathBuf::from("out/scan.jpeg")
        );
    }
}
