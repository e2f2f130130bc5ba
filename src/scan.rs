//! Input directory scanning.
//!
//! Lists the top level of the input directory and keeps regular files whose
//! extension is one of [`supported_input_extensions`], compared
//! case-insensitively. Subdirectories are not descended into.
//!
//! ```text
//! images/
//! ├── config.toml     # ignored here, read by config::load_config
//! ├── IMG_0042.JPG    # ✓
//! ├── logo.png        # ✓
//! ├── anim.gif        # ✓ (first frame)
//! ├── notes.txt       # skipped
//! └── raw/            # skipped, not walked
//! ```
//!
//! Results are sorted by file name so a batch runs in the same order on
//! every filesystem.
//!
//! An entry that cannot be inspected (dangling symlink, no permission) is
//! still listed when its name looks like an image, so the batch reports it
//! as a failed file instead of refusing to run. Only a failure on the input
//! directory itself aborts the scan.

use crate::imaging::supported_input_extensions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Input directory not found: {0}")]
    SourceNotFound(PathBuf),
}

/// One input file picked up by the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    /// File name only, as shown to the user and reused for the output.
    pub filename: String,
}

/// Whether `path` has a recognized image extension.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// List the images directly inside `root`, sorted by file name.
///
/// Fails with [`ScanError::SourceNotFound`] if `root` is not a directory.
/// An empty result is not an error.
pub fn scan(root: &Path) -> Result<Vec<SourceImage>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::SourceNotFound(root.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                match e.path().filter(|p| is_image(p)).map(Path::to_path_buf) {
                    Some(path) => images.push(source_image(path)),
                    None => warn!(error = %e, "skipping unreadable entry"),
                }
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }
        images.push(source_image(entry.into_path()));
    }
    Ok(images)
}

fn source_image(path: PathBuf) -> SourceImage {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    SourceImage { path, filename }
}
