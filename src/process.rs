//! Batch driver.
//!
//! Runs the single-image transform over every image in the input directory.
//!
//! ## Flow
//!
//! ```text
//! images/ missing?          → ScanError::SourceNotFound, nothing created
//! no matching files?        → Ok(None), nothing created
//! create resized_images_YYYYMMDD_HHMMSS/
//! for each file (sorted)    → resize_image, record outcome, keep going
//! ```
//!
//! ## Failure Isolation
//!
//! A file that fails to decode or encode is recorded in the [`BatchResult`]
//! and reported through the event callback; the remaining files still run.
//! Only failures outside any single file (e.g. the output directory cannot
//! be created) abort the batch.
//!
//! ## Progress
//!
//! Progress is reported as [`ProcessEvent`]s handed to a caller-supplied
//! callback, keeping this module free of printing. The CLI formats them with
//! [`crate::output::format_process_event`].
//!
//! Processing is sequential: each image is decoded, resampled and written,
//! and its buffers dropped, before the next one is opened.

use crate::config::ResizeSettings;
use crate::imaging::{ImageBackend, OutputFormat, RustBackend, resize_image};
use crate::naming::output_dir_name;
use crate::scan::{self, ScanError, SourceImage};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Progress events emitted while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// The batch is about to start; the output directory exists.
    Started {
        total: usize,
        format: OutputFormat,
        output_dir: PathBuf,
    },
    /// One file was written.
    Processed {
        filename: String,
        output: PathBuf,
        from: (u32, u32),
        to: (u32, u32),
    },
    /// One file failed; the batch continues.
    Failed { filename: String, error: String },
}

/// Outcome for one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub filename: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything a batch did, in processing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub output_dir: PathBuf,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Process every image in `source` into a new timestamped directory under `dest_root`.
///
/// Returns `Ok(None)` when `source` holds no recognized images, in which case
/// no output directory is created.
pub fn process_all(
    source: &Path,
    dest_root: &Path,
    settings: &ResizeSettings,
    started: NaiveDateTime,
    on_event: impl FnMut(ProcessEvent),
) -> Result<Option<BatchResult>, ProcessError> {
    let backend = RustBackend::new();
    process_all_with_backend(&backend, source, dest_root, settings, started, on_event)
}

/// [`process_all`] with a specific backend (allows testing with mock).
pub fn process_all_with_backend(
    backend: &impl ImageBackend,
    source: &Path,
    dest_root: &Path,
    settings: &ResizeSettings,
    started: NaiveDateTime,
    mut on_event: impl FnMut(ProcessEvent),
) -> Result<Option<BatchResult>, ProcessError> {
    let images = scan::scan(source)?;
    if images.is_empty() {
        return Ok(None);
    }

    let output_dir = dest_root.join(output_dir_name(started));
    std::fs::create_dir_all(&output_dir)?;

    on_event(ProcessEvent::Started {
        total: images.len(),
        format: settings.format,
        output_dir: output_dir.clone(),
    });

    let result = process_batch(backend, &images, &output_dir, settings, on_event);
    Ok(Some(result))
}

/// Run the transform over `images` into an existing `output_dir`.
///
/// Never fails as a whole: every per-file error lands in the result.
pub fn process_batch(
    backend: &impl ImageBackend,
    images: &[SourceImage],
    output_dir: &Path,
    settings: &ResizeSettings,
    mut on_event: impl FnMut(ProcessEvent),
) -> BatchResult {
    let mut outcomes = Vec::with_capacity(images.len());
    let mut written: HashSet<PathBuf> = HashSet::new();

    for image in images {
        let result = resize_image(
            backend,
            &image.path,
            &output_dir.join(&image.filename),
            settings.quality,
            settings.width,
            settings.format,
        );

        match result {
            Ok(resized) => {
                if !written.insert(resized.path.clone()) {
                    warn!(
                        file = %image.filename,
                        output = %resized.path.display(),
                        "output overwrote an earlier file from this batch"
                    );
                }
                debug!(file = %image.filename, "processed");
                on_event(ProcessEvent::Processed {
                    filename: image.filename.clone(),
                    output: resized.path.clone(),
                    from: resized.report.source.as_tuple(),
                    to: resized.report.output.as_tuple(),
                });
                outcomes.push(FileOutcome {
                    filename: image.filename.clone(),
                    success: true,
                    output: Some(resized.path),
                    error: None,
                });
            }
            Err(e) => {
                debug!(file = %image.filename, error = %e, "failed");
                on_event(ProcessEvent::Failed {
                    filename: image.filename.clone(),
                    error: e.to_string(),
                });
                outcomes.push(FileOutcome {
                    filename: image.filename.clone(),
                    success: false,
                    output: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    BatchResult {
        output_dir: output_dir.to_path_buf(),
        outcomes,
    }
}
