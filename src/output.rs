//! CLI output formatting.
//!
//! Everything the user sees on stdout is built here. Each piece has a
//! `format_*` function (returns `Vec<String>`) for testability and, where the
//! CLI prints it directly, a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ```text
//! Processing 3 images...
//! Output format: JPG
//! Processed: IMG_0042.JPG (4032x3024 → 1200x900)
//! Error processing broken.png: Failed to decode images/broken.png: ...
//! Processed: logo.png (512x512)
//!
//! Done! Resized images saved in 'resized_images_20261018_142530' folder.
//! 2 processed, 1 failed
//! ```
//!
//! Diagnostics (timings, overwrite warnings) go through `tracing` to stderr
//! and are not formatted here.

use crate::config::ConfigError;
use crate::process::{BatchResult, ProcessEvent};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// `WxH`.
fn format_dims((w, h): (u32, u32)) -> String {
    format!("{}x{}", w, h)
}

/// Show a path the way the user typed it, without a leading `./`.
fn display_path(path: &Path) -> String {
    path.strip_prefix(".")
        .unwrap_or(path)
        .display()
        .to_string()
}

// ============================================================================
// Invocation problems
// ============================================================================

/// Usage text for an unrecognized argument count.
pub fn format_usage() -> Vec<String> {
    vec![
        "Usage:".to_string(),
        "rp-resize                    # Process images with 95% quality".to_string(),
        "rp-resize 90 1200            # Process images with 90% quality and 1200px width"
            .to_string(),
        "rp-resize 90 1200 webp       # Same as above but convert to WebP format".to_string(),
    ]
}

pub fn print_usage() {
    for line in format_usage() {
        println!("{}", line);
    }
}

/// A rejected argument or config file.
pub fn format_config_error(error: &ConfigError) -> String {
    format!("Error: {}", error)
}

/// The input directory does not exist.
pub fn format_missing_source(source: &Path) -> String {
    format!(
        "Error: '{}' folder not found. Please create it and add images.",
        display_path(source)
    )
}

/// The input directory exists but holds nothing to process.
pub fn format_no_images(source: &Path) -> String {
    format!("No images found in '{}' folder.", display_path(source))
}

// ============================================================================
// Batch progress
// ============================================================================

/// Format a single batch progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started { total, format, .. } => vec![
            format!("Processing {} images...", total),
            format!("Output format: {}", format.extension().to_uppercase()),
        ],
        ProcessEvent::Processed {
            filename, from, to, ..
        } => {
            let dims = if from == to {
                format_dims(*from)
            } else {
                format!("{} → {}", format_dims(*from), format_dims(*to))
            };
            vec![format!("Processed: {} ({})", filename, dims)]
        }
        ProcessEvent::Failed { filename, error } => {
            vec![format!("Error processing {}: {}", filename, error)]
        }
    }
}

/// Final summary after every file has been attempted.
pub fn format_summary(result: &BatchResult) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "Done! Resized images saved in '{}' folder.",
            display_path(&result.output_dir)
        ),
    ];
    if result.failed() == 0 {
        lines.push(format!("{} processed", result.succeeded()));
    } else {
        lines.push(format!(
            "{} processed, {} failed",
            result.succeeded(),
            result.failed()
        ));
    }
    lines
}

pub fn print_summary(result: &BatchResult) {
    for line in format_summary(result) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
