//! Resize settings: defaults, `config.toml`, and positional arguments.
//!
//! Settings come from three layers, later ones winning:
//!
//! ```text
//! stock defaults        quality = 95, no resize, jpg
//! images/config.toml    optional, lives in the input directory
//! positional args       rp-resize <quality> <width> [format]
//! ```
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! quality = 95      # 1-100, ignored for png
//! # width = 1200    # target width in px; omit to keep original size
//! format = "jpg"    # jpg | jpeg | png | webp
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Positional Arguments
//!
//! Dispatch is by argument count, not by flag name:
//!
//! | Args | Meaning |
//! |---|---|
//! | none | run with configured settings |
//! | `<quality> <width>` | override quality and width |
//! | `<quality> <width> <format>` | also override format |
//! | anything else | print usage |
//!
//! Validation happens here, before any file is touched, and produces
//! [`ConfigError`]s whose messages are shown to the user verbatim.

use crate::imaging::{OutputFormat, Quality};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Quality and width must be valid numbers")]
    InvalidNumber,
    #[error("Quality must be between 1 and 100")]
    QualityOutOfRange(i64),
    #[error("Width must be greater than 0")]
    WidthOutOfRange(i64),
    #[error("Width must be at most {max} (got {0})", max = u32::MAX)]
    WidthTooLarge(i64),
    #[error("Format must be jpg, jpeg, png, or webp")]
    UnsupportedFormat(String),
}

/// Contents of `config.toml`.
///
/// All fields have defaults; a file need only name the values it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Lossy encoding quality, 1-100.
    pub quality: u32,
    /// Target width in pixels. Absent means keep original dimensions.
    pub width: Option<u32>,
    /// Output encoding.
    pub format: OutputFormat,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            quality: 95,
            width: None,
            format: OutputFormat::Jpg,
        }
    }
}

impl ResizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation(
                "quality must be between 1 and 100".into(),
            ));
        }
        if self.width == Some(0) {
            return Err(ConfigError::Validation(
                "width must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Apply positional overrides and freeze into the settings a batch runs with.
    pub fn settings(&self, overrides: &Overrides) -> ResizeSettings {
        ResizeSettings {
            quality: Quality::new(overrides.quality.unwrap_or(self.quality)),
            width: overrides.width.or(self.width),
            format: overrides.format.unwrap_or(self.format),
        }
    }
}

/// Everything one transform needs besides its paths.
///
/// Built once per run and shared read-only by every file in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSettings {
    pub quality: Quality,
    pub width: Option<u32>,
    pub format: OutputFormat,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        ResizeConfig::default().settings(&Overrides::default())
    }
}

/// Values given on the command line. `None` defers to the config layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub quality: Option<u32>,
    pub width: Option<u32>,
    pub format: Option<OutputFormat>,
}

/// What the positional arguments ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Run(Overrides),
    Usage,
}

fn parse_int(raw: &str) -> Result<i64, ConfigError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidNumber)
}

/// Dispatch on positional argument count and validate values.
///
/// Both numbers are parsed before either is range-checked, and the format is
/// checked last, so `0 abc` reports the unparseable width rather than the
/// quality.
pub fn parse_positional(args: &[String]) -> Result<Invocation, ConfigError> {
    let (quality, width, format) = match args {
        [] => return Ok(Invocation::Run(Overrides::default())),
        [q, w] => (q, w, None),
        [q, w, f] => (q, w, Some(f)),
        _ => return Ok(Invocation::Usage),
    };

    let quality = parse_int(quality)?;
    let width = parse_int(width)?;

    if !(1..=100).contains(&quality) {
        return Err(ConfigError::QualityOutOfRange(quality));
    }
    if width < 1 {
        return Err(ConfigError::WidthOutOfRange(width));
    }
    let width = u32::try_from(width).map_err(|_| ConfigError::WidthTooLarge(width))?;

    let format = format
        .map(|f| {
            f.parse::<OutputFormat>()
                .map_err(|e| ConfigError::UnsupportedFormat(e.0))
        })
        .transpose()?;

    Ok(Invocation::Run(Overrides {
        quality: Some(quality as u32),
        width: Some(width),
        format,
    }))
}

/// Stock defaults as a TOML table, the base layer for merging.
///
/// `width` is absent: no key means no resize.
pub fn stock_defaults() -> toml::Table {
    let defaults = ResizeConfig::default();
    let mut table = toml::Table::new();
    table.insert("quality".into(), toml::Value::Integer(defaults.quality.into()));
    table.insert("format".into(), toml::Value::String(defaults.format.to_string()));
    table
}

/// Lay `overlay` over `base`; keys present in both take the overlay's value.
pub fn merge_toml(mut base: toml::Table, overlay: toml::Table) -> toml::Table {
    base.extend(overlay);
    base
}

/// Load a `config.toml` from a directory as a raw TOML table.
///
/// Returns `Ok(None)` if no `config.toml` exists there, including when the
/// directory itself is missing.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Table>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Merge an optional overlay onto a base table, then deserialize and validate.
pub fn resolve_config(
    base: toml::Table,
    overlay: Option<toml::Table>,
) -> Result<ResizeConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ResizeConfig = toml::Value::Table(merged).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<ResizeConfig, ConfigError> {
    resolve_config(stock_defaults(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `--gen-config` flag.
pub fn stock_config_toml() -> &'static str {
    r##"# rp-resize configuration
# ======================
#
# Place this file in the input directory (default: images/config.toml).
# Every key is optional. Positional arguments on the command line
# override whatever is set here.

# Lossy encoding quality, 1-100. Applies to jpg, jpeg and webp.
quality = 95

# Target width in pixels. Height follows the source aspect ratio.
# Leave commented out to keep the original dimensions.
# width = 1200

# Output format: "jpg", "jpeg", "png" or "webp".
format = "jpg"
"##
}
