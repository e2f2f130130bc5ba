//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP, GIF) | `image::ImageReader` (content-sniffed, first GIF frame) |
//! | EXIF orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder`, JFIF density 72 dpi |
//! | Encode → PNG | `png::Encoder`, best compression, `pHYs` 72 dpi |
//! | Encode → WebP | `webp::Encoder` (lossy, libwebp) |
//!
//! WebP has no resolution field of its own, so WebP outputs carry no DPI.
//! EXIF and ICC chunks are not copied to any output; orientation is baked
//! into the pixels before resampling so the target width is the width the
//! viewer sees.

use super::backend::{BackendError, Dimensions, ImageBackend, ResizeReport};
use super::calculations::{resample_bytes, target_dimensions};
use super::params::{OutputFormat, Quality, ResizeParams};
use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Resolution written into every output that has a field for it.
pub const OUTPUT_DPI: u16 = 72;

/// [`OUTPUT_DPI`] in pixels per meter, the unit PNG's `pHYs` chunk uses.
const OUTPUT_PPM: u32 = 2835;

/// Largest resample allocation attempted, 4 GiB. A width beyond this is a
/// per-file error rather than an allocation failure that takes down the batch.
pub const MAX_RESAMPLE_BYTES: u64 = 4 << 30;

/// Input extensions the batch picks up, lowercase, without the dot.
const INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Returns the set of image file extensions that have decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    INPUT_EXTENSIONS
}

/// Backend built on the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk, upright.
///
/// The format is sniffed from content, so a PNG saved as `.jpg` still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let mut decoder = ImageReader::open(path)
        .map_err(|e| BackendError::decode(path, e))?
        .with_guessed_format()
        .map_err(|e| BackendError::decode(path, e))?
        .into_decoder()
        .map_err(|e| BackendError::decode(path, e))?;

    // A malformed EXIF block should not cost us the pixels.
    let orientation = decoder
        .orientation()
        .unwrap_or(Orientation::NoTransforms);

    let mut img =
        DynamicImage::from_decoder(decoder).map_err(|e| BackendError::decode(path, e))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Drop alpha and narrow sample depth so the JPEG encoder accepts the buffer.
///
/// 8-bit gray and RGB go through untouched; everything else ends up RGB8,
/// except 16-bit gray which stays gray.
fn flatten_for_jpeg(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => img,
        DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(img.to_luma8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// Split an image into PNG color type + 8-bit samples.
fn into_png_samples(img: DynamicImage) -> (png::ColorType, Vec<u8>) {
    match img {
        DynamicImage::ImageLuma8(buf) => (png::ColorType::Grayscale, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (png::ColorType::GrayscaleAlpha, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (png::ColorType::Rgb, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (png::ColorType::Rgba, buf.into_raw()),
        other => {
            let color = other.color();
            match (color.has_color(), color.has_alpha()) {
                (false, false) => (png::ColorType::Grayscale, other.to_luma8().into_raw()),
                (false, true) => (
                    png::ColorType::GrayscaleAlpha,
                    other.to_luma_alpha8().into_raw(),
                ),
                (true, false) => (png::ColorType::Rgb, other.to_rgb8().into_raw()),
                (true, true) => (png::ColorType::Rgba, other.to_rgba8().into_raw()),
            }
        }
    }
}

fn create_output(path: &Path) -> Result<BufWriter<File>, BackendError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| BackendError::encode(path, e))
}

/// Save as JPEG with the given quality and a 72 dpi JFIF header.
fn save_jpeg(img: DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let img = flatten_for_jpeg(img);
    let mut writer = create_output(path)?;
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality.as_u8());
    encoder.set_pixel_density(PixelDensity::dpi(OUTPUT_DPI));
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::encode(path, e))?;
    writer.flush().map_err(|e| BackendError::encode(path, e))
}

/// Save as PNG at maximum compression with a 72 dpi `pHYs` chunk.
///
/// PNG is lossless; quality does not apply.
fn save_png(img: DynamicImage, path: &Path) -> Result<(), BackendError> {
    let (width, height) = (img.width(), img.height());
    let (color, samples) = into_png_samples(img);

    let mut encoder = png::Encoder::new(create_output(path)?, width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Best);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: OUTPUT_PPM,
        yppu: OUTPUT_PPM,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .map_err(|e| BackendError::encode(path, e))?;
    writer
        .write_image_data(&samples)
        .map_err(|e| BackendError::encode(path, e))?;
    writer.finish().map_err(|e| BackendError::encode(path, e))
}

/// Save as lossy WebP. libwebp only takes 8-bit RGB or RGBA.
fn save_webp(img: DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let img = match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    };
    let encoder = webp::Encoder::from_image(&img).map_err(|e| BackendError::encode(path, e))?;
    let encoded = encoder.encode(quality.value() as f32);
    std::fs::write(path, &*encoded).map_err(|e| BackendError::encode(path, e))
}

fn save_image(
    img: DynamicImage,
    path: &Path,
    format: OutputFormat,
    quality: Quality,
) -> Result<(), BackendError> {
    match format {
        OutputFormat::Jpg | OutputFormat::Jpeg => save_jpeg(img, path, quality),
        OutputFormat::Png => save_png(img, path),
        OutputFormat::Webp => save_webp(img, path, quality),
    }
}

impl ImageBackend for RustBackend {
    fn resize(&self, params: &ResizeParams) -> Result<ResizeReport, BackendError> {
        let started = Instant::now();
        let img = load_image(&params.source)?;
        let source = Dimensions {
            width: img.width(),
            height: img.height(),
        };

        let img = match params.width {
            Some(_) => {
                let (w, h) = target_dimensions(source.as_tuple(), params.width);
                let bpp = img.color().bytes_per_pixel();
                if resample_bytes(source.as_tuple(), (w, h), bpp) > MAX_RESAMPLE_BYTES {
                    return Err(BackendError::TooLarge {
                        path: params.source.clone(),
                        width: w,
                        height: h,
                    });
                }
                img.resize_exact(w, h, FilterType::Lanczos3)
            }
            None => img,
        };
        let output = Dimensions {
            width: img.width(),
            height: img.height(),
        };

        save_image(img, &params.output, params.format, params.quality)?;

        debug!(
            source = %params.source.display(),
            output = %params.output.display(),
            from = ?source.as_tuple(),
            to = ?output.as_tuple(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "encoded"
        );
        Ok(ResizeReport { source, output })
    }
}
