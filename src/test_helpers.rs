//! Shared test utilities: synthetic image writers and metadata readers.
//!
//! Images are generated in-test so the suite needs no fixture files.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("print.jpg");
//! create_test_jpeg_with_dpi(&path, 64, 64, 300);
//! assert_eq!(jpeg_density(&path), Some((1, 300, 300)));
//! ```

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::{Delay, Frame, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::File;
use std::path::Path;

// =========================================================================
// Writers
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

fn encode_jpeg(width: u32, height: u32, density: Option<u16>) -> Vec<u8> {
    let img = gradient(width, height);
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new(&mut buf);
    if let Some(dpi) = density {
        encoder.set_pixel_density(PixelDensity::dpi(dpi));
    }
    encoder
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode_jpeg(width, height, None)).unwrap();
}

/// JPEG whose JFIF header claims `dpi` dots per inch.
pub fn create_test_jpeg_with_dpi(path: &Path, width: u32, height: u32, dpi: u16) {
    std::fs::write(path, encode_jpeg(width, height, Some(dpi))).unwrap();
}

/// JPEG with an EXIF APP1 segment carrying only the Orientation tag.
///
/// `orientation` uses EXIF values: 1 = upright, 6 = rotate 90° CW, etc.
pub fn create_test_jpeg_with_orientation(path: &Path, width: u32, height: u32, orientation: u16) {
    let jpeg = encode_jpeg(width, height, None);

    // Little-endian TIFF header, one IFD entry: 0x0112 SHORT x1
    let mut tiff = vec![0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01, 0x00];
    tiff.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00]);
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0x00, 0x00]);
    tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    let len = (payload.len() + 2) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]); // SOI
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

/// Create an RGBA PNG with a transparent left half.
pub fn create_test_png_rgba(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        let alpha = if x < width / 2 { 0 } else { 255 };
        Rgba([200, 100, 50, alpha])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Create a lossless WebP.
pub fn create_test_webp(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, image::ImageFormat::WebP)
        .unwrap();
}

/// Two-frame GIF: solid red, then solid blue.
pub fn create_test_gif_two_frames(path: &Path, width: u32, height: u32) {
    let red = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
    let blue = RgbaImage::from_pixel(width, height, Rgba([0, 0, 255, 255]));
    let delay = Delay::from_numer_denom_ms(100, 1);

    let mut encoder = GifEncoder::new(File::create(path).unwrap());
    encoder
        .encode_frames(vec![
            Frame::from_parts(red, 0, 0, delay),
            Frame::from_parts(blue, 0, 0, delay),
        ])
        .unwrap();
}

/// Bytes that no decoder accepts, under whatever name the test picks.
pub fn write_corrupt(path: &Path) {
    std::fs::write(path, b"this is not an image").unwrap();
}

// =========================================================================
// Readers
// =========================================================================

/// Read `(units, x_density, y_density)` from a JPEG's JFIF APP0 segment.
///
/// Units: 0 = aspect only, 1 = dots per inch, 2 = dots per cm.
pub fn jpeg_density(path: &Path) -> Option<(u8, u16, u16)> {
    let bytes = std::fs::read(path).unwrap();
    let mut i = 2; // skip SOI
    while i + 4 <= bytes.len() && bytes[i] == 0xFF {
        let marker = bytes[i + 1];
        let len = u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]) as usize;
        let data = bytes.get(i + 4..i + 2 + len)?;
        if marker == 0xE0 && data.starts_with(b"JFIF\0") {
            let units = data[7];
            let x = u16::from_be_bytes([data[8], data[9]]);
            let y = u16::from_be_bytes([data[10], data[11]]);
            return Some((units, x, y));
        }
        if marker == 0xDA {
            break; // start of scan, no more headers
        }
        i += 2 + len;
    }
    None
}

/// Read the `pHYs` chunk of a PNG, if any.
pub fn png_pixel_dims(path: &Path) -> Option<png::PixelDimensions> {
    let decoder = png::Decoder::new(File::open(path).unwrap());
    let reader = decoder.read_info().unwrap();
    reader.info().pixel_dims
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn jpeg_density_reads_what_encoder_wrote() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.jpg");
        create_test_jpeg_with_dpi(&path, 8, 8, 150);
        assert_eq!(jpeg_density(&path), Some((1, 150, 150)));
    }

    #[test]
    fn jpeg_density_none_for_non_jpeg() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.jpg");
        write_corrupt(&path);
        assert_eq!(jpeg_density(&path), None);
    }

    #[test]
    fn orientation_fixture_still_decodes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.jpg");
        create_test_jpeg_with_orientation(&path, 30, 10, 1);
        assert_eq!(image::image_dimensions(&path).unwrap(), (30, 10));
    }

    #[test]
    fn webp_fixture_decodes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.webp");
        create_test_webp(&path, 12, 7);
        assert_eq!(image::image_dimensions(&path).unwrap(), (12, 7));
    }
}
