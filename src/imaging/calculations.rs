//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Height that keeps the source aspect ratio at `target_width`.
///
/// Rounds to the nearest pixel and never returns 0, so a very wide strip
/// scaled down still yields a 1px-tall image.
///
/// # Examples
/// ```
/// # use rp_resize::imaging::scaled_height;
/// // 4000x3000 → 1200 wide keeps 4:3
/// assert_eq!(scaled_height((4000, 3000), 1200), 900);
///
/// // 3x2 → 2 wide: 1.333 rounds to 1
/// assert_eq!(scaled_height((3, 2), 2), 1);
/// ```
pub fn scaled_height(original: (u32, u32), target_width: u32) -> u32 {
    let (orig_w, orig_h) = original;
    let h = (target_width as f64 * orig_h as f64 / orig_w as f64).round() as u32;
    h.max(1)
}

/// Final dimensions for an optional target width.
///
/// `None` means pass-through: the original dimensions are returned untouched.
pub fn target_dimensions(original: (u32, u32), target_width: Option<u32>) -> (u32, u32) {
    match target_width {
        Some(w) => (w, scaled_height(original, w)),
        None => original,
    }
}

/// Upper bound on the bytes a resample from `original` to `target` allocates.
///
/// Covers the `f32` RGBA intermediate buffer, which spans the larger of the
/// two widths and heights, plus the final buffer at `bytes_per_pixel`.
/// Saturates instead of overflowing.
pub fn resample_bytes(original: (u32, u32), target: (u32, u32), bytes_per_pixel: u8) -> u64 {
    let (w0, h0) = original;
    let (w, h) = target;
    let intermediate = (w0.max(w) as u64)
        .saturating_mul(h0.max(h) as u64)
        .saturating_mul(16);
    let output = (w as u64)
        .saturating_mul(h as u64)
        .saturating_mul(bytes_per_pixel as u64);
    intermediate.saturating_add(output)
}
