//! Luma weights shared by grayscale, binarization, histograms and the
//! grayscale-first edge operators.

/// Red weight in the luma sum.
pub const LUMA_R: f32 = 0.3;

/// Green weight in the luma sum.
pub const LUMA_G: f32 = 0.59;

/// Blue weight in the luma sum.
pub const LUMA_B: f32 = 0.11;

/// Weighted intensity `0.3R + 0.59G + 0.11B`, unrounded.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}

/// Luma rounded to the nearest level (0-255).
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    luma(r, g, b).clamp(0.0, 255.0).round() as u8
}
