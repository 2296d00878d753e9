//! Point transforms: each output pixel depends only on the same input pixel.
//!
//! Channel mappings that act on R, G and B independently are evaluated once
//! into a 256-entry [`ChannelLut`] and then applied to every pixel. Grayscale
//! and binarization depend on all three channels and are evaluated per pixel.
//! Alpha passes through unchanged.
//!
//! All results are clamped to 0-255 before truncation to an integer.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::TransformError;
use crate::luminance::luma_u8;
use crate::params::{check_contrast_range, check_gamma, check_range, MAX_SOLARIZE_FACTOR};
use crate::rows::{for_each_row, ApplyOptions};

/// A precomputed mapping from one channel level to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLut {
    table: [u8; 256],
}

impl ChannelLut {
    /// Build the table from a real-valued mapping, clamping then truncating.
    pub fn from_fn(f: impl Fn(f64) -> f64) -> Self {
        let mut table = [0u8; 256];
        for (c, slot) in table.iter_mut().enumerate() {
            *slot = clamp_level(f(c as f64));
        }
        Self { table }
    }

    #[inline]
    pub fn map(&self, c: u8) -> u8 {
        self.table[c as usize]
    }

    /// True when the table maps every level to itself.
    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| i == v as usize)
    }

    /// Map R, G and B of every pixel through the table.
    pub fn apply(
        &self,
        src: &PixelBuffer,
        options: &ApplyOptions,
    ) -> Result<PixelBuffer, TransformError> {
        let mut out = src.clone();
        for_each_row(&mut out, options, |_, row| {
            for px in row.chunks_exact_mut(CHANNELS) {
                px[0] = self.map(px[0]);
                px[1] = self.map(px[1]);
                px[2] = self.map(px[2]);
            }
        })?;
        Ok(out)
    }
}

/// Clamp to the channel range and truncate.
#[inline]
pub(crate) fn clamp_level(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

/// `c' = 255 - c` for channels at or above `ceiling`, others unchanged.
pub fn negative_lut(ceiling: u8) -> ChannelLut {
    ChannelLut::from_fn(|c| if c >= ceiling as f64 { 255.0 - c } else { c })
}

/// `c' = c + delta`.
pub fn brightness_lut(delta: u8) -> ChannelLut {
    ChannelLut::from_fn(|c| c + delta as f64)
}

/// Stretch `[low, high]` onto the full range: `c' = (c - low) * 255 / (high - low)`.
pub fn contrast_increase_lut(low: u8, high: u8) -> Result<ChannelLut, TransformError> {
    check_contrast_range(low, high)?;
    let (low, high) = (low as f64, high as f64);
    Ok(ChannelLut::from_fn(|c| (c - low) * 255.0 / (high - low)))
}

/// Compress the full range into `[low, high]`: `c' = low + c * (high - low) / 255`.
pub fn contrast_decrease_lut(low: u8, high: u8) -> Result<ChannelLut, TransformError> {
    check_contrast_range(low, high)?;
    let (low, high) = (low as f64, high as f64);
    Ok(ChannelLut::from_fn(|c| low + c * (high - low) / 255.0))
}

/// `c' = 255 * (c / 255) ^ gamma`, `0 < gamma <= 255`.
pub fn gamma_lut(gamma: f64) -> Result<ChannelLut, TransformError> {
    check_gamma(gamma)?;
    Ok(ChannelLut::from_fn(|c| 255.0 * (c / 255.0).powf(gamma)))
}

/// Split 0-255 into `levels` bands of width `ceil(256 / levels)`; every value
/// maps to the top of its band, clamped at 255.
pub fn quantize_lut(levels: u8) -> Result<ChannelLut, TransformError> {
    check_range("quantization levels", levels as f64, 1.0, 255.0)?;
    let band = 256usize.div_ceil(levels as usize);
    let mut table = [0u8; 256];
    for (c, slot) in table.iter_mut().enumerate() {
        let top = (c / band) * band + band - 1;
        *slot = top.min(255) as u8;
    }
    Ok(ChannelLut { table })
}

/// `c' = k * c * (255 - c)`, `0 <= k <= 0.05`.
pub fn solarize_lut(factor: f64) -> Result<ChannelLut, TransformError> {
    check_range("solarization factor", factor, 0.0, MAX_SOLARIZE_FACTOR)?;
    Ok(ChannelLut::from_fn(|c| factor * c * (255.0 - c)))
}

/// Replace R, G and B with their rounded luma.
pub fn grayscale(src: &PixelBuffer, options: &ApplyOptions) -> Result<PixelBuffer, TransformError> {
    map_pixels(src, options, |r, g, b| {
        let v = luma_u8(r, g, b);
        [v, v, v]
    })
}

/// Black below `threshold` luma, white at or above it.
pub fn binarize(
    src: &PixelBuffer,
    threshold: u8,
    options: &ApplyOptions,
) -> Result<PixelBuffer, TransformError> {
    map_pixels(src, options, |r, g, b| {
        let v = if luma_u8(r, g, b) < threshold { 0 } else { 255 };
        [v, v, v]
    })
}

fn map_pixels<F>(
    src: &PixelBuffer,
    options: &ApplyOptions,
    f: F,
) -> Result<PixelBuffer, TransformError>
where
    F: Fn(u8, u8, u8) -> [u8; 3] + Send + Sync,
{
    let mut out = src.clone();
    for_each_row(&mut out, options, |_, row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            let rgb = f(px[0], px[1], px[2]);
            px[..3].copy_from_slice(&rgb);
        }
    })?;
    Ok(out)
}
