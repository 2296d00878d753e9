//! Convolution engine.
//!
//! Slides a [`Kernel`] (or every kernel of a [`KernelBank`]) over the
//! interior of an image. A pixel is interior when the whole window fits
//! inside the source; every other pixel keeps its source value. Interior
//! outputs are always fully opaque.
//!
//! Windows are always read from the untouched source, never from partially
//! written output, so results do not depend on row order.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::TransformError;
use crate::gradient::Combiner;
use crate::kernel::{to_level, Kernel, KernelBank};
use crate::luminance::luma;
use crate::rows::{for_each_row, ApplyOptions};

/// What the kernel is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sampling {
    /// R, G and B independently.
    #[default]
    Color,
    /// The luma of each source pixel; the result is written to R, G and B.
    Luma,
}

/// Convolve `src` with a single kernel.
///
/// # Arguments
/// * `src` - Source buffer, never modified
/// * `kernel` - Odd-sized kernel; its radius sets the untouched border width
/// * `sampling` - Per-channel or luma input
/// * `options` - Cancellation
///
/// Buffers too small to have any interior pixel come back as an exact copy.
pub fn convolve(
    src: &PixelBuffer,
    kernel: &Kernel,
    sampling: Sampling,
    options: &ApplyOptions,
) -> Result<PixelBuffer, TransformError> {
    let mut out = src.clone();
    let Some(area) = Interior::of(src, kernel.radius()) else {
        return Ok(out);
    };

    match sampling {
        Sampling::Color => {
            let raw = src.as_raw();
            for_each_row(&mut out, options, |y, row| {
                for x in area.columns(y) {
                    let sums = color_sums(raw, area.width, x, y, kernel);
                    let px = &mut row[x * CHANNELS..(x + 1) * CHANNELS];
                    for (p, sum) in px.iter_mut().zip(sums) {
                        *p = kernel.finish(sum);
                    }
                    px[3] = 255;
                }
            })?;
        }
        Sampling::Luma => {
            let plane = luma_plane(src);
            for_each_row(&mut out, options, |y, row| {
                for x in area.columns(y) {
                    let v = kernel.finish(plane_sum(&plane, area.width, x, y, kernel));
                    write_gray(row, x, v);
                }
            })?;
        }
    }
    Ok(out)
}

/// Convolve `src` with every kernel of `bank` and merge the normalized
/// responses with `combiner`.
///
/// With [`Sampling::Color`] the bank runs on each channel separately; with
/// [`Sampling::Luma`] it runs once on the luma plane.
pub fn convolve_bank(
    src: &PixelBuffer,
    bank: &KernelBank,
    combiner: Combiner,
    sampling: Sampling,
    options: &ApplyOptions,
) -> Result<PixelBuffer, TransformError> {
    let mut out = src.clone();
    let Some(area) = Interior::of(src, bank.radius()) else {
        return Ok(out);
    };

    match sampling {
        Sampling::Color => {
            let raw = src.as_raw();
            for_each_row(&mut out, options, |y, row| {
                for x in area.columns(y) {
                    let mut acc = [0.0f32; 3];
                    for kernel in bank.kernels() {
                        let sums = color_sums(raw, area.width, x, y, kernel);
                        for (a, sum) in acc.iter_mut().zip(sums) {
                            *a = combiner.fold(*a, kernel.normalize(sum));
                        }
                    }
                    let px = &mut row[x * CHANNELS..(x + 1) * CHANNELS];
                    for (p, a) in px.iter_mut().zip(acc) {
                        *p = to_level(combiner.finish(a));
                    }
                    px[3] = 255;
                }
            })?;
        }
        Sampling::Luma => {
            let plane = luma_plane(src);
            for_each_row(&mut out, options, |y, row| {
                for x in area.columns(y) {
                    let responses = bank
                        .kernels()
                        .iter()
                        .map(|k| k.normalize(plane_sum(&plane, area.width, x, y, k)));
                    write_gray(row, x, to_level(combiner.combine(responses)));
                }
            })?;
        }
    }
    Ok(out)
}

/// Luma of every pixel, row-major.
pub(crate) fn luma_plane(src: &PixelBuffer) -> Vec<f32> {
    src.as_raw()
        .chunks_exact(CHANNELS)
        .map(|p| luma(p[0], p[1], p[2]))
        .collect()
}

/// Write an opaque gray pixel at column `x` of `row`.
#[inline]
pub(crate) fn write_gray(row: &mut [u8], x: usize, v: u8) {
    row[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&[v, v, v, 255]);
}

/// Interior rectangle for a window of the given radius.
#[derive(Debug, Clone, Copy)]
struct Interior {
    width: usize,
    height: usize,
    radius: usize,
}

impl Interior {
    fn of(src: &PixelBuffer, radius: usize) -> Option<Self> {
        let width = src.width() as usize;
        let height = src.height() as usize;
        if width <= 2 * radius || height <= 2 * radius {
            return None;
        }
        Some(Self {
            width,
            height,
            radius,
        })
    }

    /// Interior columns of row `y`; empty for border rows.
    fn columns(&self, y: usize) -> std::ops::Range<usize> {
        if y < self.radius || y >= self.height - self.radius {
            0..0
        } else {
            self.radius..self.width - self.radius
        }
    }
}

/// Weighted R, G and B sums of the window centered on `(x, y)`.
fn color_sums(raw: &[u8], width: usize, x: usize, y: usize, kernel: &Kernel) -> [f32; 3] {
    let r = kernel.radius();
    let mut acc = [0.0f32; 3];
    for ky in 0..kernel.size() {
        let base = (y + ky - r) * width;
        for kx in 0..kernel.size() {
            let w = kernel.weight(kx, ky);
            if w == 0.0 {
                continue;
            }
            let i = (base + x + kx - r) * CHANNELS;
            acc[0] += raw[i] as f32 * w;
            acc[1] += raw[i + 1] as f32 * w;
            acc[2] += raw[i + 2] as f32 * w;
        }
    }
    acc
}

/// Weighted sum of a luma plane over the window centered on `(x, y)`.
fn plane_sum(plane: &[f32], width: usize, x: usize, y: usize, kernel: &Kernel) -> f32 {
    let r = kernel.radius();
    let mut acc = 0.0;
    for ky in 0..kernel.size() {
        let base = (y + ky - r) * width;
        for kx in 0..kernel.size() {
            acc += plane[base + x + kx - r] * kernel.weight(kx, ky);
        }
    }
    acc
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::kernel::LowPass;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=10, 1u32..=10).prop_flat_map(|(w, h)| {
            let len = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |bytes| PixelBuffer::from_raw(w, h, bytes).unwrap())
        })
    }

    proptest! {
        /// Property: the one-pixel border is always a copy of the source.
        #[test]
        fn prop_border_preserved(src in buffer_strategy()) {
            let out = convolve(&src, &LowPass::Box.kernel(), Sampling::Color, &ApplyOptions::default()).unwrap();
            let (w, h) = (src.width(), src.height());
            for y in 0..h {
                for x in 0..w {
                    if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                        prop_assert_eq!(out.get(x, y).unwrap(), src.get(x, y).unwrap());
                    }
                }
            }
        }

        /// Property: a mean never leaves the range of its window.
        #[test]
        fn prop_box_blur_within_window_bounds(src in buffer_strategy()) {
            let out = convolve(&src, &LowPass::Box.kernel(), Sampling::Color, &ApplyOptions::default()).unwrap();
            let (w, h) = (src.width(), src.height());
            for y in 1..h.saturating_sub(1) {
                for x in 1..w.saturating_sub(1) {
                    for c in 0..3 {
                        let window: Vec<u8> = (y - 1..=y + 1)
                            .flat_map(|wy| (x - 1..=x + 1).map(move |wx| (wx, wy)))
                            .map(|(wx, wy)| src.get(wx, wy).unwrap()[c])
                            .collect();
                        let v = out.get(x, y).unwrap()[c];
                        prop_assert!(v >= *window.iter().min().unwrap());
                        prop_assert!(v <= *window.iter().max().unwrap());
                    }
                }
            }
        }
    }
}
