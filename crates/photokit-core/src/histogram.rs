//! Intensity histogram of a pixel buffer and its bar-chart rendering.
//!
//! Gray pixels (R = G = B) are counted at their shared channel value.
//! Colored pixels are counted at their rounded luma.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::luminance::luma_u8;
use crate::rows::fold_rows;

/// Chart width: one bar plus one gap per level.
pub const CHART_WIDTH: u32 = 512;

/// Chart height.
pub const CHART_HEIGHT: u32 = 400;

/// Height of the tallest bar.
pub const CHART_MAX_BAR: u32 = 380;

/// Per-level pixel counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Pixel count for each intensity level
    pub counts: [u32; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl Histogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pixels counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Largest bin, used to scale the chart.
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Add another histogram's counts into this one.
    pub fn merge(&mut self, other: &Histogram) {
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
    }

    /// Any pixel at full intensity.
    pub fn has_highlight_clipping(&self) -> bool {
        self.counts[255] > 0
    }

    /// Any pixel at zero intensity.
    pub fn has_shadow_clipping(&self) -> bool {
        self.counts[0] > 0
    }
}

/// Intensity level a pixel is counted under.
#[inline]
fn level(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        r
    } else {
        luma_u8(r, g, b)
    }
}

/// Count every pixel of `src` by intensity level.
///
/// # Example
/// ```
/// use photokit_core::{compute_histogram, PixelBuffer};
///
/// let buf = PixelBuffer::filled(2, 1, [40, 40, 40, 255]);
/// let hist = compute_histogram(&buf);
/// assert_eq!(hist.counts[40], 2);
/// ```
pub fn compute_histogram(src: &PixelBuffer) -> Histogram {
    fold_rows(
        src,
        Histogram::new,
        |mut hist, row| {
            for px in row.chunks_exact(CHANNELS) {
                hist.counts[level(px[0], px[1], px[2]) as usize] += 1;
            }
            hist
        },
        |mut a, b| {
            a.merge(&b);
            a
        },
    )
}

/// Draw `hist` as a 512x400 bar chart.
///
/// Background is opaque black. Level `i` is a white bar one pixel wide at
/// `x = 2 * i`, rising from the bottom edge to `count * 380 / max`.
pub fn render_histogram(hist: &Histogram) -> PixelBuffer {
    let mut chart = PixelBuffer::filled(CHART_WIDTH, CHART_HEIGHT, [0, 0, 0, 255]);
    let max = hist.max_count() as u64;
    if max == 0 {
        return chart;
    }

    for (i, &count) in hist.counts.iter().enumerate() {
        let bar = (count as u64 * CHART_MAX_BAR as u64 / max) as usize;
        let x = 2 * i;
        let bottom = CHART_HEIGHT as usize;
        for y in bottom - bar..bottom {
            chart.put_pixel(x, y, [255, 255, 255, 255]);
        }
    }
    chart
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (0u32..=16, 0u32..=16).prop_flat_map(|(w, h)| {
            let len = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |bytes| PixelBuffer::from_raw(w, h, bytes).unwrap())
        })
    }

    proptest! {
        /// Property: every pixel lands in exactly one bin.
        #[test]
        fn prop_counts_sum_to_pixel_count(src in buffer_strategy()) {
            let hist = compute_histogram(&src);
            prop_assert_eq!(hist.total(), src.pixel_count() as u64);
        }

        /// Property: no bar is taller than the chart allows.
        #[test]
        fn prop_render_within_bounds(counts in prop::collection::vec(any::<u32>(), 256)) {
            let mut hist = Histogram::new();
            hist.counts.copy_from_slice(&counts);
            let chart = render_histogram(&hist);
            for x in 0..CHART_WIDTH {
                prop_assert_eq!(chart.get(x, CHART_HEIGHT - CHART_MAX_BAR - 1).unwrap(), [0, 0, 0, 255]);
            }
        }
    }
}
