//! Combining directional edge responses into one magnitude.
//!
//! A bank of edge kernels yields one response per direction at every pixel.
//! [`Combiner`] decides how those become a single value. The Roberts cross
//! operator is implemented here directly since its 2x2 window has no
//! center pixel.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::convolve::{luma_plane, write_gray};
use crate::error::TransformError;
use crate::kernel::to_level;
use crate::rows::{for_each_row, ApplyOptions};

/// How per-kernel responses are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combiner {
    /// Largest magnitude across the bank (compass operators).
    MaxAbs,
    /// Plain sum of signed responses.
    SignedSum,
    /// `sqrt(sum of squares)`, the gradient magnitude.
    Euclidean,
}

impl Combiner {
    /// Fold one more response into the running accumulator. Start from 0.
    #[inline]
    pub fn fold(self, acc: f32, response: f32) -> f32 {
        match self {
            Combiner::MaxAbs => acc.max(response.abs()),
            Combiner::SignedSum => acc + response,
            Combiner::Euclidean => acc + response * response,
        }
    }

    /// Turn the accumulator into the combined response.
    #[inline]
    pub fn finish(self, acc: f32) -> f32 {
        match self {
            Combiner::Euclidean => acc.sqrt(),
            _ => acc,
        }
    }

    pub fn combine(self, responses: impl IntoIterator<Item = f32>) -> f32 {
        let acc = responses
            .into_iter()
            .fold(0.0, |acc, r| self.fold(acc, r));
        self.finish(acc)
    }
}

/// Roberts cross edge detector on luma.
///
/// For each pixel with a right and lower neighbor,
/// `d1 = L(x, y) - L(x+1, y+1)` and `d2 = L(x+1, y) - L(x, y+1)`; the
/// output gray level is `sqrt(d1^2 + d2^2)`. The last column and last row
/// keep their source values.
pub fn roberts(src: &PixelBuffer, options: &ApplyOptions) -> Result<PixelBuffer, TransformError> {
    let mut out = src.clone();
    let width = src.width() as usize;
    let height = src.height() as usize;
    if width < 2 || height < 2 {
        return Ok(out);
    }

    let plane = luma_plane(src);
    for_each_row(&mut out, options, |y, row| {
        if y + 1 >= height {
            return;
        }
        let top = &plane[y * width..(y + 1) * width];
        let bottom = &plane[(y + 1) * width..(y + 2) * width];
        for x in 0..width - 1 {
            let d1 = top[x] - bottom[x + 1];
            let d2 = top[x + 1] - bottom[x];
            let v = Combiner::Euclidean.combine([d1, d2]);
            write_gray(row, x, to_level(v));
        }
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_abs() {
        assert_eq!(Combiner::MaxAbs.combine([3.0, -7.0, 5.0]), 7.0);
        assert_eq!(Combiner::MaxAbs.combine([]), 0.0);
    }

    #[test]
    fn test_signed_sum() {
        assert_eq!(Combiner::SignedSum.combine([3.0, -7.0, 5.0]), 1.0);
    }

    #[test]
    fn test_euclidean() {
        assert_eq!(Combiner::Euclidean.combine([3.0, -4.0]), 5.0);
        // a vertical-only response still counts
        assert_eq!(Combiner::Euclidean.combine([0.0, -12.0]), 12.0);
    }

    #[test]
    fn test_roberts_vertical_stripes() {
        // white column, black column
        let pixels = [255, 255, 255, 255, 0, 0, 0, 255].repeat(2);
        let src = PixelBuffer::from_raw(2, 2, pixels).unwrap();
        let out = roberts(&src, &ApplyOptions::default()).unwrap();

        assert_eq!(out.get(0, 0).unwrap(), [255, 255, 255, 255]);
        assert_eq!(out.get(1, 0).unwrap(), src.get(1, 0).unwrap());
        assert_eq!(out.get(0, 1).unwrap(), src.get(0, 1).unwrap());
        assert_eq!(out.get(1, 1).unwrap(), src.get(1, 1).unwrap());
    }

    #[test]
    fn test_roberts_checkerboard_cancels() {
        let white = [255, 255, 255, 255];
        let black = [0, 0, 0, 255];
        let pixels = [white, black, black, white].concat();
        let src = PixelBuffer::from_raw(2, 2, pixels).unwrap();
        let out = roberts(&src, &ApplyOptions::default()).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_roberts_two_cell_checker_peaks_at_shared_corner() {
        let white = [255, 255, 255, 255];
        let black = [0, 0, 0, 255];

        // the 2x1 white/black pair alone has no 2x2 window
        let pair = PixelBuffer::from_raw(2, 1, [white, black].concat()).unwrap();
        assert_eq!(roberts(&pair, &ApplyOptions::default()).unwrap(), pair);

        // stacked twice, the shared corner sees the full difference
        let stacked = PixelBuffer::from_raw(2, 2, [white, black, white, black].concat()).unwrap();
        let out = roberts(&stacked, &ApplyOptions::default()).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), [255, 255, 255, 255]);

        // so does a single diagonal step
        let step = PixelBuffer::from_raw(2, 2, [white, white, white, black].concat()).unwrap();
        let out = roberts(&step, &ApplyOptions::default()).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_roberts_single_column_is_copy() {
        let src = PixelBuffer::filled(1, 5, [3, 4, 5, 6]);
        assert_eq!(roberts(&src, &ApplyOptions::default()).unwrap(), src);
    }

    #[test]
    fn test_roberts_flat_is_black() {
        let src = PixelBuffer::filled(4, 3, [77, 12, 200, 40]);
        let out = roberts(&src, &ApplyOptions::default()).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(out.get(x, y).unwrap(), [0, 0, 0, 255]);
            }
        }
        assert_eq!(out.get(3, 0).unwrap(), [77, 12, 200, 40]);
        assert_eq!(out.get(0, 2).unwrap(), [77, 12, 200, 40]);
    }
}
