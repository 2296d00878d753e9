//! Median (rank) filter.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::TransformError;
use crate::params::{window_radius, MAX_MEDIAN_WINDOW};
use crate::rows::{for_each_row, ApplyOptions};

/// Replace each interior pixel with the per-channel median of its
/// `window x window` neighborhood.
///
/// R, G and B are ranked independently, so the output need not be a color
/// present in the window. Interior pixels are written opaque; the border of
/// width `window / 2` is copied from the source. A window of 1 returns the
/// image with its alpha forced to 255.
///
/// # Errors
/// `window` must be odd and at most [`MAX_MEDIAN_WINDOW`].
pub fn median(
    src: &PixelBuffer,
    window: u32,
    options: &ApplyOptions,
) -> Result<PixelBuffer, TransformError> {
    let radius = window_radius(window, MAX_MEDIAN_WINDOW)?;
    let mut out = src.clone();
    let width = src.width() as usize;
    let height = src.height() as usize;
    if width <= 2 * radius || height <= 2 * radius {
        return Ok(out);
    }

    let raw = src.as_raw();
    let side = window as usize;
    let mid = side * side / 2;
    for_each_row(&mut out, options, |y, row| {
        if y < radius || y >= height - radius {
            return;
        }
        // scratch reused across the row
        let mut samples: [Vec<u8>; 3] = std::array::from_fn(|_| Vec::with_capacity(side * side));
        for x in radius..width - radius {
            for s in samples.iter_mut() {
                s.clear();
            }
            for wy in y - radius..=y + radius {
                let start = (wy * width + x - radius) * CHANNELS;
                for px in raw[start..start + side * CHANNELS].chunks_exact(CHANNELS) {
                    for (s, &v) in samples.iter_mut().zip(px) {
                        s.push(v);
                    }
                }
            }

            let px = &mut row[x * CHANNELS..(x + 1) * CHANNELS];
            for (p, s) in px.iter_mut().zip(samples.iter_mut()) {
                *p = *s.select_nth_unstable(mid).1;
            }
            px[3] = 255;
        }
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamError;

    fn opts() -> ApplyOptions {
        ApplyOptions::default()
    }

    #[test]
    fn test_removes_salt_noise() {
        let mut src = PixelBuffer::filled(3, 3, [20, 20, 20, 255]);
        src.set(1, 1, [255, 255, 255, 255]).unwrap();
        let out = median(&src, 3, &opts()).unwrap();
        assert_eq!(out.get(1, 1).unwrap(), [20, 20, 20, 255]);
    }

    #[test]
    fn test_channels_ranked_independently() {
        // five pixels high in red, four high in green
        let mut src = PixelBuffer::filled(3, 3, [0, 200, 0, 255]);
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1)] {
            src.set(x, y, [200, 0, 0, 255]).unwrap();
        }
        let out = median(&src, 3, &opts()).unwrap();
        assert_eq!(out.get(1, 1).unwrap(), [200, 0, 0, 255]);
    }

    #[test]
    fn test_constant_image_is_fixed_point() {
        let src = PixelBuffer::filled(7, 6, [12, 34, 56, 255]);
        for window in [1, 3, 5] {
            assert_eq!(median(&src, window, &opts()).unwrap(), src);
        }
    }

    #[test]
    fn test_border_copied() {
        let mut src = PixelBuffer::filled(5, 5, [0, 0, 0, 9]);
        src.set(0, 0, [255, 255, 255, 9]).unwrap();
        let out = median(&src, 5, &opts()).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), [255, 255, 255, 9]);
        assert_eq!(out.get(1, 1).unwrap(), [0, 0, 0, 9]);
        assert_eq!(out.get(2, 2).unwrap(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_window_larger_than_image_is_copy() {
        let src = PixelBuffer::filled(4, 4, [1, 2, 3, 4]);
        assert_eq!(median(&src, 5, &opts()).unwrap(), src);
    }

    #[test]
    fn test_rejects_even_window() {
        let src = PixelBuffer::filled(4, 4, [1, 2, 3, 4]);
        assert_eq!(
            median(&src, 4, &opts()),
            Err(TransformError::InvalidParameter(ParamError::EvenWindow(4)))
        );
        assert!(median(&src, 0, &opts()).is_err());
    }
}
