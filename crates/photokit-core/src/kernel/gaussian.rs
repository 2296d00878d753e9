//! Gaussian kernels built from binomial (Pascal triangle) rows.

use super::Kernel;
use crate::params::{window_radius, ParamError, MAX_GAUSSIAN_WINDOW};

/// Binomial coefficients `C(len - 1, k)` for `k in 0..len`.
///
/// Uses the multiplicative recurrence `elem *= (len - k) / k` and fills the
/// row from both ends at once, so no factorials are computed.
pub fn pascal_row(len: usize) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    let mut row = vec![0.0; len];
    row[0] = 1.0;
    row[len - 1] = 1.0;

    let mut elem = 1.0;
    for k in 1..=len / 2 {
        // multiply first: every intermediate stays an exact integer
        elem = elem * (len - k) as f64 / k as f64;
        row[k] = elem;
        row[len - k - 1] = elem;
    }
    row
}

/// A normalized `size x size` Gaussian approximation.
///
/// `K[i][j] = row[i] * row[j]` for the Pascal row of length `size`. Only the
/// top-left quadrant (including the center row and column) is computed;
/// each value is mirrored into the other three quadrants and counted once
/// per mirror when accumulating the normalization sum.
pub fn gaussian_kernel(size: u32) -> Result<Kernel, ParamError> {
    window_radius(size, MAX_GAUSSIAN_WINDOW)?;
    let size = size as usize;
    let row = pascal_row(size);
    let last = size - 1;

    let mut weights = vec![0.0f64; size * size];
    let mut sum = 0.0;
    for i in 0..=size / 2 {
        for j in 0..=size / 2 {
            let val = row[i] * row[j];
            for (y, x) in [(i, j), (last - i, j), (i, last - j), (last - i, last - j)] {
                weights[y * size + x] = val;
            }

            let rows = if i != last - i { 2.0 } else { 1.0 };
            let cols = if j != last - j { 2.0 } else { 1.0 };
            sum += val * rows * cols;
        }
    }

    let weights = weights.into_iter().map(|w| (w / sum) as f32).collect();
    Ok(Kernel::new(size, weights)?.with_divisor(1.0))
}
