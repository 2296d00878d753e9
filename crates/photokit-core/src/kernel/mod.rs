//! Convolution kernels and kernel banks.
//!
//! A [`Kernel`] is a square, odd-sized matrix of weights whose origin is
//! its center. A [`KernelBank`] groups kernels of the same radius for the
//! directional edge detectors.
//!
//! # Response
//!
//! For one window the engine computes `sum / divisor + bias`, then applies
//! the kernel's [`Response`], clamps to 0-255 and rounds to the nearest
//! level. The divisor defaults to the total weight, or 1 for zero-sum
//! kernels such as edge operators.

mod bank;
mod gaussian;

pub use bank::{
    edge_enhance_kernel, EmbossDirection, HighPass, LowPass, ShiftDirection, EDGE_ENHANCE, KIRSCH,
    PREWITT, SOBEL,
};
pub use gaussian::{gaussian_kernel, pascal_row};

use serde::{Deserialize, Serialize};

use crate::params::ParamError;

/// How a raw window sum becomes a channel value before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// Keep the sign; negatives clamp to black.
    #[default]
    Clamp,
    /// Use the magnitude of the sum.
    Abs,
}

/// A square matrix of convolution weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
    divisor: f32,
    bias: f32,
    response: Response,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// Fails if `size` is even or `weights.len() != size * size`.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, ParamError> {
        if size % 2 == 0 {
            return Err(ParamError::EvenWindow(size as u32));
        }
        if weights.len() != size * size {
            return Err(ParamError::KernelShape {
                size,
                expected: size * size,
                actual: weights.len(),
            });
        }
        let total: f32 = weights.iter().sum();
        let divisor = if total == 0.0 { 1.0 } else { total };
        Ok(Self {
            size,
            weights,
            divisor,
            bias: 0.0,
            response: Response::Clamp,
        })
    }

    /// Create a 3x3 kernel from a literal matrix.
    pub fn from_3x3(rows: &[[f32; 3]; 3]) -> Self {
        let total: f32 = rows.iter().flatten().sum();
        Self {
            size: 3,
            weights: rows.iter().flatten().copied().collect(),
            divisor: if total == 0.0 { 1.0 } else { total },
            bias: 0.0,
            response: Response::Clamp,
        }
    }

    /// Override the normalization divisor.
    pub fn with_divisor(mut self, divisor: f32) -> Self {
        self.divisor = divisor;
        self
    }

    /// Add a constant after normalization (emboss uses mid-gray).
    pub fn with_bias(mut self, bias: f32) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_response(mut self, response: Response) -> Self {
        self.response = response;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Pixels the window extends from its center: `(size - 1) / 2`.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at column `kx`, row `ky` of the matrix.
    pub fn weight(&self, kx: usize, ky: usize) -> f32 {
        self.weights[ky * self.size + kx]
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f32 {
        self.weights.iter().sum()
    }

    pub fn divisor(&self) -> f32 {
        self.divisor
    }

    /// Normalize a raw window sum: divide, add bias. No clamping.
    #[inline]
    pub fn normalize(&self, sum: f32) -> f32 {
        sum / self.divisor + self.bias
    }

    /// Turn a raw window sum into a channel value.
    #[inline]
    pub fn finish(&self, sum: f32) -> u8 {
        let v = self.normalize(sum);
        let v = match self.response {
            Response::Clamp => v,
            Response::Abs => v.abs(),
        };
        to_level(v)
    }
}

/// Clamp a real response to 0-255 and round to the nearest level.
///
/// Rounding keeps flat regions flat when normalized float weights sum to
/// slightly less than one.
#[inline]
pub(crate) fn to_level(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round() as u8
}

/// An ordered set of kernels sharing one radius.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelBank {
    kernels: Vec<Kernel>,
}

impl KernelBank {
    /// Group kernels into a bank. All kernels must have the same size.
    pub fn new(kernels: Vec<Kernel>) -> Result<Self, ParamError> {
        let Some(size) = kernels.first().map(Kernel::size) else {
            return Err(ParamError::KernelShape {
                size: 0,
                expected: 1,
                actual: 0,
            });
        };
        if let Some(odd) = kernels.iter().find(|k| k.size() != size) {
            return Err(ParamError::KernelShape {
                size,
                expected: size * size,
                actual: odd.weights().len(),
            });
        }
        Ok(Self { kernels })
    }

    /// Build a bank from literal 3x3 matrices.
    pub fn from_3x3(matrices: &[[[f32; 3]; 3]]) -> Self {
        Self {
            kernels: matrices.iter().map(Kernel::from_3x3).collect(),
        }
    }

    /// The 8-direction Kirsch compass bank.
    pub fn kirsch() -> Self {
        Self::from_3x3(&KIRSCH)
    }

    /// The 2-direction Prewitt bank.
    pub fn prewitt() -> Self {
        Self::from_3x3(&PREWITT)
    }

    /// The 2-direction Sobel bank (horizontal, vertical).
    pub fn sobel() -> Self {
        Self::from_3x3(&SOBEL)
    }

    pub fn kernels(&self) -> &[Kernel] {
        &self.kernels
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    pub fn radius(&self) -> usize {
        self.kernels.first().map_or(0, Kernel::radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_even_size() {
        assert_eq!(
            Kernel::new(2, vec![1.0; 4]),
            Err(ParamError::EvenWindow(2))
        );
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(matches!(
            Kernel::new(3, vec![1.0; 8]),
            Err(ParamError::KernelShape { expected: 9, actual: 8, .. })
        ));
    }

    #[test]
    fn test_divisor_is_total_weight() {
        let k = Kernel::from_3x3(&LowPass::Pyramidal.matrix());
        assert_eq!(k.total_weight(), 16.0);
        assert_eq!(k.divisor(), 16.0);
        assert_eq!(k.radius(), 1);
    }

    #[test]
    fn test_zero_sum_kernel_divisor_is_one() {
        let k = Kernel::from_3x3(&EDGE_ENHANCE);
        assert_eq!(k.total_weight(), 0.0);
        assert_eq!(k.divisor(), 1.0);
    }

    #[test]
    fn test_finish_clamp_and_abs() {
        let clamp = Kernel::from_3x3(&EDGE_ENHANCE);
        assert_eq!(clamp.finish(-40.0), 0);
        assert_eq!(clamp.finish(300.0), 255);

        let abs = clamp.clone().with_response(Response::Abs);
        assert_eq!(abs.finish(-40.0), 40);
    }

    #[test]
    fn test_finish_with_bias() {
        let k = Kernel::from_3x3(&EmbossDirection::In.matrix()).with_bias(128.0);
        assert_eq!(k.finish(0.0), 128);
        assert_eq!(k.finish(-200.0), 0);
    }

    #[test]
    fn test_weight_layout_is_row_major() {
        let k = Kernel::from_3x3(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(k.weight(2, 0), 3.0);
        assert_eq!(k.weight(0, 2), 7.0);
    }

    #[test]
    fn test_banks() {
        assert_eq!(KernelBank::kirsch().len(), 8);
        assert_eq!(KernelBank::prewitt().len(), 2);
        assert_eq!(KernelBank::sobel().len(), 2);
        assert_eq!(KernelBank::sobel().radius(), 1);
    }

    #[test]
    fn test_bank_rejects_mixed_sizes() {
        let small = Kernel::from_3x3(&EDGE_ENHANCE);
        let large = Kernel::new(5, vec![1.0; 25]).unwrap();
        assert!(KernelBank::new(vec![small, large]).is_err());
        assert!(KernelBank::new(vec![]).is_err());
    }
}
