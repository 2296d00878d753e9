//! The transform dispatcher.
//!
//! [`TransformKind`] names one operation together with its parameters.
//! [`apply`] validates the parameters, then routes to the point transform,
//! convolution, median or gradient code that implements it.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::convolve::{convolve, convolve_bank, Sampling};
use crate::error::TransformError;
use crate::gradient::{roberts, Combiner};
use crate::kernel::{
    edge_enhance_kernel, gaussian_kernel, EmbossDirection, HighPass, KernelBank, LowPass,
    ShiftDirection,
};
use crate::median::median;
use crate::params::{
    check_contrast_range, check_gamma, check_range, window_radius, ParamError,
    DEFAULT_BRIGHTNESS, DEFAULT_GAMMA, DEFAULT_NEGATIVE_CEILING, DEFAULT_QUANTIZE_LEVELS,
    DEFAULT_SOLARIZE_FACTOR, MAX_GAUSSIAN_WINDOW, MAX_MEDIAN_WINDOW, MAX_SOLARIZE_FACTOR,
};
use crate::point::{
    binarize, brightness_lut, contrast_decrease_lut, contrast_increase_lut, gamma_lut, grayscale,
    negative_lut, quantize_lut, solarize_lut,
};
use crate::rows::ApplyOptions;

/// One image operation and its parameters.
///
/// Serialized with an internal `kind` tag:
/// `{"kind": "brightness", "delta": 50}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformKind {
    /// Luma to R, G and B.
    Grayscale,
    /// Invert channels at or above `ceiling`.
    Negative { ceiling: u8 },
    /// Add `delta` to every channel.
    Brightness { delta: u8 },
    /// Black below `threshold` luma, white otherwise.
    Binarize { threshold: u8 },
    /// Stretch `[low, high]` to the full range.
    ContrastIncrease { low: u8, high: u8 },
    /// Compress the full range into `[low, high]`.
    ContrastDecrease { low: u8, high: u8 },
    /// Power-law mapping, `0 < gamma <= 255`.
    Gamma { gamma: f64 },
    /// Reduce each channel to `levels` bands.
    Quantize { levels: u8 },
    /// Parabolic solarization, `0 <= factor <= 0.05`.
    Solarize { factor: f64 },
    LowPass { variant: LowPass },
    HighPass { variant: HighPass },
    /// Binomial blur with an odd `window` up to 31.
    GaussianBlur { window: u32 },
    /// Per-channel median over an odd `window`.
    Median { window: u32 },
    EdgeEnhance,
    Shift { direction: ShiftDirection },
    Emboss { direction: EmbossDirection },
    Kirsch,
    Prewitt,
    Sobel,
    Roberts,
}

impl TransformKind {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Grayscale => "grayscale",
            TransformKind::Negative { .. } => "negative",
            TransformKind::Brightness { .. } => "brightness",
            TransformKind::Binarize { .. } => "binarize",
            TransformKind::ContrastIncrease { .. } => "contrast_increase",
            TransformKind::ContrastDecrease { .. } => "contrast_decrease",
            TransformKind::Gamma { .. } => "gamma",
            TransformKind::Quantize { .. } => "quantize",
            TransformKind::Solarize { .. } => "solarize",
            TransformKind::LowPass { .. } => "low_pass",
            TransformKind::HighPass { .. } => "high_pass",
            TransformKind::GaussianBlur { .. } => "gaussian_blur",
            TransformKind::Median { .. } => "median",
            TransformKind::EdgeEnhance => "edge_enhance",
            TransformKind::Shift { .. } => "shift",
            TransformKind::Emboss { .. } => "emboss",
            TransformKind::Kirsch => "kirsch",
            TransformKind::Prewitt => "prewitt",
            TransformKind::Sobel => "sobel",
            TransformKind::Roberts => "roberts",
        }
    }

    /// The kind named `name` with its dialog defaults, or `None` for
    /// kinds whose parameters have no sensible default.
    pub fn with_defaults(name: &str) -> Option<Self> {
        let kind = match name {
            "grayscale" => TransformKind::Grayscale,
            "negative" => TransformKind::Negative {
                ceiling: DEFAULT_NEGATIVE_CEILING,
            },
            "brightness" => TransformKind::Brightness {
                delta: DEFAULT_BRIGHTNESS,
            },
            "gamma" => TransformKind::Gamma {
                gamma: DEFAULT_GAMMA,
            },
            "quantize" => TransformKind::Quantize {
                levels: DEFAULT_QUANTIZE_LEVELS,
            },
            "solarize" => TransformKind::Solarize {
                factor: DEFAULT_SOLARIZE_FACTOR,
            },
            "edge_enhance" => TransformKind::EdgeEnhance,
            "kirsch" => TransformKind::Kirsch,
            "prewitt" => TransformKind::Prewitt,
            "sobel" => TransformKind::Sobel,
            "roberts" => TransformKind::Roberts,
            _ => return None,
        };
        Some(kind)
    }

    /// Check every parameter without touching pixels.
    pub fn validate(&self) -> Result<(), ParamError> {
        match *self {
            TransformKind::ContrastIncrease { low, high }
            | TransformKind::ContrastDecrease { low, high } => check_contrast_range(low, high),
            TransformKind::Gamma { gamma } => check_gamma(gamma),
            TransformKind::Quantize { levels } => {
                check_range("quantization levels", levels as f64, 1.0, 255.0)
            }
            TransformKind::Solarize { factor } => {
                check_range("solarization factor", factor, 0.0, MAX_SOLARIZE_FACTOR)
            }
            TransformKind::GaussianBlur { window } => {
                window_radius(window, MAX_GAUSSIAN_WINDOW).map(|_| ())
            }
            TransformKind::Median { window } => {
                window_radius(window, MAX_MEDIAN_WINDOW).map(|_| ())
            }
            _ => Ok(()),
        }
    }
}

/// Run `kind` on `src`, producing a new buffer.
///
/// # Arguments
/// * `src` - Source buffer; never modified
/// * `kind` - Operation and parameters
///
/// # Errors
/// [`TransformError::InvalidParameter`] if a parameter is out of range.
pub fn apply(src: &PixelBuffer, kind: &TransformKind) -> Result<PixelBuffer, TransformError> {
    apply_with(src, kind, &ApplyOptions::default())
}

/// [`apply`] with execution options such as a cancel token.
pub fn apply_with(
    src: &PixelBuffer,
    kind: &TransformKind,
    options: &ApplyOptions,
) -> Result<PixelBuffer, TransformError> {
    if let Err(e) = kind.validate() {
        log::warn!("rejected {}: {}", kind.name(), e);
        return Err(e.into());
    }
    log::debug!(
        "applying {} to {}x{} buffer",
        kind.name(),
        src.width(),
        src.height()
    );

    match *kind {
        TransformKind::Grayscale => grayscale(src, options),
        TransformKind::Negative { ceiling } => negative_lut(ceiling).apply(src, options),
        TransformKind::Brightness { delta } => brightness_lut(delta).apply(src, options),
        TransformKind::Binarize { threshold } => binarize(src, threshold, options),
        TransformKind::ContrastIncrease { low, high } => {
            contrast_increase_lut(low, high)?.apply(src, options)
        }
        TransformKind::ContrastDecrease { low, high } => {
            contrast_decrease_lut(low, high)?.apply(src, options)
        }
        TransformKind::Gamma { gamma } => gamma_lut(gamma)?.apply(src, options),
        TransformKind::Quantize { levels } => quantize_lut(levels)?.apply(src, options),
        TransformKind::Solarize { factor } => solarize_lut(factor)?.apply(src, options),
        TransformKind::LowPass { variant } => {
            convolve(src, &variant.kernel(), Sampling::Color, options)
        }
        TransformKind::HighPass { variant } => {
            convolve(src, &variant.kernel(), Sampling::Color, options)
        }
        TransformKind::GaussianBlur { window } => {
            convolve(src, &gaussian_kernel(window)?, Sampling::Color, options)
        }
        TransformKind::Median { window } => median(src, window, options),
        TransformKind::EdgeEnhance => {
            convolve(src, &edge_enhance_kernel(), Sampling::Luma, options)
        }
        TransformKind::Shift { direction } => {
            convolve(src, &direction.kernel(), Sampling::Luma, options)
        }
        TransformKind::Emboss { direction } => {
            convolve(src, &direction.kernel(), Sampling::Luma, options)
        }
        TransformKind::Kirsch => convolve_bank(
            src,
            &KernelBank::kirsch(),
            Combiner::MaxAbs,
            Sampling::Luma,
            options,
        ),
        TransformKind::Prewitt => convolve_bank(
            src,
            &KernelBank::prewitt(),
            Combiner::MaxAbs,
            Sampling::Luma,
            options,
        ),
        TransformKind::Sobel => convolve_bank(
            src,
            &KernelBank::sobel(),
            Combiner::Euclidean,
            Sampling::Luma,
            options,
        ),
        TransformKind::Roberts => roberts(src, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::CancelToken;

    fn gradient(w: u32, h: u32) -> PixelBuffer {
        let pixels = (0..w * h)
            .flat_map(|i| {
                let v = (i * 7 % 256) as u8;
                [v, v / 2, 255 - v, 200]
            })
            .collect();
        PixelBuffer::from_raw(w, h, pixels).unwrap()
    }

    fn every_kind() -> Vec<TransformKind> {
        vec![
            TransformKind::Grayscale,
            TransformKind::Negative { ceiling: 0 },
            TransformKind::Brightness { delta: 50 },
            TransformKind::Binarize { threshold: 128 },
            TransformKind::ContrastIncrease { low: 50, high: 200 },
            TransformKind::ContrastDecrease { low: 50, high: 200 },
            TransformKind::Gamma { gamma: 0.5 },
            TransformKind::Quantize { levels: 4 },
            TransformKind::Solarize { factor: 4.0 / 255.0 },
            TransformKind::LowPass { variant: LowPass::Pyramidal },
            TransformKind::HighPass { variant: HighPass::Cross },
            TransformKind::GaussianBlur { window: 5 },
            TransformKind::Median { window: 3 },
            TransformKind::EdgeEnhance,
            TransformKind::Shift { direction: ShiftDirection::AntiDiagonal },
            TransformKind::Emboss { direction: EmbossDirection::Out },
            TransformKind::Kirsch,
            TransformKind::Prewitt,
            TransformKind::Sobel,
            TransformKind::Roberts,
        ]
    }

    #[test]
    fn test_every_kind_keeps_dimensions() {
        let src = gradient(9, 7);
        for kind in every_kind() {
            let out = apply(&src, &kind).unwrap();
            assert_eq!((out.width(), out.height()), (9, 7), "{}", kind.name());
        }
    }

    #[test]
    fn test_sequential_rows_give_same_output() {
        let src = gradient(17, 12);
        let in_order = ApplyOptions::new().sequential();
        for kind in every_kind() {
            let default = apply(&src, &kind).unwrap();
            let sequential = apply_with(&src, &kind, &in_order).unwrap();
            assert_eq!(default, sequential, "{}", kind.name());
        }
    }

    #[test]
    fn test_defaults_are_valid_and_named() {
        for name in ["grayscale", "negative", "brightness", "gamma", "quantize", "solarize", "sobel"] {
            let kind = TransformKind::with_defaults(name).unwrap();
            assert_eq!(kind.name(), name);
            assert!(kind.validate().is_ok());
        }
        assert_eq!(TransformKind::with_defaults("median"), None);
    }

    #[test]
    fn test_default_brightness_is_identity() {
        let src = gradient(5, 5);
        let kind = TransformKind::with_defaults("brightness").unwrap();
        assert_eq!(apply(&src, &kind).unwrap(), src);
    }

    #[test]
    fn test_brightness_example() {
        let src = PixelBuffer::filled(1, 1, [200, 10, 5, 255]);
        let out = apply(&src, &TransformKind::Brightness { delta: 50 }).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), [250, 60, 55, 255]);
    }

    #[test]
    fn test_contrast_increase_example() {
        let pixels = [50, 50, 50, 255, 200, 200, 200, 255].to_vec();
        let src = PixelBuffer::from_raw(2, 1, pixels).unwrap();
        let out = apply(&src, &TransformKind::ContrastIncrease { low: 50, high: 200 }).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), [0, 0, 0, 255]);
        assert_eq!(out.get(1, 0).unwrap(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_sobel_example() {
        let src = PixelBuffer::filled(3, 3, [128, 128, 128, 255]);
        let out = apply(&src, &TransformKind::Sobel).unwrap();
        assert_eq!(out.get(1, 1).unwrap(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_edge_operators_are_monochrome() {
        let src = gradient(6, 6);
        for kind in [
            TransformKind::Kirsch,
            TransformKind::Prewitt,
            TransformKind::Sobel,
            TransformKind::EdgeEnhance,
            TransformKind::Emboss { direction: EmbossDirection::In },
        ] {
            let out = apply(&src, &kind).unwrap();
            let [r, g, b, a] = out.get(2, 2).unwrap();
            assert!(r == g && g == b, "{}", kind.name());
            assert_eq!(a, 255);
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let src = gradient(4, 4);
        let bad = [
            TransformKind::ContrastIncrease { low: 200, high: 50 },
            TransformKind::ContrastDecrease { low: 9, high: 9 },
            TransformKind::Gamma { gamma: 0.0 },
            TransformKind::Gamma { gamma: 300.0 },
            TransformKind::Quantize { levels: 0 },
            TransformKind::Solarize { factor: 0.1 },
            TransformKind::GaussianBlur { window: 4 },
            TransformKind::GaussianBlur { window: 33 },
            TransformKind::Median { window: 2 },
        ];
        for kind in bad {
            assert!(kind.validate().is_err(), "{:?}", kind);
            assert!(
                matches!(apply(&src, &kind), Err(TransformError::InvalidParameter(_))),
                "{:?}",
                kind
            );
        }
    }

    #[test]
    fn test_source_untouched() {
        let src = gradient(8, 8);
        let copy = src.clone();
        for kind in every_kind() {
            let _ = apply(&src, &kind).unwrap();
        }
        assert_eq!(src, copy);
    }

    #[test]
    fn test_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        let options = ApplyOptions::new().with_cancel(token);
        let src = gradient(8, 8);
        for kind in every_kind() {
            assert_eq!(
                apply_with(&src, &kind, &options),
                Err(TransformError::Cancelled),
                "{}",
                kind.name()
            );
        }
    }
}
