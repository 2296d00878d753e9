//! Parameter validation and parsing of raw user input.
//!
//! Every transform checks its parameters here before any pixel is touched.
//! The `parse_*` helpers turn text typed into a dialog into validated
//! numbers, so a UI shell can reject bad input with the same messages
//! the engine uses.

use thiserror::Error;

/// Largest Gaussian window: radius 15.
pub const MAX_GAUSSIAN_WINDOW: u32 = 31;

/// Largest median window.
pub const MAX_MEDIAN_WINDOW: u32 = 255;

/// Upper bound for the solarization coefficient.
pub const MAX_SOLARIZE_FACTOR: f64 = 0.05;

/// Dialog defaults.
pub const DEFAULT_BRIGHTNESS: u8 = 0;
pub const DEFAULT_NEGATIVE_CEILING: u8 = 0;
pub const DEFAULT_GAMMA: f64 = 1.0;
pub const DEFAULT_QUANTIZE_LEVELS: u8 = 1;
pub const DEFAULT_SOLARIZE_FACTOR: f64 = 4.0 / 255.0;

/// Rejected parameter values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Input text is not a number.
    #[error("{name}: '{text}' is not a valid number")]
    InvalidNumber { name: &'static str, text: String },

    /// Value outside its allowed range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Contrast break-points not strictly increasing.
    #[error("Contrast range requires low < high, got low={low} high={high}")]
    InvertedRange { low: u8, high: u8 },

    /// Window sizes must be odd so the window has a center pixel.
    #[error("Window size must be odd, got {0}")]
    EvenWindow(u32),

    /// A fraction with a zero denominator.
    #[error("{name}: division by zero in '{text}'")]
    ZeroDivisor { name: &'static str, text: String },

    /// Kernel weights do not form a square of the declared size.
    #[error("Kernel of size {size} needs {expected} weights, got {actual}")]
    KernelShape {
        size: usize,
        expected: usize,
        actual: usize,
    },
}

/// Check that `value` lies in `[min, max]`.
pub fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), ParamError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ParamError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Check contrast break-points: `low < high`.
pub fn check_contrast_range(low: u8, high: u8) -> Result<(), ParamError> {
    if low >= high {
        return Err(ParamError::InvertedRange { low, high });
    }
    Ok(())
}

/// Check a gamma exponent: `0 < gamma <= 255`.
pub fn check_gamma(gamma: f64) -> Result<(), ParamError> {
    if !gamma.is_finite() || gamma <= 0.0 || gamma > 255.0 {
        return Err(ParamError::OutOfRange {
            name: "gamma",
            value: gamma,
            min: 0.0,
            max: 255.0,
        });
    }
    Ok(())
}

/// Check an odd window size no larger than `max`, returning its radius.
pub fn window_radius(size: u32, max: u32) -> Result<usize, ParamError> {
    if size % 2 == 0 {
        return Err(ParamError::EvenWindow(size));
    }
    check_range("window size", size as f64, 1.0, max as f64)?;
    Ok((size / 2) as usize)
}

/// Parse a decimal integer in `[min, max]`.
pub fn parse_integer(name: &'static str, text: &str, min: i64, max: i64) -> Result<i64, ParamError> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| ParamError::InvalidNumber {
            name,
            text: text.to_string(),
        })?;
    check_range(name, value as f64, min as f64, max as f64)?;
    Ok(value)
}

/// Parse an 8-bit level (threshold, ceiling, brightness delta).
pub fn parse_level(name: &'static str, text: &str) -> Result<u8, ParamError> {
    parse_integer(name, text, 0, 255).map(|v| v as u8)
}

/// Parse a real number in `[min, max]`.
pub fn parse_real(name: &'static str, text: &str, min: f64, max: f64) -> Result<f64, ParamError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| ParamError::InvalidNumber {
            name,
            text: text.to_string(),
        })?;
    check_range(name, value, min, max)?;
    Ok(value)
}

/// Parse a gamma exponent.
///
/// Accepts either a decimal integer (`"2"`) or a fraction whose numerator
/// is a single digit (`"1/3"`). The result must satisfy `0 < gamma <= 255`.
pub fn parse_gamma(text: &str) -> Result<f64, ParamError> {
    let text = text.trim();
    let invalid = || ParamError::InvalidNumber {
        name: "gamma",
        text: text.to_string(),
    };

    let gamma = match text.split_once('/') {
        Some((num, den)) => {
            if num.len() != 1 {
                return Err(invalid());
            }
            let num: u32 = num.parse().map_err(|_| invalid())?;
            let den: u32 = den.parse().map_err(|_| invalid())?;
            if den == 0 {
                return Err(ParamError::ZeroDivisor {
                    name: "gamma",
                    text: text.to_string(),
                });
            }
            num as f64 / den as f64
        }
        None => text.parse::<i64>().map_err(|_| invalid())? as f64,
    };

    check_gamma(gamma)?;
    Ok(gamma)
}

/// Parse an odd window size for the median or Gaussian filters.
pub fn parse_window(text: &str, max: u32) -> Result<u32, ParamError> {
    let size = parse_integer("window size", text, 1, max as i64)? as u32;
    window_radius(size, max)?;
    Ok(size)
}
