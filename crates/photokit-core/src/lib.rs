//! Photokit Core - RGBA pixel transforms and convolution filters
//!
//! This crate provides the image operations behind the Photokit editor:
//! point transforms (brightness, contrast, gamma and friends), convolution
//! with fixed and Gaussian kernels, median filtering, directional edge
//! detectors, histograms and image decoding.
//!
//! Every operation takes a source [`PixelBuffer`] by reference and returns
//! a new one, so a failed or cancelled transform never disturbs the image
//! being displayed. [`apply`] is the single entry point; [`TransformKind`]
//! names the operation together with its parameters.
//!
//! # Example
//!
//! ```ignore
//! use photokit_core::{apply, decode_image, TransformKind};
//!
//! let image = decode_image(&std::fs::read("photo.png")?)?;
//! let edges = apply(&image, &TransformKind::Sobel)?;
//! ```

pub mod apply;
pub mod buffer;
pub mod convolve;
pub mod decode;
pub mod error;
pub mod gradient;
pub mod histogram;
pub mod kernel;
pub mod luminance;
pub mod median;
pub mod params;
pub mod point;
pub mod rows;
pub mod session;

pub use apply::{apply, apply_with, TransformKind};
pub use buffer::{BufferError, PixelBuffer, Rgba};
pub use convolve::{convolve, convolve_bank, Sampling};
pub use decode::{decode_image, DecodeError, Orientation};
pub use error::TransformError;
pub use gradient::{roberts, Combiner};
pub use histogram::{compute_histogram, render_histogram, Histogram};
pub use kernel::{
    gaussian_kernel, EmbossDirection, HighPass, Kernel, KernelBank, LowPass, Response,
    ShiftDirection,
};
pub use median::median;
pub use params::ParamError;
pub use point::ChannelLut;
pub use rows::{ApplyOptions, CancelToken};
pub use session::EditSession;
