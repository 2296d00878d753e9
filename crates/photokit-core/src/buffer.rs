//! The RGBA pixel grid every transform reads and produces.
//!
//! Channels are stored interleaved in R, G, B, A order, row-major,
//! four bytes per pixel. A transform never writes into the buffer it
//! reads from: it clones or allocates a fresh `PixelBuffer` and returns it.

use thiserror::Error;

/// One pixel as `[r, g, b, a]`.
pub type Rgba = [u8; 4];

/// Bytes per pixel.
pub const CHANNELS: usize = 4;

/// Errors raised by the buffer's checked accessors and constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A coordinate fell outside `[0, width) x [0, height)`.
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Raw pixel data does not match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// A rectangular grid of 8-bit RGBA samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a transparent-black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; byte_len(width, height)],
        }
    }

    /// Allocate a buffer where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let count = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap raw RGBA bytes, checking the length against the dimensions.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BufferError> {
        let expected = byte_len(width, height);
        if pixels.len() != expected {
            return Err(BufferError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a PixelBuffer from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an `image::RgbaImage` for encoding or display.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The interleaved RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Bytes in one row.
    pub fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on a zero chunk size
        self.pixels.chunks_exact(self.row_len().max(1))
    }

    /// Read a pixel, failing when the coordinate is outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Result<Rgba, BufferError> {
        self.check(x, y)?;
        Ok(self.pixel(x as usize, y as usize))
    }

    /// Write a pixel. Values are stored as given; clamping is the caller's job.
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) -> Result<(), BufferError> {
        self.check(x, y)?;
        self.put_pixel(x as usize, y as usize, color);
        Ok(())
    }

    /// Unchecked read for loops that are bound-correct by construction.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Unchecked write, see [`PixelBuffer::pixel`].
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        let i = self.offset(x, y);
        self.pixels[i..i + CHANNELS].copy_from_slice(&color);
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width as usize && y < self.height as usize,
            "pixel ({}, {}) outside {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width as usize + x) * CHANNELS
    }

    fn check(&self, x: u32, y: u32) -> Result<(), BufferError> {
        if x >= self.width || y >= self.height {
            return Err(BufferError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * CHANNELS
}
