//! JavaScript wrapper around the core pixel buffer.

use photokit_core::PixelBuffer;
use wasm_bindgen::prelude::*;

/// An RGBA image held in WASM memory.
///
/// `pixels()` copies the data out as a `Uint8Array` in R, G, B, A order,
/// ready for `new ImageData(...)`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Wrap RGBA bytes.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA data, `width * height * 4` bytes, row-major
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::from_raw(width, height, pixels)
            .map(Self::from_core)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the pixel data (`width * height * 4`).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.as_raw().len()
    }

    /// RGBA pixel data as a `Uint8Array` (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_raw().to_vec()
    }

    /// Release WASM memory now instead of waiting for the finalizer.
    pub fn free(self) {}
}

impl JsPixelBuffer {
    pub(crate) fn from_core(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &PixelBuffer {
        &self.inner
    }
}
