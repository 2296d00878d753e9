//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@photokit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use photokit_core::decode;
use wasm_bindgen::prelude::*;

use crate::types::JsPixelBuffer;

/// Decode a JPEG or PNG file into an RGBA image.
///
/// EXIF orientation is applied, so the result is upright.
///
/// # Errors
///
/// Returns an error string if the format is unknown or the data is
/// corrupted or truncated.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_image(bytes)
        .map(JsPixelBuffer::from_core)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
