//! WASM bindings for the transform dispatcher and the edit session.
//!
//! Transforms are described by plain JS objects tagged with `kind`, for
//! example `{ kind: "gamma", gamma: 0.5 }` or
//! `{ kind: "low_pass", variant: "pyramidal" }`.

use photokit_core::{apply, params, EditSession, TransformKind};
use wasm_bindgen::prelude::*;

use crate::histogram::JsHistogram;
use crate::types::JsPixelBuffer;

fn parse_kind(kind: JsValue) -> Result<TransformKind, JsValue> {
    serde_wasm_bindgen::from_value(kind).map_err(to_js)
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Apply one transform and return a new image; `image` is left as is.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bright = apply_transform(image, { kind: "brightness", delta: 50 });
/// const edges = apply_transform(image, { kind: "sobel" });
/// ```
#[wasm_bindgen]
pub fn apply_transform(image: &JsPixelBuffer, kind: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let kind = parse_kind(kind)?;
    apply(image.as_core(), &kind)
        .map(JsPixelBuffer::from_core)
        .map_err(to_js)
}

/// The transform named `name` with its dialog defaults, as a JS object.
///
/// Returns `undefined` for kinds that need an explicit parameter.
#[wasm_bindgen]
pub fn default_transform(name: &str) -> Result<JsValue, JsValue> {
    match TransformKind::with_defaults(name) {
        Some(kind) => serde_wasm_bindgen::to_value(&kind).map_err(to_js),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Parse gamma text typed by the user: an integer or a fraction like `"1/3"`.
#[wasm_bindgen]
pub fn parse_gamma(text: &str) -> Result<f64, JsValue> {
    params::parse_gamma(text).map_err(to_js)
}

/// Parse an odd window size for the median or Gaussian filter.
#[wasm_bindgen]
pub fn parse_window(text: &str, max: u32) -> Result<u32, JsValue> {
    params::parse_window(text, max).map_err(to_js)
}

/// The loaded image and the working copy it is edited into.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsPixelBuffer) -> JsEditSession {
        Self {
            inner: EditSession::new(image.as_core().clone()),
        }
    }

    /// Decode a JPEG or PNG file and start a session on it.
    pub fn from_bytes(bytes: &[u8]) -> Result<JsEditSession, JsValue> {
        let image = photokit_core::decode_image(bytes).map_err(to_js)?;
        Ok(Self {
            inner: EditSession::new(image),
        })
    }

    /// Apply a transform to the working copy. On error nothing changes.
    pub fn apply(&mut self, kind: JsValue) -> Result<(), JsValue> {
        let kind = parse_kind(kind)?;
        self.inner.apply(&kind).map(|_| ()).map_err(to_js)
    }

    /// Go back to the image as loaded.
    pub fn revert(&mut self) {
        self.inner.revert();
    }

    /// Copy of the working image.
    pub fn current(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_core(self.inner.current().clone())
    }

    /// Copy of the image as loaded.
    pub fn original(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_core(self.inner.original().clone())
    }

    #[wasm_bindgen(getter)]
    pub fn is_modified(&self) -> bool {
        self.inner.is_modified()
    }

    /// Histogram of the working image.
    pub fn histogram(&self) -> JsHistogram {
        JsHistogram::from_core(&self.inner.histogram())
    }
}
