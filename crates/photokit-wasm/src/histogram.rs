//! Histogram WASM bindings.

use photokit_core::histogram::{
    compute_histogram as compute_histogram_core, render_histogram as render_histogram_core,
    Histogram,
};
use wasm_bindgen::prelude::*;

use crate::types::JsPixelBuffer;

/// Intensity histogram accessible from JavaScript.
#[wasm_bindgen]
pub struct JsHistogram {
    counts: Vec<u32>,
    max_count: u32,
    has_highlight_clipping: bool,
    has_shadow_clipping: bool,
}

#[wasm_bindgen]
impl JsHistogram {
    /// Pixel count per level (256 bins) as a `Uint32Array`.
    pub fn counts(&self) -> Vec<u32> {
        self.counts.clone()
    }

    /// Largest bin, for scaling a chart.
    #[wasm_bindgen(getter)]
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    #[wasm_bindgen(getter)]
    pub fn has_highlight_clipping(&self) -> bool {
        self.has_highlight_clipping
    }

    #[wasm_bindgen(getter)]
    pub fn has_shadow_clipping(&self) -> bool {
        self.has_shadow_clipping
    }
}

impl JsHistogram {
    pub(crate) fn from_core(hist: &Histogram) -> Self {
        Self {
            counts: hist.counts.to_vec(),
            max_count: hist.max_count(),
            has_highlight_clipping: hist.has_highlight_clipping(),
            has_shadow_clipping: hist.has_shadow_clipping(),
        }
    }
}

/// Count the pixels of `image` per intensity level.
///
/// # Example (TypeScript)
/// ```typescript
/// const hist = compute_histogram(image);
/// const bins = hist.counts();   // Uint32Array[256]
/// const max = hist.max_count;
/// hist.free();
/// ```
#[wasm_bindgen]
pub fn compute_histogram(image: &JsPixelBuffer) -> JsHistogram {
    JsHistogram::from_core(&compute_histogram_core(image.as_core()))
}

/// Draw the histogram of `image` as a 512x400 white-on-black bar chart.
#[wasm_bindgen]
pub fn render_histogram(image: &JsPixelBuffer) -> JsPixelBuffer {
    let hist = compute_histogram_core(image.as_core());
    JsPixelBuffer::from_core(render_histogram_core(&hist))
}
