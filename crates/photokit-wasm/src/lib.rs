//! Photokit WASM - WebAssembly bindings for Photokit
//!
//! This crate exposes the photokit-core transform engine to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - `JsPixelBuffer`, the RGBA image wrapper
//! - `decode` - JPEG/PNG decoding
//! - `transform` - `apply_transform` and the `JsEditSession`
//! - `histogram` - Histogram computation and chart rendering
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@photokit/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = JsEditSession.from_bytes(bytes);
//! session.apply({ kind: "gaussian_blur", window: 5 });
//! const image = session.current();
//! ctx.putImageData(
//!   new ImageData(new Uint8ClampedArray(image.pixels()), image.width),
//!   0, 0,
//! );
//! ```

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

mod decode;
mod histogram;
mod transform;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use histogram::{compute_histogram, render_histogram, JsHistogram};
pub use transform::{
    apply_transform, default_transform, parse_gamma, parse_window, JsEditSession,
};
pub use types::JsPixelBuffer;

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Initialize the WASM module (called automatically on load)
///
/// Installs the console logger at `Info`; see [`set_log_level`].
#[wasm_bindgen(start)]
pub fn init() {
    // a second init keeps the first logger
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Change console verbosity: "error", "warn", "info", "debug", "trace" or "off".
///
/// Unknown names leave the level unchanged and return false.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
