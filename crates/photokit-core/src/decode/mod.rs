//! Turning encoded image files into [`PixelBuffer`](crate::PixelBuffer)s.
//!
//! The format is sniffed from the leading bytes, so callers need not know
//! whether they hold a JPEG or a PNG. EXIF orientation, when present, is
//! applied so the buffer is upright.

mod read;
mod types;

pub use read::{decode_image, get_orientation};
pub use types::{DecodeError, Orientation};
