//! Owned editing state: the loaded image and the working copy.

use crate::apply::{apply_with, TransformKind};
use crate::buffer::PixelBuffer;
use crate::error::TransformError;
use crate::histogram::{compute_histogram, Histogram};
use crate::rows::ApplyOptions;

/// The image as loaded plus the result of the edits applied so far.
///
/// Each transform reads `current` and, only if it succeeds, replaces it.
/// A rejected or cancelled transform leaves the session unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    original: PixelBuffer,
    current: PixelBuffer,
}

impl EditSession {
    pub fn new(original: PixelBuffer) -> Self {
        Self {
            current: original.clone(),
            original,
        }
    }

    /// Apply `kind` to the working copy.
    pub fn apply(&mut self, kind: &TransformKind) -> Result<&PixelBuffer, TransformError> {
        self.apply_with(kind, &ApplyOptions::default())
    }

    pub fn apply_with(
        &mut self,
        kind: &TransformKind,
        options: &ApplyOptions,
    ) -> Result<&PixelBuffer, TransformError> {
        self.current = apply_with(&self.current, kind, options)?;
        Ok(&self.current)
    }

    /// Throw away every edit.
    pub fn revert(&mut self) {
        self.current = self.original.clone();
    }

    pub fn current(&self) -> &PixelBuffer {
        &self.current
    }

    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    /// True once an applied transform changed the working copy.
    pub fn is_modified(&self) -> bool {
        self.current != self.original
    }

    /// Histogram of the working copy.
    pub fn histogram(&self) -> Histogram {
        compute_histogram(&self.current)
    }
}
