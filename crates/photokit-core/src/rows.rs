//! Row scheduling for filters.
//!
//! Every filter writes a freshly allocated output buffer one row at a time,
//! reading only from its source. Rows are independent, so with the
//! `parallel` feature they are handed to rayon; without it they run in
//! order on the calling thread. Either way a [`CancelToken`] is checked
//! before each row.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::TransformError;

/// Shared flag an interactive host raises to stop a running transform.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every transform holding this token to stop at the next row.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Execution options for a single transform invocation.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    cancel: Option<CancelToken>,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    sequential: bool,
}

impl ApplyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop at row granularity once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Run rows in order on the calling thread even when built with
    /// `parallel`. Output is identical either way.
    pub fn sequential(mut self) -> Self {
        self.sequential = true;
        self
    }

    fn check(&self) -> Result<(), TransformError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(TransformError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Run `f(y, row)` over every row of `out`.
pub(crate) fn for_each_row<F>(
    out: &mut PixelBuffer,
    options: &ApplyOptions,
    f: F,
) -> Result<(), TransformError>
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    options.check()?;
    if out.is_empty() {
        return Ok(());
    }
    let row_len = out.row_len();

    #[cfg(feature = "parallel")]
    {
        if !options.sequential {
            return out
                .as_raw_mut()
                .par_chunks_mut(row_len)
                .enumerate()
                .try_for_each(|(y, row)| {
                    options.check()?;
                    f(y, row);
                    Ok(())
                });
        }
    }

    for (y, row) in out.as_raw_mut().chunks_mut(row_len).enumerate() {
        options.check()?;
        f(y, row);
    }
    Ok(())
}

/// Fold every row of `src` into a partial result, then merge the partials.
pub(crate) fn fold_rows<T, I, F, M>(src: &PixelBuffer, init: I, fold: F, merge: M) -> T
where
    T: Send,
    I: Fn() -> T + Send + Sync,
    F: Fn(T, &[u8]) -> T + Send + Sync,
    M: Fn(T, T) -> T + Send + Sync,
{
    if src.is_empty() {
        return init();
    }
    let row_len = src.row_len();

    #[cfg(feature = "parallel")]
    {
        src.as_raw()
            .par_chunks(row_len)
            .fold(&init, &fold)
            .reduce(&init, &merge)
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = &merge;
        src.as_raw().chunks(row_len).fold(init(), fold)
    }
}
