use alloc::boxed::Box;

use thiserror::Error;

use crate::ViewKind;

/// Error type a host view factory may return.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Errors raised while rebuilding geometry or reconciling views.
///
/// A failed operation leaves the engine in the state it had before the call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScrollerError {
    /// The delegate reported a negative or non-finite item size.
    #[error("item {index} reported an invalid size ({size}); sizes must be finite and >= 0")]
    InvalidItemSize { index: usize, size: f32 },

    /// The configured inter-item spacing is negative or non-finite.
    #[error("invalid spacing ({spacing}); spacing must be finite and >= 0")]
    InvalidSpacing { spacing: f32 },

    /// The factory returned a view whose kind differs from the one the delegate declared.
    #[error("view for data index {data_index} has kind {found:?}, expected {expected:?}")]
    ViewKindMismatch {
        data_index: usize,
        expected: ViewKind,
        found: ViewKind,
    },

    /// The host's view factory failed.
    #[error("view factory failed for data index {data_index} (view index {view_index})")]
    ViewFactory {
        data_index: usize,
        view_index: usize,
        #[source]
        source: BoxError,
    },
}
