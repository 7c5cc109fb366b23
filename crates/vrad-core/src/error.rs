//! Core error type.
//!
//! Sub-crates define their own error enums; `vrad-sim` composes them into
//! `SimError` via `From` impls so error sites stay clean with `?`.

use thiserror::Error;

/// Errors raised while validating or consuming simulation parameters.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A user-supplied parameter is outside its accepted range.  Raised
    /// before the event loop starts; the run never begins.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name:   &'static str,
        reason: String,
    },
}

impl CoreError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        CoreError::InvalidParameter { name, reason: reason.into() }
    }
}

/// Shorthand result type for `vrad-core`.
pub type CoreResult<T> = Result<T, CoreError>;
