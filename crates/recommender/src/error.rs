//! Per-request errors.
//!
//! Both variants are recoverable: the caller picks a fallback (an empty
//! result, a "did you mean" prompt) and the shared engine is untouched.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// No catalog entry has exactly this title
    #[error("Unknown movie title: {title:?}")]
    NotFound { title: String },

    /// Requested number of recommendations is zero or negative
    #[error("Number of recommendations must be positive, got {k}")]
    InvalidArgument { k: i64 },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
