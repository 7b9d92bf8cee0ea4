//! # Recommender Crate
//!
//! Content-based "more like this" recommendations over a precomputed
//! similarity matrix.
//!
//! Given a movie title, the engine returns the k catalog entries with the
//! highest similarity scores, most similar first. The selected movie itself
//! is never part of the result, and equal scores keep catalog order, so the
//! output is fully deterministic.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use recommender::RecommendationEngine;
//! use std::sync::Arc;
//!
//! let data_index = Arc::new(DataIndex::load_from_files("data/similarity".as_ref())?);
//! let engine = RecommendationEngine::new(data_index);
//!
//! for rec in engine.recommend("Avatar", 5)? {
//!     println!("{} ({:.3})", rec.title, rec.score);
//! }
//! ```
//!
//! ## Errors
//!
//! - `RecommendError::NotFound`: the title is not in the catalog
//! - `RecommendError::InvalidArgument`: `k` is zero or negative

// Public modules
pub mod error;
pub mod types;
pub mod engine;
pub mod search;

// Re-export commonly used types
pub use engine::{DEFAULT_K, RecommendationEngine};
pub use error::{RecommendError, Result};
pub use types::Recommendation;
