//! Service crate for the similar-movie recommender.
//!
//! Wraps the engine in an async, cloneable service so many requests can
//! share one loaded catalog.

pub mod service;

pub use service::{RecommendationService, Result, ServiceError};
