//! # Recommendation Service
//!
//! Async request layer around the recommendation engine:
//! 1. Load the artifacts once, off the async runtime
//! 2. Share one engine (behind an `Arc`) across every request
//! 3. Run each lookup on the blocking pool and time it
//!
//! Requests never mutate shared state, so any number can be in flight and
//! dropping one simply discards its result.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, info, instrument};

use data_loader::{DataIndex, DataLoadError};
use recommender::{RecommendError, Recommendation, RecommendationEngine};

/// Errors surfaced by the service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Artifacts could not be loaded; the service never became ready
    #[error("Failed to load similarity artifacts: {0}")]
    Load(#[from] DataLoadError),

    /// The request itself was rejected (unknown title, bad k)
    #[error(transparent)]
    Recommend(#[from] RecommendError),

    /// The blocking task panicked or was cancelled
    #[error("Recommendation task failed: {0}")]
    Task(#[from] JoinError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Shareable front door to the engine; clones are cheap
#[derive(Clone)]
pub struct RecommendationService {
    engine: RecommendationEngine,
}

impl RecommendationService {
    /// Wrap already loaded artifacts
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self::with_engine(RecommendationEngine::new(data_index))
    }

    /// Wrap a pre-configured engine
    pub fn with_engine(engine: RecommendationEngine) -> Self {
        Self { engine }
    }

    /// Load artifacts from `data_dir` and build the service.
    ///
    /// Parsing runs on the blocking pool so the runtime stays responsive.
    /// Any failure here is a startup failure.
    pub async fn load(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let start = Instant::now();

        let data_index =
            tokio::task::spawn_blocking(move || DataIndex::load_from_files(&data_dir)).await??;

        let (movies, dim) = data_index.counts();
        info!(
            "Loaded {} movies ({}x{} matrix) in {:.2?}",
            movies,
            dim,
            dim,
            start.elapsed()
        );
        Ok(Self::new(Arc::new(data_index)))
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Main entry point: recommend `k` movies similar to `title`
    ///
    /// # Returns
    /// Recommendations sorted by similarity (highest first)
    #[instrument(skip(self))]
    pub async fn get_recommendations(&self, title: &str, k: i64) -> Result<Vec<Recommendation>> {
        let start_time = Instant::now();

        let engine = self.engine.clone();
        let owned_title = title.to_string();
        let recommendations =
            tokio::task::spawn_blocking(move || engine.recommend(&owned_title, k)).await??;

        debug!(
            "Recommended {} movies for {:?} in {:.2?}",
            recommendations.len(),
            title,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Same as `get_recommendations` with the engine's default k
    pub async fn get_default_recommendations(&self, title: &str) -> Result<Vec<Recommendation>> {
        let engine = self.engine.clone();
        let owned_title = title.to_string();
        let recommendations =
            tokio::task::spawn_blocking(move || engine.recommend_default(&owned_title)).await??;
        Ok(recommendations)
    }
}
