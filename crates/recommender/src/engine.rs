//! Similarity-based recommendation engine.
//!
//! ## Algorithm
//! 1. Resolve the selected title to its catalog position (first match)
//! 2. Read that row of the similarity matrix as (position, score) pairs
//! 3. Drop the self-match
//! 4. Order by score descending; equal scores keep catalog order
//! 5. Keep the first k and map positions back to catalog records
//!
//! The engine only reads the shared `DataIndex`, so one instance (or any
//! number of cheap clones) can serve concurrent callers without locking.

use crate::error::{RecommendError, Result};
use crate::types::Recommendation;
use data_loader::{CatalogIndex, DataIndex, Movie};
use std::cmp::Ordering;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of recommendations returned when the caller doesn't ask for a count
pub const DEFAULT_K: usize = 5;

/// Top-k lookup over a precomputed similarity matrix
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    /// Shared reference to the loaded artifacts (read-only, so no Mutex needed)
    data_index: Arc<DataIndex>,

    /// Result count used by `recommend_default`
    default_k: NonZeroUsize,
}

impl RecommendationEngine {
    /// Create an engine over loaded artifacts
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self {
            data_index,
            default_k: NonZeroUsize::new(DEFAULT_K).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Configure the default number of recommendations (default: 5)
    pub fn with_default_k(mut self, k: NonZeroUsize) -> Self {
        self.default_k = k;
        self
    }

    pub fn default_k(&self) -> usize {
        self.default_k.get()
    }

    pub fn data_index(&self) -> &Arc<DataIndex> {
        &self.data_index
    }

    /// Number of movies the engine can recommend from
    pub fn catalog_size(&self) -> usize {
        self.data_index.movies().len()
    }

    /// Exact title lookup; the first catalog entry wins on duplicates
    pub fn find_movie(&self, title: &str) -> Option<(CatalogIndex, &Movie)> {
        let position = self.data_index.index_of_title(title)?;
        self.data_index
            .get_movie_at(position)
            .map(|movie| (position, movie))
    }

    /// Recommend the `k` movies most similar to `selected_title`.
    ///
    /// Returns at most `min(k, N - 1)` results, most similar first, never
    /// including the selected movie itself.
    ///
    /// # Errors
    /// * `InvalidArgument` if `k <= 0`
    /// * `NotFound` if no catalog entry has exactly this title
    #[instrument(skip(self))]
    pub fn recommend(&self, selected_title: &str, k: i64) -> Result<Vec<Recommendation>> {
        if k <= 0 {
            return Err(RecommendError::InvalidArgument { k });
        }
        // Saturate on targets where usize is narrower than i64
        let limit = usize::try_from(k).unwrap_or(usize::MAX);
        self.top_k(selected_title, limit)
    }

    /// `recommend` with the configured default count
    pub fn recommend_default(&self, selected_title: &str) -> Result<Vec<Recommendation>> {
        self.top_k(selected_title, self.default_k.get())
    }

    fn top_k(&self, selected_title: &str, limit: usize) -> Result<Vec<Recommendation>> {
        let (query, _) =
            self.find_movie(selected_title)
                .ok_or_else(|| RecommendError::NotFound {
                    title: selected_title.to_string(),
                })?;

        let row = self.data_index.similarity().row(query).unwrap_or(&[]);

        let mut ranked: Vec<(CatalogIndex, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(position, _)| position != query)
            .collect();

        // Partial selection first so large catalogs don't pay for a full sort.
        // Position breaks ties, which gives the same order as a stable sort.
        if limit < ranked.len() {
            ranked.select_nth_unstable_by(limit - 1, by_score_then_position);
            ranked.truncate(limit);
        }
        ranked.sort_by(by_score_then_position);

        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .filter_map(|(position, score)| {
                let movie = self.data_index.get_movie_at(position)?;
                Some(Recommendation::new(movie, score))
            })
            .collect();

        debug!(
            "Recommended {} movies for {:?} (query position {})",
            recommendations.len(),
            selected_title,
            query
        );
        Ok(recommendations)
    }
}

/// Score descending, then catalog position ascending
fn by_score_then_position(a: &(CatalogIndex, f32), b: &(CatalogIndex, f32)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}
