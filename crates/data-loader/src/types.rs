//! Core domain types for the precomputed similarity artifacts.
//!
//! - `Movie`: one catalog record, addressed by its position
//! - `SimilarityMatrix`: dense N×N scores aligned with catalog positions
//! - `DataIndex`: the immutable in-memory store the engine reads from

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DataLoadError, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable external identifier for a movie (TMDB id in the shipped artifacts)
pub type MovieId = u32;

/// Position of a movie in the catalog, also its row/column in the matrix
pub type CatalogIndex = usize;

// =============================================================================
// Movie
// =============================================================================

/// A catalog entry.
///
/// The title doubles as the lookup key for user selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

// =============================================================================
// SimilarityMatrix
// =============================================================================

/// Square matrix of pairwise similarity scores, stored row-major.
///
/// Entry `(i, j)` is the similarity between catalog positions `i` and `j`;
/// higher means more similar. Symmetry is assumed but not checked.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from nested rows.
    ///
    /// Fails if any row length differs from the number of rows or if any
    /// score is NaN or infinite.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dim = rows.len();
        let mut scores = Vec::with_capacity(dim * dim);

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(DataLoadError::RaggedRow {
                    row: row_idx,
                    expected: dim,
                    found: row.len(),
                });
            }
            if let Some((col_idx, value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(DataLoadError::InvalidValue {
                    field: format!("similarity[{}][{}]", row_idx, col_idx),
                    value: value.to_string(),
                });
            }
            scores.extend(row);
        }

        Ok(Self { dim, scores })
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Scores of one catalog entry against every other entry.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn row(&self, index: CatalogIndex) -> Option<&[f32]> {
        if index >= self.dim {
            return None;
        }
        let start = index * self.dim;
        Some(&self.scores[start..start + self.dim])
    }

    /// Single score lookup
    pub fn get(&self, i: CatalogIndex, j: CatalogIndex) -> Option<f32> {
        self.row(i).and_then(|row| row.get(j).copied())
    }
}

// =============================================================================
// DataIndex - The In-Memory Store
// =============================================================================

/// Catalog plus similarity matrix, with lookup indices.
///
/// Built once at startup (see `index.rs`) and never mutated afterwards, so it
/// can be shared behind an `Arc` by any number of readers.
#[derive(Debug)]
pub struct DataIndex {
    /// Catalog in artifact order; position == matrix row
    pub(crate) movies: Vec<Movie>,
    pub(crate) similarity: SimilarityMatrix,

    /// Title -> first catalog position carrying that title
    pub(crate) title_index: HashMap<String, CatalogIndex>,
    /// Id -> catalog position
    pub(crate) id_index: HashMap<MovieId, CatalogIndex>,

    /// Catalog entries whose title was already taken by an earlier entry
    pub(crate) duplicate_titles: usize,
}

impl DataIndex {
    /// Whole catalog in position order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Movie at a catalog position
    pub fn get_movie_at(&self, index: CatalogIndex) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Movie by its external id
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.id_index.get(&id).map(|&idx| &self.movies[idx])
    }

    /// Catalog position of a title.
    ///
    /// If several entries share the title, the first one wins.
    pub fn index_of_title(&self, title: &str) -> Option<CatalogIndex> {
        self.title_index.get(title).copied()
    }

    /// Catalog position of an id
    pub fn index_of_id(&self, id: MovieId) -> Option<CatalogIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Number of entries shadowed by an earlier entry with the same title
    pub fn duplicate_titles(&self) -> usize {
        self.duplicate_titles
    }

    /// Catalog size and matrix dimension, for logging
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.similarity.dim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_row_access() {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.2, 0.3],
            vec![0.2, 1.0, 0.4],
            vec![0.3, 0.4, 1.0],
        ])
        .unwrap();

        assert_eq!(matrix.dim(), 3);
        assert_eq!(matrix.row(1), Some(&[0.2, 1.0, 0.4][..]));
        assert_eq!(matrix.get(2, 1), Some(0.4));
        assert!(matrix.row(3).is_none());
        assert!(matrix.get(0, 3).is_none());
    }

    #[test]
    fn test_matrix_rejects_ragged_rows() {
        let err = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_matrix_rejects_non_finite_scores() {
        let err =
            SimilarityMatrix::from_rows(vec![vec![1.0, f32::NAN], vec![0.5, 1.0]]).unwrap_err();
        match err {
            DataLoadError::InvalidValue { field, .. } => assert_eq!(field, "similarity[0][1]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = SimilarityMatrix::from_rows(Vec::new()).unwrap();
        assert_eq!(matrix.dim(), 0);
        assert!(matrix.row(0).is_none());
    }
}
