//! # Data Loader Crate
//!
//! Loads the precomputed artifacts behind the recommendation engine: the
//! movie catalog and the dense similarity matrix aligned with it.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, SimilarityMatrix, DataIndex)
//! - **parser**: Parse movies.dat and similarity.json
//! - **index**: Validate the two artifacts against each other and build lookups
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data/similarity"))?;
//!
//! let position = index.index_of_title("Avatar").unwrap();
//! let row = index.similarity().row(position).unwrap();
//! println!("{} scores for Avatar", row.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{MOVIES_FILE, SIMILARITY_FILE};
pub use types::{CatalogIndex, DataIndex, Movie, MovieId, SimilarityMatrix};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_index_creation() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        let index = DataIndex::from_parts(vec![Movie::new(1, "Solo")], matrix).unwrap();

        assert_eq!(index.counts(), (1, 1));
        assert_eq!(index.movies().len(), 1);
    }

    #[test]
    fn test_empty_queries() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        let index = DataIndex::from_parts(vec![Movie::new(1, "Solo")], matrix).unwrap();

        // Querying non-existent data should return None
        assert!(index.get_movie(999).is_none());
        assert!(index.get_movie_at(5).is_none());
        assert!(index.index_of_title("Nope").is_none());
        assert!(index.index_of_id(999).is_none());
    }
}
