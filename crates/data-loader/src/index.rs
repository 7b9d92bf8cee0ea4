//! DataIndex building and validation.
//!
//! - Parse the catalog and the similarity matrix (in parallel)
//! - Check that they line up position for position
//! - Build the title and id lookup indices

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::{info, warn};

/// File name of the catalog inside a data directory
pub const MOVIES_FILE: &str = "movies.dat";

/// File name of the similarity matrix inside a data directory
pub const SIMILARITY_FILE: &str = "similarity.json";

impl DataIndex {
    /// Load the catalog and similarity matrix from a directory
    ///
    /// This is the main entry point for loading data. Any error here is a
    /// startup failure; there is no partially loaded state.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading similarity artifacts from {:?}", data_dir);

        let movies_path = data_dir.join(MOVIES_FILE);
        let similarity_path = data_dir.join(SIMILARITY_FILE);

        // The matrix dominates load time; parse the catalog alongside it
        let (movies, similarity) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_similarity(&similarity_path),
        );

        let movies = movies?;
        let similarity = similarity?;

        info!(
            "Parsed {} movies and a {}x{} similarity matrix",
            movies.len(),
            similarity.dim(),
            similarity.dim()
        );

        let index = Self::from_parts(movies, similarity)?;
        info!("DataIndex successfully built and validated!");
        Ok(index)
    }

    /// Build a DataIndex from already loaded parts
    ///
    /// Steps:
    /// 1. Check catalog size against matrix size
    /// 2. Build id index (ids must be unique)
    /// 3. Build title index (first occurrence of a title wins)
    pub fn from_parts(movies: Vec<Movie>, similarity: SimilarityMatrix) -> Result<Self> {
        if movies.is_empty() {
            return Err(DataLoadError::ValidationError(
                "catalog is empty".to_string(),
            ));
        }
        if movies.len() != similarity.dim() {
            return Err(DataLoadError::DimensionMismatch {
                catalog: movies.len(),
                rows: similarity.dim(),
            });
        }

        let mut id_index = HashMap::with_capacity(movies.len());
        let mut title_index = HashMap::with_capacity(movies.len());
        let mut duplicate_titles = 0;

        for (position, movie) in movies.iter().enumerate() {
            match id_index.entry(movie.id) {
                Entry::Occupied(existing) => {
                    return Err(DataLoadError::DuplicateId {
                        id: movie.id,
                        first: *existing.get(),
                        second: position,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }

            match title_index.entry(movie.title.clone()) {
                Entry::Occupied(existing) => {
                    duplicate_titles += 1;
                    warn!(
                        "Duplicate title {:?} at position {} (first seen at {}); lookups use the first",
                        movie.title,
                        position,
                        existing.get()
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
        }

        let index = DataIndex {
            movies,
            similarity,
            title_index,
            id_index,
            duplicate_titles,
        };
        index.validate()?;
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Every catalog position has a matrix row
    /// - Every indexed position points back at a movie with that key
    pub fn validate(&self) -> Result<()> {
        if self.similarity.dim() != self.movies.len() {
            return Err(DataLoadError::DimensionMismatch {
                catalog: self.movies.len(),
                rows: self.similarity.dim(),
            });
        }

        for (title, &position) in &self.title_index {
            match self.movies.get(position) {
                Some(movie) if &movie.title == title => {}
                _ => {
                    return Err(DataLoadError::ValidationError(format!(
                        "title index for {:?} points at position {}",
                        title, position
                    )));
                }
            }
        }

        for (&id, &position) in &self.id_index {
            match self.movies.get(position) {
                Some(movie) if movie.id == id => {}
                _ => {
                    return Err(DataLoadError::ValidationError(format!(
                        "id index for {} points at position {}",
                        id, position
                    )));
                }
            }
        }

        Ok(())
    }
}
