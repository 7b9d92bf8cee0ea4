//! Title search, for finding the exact title `recommend` expects.

use crate::engine::RecommendationEngine;
use data_loader::{CatalogIndex, Movie};

impl RecommendationEngine {
    /// Case-insensitive substring search over catalog titles.
    ///
    /// Exact (case-insensitive) matches come first, then substring matches;
    /// within each group results keep catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<(CatalogIndex, &Movie)> {
        let query_lower = query.to_lowercase();

        let mut matches: Vec<(u8, CatalogIndex, &Movie)> = self
            .data_index()
            .movies()
            .iter()
            .enumerate()
            .filter_map(|(position, movie)| {
                let title_lower = movie.title.to_lowercase();
                if title_lower == query_lower {
                    Some((0, position, movie))
                } else if title_lower.contains(&query_lower) {
                    Some((1, position, movie))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by_key(|&(relevance, position, _)| (relevance, position));
        matches.truncate(limit);

        matches
            .into_iter()
            .map(|(_, position, movie)| (position, movie))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{DataIndex, SimilarityMatrix};
    use std::sync::Arc;

    fn create_engine() -> RecommendationEngine {
        let titles = ["Star Trek Beyond", "Star Wars", "star wars", "Stardust", "Alien"];
        let movies: Vec<Movie> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| Movie::new(i as u32 + 1, *t))
            .collect();
        let n = movies.len();
        let matrix = SimilarityMatrix::from_rows(vec![vec![0.0; n]; n]).unwrap();
        RecommendationEngine::new(Arc::new(DataIndex::from_parts(movies, matrix).unwrap()))
    }

    #[test]
    fn test_exact_matches_first() {
        let engine = create_engine();

        let hits = engine.search("STAR WARS", 10);
        let positions: Vec<_> = hits.iter().map(|(p, _)| *p).collect();

        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn test_substring_matches_in_catalog_order() {
        let engine = create_engine();

        let hits = engine.search("star", 10);
        let titles: Vec<_> = hits.iter().map(|(_, m)| m.title.as_str()).collect();

        assert_eq!(
            titles,
            vec!["Star Trek Beyond", "Star Wars", "star wars", "Stardust"]
        );
    }

    #[test]
    fn test_limit_and_no_match() {
        let engine = create_engine();

        assert_eq!(engine.search("star", 2).len(), 2);
        assert!(engine.search("Predator", 10).is_empty());
    }
}
