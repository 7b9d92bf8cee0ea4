//! Integration tests for the recommendation engine.
//!
//! These check the ranking guarantees across every title and a range of k
//! on a small synthetic catalog with deliberate score ties.

use data_loader::{DataIndex, Movie, SimilarityMatrix};
use recommender::{RecommendError, Recommendation, RecommendationEngine};
use std::collections::HashSet;
use std::sync::Arc;

const TITLES: [&str; 7] = [
    "Avatar",
    "Spectre",
    "The Dark Knight Rises",
    "John Carter",
    "Spider-Man 3",
    "Tangled",
    "Avengers: Age of Ultron",
];

/// Symmetric matrix with a 0.5 plateau so ties show up in most rows
fn build_matrix(n: usize) -> Vec<Vec<f32>> {
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        1.0
                    } else if (i + j) % 3 == 0 {
                        0.5
                    } else {
                        ((i * j) % 7) as f32 / 10.0
                    }
                })
                .collect()
        })
        .collect()
}

fn create_test_setup() -> (Arc<DataIndex>, RecommendationEngine) {
    let movies: Vec<Movie> = TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| Movie::new(100 + i as u32, *title))
        .collect();
    let matrix = SimilarityMatrix::from_rows(build_matrix(TITLES.len())).unwrap();
    let index = Arc::new(DataIndex::from_parts(movies, matrix).unwrap());
    let engine = RecommendationEngine::new(index.clone());
    (index, engine)
}

fn position_of(index: &DataIndex, rec: &Recommendation) -> usize {
    index.index_of_id(rec.movie_id).unwrap()
}

#[test]
fn test_never_recommends_selected_movie() {
    let (_, engine) = create_test_setup();

    for title in TITLES {
        for k in 1..=10 {
            let recs = engine.recommend(title, k).unwrap();
            assert!(
                recs.iter().all(|r| r.title != title),
                "{title} recommended itself for k={k}"
            );
        }
    }
}

#[test]
fn test_length_is_min_of_k_and_candidates() {
    let (index, engine) = create_test_setup();
    let candidates = index.movies().len() - 1;

    for title in TITLES {
        for k in 1..=10i64 {
            let recs = engine.recommend(title, k).unwrap();
            assert_eq!(recs.len(), (k as usize).min(candidates));
        }
    }
}

#[test]
fn test_no_duplicates() {
    let (_, engine) = create_test_setup();

    for title in TITLES {
        let recs = engine.recommend(title, 10).unwrap();
        let unique: HashSet<_> = recs.iter().map(|r| r.movie_id).collect();
        assert_eq!(unique.len(), recs.len());
    }
}

#[test]
fn test_scores_descend_and_ties_keep_catalog_order() {
    let (index, engine) = create_test_setup();

    for title in TITLES {
        let recs = engine.recommend(title, 10).unwrap();
        for pair in recs.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(position_of(&index, &pair[0]) < position_of(&index, &pair[1]));
            }
        }
    }
}

#[test]
fn test_scores_match_matrix_row() {
    let (index, engine) = create_test_setup();

    for title in TITLES {
        let query = index.index_of_title(title).unwrap();
        for rec in engine.recommend(title, 10).unwrap() {
            let position = position_of(&index, &rec);
            assert_eq!(index.similarity().get(query, position), Some(rec.score));
        }
    }
}

#[test]
fn test_smaller_k_is_prefix_of_larger_k() {
    let (_, engine) = create_test_setup();

    for title in TITLES {
        let full = engine.recommend(title, 10).unwrap();
        for k in 1..=6 {
            let partial = engine.recommend(title, k).unwrap();
            assert_eq!(partial[..], full[..partial.len()]);
        }
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    let (_, engine) = create_test_setup();

    let first = engine.recommend("Spectre", 4).unwrap();
    for _ in 0..10 {
        assert_eq!(engine.recommend("Spectre", 4).unwrap(), first);
    }

    // A clone shares the same data and answers the same way
    let cloned = engine.clone();
    assert_eq!(cloned.recommend("Spectre", 4).unwrap(), first);
}

#[test]
fn test_request_errors() {
    let (_, engine) = create_test_setup();

    assert!(matches!(
        engine.recommend("__no_such_movie__", 5),
        Err(RecommendError::NotFound { .. })
    ));
    assert!(matches!(
        engine.recommend("Avatar", 0),
        Err(RecommendError::InvalidArgument { k: 0 })
    ));
    assert!(matches!(
        engine.recommend("Avatar", -1),
        Err(RecommendError::InvalidArgument { k: -1 })
    ));

    // Errors leave the engine fully usable
    assert_eq!(engine.recommend("Avatar", 2).unwrap().len(), 2);
}

#[test]
fn test_duplicate_title_uses_first_entry() {
    let movies = vec![
        Movie::new(1, "Heat"),
        Movie::new(2, "Ronin"),
        Movie::new(3, "Heat"),
    ];
    // Row 0 prefers Ronin, row 2 prefers the other Heat
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.8, 0.1],
        vec![0.8, 1.0, 0.3],
        vec![0.1, 0.3, 1.0],
    ])
    .unwrap();
    let engine = RecommendationEngine::new(Arc::new(DataIndex::from_parts(movies, matrix).unwrap()));

    let recs = engine.recommend("Heat", 5).unwrap();
    let ids: Vec<_> = recs.iter().map(|r| r.movie_id).collect();

    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_all_ties_return_catalog_order() {
    let movies: Vec<Movie> = (1..=5).map(|i| Movie::new(i, format!("M{i}"))).collect();
    let matrix = SimilarityMatrix::from_rows(vec![vec![0.25; 5]; 5]).unwrap();
    let engine = RecommendationEngine::new(Arc::new(DataIndex::from_parts(movies, matrix).unwrap()));

    let recs = engine.recommend("M3", 3).unwrap();
    let ids: Vec<_> = recs.iter().map(|r| r.movie_id).collect();

    assert_eq!(ids, vec![1, 2, 4]);
}
