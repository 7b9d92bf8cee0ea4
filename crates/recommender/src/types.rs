//! Output types of the recommendation engine.

use data_loader::{Movie, MovieId};
use serde::{Deserialize, Serialize};

/// One recommended movie, as handed to presentation or enrichment layers.
///
/// `score` is the similarity to the query movie the result was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
}

impl Recommendation {
    pub fn new(movie: &Movie, score: f32) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
            score,
        }
    }
}
