//! Simple test harness for the recommendation service.
//!
//! Loads the artifacts and prints recommendations for one title (the first
//! catalog entry unless a title is given as the first argument).

use anyhow::{Context, Result, anyhow};
use tracing::info;

use service::RecommendationService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("info,service=debug,recommender=debug")
                }),
        )
        .init();

    info!("Starting recommendation service test harness");

    let service = RecommendationService::load("data/similarity")
        .await
        .context("Failed to load similarity artifacts")?;

    let title = match std::env::args().nth(1) {
        Some(title) => title,
        None => service
            .engine()
            .data_index()
            .get_movie_at(0)
            .map(|movie| movie.title.clone())
            .ok_or_else(|| anyhow!("Catalog is empty"))?,
    };

    info!("Getting recommendations for {:?}", title);
    let recommendations = service.get_default_recommendations(&title).await?;

    info!("Received {} recommendations:", recommendations.len());
    for (i, rec) in recommendations.iter().enumerate() {
        info!(
            "{}. {} [id {}] - Similarity: {:.3}",
            i + 1,
            rec.title,
            rec.movie_id,
            rec.score
        );
    }

    Ok(())
}
