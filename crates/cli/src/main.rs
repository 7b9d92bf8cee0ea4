use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use recommender::{RecommendError, Recommendation};
use service::{RecommendationService, ServiceError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// Movie Recs - "more like this" recommendations from a similarity matrix
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Recommend similar movies from a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Directory holding movies.dat and similarity.json
    #[arg(short, long, default_value = "data/similarity")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Exact catalog title of the selected movie
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5", allow_negative_numbers = true)]
        limit: i64,

        /// Show the similarity score of each recommendation
        #[arg(long)]
        scores: bool,

        /// Print recommendations as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Maximum number of matches to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show catalog and matrix statistics
    Info,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Recommendations per request
        #[arg(long, default_value = "5")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Loading is all-or-nothing: without artifacts there is nothing to serve
    println!("Loading similarity artifacts from {}...", cli.data_dir.display());
    let start = Instant::now();
    let service = RecommendationService::load(cli.data_dir.clone())
        .await
        .context("Failed to load similarity artifacts")?;
    println!("{} Loaded artifacts in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            title,
            limit,
            scores,
            json,
        } => handle_recommend(&service, &title, limit, scores, json).await?,
        Commands::Search { title, limit } => handle_search(&service, &title, limit),
        Commands::Info => handle_info(&service),
        Commands::Benchmark {
            requests,
            concurrent,
            limit,
        } => handle_benchmark(service, requests, concurrent, limit).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: &RecommendationService,
    title: &str,
    limit: i64,
    scores: bool,
    json: bool,
) -> Result<()> {
    match service.get_recommendations(title, limit).await {
        Ok(recommendations) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
            } else {
                print_recommendations(title, &recommendations, scores);
            }
            Ok(())
        }
        Err(ServiceError::Recommend(err @ RecommendError::NotFound { .. })) => {
            // Point the user at near matches before failing
            let suggestions = service.engine().search(title, 5);
            if !suggestions.is_empty() {
                println!("{}", "Did you mean:".yellow());
                for (_, movie) in suggestions {
                    println!("  - {}", movie.title);
                }
            }
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Handle the 'search' command
fn handle_search(service: &RecommendationService, title: &str, limit: usize) {
    let matches = service.engine().search(title, limit);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
        return;
    }
    for (position, movie) in matches {
        println!("{:>6}  {} [id {}]", position, movie.title, movie.id);
    }
}

/// Handle the 'info' command
fn handle_info(service: &RecommendationService) {
    let engine = service.engine();
    let data_index = engine.data_index();
    let (movies, dim) = data_index.counts();

    println!("{}", "Catalog:".bold().blue());
    println!("{}Movies: {}", "• ".green(), movies);
    println!("{}Similarity matrix: {}x{}", "• ".green(), dim, dim);
    println!(
        "{}Duplicate titles (first entry wins): {}",
        "• ".cyan(),
        data_index.duplicate_titles()
    );
    println!("{}Default recommendations: {}", "• ".cyan(), engine.default_k());
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    service: RecommendationService,
    requests: usize,
    concurrent: usize,
    limit: i64,
) -> Result<()> {
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    // Pick random catalog titles to query
    let titles: Vec<String> = {
        let movies = service.engine().data_index().movies();
        (0..requests)
            .map(|_| {
                let position = rand::random::<u32>() as usize % movies.len();
                movies[position].title.clone()
            })
            .collect()
    };

    info!(
        "Benchmarking {} requests with up to {} in flight",
        requests,
        concurrent.max(1)
    );

    // Bound the number of in-flight requests
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for title in titles {
        let service = service.clone();
        let permits = permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            service.get_recommendations(&title, limit).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    let stats = LatencyStats::from_timings(timings, total_time);

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", stats.total);
    println!("Average latency: {:?}", stats.average);
    println!("P50 latency: {:?}", stats.p50);
    println!("P95 latency: {:?}", stats.p95);
    println!("P99 latency: {:?}", stats.p99);
    println!("Throughput: {:.2} requests/second", stats.throughput);

    Ok(())
}

/// Summary of per-request latencies
#[derive(Debug, PartialEq)]
struct LatencyStats {
    total: Duration,
    average: Duration,
    p50: Duration,
    p95: Duration,
    p99: Duration,
    throughput: f64,
}

impl LatencyStats {
    /// `timings` must be non-empty
    fn from_timings(mut timings: Vec<Duration>, total: Duration) -> Self {
        timings.sort();
        let sum: Duration = timings.iter().sum();
        let average = sum / timings.len() as u32;
        let throughput = timings.len() as f64 / total.as_secs_f64().max(f64::EPSILON);

        Self {
            total,
            average,
            p50: percentile(&timings, 0.50),
            p95: percentile(&timings, 0.95),
            p99: percentile(&timings, 0.99),
            throughput,
        }
    }
}

/// Nearest-rank percentile over sorted timings
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let rank = (sorted.len() as f64 * p) as usize;
    sorted[rank.min(sorted.len() - 1)]
}

/// Helper function to format and print recommendations
fn print_recommendations(title: &str, recommendations: &[Recommendation], scores: bool) {
    println!("{}", format!("Movies similar to '{}':", title).bold().blue());
    if recommendations.is_empty() {
        println!("  (no other movies in the catalog)");
        return;
    }
    for (i, rec) in recommendations.iter().enumerate() {
        let rank = i + 1;
        if scores {
            println!(
                "{}. {} [id {}] - Similarity: {:.3}",
                rank.to_string().green(),
                rec.title,
                rec.movie_id,
                rec.score
            );
        } else {
            println!("{}. {}", rank.to_string().green(), rec.title);
        }
    }
}
