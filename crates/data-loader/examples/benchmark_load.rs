use data_loader::DataIndex;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let data_dir = Path::new("data/similarity");

    println!("Loading similarity artifacts...\n");

    let start = Instant::now();
    let index = DataIndex::load_from_files(data_dir)?;
    let elapsed = start.elapsed();

    let (movies, dim) = index.counts();
    let cells = dim * dim;

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Matrix: {}x{}", dim, dim);
    println!("Duplicate titles: {}", index.duplicate_titles());
    println!("\nPerformance: {:.0} scores/second",
             cells as f64 / elapsed.as_secs_f64());

    Ok(())
}
