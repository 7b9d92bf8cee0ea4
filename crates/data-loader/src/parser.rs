//! Parsers for the precomputed artifact files.
//!
//! - movies.dat: movieId::title (one per line, catalog order)
//! - similarity.json: JSON array of N rows, each an array of N numbers

use crate::error::{DataLoadError, Result};
use crate::index::MOVIES_FILE;
use crate::types::*;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// Open a file, turning a missing file into `FileNotFound`
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Parse the movies.dat catalog file
///
/// Format: movieId::title
///
/// Only the first `::` separates the id, so titles may themselves contain
/// `::`. Blank lines are skipped; catalog order is file order.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let content = std::io::read_to_string(open(path)?)?;
    parse_movies_str(&content)
}

pub(crate) fn parse_movies_str(content: &str) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let (movie_id, title) =
            line_trimmed
                .split_once("::")
                .ok_or_else(|| DataLoadError::ParseError {
                    file: MOVIES_FILE.to_string(),
                    line: line_no,
                    reason: "Missing '::' separator between movieId and title".to_string(),
                })?;

        let title = title.trim();
        if title.is_empty() {
            return Err(DataLoadError::ParseError {
                file: MOVIES_FILE.to_string(),
                line: line_no,
                reason: "Missing title".to_string(),
            });
        }

        let movie = Movie {
            id: movie_id
                .trim()
                .parse()
                .map_err(|e| DataLoadError::ParseError {
                    file: MOVIES_FILE.to_string(),
                    line: line_no,
                    reason: format!("Invalid movieId: {}", e),
                })?,
            title: title.to_string(),
        };

        movies.push(movie);
    }

    Ok(movies)
}

/// Parse the similarity.json matrix file
///
/// Row shape and score finiteness are checked by `SimilarityMatrix::from_rows`.
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let reader = BufReader::new(open(path)?);
    let rows: Vec<Vec<f32>> = serde_json::from_reader(reader)?;
    SimilarityMatrix::from_rows(rows)
}
