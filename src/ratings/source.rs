// Review source trait: swap-ready abstraction over where reviews live.
//
// The engine never does I/O. Callers pick a source (a JSON export on disk,
// or the SQLite database behind the `sqlite` feature), load once, and hand
// the reviews to `Catalog::from_reviews`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::review::Review;

/// Anything that can produce the full review collection.
pub trait ReviewSource: Send + Sync {
    /// Human-readable location, used in logs and status output.
    fn describe(&self) -> String;

    /// Read every review.
    fn load_reviews(&self) -> Result<Vec<Review>>;
}

/// Reviews stored as a JSON array, or as JSON Lines when the file
/// extension is `.jsonl` / `.ndjson`.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json_lines(&self) -> bool {
        matches!(
            self.path.extension().and_then(|e| e.to_str()),
            Some("jsonl") | Some("ndjson")
        )
    }
}

impl ReviewSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_reviews(&self) -> Result<Vec<Review>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read reviews from {}", self.path.display()))?;

        let reviews = if self.is_json_lines() {
            parse_json_lines(&raw)
                .with_context(|| format!("Malformed JSON Lines in {}", self.path.display()))?
        } else {
            serde_json::from_str::<Vec<Review>>(&raw)
                .with_context(|| format!("Malformed review JSON in {}", self.path.display()))?
        };

        info!(count = reviews.len(), path = %self.path.display(), "Reviews loaded");
        Ok(reviews)
    }
}

/// Parse one review per non-blank line.
pub fn parse_json_lines(raw: &str) -> Result<Vec<Review>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<Review>(line).with_context(|| format!("line {}", i + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lines_skip_blank_lines() {
        let raw = "{\"reviewerId\":\"a\",\"title\":\"X\",\"stars\":5}\n\n{\"reviewerId\":\"b\",\"title\":\"Y\",\"stars\":2.5}\n";
        let reviews = parse_json_lines(raw).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1], Review::new("b", "Y", 2.5));
    }

    #[test]
    fn test_json_lines_accept_numeric_reviewer_ids() {
        let raw = "{\"reviewerId\":42,\"title\":\"X\",\"stars\":5}\n{\"reviewerId\":\"42\",\"title\":\"Y\",\"stars\":3}\n";
        let reviews = parse_json_lines(raw).unwrap();
        assert_eq!(reviews[0], Review::new("42", "X", 5.0));
        assert_eq!(reviews[1].user_id, "42");
    }

    #[test]
    fn test_json_lines_report_bad_line_number() {
        let raw = "{\"reviewerId\":\"a\",\"title\":\"X\",\"stars\":5}\nnot json\n";
        let err = parse_json_lines(raw).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let source = JsonFileSource::new("/definitely/not/here/reviews.json");
        let err = source.load_reviews().unwrap_err();
        assert!(err.to_string().contains("Failed to read reviews"));
    }
}
