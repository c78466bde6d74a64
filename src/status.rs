// System status display: shows the configured source, its size, and
// dataset counts when it can be loaded.

use anyhow::Result;
use std::path::Path;

use crate::catalog::Catalog;
use crate::config::{Config, SourceBackend};
use crate::ratings::stats::summarize;

/// Display system status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    let location = config.source_display();
    let backend = match config.source_backend {
        SourceBackend::Json => "json",
        SourceBackend::Sqlite => "sqlite",
    };

    if !Path::new(&location).exists() {
        println!("Source ({backend}): {location} (missing)");
        match config.source_backend {
            SourceBackend::Json => println!("\nSet SAVOR_REVIEWS_PATH to a review export."),
            SourceBackend::Sqlite => println!("\nRun `savor import <reviews.json>` to create it."),
        }
        return Ok(());
    }

    let file_size = std::fs::metadata(&location)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Source ({backend}): {location} ({file_size})");

    println!(
        "Rating scale: {} to {}",
        config.rating_scale.min, config.rating_scale.max
    );
    println!(
        "Neighborhood: top {} users, similarity > {}",
        config.neighborhood.max_neighbors, config.neighborhood.min_similarity
    );

    let source = crate::open_source(config)?;
    match Catalog::load(source.as_ref(), &config.rating_scale) {
        Ok(catalog) => {
            let summary = summarize(catalog.reviews());
            println!(
                "Dataset: {} users, {} restaurants, {} reviews",
                summary.users, summary.restaurants, summary.reviews
            );
        }
        Err(e) => println!("Dataset: not loadable ({e:#})"),
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
