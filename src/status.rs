// System status display: shows DB stats and moderation settings.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::db::Database;
use crate::moderation::ModerationEngine;

/// Display system status to the terminal.
pub async fn show(
    db: &Arc<dyn Database>,
    db_display_path: &str,
    engine: &ModerationEngine,
) -> Result<()> {
    // Database file size
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let bottles = db.bottle_count().await?;
    let tags = db.get_tags(true).await?;
    let tag_names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    println!("Bottles: {}", bottles);
    println!("Tags: {}", tag_names.join(", "));

    println!(
        "Moderation: {} rules, threshold {:.2}, case-sensitive {}, debug {}",
        engine.rule_count(),
        engine.threshold(),
        engine.case_sensitive(),
        if engine.debug_mode() { "ON" } else { "off" }
    );

    Ok(())
}

/// Whether the database file exists yet.
pub fn database_exists(db_path: &str) -> bool {
    Path::new(db_path).exists()
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
