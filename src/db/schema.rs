// Database schema: table creation and migrations.
//
// We use a simple version-based migration approach: a `schema_version` table
// tracks which migrations have run, and each migration is a function that
// executes SQL statements.

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::models::{DEFAULT_TAG, PERSONAL_TAG};

/// Create all tables if they don't exist yet.
///
/// This is idempotent and safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Labels that group bottles
        CREATE TABLE IF NOT EXISTS tag (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            color TEXT
        );

        -- Messages in bottles. Only screened content ever lands here.
        CREATE TABLE IF NOT EXISTS bottle (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            author TEXT,
            tag_id INTEGER NOT NULL REFERENCES tag(id),
            user_id TEXT,                      -- identity provider user id
            location_from TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_bottle_tag
            ON bottle(tag_id);
        ",
    )
    .context("Failed to create database tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    // Migration v2: seed the tags the creation workflow resolves to.
    run_migration(conn, 2, |c| {
        c.execute(
            "INSERT OR IGNORE INTO tag (name, color) VALUES (?1, '#7aa2c7')",
            [DEFAULT_TAG],
        )?;
        c.execute(
            "INSERT OR IGNORE INTO tag (name, color) VALUES (?1, '#c9a27a')",
            [PERSONAL_TAG],
        )?;
        Ok(())
    })?;

    // Migration v3: which bottles each user has already been shown.
    run_migration(conn, 3, |c| {
        c.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS seen_bottles (
                user_id TEXT NOT NULL,
                bottle_id INTEGER NOT NULL REFERENCES bottle(id) ON DELETE CASCADE,
                seen_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (user_id, bottle_id)
            );
            ",
        )
    })?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
/// The migration function receives the connection and should execute its SQL.
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
    }

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
