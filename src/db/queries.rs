// Database queries: CRUD operations for bottles and tags.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{bail, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{Bottle, CreateBottleRequest, Tag};

const BOTTLE_COLUMNS: &str = "id, content, author, tag_id, user_id, location_from, created_at";

fn bottle_from_row(row: &Row<'_>) -> rusqlite::Result<Bottle> {
    Ok(Bottle {
        id: row.get(0)?,
        content: row.get(1)?,
        author: row.get(2)?,
        tag_id: row.get(3)?,
        user_id: row.get(4)?,
        location_from: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
    })
}

// --- Tags ---

/// List tags, optionally including the default tag.
pub fn get_tags(conn: &Connection, include_default: bool) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, color FROM tag
         WHERE ?1 OR name != ?2
         ORDER BY id",
    )?;
    let tags = stmt
        .query_map(params![include_default, super::models::DEFAULT_TAG], tag_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}

/// Look up a tag by its exact name.
pub fn get_tag_by_name(conn: &Connection, name: &str) -> Result<Option<Tag>> {
    let mut stmt = conn.prepare("SELECT id, name, color FROM tag WHERE name = ?1 LIMIT 1")?;
    let tag = stmt.query_row(params![name], tag_from_row).optional()?;
    Ok(tag)
}

// --- Bottles ---

/// Insert a bottle. The request's tag must already be resolved.
pub fn create_bottle(conn: &Connection, req: &CreateBottleRequest) -> Result<Bottle> {
    let Some(tag_id) = req.tag_id else {
        bail!("Missing tag_id");
    };

    conn.execute(
        "INSERT INTO bottle (content, author, tag_id, user_id, location_from)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            req.content,
            req.author,
            tag_id,
            req.user_id,
            req.location_from
        ],
    )?;
    let id = conn.last_insert_rowid();

    match get_bottle(conn, id)? {
        Some(bottle) => Ok(bottle),
        None => bail!("Bottle {id} vanished after insert"),
    }
}

/// Fetch a single bottle by id.
pub fn get_bottle(conn: &Connection, id: i64) -> Result<Option<Bottle>> {
    let sql = format!("SELECT {BOTTLE_COLUMNS} FROM bottle WHERE id = ?1");
    let bottle = conn
        .query_row(&sql, params![id], bottle_from_row)
        .optional()?;
    Ok(bottle)
}

/// List bottles, newest first, optionally restricted to one tag and/or
/// one creator.
pub fn get_bottles(
    conn: &Connection,
    tag_id: Option<i64>,
    user_id: Option<&str>,
) -> Result<Vec<Bottle>> {
    let sql = format!(
        "SELECT {BOTTLE_COLUMNS} FROM bottle
         WHERE (?1 IS NULL OR tag_id = ?1)
           AND (?2 IS NULL OR user_id = ?2)
         ORDER BY id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let bottles = stmt
        .query_map(params![tag_id, user_id], bottle_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(bottles)
}

/// Pick one bottle at random, optionally from one tag. With `seen_by`,
/// bottles that user has already been shown are skipped.
pub fn get_random_bottle(
    conn: &Connection,
    tag_id: Option<i64>,
    seen_by: Option<&str>,
) -> Result<Option<Bottle>> {
    let sql = format!(
        "SELECT {BOTTLE_COLUMNS} FROM bottle
         WHERE (?1 IS NULL OR tag_id = ?1)
           AND (?2 IS NULL OR id NOT IN (
               SELECT bottle_id FROM seen_bottles WHERE user_id = ?2
           ))
         ORDER BY RANDOM()
         LIMIT 1"
    );
    let bottle = conn
        .query_row(&sql, params![tag_id, seen_by], bottle_from_row)
        .optional()?;
    Ok(bottle)
}

/// Record that a user has been shown a bottle. Repeat calls are no-ops.
pub fn mark_bottle_seen(conn: &Connection, user_id: &str, bottle_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO seen_bottles (user_id, bottle_id) VALUES (?1, ?2)",
        params![user_id, bottle_id],
    )?;
    Ok(())
}

/// Delete a bottle. Returns false if no such bottle existed.
pub fn delete_bottle(conn: &Connection, id: i64) -> Result<bool> {
    conn.execute("DELETE FROM seen_bottles WHERE bottle_id = ?1", params![id])?;
    let deleted = conn.execute("DELETE FROM bottle WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

/// Total number of stored bottles.
pub fn bottle_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM bottle", [], |row| row.get(0))?;
    Ok(count)
}
