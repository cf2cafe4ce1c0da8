// Data models: Rust structs that map to database rows and API payloads.
//
// Kept separate from the queries so the moderation gateway and the web
// layer can use them without depending on rusqlite.

use serde::{Deserialize, Serialize};

/// Name of the tag bottles get when the request names none.
pub const DEFAULT_TAG: &str = "Default";
/// Name of the tag for bottles marked personal.
pub const PERSONAL_TAG: &str = "Personal";

/// A stored message in a bottle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottle {
    pub id: i64,
    pub content: String,
    pub author: Option<String>,
    pub tag_id: i64,
    /// Identity-provider user id of the creator, if signed in.
    pub user_id: Option<String>,
    pub location_from: Option<String>,
    pub created_at: String,
}

/// A label grouping bottles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
}

/// Incoming request to create a bottle.
///
/// `content`, `author` and `location_from` are free text and go through
/// moderation. `tag_id` is resolved from `personal` or the default tag
/// when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateBottleRequest {
    pub content: String,
    pub author: Option<String>,
    pub location_from: Option<String>,
    pub tag_id: Option<i64>,
    pub user_id: Option<String>,
    pub personal: Option<bool>,
}
