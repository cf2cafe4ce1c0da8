// Database trait: backend-agnostic async interface for bottle storage.
//
// Implementor: SqliteDatabase (wraps rusqlite). All methods are async so a
// sync backend (rusqlite via Mutex) and a native async one fit behind the
// same interface. Callers hold an `Arc<dyn Database>`.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Bottle, CreateBottleRequest, Tag};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Tags ---

    /// List tags. The default tag is only included when asked for.
    async fn get_tags(&self, include_default: bool) -> Result<Vec<Tag>>;

    /// Look up a tag by exact name.
    async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>>;

    // --- Bottles ---

    /// Persist a bottle whose tag has already been resolved.
    async fn create_bottle(&self, req: &CreateBottleRequest) -> Result<Bottle>;

    /// List bottles, newest first, optionally for one tag and/or one creator.
    async fn get_bottles(&self, tag_id: Option<i64>, user_id: Option<&str>)
        -> Result<Vec<Bottle>>;

    /// Pick a random bottle, optionally from one tag, skipping bottles
    /// already shown to `seen_by`.
    async fn get_random_bottle(
        &self,
        tag_id: Option<i64>,
        seen_by: Option<&str>,
    ) -> Result<Option<Bottle>>;

    /// Record that `user_id` has been shown a bottle.
    async fn mark_bottle_seen(&self, user_id: &str, bottle_id: i64) -> Result<()>;

    /// Delete a bottle. Returns false if it did not exist.
    async fn delete_bottle(&self, id: i64) -> Result<bool>;

    /// Total number of stored bottles.
    async fn bottle_count(&self) -> Result<i64>;
}
