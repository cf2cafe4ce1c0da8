// SqliteDatabase: rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Bottle, CreateBottleRequest, Tag};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// In-memory database with the schema applied. Used by tests and demos.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::create_tables(&conn)?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn get_tags(&self, include_default: bool) -> Result<Vec<Tag>> {
        let conn = self.conn.lock().await;
        super::queries::get_tags(&conn, include_default)
    }

    async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let conn = self.conn.lock().await;
        super::queries::get_tag_by_name(&conn, name)
    }

    async fn create_bottle(&self, req: &CreateBottleRequest) -> Result<Bottle> {
        let conn = self.conn.lock().await;
        super::queries::create_bottle(&conn, req)
    }

    async fn get_bottles(
        &self,
        tag_id: Option<i64>,
        user_id: Option<&str>,
    ) -> Result<Vec<Bottle>> {
        let conn = self.conn.lock().await;
        super::queries::get_bottles(&conn, tag_id, user_id)
    }

    async fn get_random_bottle(
        &self,
        tag_id: Option<i64>,
        seen_by: Option<&str>,
    ) -> Result<Option<Bottle>> {
        let conn = self.conn.lock().await;
        super::queries::get_random_bottle(&conn, tag_id, seen_by)
    }

    async fn mark_bottle_seen(&self, user_id: &str, bottle_id: i64) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::mark_bottle_seen(&conn, user_id, bottle_id)
    }

    async fn delete_bottle(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::delete_bottle(&conn, id)
    }

    async fn bottle_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::bottle_count(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::DEFAULT_TAG;

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = SqliteDatabase::in_memory().unwrap();
        assert_eq!(db.table_count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_trait_bottle_roundtrip() {
        let db = SqliteDatabase::in_memory().unwrap();
        let tag = db.get_tag_by_name(DEFAULT_TAG).await.unwrap().unwrap();

        let req = CreateBottleRequest {
            content: "tide's coming in".to_string(),
            tag_id: Some(tag.id),
            ..Default::default()
        };
        let bottle = db.create_bottle(&req).await.unwrap();
        assert_eq!(db.bottle_count().await.unwrap(), 1);

        let listed = db.get_bottles(None, None).await.unwrap();
        assert_eq!(listed, vec![bottle.clone()]);

        assert!(db.delete_bottle(bottle.id).await.unwrap());
        assert!(db.get_random_bottle(None, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_trait_usable_as_dyn() {
        let db: std::sync::Arc<dyn Database> =
            std::sync::Arc::new(SqliteDatabase::in_memory().unwrap());
        assert_eq!(db.get_tags(true).await.unwrap().len(), 2);
    }
}
