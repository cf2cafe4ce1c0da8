// Bottle creation pipeline: screen -> resolve tag -> persist.
//
// Moderation runs first. A rejected request returns before the database is
// touched, so blocked content is never stored. Accepted requests get a tag
// (the personal tag, the requested one, or the default) and are inserted.

use anyhow::{Context, Result};
use tracing::info;

use crate::db::models::{Bottle, CreateBottleRequest, DEFAULT_TAG, PERSONAL_TAG};
use crate::db::Database;
use crate::moderation::{ModerationGateway, Rejection, Screening};

/// Outcome of a creation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(Bottle),
    Blocked(Rejection),
}

/// Run the full creation workflow for one request.
pub async fn create_bottle(
    gateway: &ModerationGateway,
    db: &dyn Database,
    req: CreateBottleRequest,
) -> Result<CreateOutcome> {
    let mut req = match gateway.screen(req) {
        Screening::Accepted(req) => req,
        Screening::Rejected(rejection) => return Ok(CreateOutcome::Blocked(rejection)),
    };

    if req.personal == Some(true) {
        req.tag_id = Some(resolve_tag(db, PERSONAL_TAG).await?);
    } else if req.tag_id.is_none() {
        req.tag_id = Some(resolve_tag(db, DEFAULT_TAG).await?);
    }

    let bottle = db.create_bottle(&req).await?;
    info!(id = bottle.id, tag_id = bottle.tag_id, "Bottle created");
    Ok(CreateOutcome::Created(bottle))
}

async fn resolve_tag(db: &dyn Database, name: &str) -> Result<i64> {
    let tag = db
        .get_tag_by_name(name)
        .await?
        .with_context(|| format!("{name} tag not found. Run `castaway init` first."))?;
    Ok(tag.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::SqliteDatabase;
    use crate::moderation::{ModerationEngine, TextField};
    use std::sync::Arc;

    fn gateway() -> ModerationGateway {
        ModerationGateway::new(Arc::new(ModerationEngine::with_builtin_rules()))
    }

    #[tokio::test]
    async fn test_clean_request_uses_default_tag() {
        let db = SqliteDatabase::in_memory().unwrap();
        let default = db.get_tag_by_name(DEFAULT_TAG).await.unwrap().unwrap();

        let req = CreateBottleRequest {
            content: "hello".to_string(),
            ..Default::default()
        };
        match create_bottle(&gateway(), &db, req).await.unwrap() {
            CreateOutcome::Created(bottle) => assert_eq!(bottle.tag_id, default.id),
            CreateOutcome::Blocked(r) => panic!("unexpected block: {r:?}"),
        }
    }

    #[tokio::test]
    async fn test_personal_overrides_requested_tag() {
        let db = SqliteDatabase::in_memory().unwrap();
        let default = db.get_tag_by_name(DEFAULT_TAG).await.unwrap().unwrap();
        let personal = db.get_tag_by_name(PERSONAL_TAG).await.unwrap().unwrap();

        let req = CreateBottleRequest {
            content: "a note to self".to_string(),
            tag_id: Some(default.id),
            personal: Some(true),
            ..Default::default()
        };
        match create_bottle(&gateway(), &db, req).await.unwrap() {
            CreateOutcome::Created(bottle) => assert_eq!(bottle.tag_id, personal.id),
            CreateOutcome::Blocked(r) => panic!("unexpected block: {r:?}"),
        }
    }

    #[tokio::test]
    async fn test_blocked_request_is_never_persisted() {
        let db = SqliteDatabase::in_memory().unwrap();
        let req = CreateBottleRequest {
            content: "hello".to_string(),
            author: Some("I will kill you".to_string()),
            ..Default::default()
        };

        match create_bottle(&gateway(), &db, req).await.unwrap() {
            CreateOutcome::Blocked(r) => assert_eq!(r.field, TextField::Author),
            CreateOutcome::Created(_) => panic!("expected block"),
        }
        assert_eq!(db.bottle_count().await.unwrap(), 0);
    }
}
