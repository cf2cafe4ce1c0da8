// Bottle handlers.
//
// POST   /api/bottles         moderated create
// GET    /api/bottles         list, optional ?tag_id= and ?user_id=
// GET    /api/bottles/random  one random bottle, optional ?tag_id= and ?seen_by=
// DELETE /api/bottles/{id}    delete
//
// A moderation rejection is a 422 carrying the user-facing message; it is
// an expected outcome, so it is not logged as an error.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::db::models::CreateBottleRequest;
use crate::pipeline::create::{self, CreateOutcome};
use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct BottlesQuery {
    pub tag_id: Option<i64>,
    pub user_id: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct RandomQuery {
    pub tag_id: Option<i64>,
    /// Skip bottles this user has already been shown, and record the one
    /// returned as seen.
    pub seen_by: Option<String>,
}

/// POST /api/bottles: screen then persist a bottle.
pub async fn create_bottle(
    State(state): State<AppState>,
    Json(req): Json<CreateBottleRequest>,
) -> Response {
    match create::create_bottle(&state.gateway, state.db.as_ref(), req).await {
        Ok(CreateOutcome::Created(bottle)) => Json(bottle).into_response(),
        Ok(CreateOutcome::Blocked(rejection)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "error": rejection.message,
                "field": rejection.field.as_str(),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create bottle");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// GET /api/bottles: list bottles, newest first.
pub async fn list_bottles(
    State(state): State<AppState>,
    Query(params): Query<BottlesQuery>,
) -> Response {
    match state
        .db
        .get_bottles(params.tag_id, params.user_id.as_deref())
        .await
    {
        Ok(bottles) => Json(bottles).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error listing bottles");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// GET /api/bottles/random: a random bottle, or 404 if there are none.
pub async fn random_bottle(
    State(state): State<AppState>,
    Query(params): Query<RandomQuery>,
) -> Response {
    let seen_by = params.seen_by.as_deref();
    match state.db.get_random_bottle(params.tag_id, seen_by).await {
        Ok(Some(bottle)) => {
            if let Some(user_id) = seen_by {
                if let Err(e) = state.db.mark_bottle_seen(user_id, bottle.id).await {
                    tracing::warn!(error = %e, id = bottle.id, "Failed to record seen bottle");
                }
            }
            Json(bottle).into_response()
        }
        Ok(None) => api_error(StatusCode::NOT_FOUND, "No bottles found"),
        Err(e) => {
            tracing::error!(error = %e, "DB error fetching random bottle");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// DELETE /api/bottles/{id}
pub async fn delete_bottle(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.db.delete_bottle(id).await {
        Ok(true) => Json(serde_json::json!({ "message": "Bottle deleted" })).into_response(),
        Ok(false) => api_error(StatusCode::NOT_FOUND, "Bottle not found"),
        Err(e) => {
            tracing::error!(error = %e, id, "DB error deleting bottle");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
