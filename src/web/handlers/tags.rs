// GET /api/tags: list tags. The default tag is hidden unless
// ?include_default=true.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct TagsQuery {
    pub include_default: Option<bool>,
}

pub async fn list_tags(State(state): State<AppState>, Query(params): Query<TagsQuery>) -> Response {
    match state
        .db
        .get_tags(params.include_default.unwrap_or(false))
        .await
    {
        Ok(tags) => Json(tags).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error listing tags");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
