// GET /api/status: bottle count and current moderation settings.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::web::AppState;

pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let bottles = state.db.bottle_count().await.unwrap_or_default();
    let engine = state.gateway.engine();

    Json(serde_json::json!({
        "bottles": bottles,
        "moderation": {
            "rules": engine.rule_count(),
            "threshold": engine.threshold(),
            "case_sensitive": engine.case_sensitive(),
            "debug_mode": engine.debug_mode(),
        }
    }))
}
