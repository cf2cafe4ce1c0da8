// POST /api/moderation/check: analyze text without creating anything.
//
// Returns the verdict, score, severity and every match. The trace field is
// only populated when the engine is in debug mode.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::moderation::AnalysisResult;
use crate::web::AppState;

#[derive(Deserialize)]
pub struct CheckRequest {
    pub text: String,
}

pub async fn check_text(
    State(state): State<AppState>,
    Json(body): Json<CheckRequest>,
) -> impl IntoResponse {
    let result = state.gateway.engine().analyze(&body.text);
    Json(analysis_to_json(&result))
}

fn analysis_to_json(result: &AnalysisResult) -> serde_json::Value {
    let matches: Vec<serde_json::Value> = result
        .matches
        .iter()
        .map(|m| {
            serde_json::json!({
                "rule": m.rule.number,
                "description": m.rule.description,
                "category": m.rule.category,
                "severity": m.rule.severity,
                "confidence": m.rule.confidence,
                "matched_text": m.matched_text,
                "start": m.start,
                "end": m.end,
            })
        })
        .collect();

    serde_json::json!({
        "flagged": result.is_flagged,
        "score": result.total_score,
        "severity": result.overall_severity,
        "threshold": result.threshold,
        "matches": matches,
        "trace": result.trace,
    })
}
