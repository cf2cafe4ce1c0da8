// Web server: Axum JSON API for bottles and moderation.
//
// Bottle creation goes through the moderation gateway before anything is
// stored. Sessions and identity are handled by the external auth provider
// in front of this service, so there is no auth middleware here.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::Database;
use crate::moderation::ModerationGateway;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub gateway: ModerationGateway,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    db: Arc<dyn Database>,
    gateway: ModerationGateway,
    port: u16,
    bind: &str,
) -> Result<()> {
    let app = build_router(AppState { db, gateway });

    let addr = format!("{bind}:{port}");
    info!("Castaway API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/bottles",
            post(handlers::bottles::create_bottle).get(handlers::bottles::list_bottles),
        )
        .route("/api/bottles/random", get(handlers::bottles::random_bottle))
        .route("/api/bottles/{id}", delete(handlers::bottles::delete_bottle))
        .route("/api/tags", get(handlers::tags::list_tags))
        .route(
            "/api/moderation/check",
            post(handlers::moderation::check_text),
        )
        .route("/api/status", get(handlers::status::get_status));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check, always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::db::sqlite::SqliteDatabase;
    use crate::moderation::{ModerationEngine, BLOCKED_MESSAGE};

    fn test_state() -> AppState {
        AppState {
            db: Arc::new(SqliteDatabase::in_memory().unwrap()),
            gateway: ModerationGateway::new(Arc::new(ModerationEngine::with_builtin_rules())),
        }
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_clean_bottle() {
        let state = test_state();
        let app = build_router(state.clone());

        let response = app
            .oneshot(post_json(
                "/api/bottles",
                serde_json::json!({ "content": "hello", "author": "Kai" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["content"], "hello");
        assert_eq!(state.db.bottle_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_blocked_bottle() {
        let state = test_state();
        let app = build_router(state.clone());

        let response = app
            .oneshot(post_json(
                "/api/bottles",
                serde_json::json!({ "content": "hello", "author": "I will kill you" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"], BLOCKED_MESSAGE);
        assert_eq!(body["field"], "author");
        assert_eq!(state.db.bottle_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_moderation_check() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/api/moderation/check",
                serde_json::json!({ "text": "you suck" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["flagged"], true);
        assert_eq!(body["severity"], "medium");
        assert_eq!(body["matches"][0]["description"], "Personal insult");
        assert_eq!(body["threshold"], 0.7);
        assert!(body["trace"].is_null());
    }

    #[tokio::test]
    async fn test_random_bottle_not_found_when_empty() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/bottles/random")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_bottle() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::delete("/api/bottles/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    async fn seed(state: &AppState, content: &str, user_id: Option<&str>) -> i64 {
        let tag = state
            .db
            .get_tag_by_name(crate::db::models::DEFAULT_TAG)
            .await
            .unwrap()
            .unwrap();
        let req = crate::db::models::CreateBottleRequest {
            content: content.to_string(),
            tag_id: Some(tag.id),
            user_id: user_id.map(String::from),
            ..Default::default()
        };
        state.db.create_bottle(&req).await.unwrap().id
    }

    #[tokio::test]
    async fn test_list_bottles_by_user() {
        let state = test_state();
        seed(&state, "from ana", Some("ana")).await;
        seed(&state, "from ben", Some("ben")).await;

        let response = build_router(state)
            .oneshot(
                Request::get("/api/bottles?user_id=ana")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["content"], "from ana");
    }

    #[tokio::test]
    async fn test_random_bottle_marks_seen() {
        let state = test_state();
        let id = seed(&state, "only one", None).await;

        let first = build_router(state.clone())
            .oneshot(
                Request::get("/api/bottles/random?seen_by=ana")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(json_body(first).await["id"], id);

        let second = build_router(state)
            .oneshot(
                Request::get("/api/bottles/random?seen_by=ana")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
    }
}
