//! Request handlers for name parsing, entry registration, and summaries.
//!
//! Every failure is a 400 with a `{ "error", "message" }` body. The
//! `error` code distinguishes the cause.

use crate::core::normalize::normalize;
use crate::core::registry::RegistrationError;
use crate::core::resolver::{self, ResolveError};
use crate::core::types::Entity;
use crate::server::ServerState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Request body for name parsing
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub input: String,
}

/// Response for successful name parsing
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub msg: String,
}

/// Query string for summaries
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub name: String,
}

fn bad_request(code: &str, message: impl std::fmt::Display) -> Response {
    let error = serde_json::json!({
        "error": code,
        "message": message.to_string(),
    });
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}

fn registration_error_code(e: &RegistrationError) -> &'static str {
    match e {
        RegistrationError::DuplicateName(_) => "duplicate_entry",
        RegistrationError::InvalidCookTime { .. } => "invalid_cook_time",
        RegistrationError::EmptyOrDuplicateItems(_) => "invalid_required_items",
        RegistrationError::InvalidQuantity { .. } => "invalid_quantity",
    }
}

fn resolve_error_code(e: &ResolveError) -> &'static str {
    match e {
        ResolveError::NotARecipe(_) => "not_a_recipe",
        ResolveError::MissingDependency(_) => "missing_dependency",
        ResolveError::CyclicDependency(_) => "cyclic_dependency",
        ResolveError::Overflow(_) => "overflow",
    }
}

/// Normalize a handwritten name
///
/// POST /parse
pub async fn parse_name(payload: Result<Json<ParseRequest>, JsonRejection>) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(e) => return bad_request("invalid_request", e.body_text()),
    };

    match normalize(&request.input) {
        Some(msg) => (StatusCode::OK, Json(ParseResponse { msg })).into_response(),
        None => bad_request("unparsable_name", "this string is cooked"),
    }
}

/// Register an ingredient or recipe
///
/// POST /entry
pub async fn add_entry(
    State(state): State<Arc<RwLock<ServerState>>>,
    payload: Result<Json<Entity>, JsonRejection>,
) -> Response {
    let Json(entity) = match payload {
        Ok(p) => p,
        Err(e) => {
            warn!("Rejected entry body: {}", e.body_text());
            return bad_request("invalid_entry", e.body_text());
        }
    };

    let name = entity.name().to_string();
    let kind = entity.kind();
    let mut state_write = state.write().await;
    match state_write.registry.register(entity) {
        Ok(()) => {
            info!("Registered {} '{}'", kind, name);
            (StatusCode::OK, Json(serde_json::json!({}))).into_response()
        }
        Err(e) => bad_request(registration_error_code(&e), e),
    }
}

/// Summarize a recipe by name
///
/// GET /summary?name=<recipe>
pub async fn summary(
    State(state): State<Arc<RwLock<ServerState>>>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return bad_request("invalid_request", e.body_text()),
    };

    let state_read = state.read().await;
    match resolver::resolve(&state_read.registry, &query.name) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            warn!("Summary for '{}' failed: {}", query.name, e);
            bad_request(resolve_error_code(&e), e)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::server::routes::create_router;
    use crate::server::{ServerConfig, ServerState};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = Arc::new(RwLock::new(ServerState::new(ServerConfig::default())));
        create_router(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn seed_breakfast(app: &Router) {
        for entry in [
            json!({"type": "ingredient", "name": "Egg", "cookTime": 5}),
            json!({"type": "recipe", "name": "Omelette", "requiredItems": [{"name": "Egg", "quantity": 2}]}),
            json!({"type": "recipe", "name": "Brunch", "requiredItems": [{"name": "Omelette", "quantity": 3}]}),
        ] {
            let (status, body) = send(app, post_json("/entry", entry)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({}));
        }
    }

    #[tokio::test]
    async fn test_parse_ok() {
        let (status, body) = send(&app(), post_json("/parse", json!({"input": "alpHa-alFRedo"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "Alpha Alfredo"}));
    }

    #[tokio::test]
    async fn test_parse_keeps_leading_space() {
        let (status, body) = send(&app(), post_json("/parse", json!({"input": "  egg"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": " Egg"}));
    }

    #[tokio::test]
    async fn test_parse_cooked() {
        let (status, body) = send(&app(), post_json("/parse", json!({"input": "123"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unparsable_name");
    }

    #[tokio::test]
    async fn test_entry_duplicate() {
        let app = app();
        seed_breakfast(&app).await;
        let (status, body) = send(
            &app,
            post_json("/entry", json!({"type": "ingredient", "name": "Omelette", "cookTime": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "duplicate_entry");
    }

    #[tokio::test]
    async fn test_entry_invalid_cook_time() {
        let (status, body) = send(
            &app(),
            post_json("/entry", json!({"type": "ingredient", "name": "Ice", "cookTime": -2})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_cook_time");
    }

    #[tokio::test]
    async fn test_entry_empty_items() {
        let (status, body) = send(
            &app(),
            post_json("/entry", json!({"type": "recipe", "name": "Air", "requiredItems": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_required_items");
    }

    #[tokio::test]
    async fn test_entry_unknown_type() {
        let (status, body) = send(
            &app(),
            post_json("/entry", json!({"type": "utensil", "name": "Whisk"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_entry");
    }

    #[tokio::test]
    async fn test_summary_nested() {
        let app = app();
        seed_breakfast(&app).await;
        let (status, body) = send(&app, get("/summary?name=Brunch")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "name": "Brunch",
                "cookTime": 30,
                "ingredients": [{"name": "Egg", "quantity": 6}]
            })
        );
    }

    #[tokio::test]
    async fn test_summary_of_ingredient() {
        let app = app();
        seed_breakfast(&app).await;
        let (status, body) = send(&app, get("/summary?name=Egg")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "not_a_recipe");
    }

    #[tokio::test]
    async fn test_summary_missing_dependency() {
        let app = app();
        let (status, _) = send(
            &app,
            post_json("/entry", json!({"type": "recipe", "name": "Toast", "requiredItems": [{"name": "Bread", "quantity": 1}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&app, get("/summary?name=Toast")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing_dependency");
    }

    #[tokio::test]
    async fn test_summary_requires_name() {
        let (status, body) = send(&app(), get("/summary")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_request");
    }
}
