//! REST surface over the versioned store
//!
//! Thin plumbing: routes parse the request, call the store, and map the
//! domain error kinds to status codes. All decisions live in the store and
//! validator.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::revision::Revision;
use crate::error::Error;
use crate::store::VersionedStore;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidWrite | Error::InvalidRead => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

/// Create the application router
pub fn create_router(store: VersionedStore) -> Router {
    Router::new()
        .route("/object", post(write_object))
        .route("/object/:key", get(read_object))
        .route("/reset", get(reset_store))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// POST /object with body `{"key": K, "value": V}`
///
/// Echoes the created revision as `{"key", "value", "timestamp"}`. A body
/// that is not JSON, or lacks a string `key` or a `value`, maps to the same
/// invalid-write error the validator produces.
async fn write_object(
    State(store): State<VersionedStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Revision>, Error> {
    let Json(body) = payload.map_err(|_| Error::InvalidWrite)?;

    let key = body
        .get("key")
        .and_then(Value::as_str)
        .ok_or(Error::InvalidWrite)?;
    let value = body.get("value").cloned().ok_or(Error::InvalidWrite)?;

    let revision = store.write(key, value).await?;
    Ok(Json(revision))
}

#[derive(Debug, Deserialize)]
struct ReadParams {
    timestamp: Option<String>,
}

/// GET /object/:key with optional `?timestamp=` in epoch milliseconds
async fn read_object(
    State(store): State<VersionedStore>,
    Path(key): Path<String>,
    Query(params): Query<ReadParams>,
) -> Result<Json<Value>, Error> {
    let value = store.read(&key, params.timestamp.as_deref()).await?;
    Ok(Json(json!({ "value": value })))
}

/// GET /reset
async fn reset_store(State(store): State<VersionedStore>) -> Result<Json<Value>, Error> {
    store.reset().await?;
    Ok(Json(json!({"message": "database reset"})))
}
