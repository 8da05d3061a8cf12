//! # compreg-api: Company Registry HTTP Service
//!
//! Authenticated create/read/update/delete over company records, with a
//! notification published for every successful operation.
//!
//! ## API Surface
//!
//! | Route                    | Auth   | Module                        |
//! |--------------------------|--------|-------------------------------|
//! | `POST /company`          | Bearer | [`routes::companies`]         |
//! | `GET /company/:id`       | Bearer | [`routes::companies`]         |
//! | `PATCH /company/:id`     | Bearer | [`routes::companies`]         |
//! | `DELETE /company/:id`    | Bearer | [`routes::companies`]         |
//! | `POST /authenticate`     | none   | [`routes::authenticate`]      |
//! | `GET /health/liveness`   | none   | this module                   |
//! | `GET /health/readiness`  | none   | this module                   |
//! | `GET /openapi.json`      | none   | [`openapi`]                   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! SetResponseHeader(Content-Type) → TraceLayer → AuthMiddleware (company routes) → Handler
//! ```

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Only the `/company` routes sit behind the token guard. Every response,
/// including 401s and 204s, carries `Content-Type: application/json`.
pub fn app(state: AppState) -> Router {
    let companies = routes::companies::router()
        .route_layer(from_fn(auth::auth_middleware))
        .route_layer(Extension(Arc::clone(&state.tokens)));

    let public = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(routes::authenticate::router())
        .merge(openapi::router());

    Router::new()
        .merge(public)
        .merge(companies)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
}

/// Liveness probe: the process is up.
async fn liveness() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe: the store answers.
///
/// Returns 200 `{"status":"ready"}` or 503. The store's reason is logged,
/// never returned.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.pipeline.store().ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "message": "store unavailable" })),
            )
        }
    }
}
