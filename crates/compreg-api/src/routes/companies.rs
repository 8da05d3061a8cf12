//! Company CRUD routes.
//!
//! Every handler here runs behind the token guard and receives the
//! [`Principal`] it injected. Bodies arrive as raw bytes; decoding and
//! validation happen in the pipeline so their ordering is fixed there.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use compreg_core::Company;

use crate::auth::Principal;
use crate::error::ApiError;
use crate::state::AppState;

/// Build the company router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/company", post(create_company))
        .route(
            "/company/:id",
            get(get_company).patch(update_company).delete(delete_company),
        )
}

/// `POST /company`: Create a company.
#[utoipa::path(
    post,
    path = "/company",
    request_body = compreg_core::CompanyDraft,
    responses(
        (status = 200, description = "Company created", body = Company),
        (status = 400, description = "Malformed or invalid input", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "companies"
)]
pub(crate) async fn create_company(
    State(state): State<AppState>,
    principal: Principal,
    body: Bytes,
) -> Result<Json<Company>, ApiError> {
    state.pipeline.create(&principal, &body).await.map(Json)
}

/// `GET /company/:id`: Fetch a company.
#[utoipa::path(
    get,
    path = "/company/{id}",
    params(("id" = String, Path, description = "Company ID (UUID)")),
    responses(
        (status = 200, description = "Company found", body = Company),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "companies"
)]
pub(crate) async fn get_company(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<Company>, ApiError> {
    state.pipeline.read(&principal, &id).await.map(Json)
}

/// `PATCH /company/:id`: Merge the supplied fields into a company.
#[utoipa::path(
    patch,
    path = "/company/{id}",
    params(("id" = String, Path, description = "Company ID (UUID)")),
    request_body = compreg_core::CompanyChanges,
    responses(
        (status = 200, description = "Company updated", body = Company),
        (status = 400, description = "Malformed or invalid input", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "companies"
)]
pub(crate) async fn update_company(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Company>, ApiError> {
    state.pipeline.update(&principal, &id, &body).await.map(Json)
}

/// `DELETE /company/:id`: Remove a company.
#[utoipa::path(
    delete,
    path = "/company/{id}",
    params(("id" = String, Path, description = "Company ID (UUID)")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "companies"
)]
pub(crate) async fn delete_company(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.pipeline.delete(&principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
