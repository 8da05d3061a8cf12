//! Token issuance.
//!
//! `POST /authenticate` exchanges a username for a signed bearer token.
//! The password is accepted but not checked against any user record.

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;

const INVALID_INPUT: &str = "Invalid input.";

/// Login payload.
#[derive(Clone, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    /// Subject the token is issued for.
    #[serde(alias = "username")]
    pub username: String,
    /// Accepted and discarded.
    #[serde(default, alias = "password")]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Issued token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT to send as `Authorization: Bearer <token>`.
    pub token: String,
}

/// Build the authentication router.
pub fn router() -> Router<AppState> {
    Router::new().route("/authenticate", post(authenticate))
}

/// `POST /authenticate`: Issue a bearer token.
#[utoipa::path(
    post,
    path = "/authenticate",
    request_body = Credentials,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorBody),
    ),
    security(()),
    tag = "auth"
)]
pub(crate) async fn authenticate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenResponse>, ApiError> {
    let credentials: Credentials = serde_json::from_slice(&body)
        .map_err(|_| ApiError::MalformedInput(INVALID_INPUT.to_string()))?;

    let token = state
        .tokens
        .issue(&credentials.username)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(subject = %credentials.username, "token issued");
    Ok(Json(TokenResponse { token }))
}
