//! # Token Guard
//!
//! HMAC-signed bearer tokens (JWT) issued by `POST /authenticate` and
//! verified on every `/company` route.
//!
//! ## Header Format
//!
//! ```text
//! Authorization: Bearer <jwt>
//! ```
//!
//! Exactly two whitespace-separated parts; the scheme is matched
//! case-insensitively. Every rejection is a 401 with `{"message": ...}`.
//!
//! ## Principal
//!
//! An authorized request gets a [`Principal`] injected into its
//! extensions. Handlers extract it via the `FromRequestParts` impl.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::ApiError;

// ── Errors ──────────────────────────────────────────────────────────────────

/// Reasons a request is refused by the guard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header, or an empty one.
    #[error("authorization header required")]
    MissingHeader,

    /// Header present but not `Bearer <token>`.
    #[error("malformed authorization header")]
    MalformedHeader,

    /// Signature mismatch, disallowed algorithm, expiry, or undecodable token.
    #[error("{0}")]
    Verification(String),

    /// Token could not be signed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

// ── Secret ──────────────────────────────────────────────────────────────────

/// Shared HMAC secret. Zeroed on drop; `Debug` never prints it.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}

// ── Claims & Principal ──────────────────────────────────────────────────────

/// JWT claims carried by issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject presented at `/authenticate`.
    pub username: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Username from the token.
    pub subject: String,
    /// Token expiry, seconds since the Unix epoch.
    pub expires_at: i64,
}

/// Extracts the principal that [`auth_middleware`] injected.
///
/// Returns 401 if no principal is present (the route is not behind the guard).
#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("no principal in request context".into()))
    }
}

// ── Guard ───────────────────────────────────────────────────────────────────

/// Issues and verifies bearer tokens against one shared secret.
#[derive(Clone)]
pub struct TokenGuard {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGuard")
            .field("algorithms", &self.validation.algorithms)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenGuard {
    /// Build a guard. Issued tokens live for `ttl_secs`.
    pub fn new(secret: &SigningSecret, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    /// Sign an HS256 token for `username`.
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        let claims = Claims {
            username: username.to_string(),
            exp: Utc::now().timestamp().saturating_add(self.ttl_secs),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a raw token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "token has expired".to_string(),
                    ErrorKind::InvalidSignature => "invalid token signature".to_string(),
                    ErrorKind::InvalidAlgorithm => "unsupported signing algorithm".to_string(),
                    _ => format!("invalid token: {e}"),
                };
                AuthError::Verification(reason)
            })
    }

    /// Gate a request on its raw `Authorization` header value.
    pub fn authorize(&self, header_value: Option<&str>) -> Result<Principal, AuthError> {
        let value = header_value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AuthError::MissingHeader)?;

        let mut parts = value.split_whitespace();
        let token = match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => token,
            _ => return Err(AuthError::MalformedHeader),
        };

        let claims = self.verify(token)?;
        Ok(Principal {
            subject: claims.username,
            expires_at: claims.exp,
        })
    }
}

// ── Middleware ───────────────────────────────────────────────────────────────

/// Validate the bearer token and inject the [`Principal`] for handlers.
///
/// Expects an `Arc<TokenGuard>` in the request extensions (installed with
/// `axum::Extension`). Unauthorized requests never reach the handler.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let Some(guard) = request.extensions().get::<Arc<TokenGuard>>().cloned() else {
        return ApiError::Internal("token guard not installed".into()).into_response();
    };

    let outcome = match request.headers().get(header::AUTHORIZATION) {
        None => guard.authorize(None),
        Some(value) => match value.to_str() {
            Ok(value) => guard.authorize(Some(value)),
            Err(_) => Err(AuthError::MalformedHeader),
        },
    };

    match outcome {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(reason = %err, "authentication failed");
            ApiError::from(err).into_response()
        }
    }
}
