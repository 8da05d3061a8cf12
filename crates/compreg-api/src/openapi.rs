//! # OpenAPI Specification Assembly
//!
//! Collects the utoipa-documented routes into one OpenAPI document,
//! served unauthenticated at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token obtained from POST /authenticate."))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI document for the company registry.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Company Registry API",
        description = "Create, read, update and delete company records. Every successful operation is published to the notification stream.\n\nAuthentication: `Authorization: Bearer <token>` on all `/company` routes. Tokens come from `POST /authenticate`."
    ),
    paths(
        crate::routes::authenticate::authenticate,
        crate::routes::companies::create_company,
        crate::routes::companies::get_company,
        crate::routes::companies::update_company,
        crate::routes::companies::delete_company,
    ),
    components(schemas(
        compreg_core::Company,
        compreg_core::CompanyType,
        compreg_core::CompanyDraft,
        compreg_core::CompanyChanges,
        crate::routes::authenticate::Credentials,
        crate::routes::authenticate::TokenResponse,
        crate::error::ErrorBody,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "companies", description = "Company records"),
        (name = "auth", description = "Token issuance"),
    )
)]
pub struct ApiDoc;

/// Router serving `/openapi.json`.
pub fn router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_company_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/company"));
        assert!(doc.paths.paths.contains_key("/company/{id}"));
        assert!(doc.paths.paths.contains_key("/authenticate"));
    }

    #[test]
    fn document_declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("Company"));
    }
}
