//! # Mutation Pipeline
//!
//! Runs decode → validate → persist → notify for the four company
//! operations and translates store outcomes into [`ApiError`]s.
//!
//! ## Ordering
//!
//! | Operation | Steps |
//! |-----------|-------|
//! | create    | decode, validate, insert, emit `create` |
//! | read      | parse id, get, emit `get` |
//! | update    | parse id, decode, validate, get, update, emit `update` (pre-merge snapshot) |
//! | delete    | parse id, get, delete, emit `delete` (pre-delete snapshot) |
//!
//! Validation always runs before the first store call. An event is only
//! emitted once the store call succeeded. The pipeline holds no lock and no
//! per-request state.

use std::sync::Arc;

use compreg_core::{
    validate_changes, validate_draft, Company, CompanyChanges, CompanyDraft, CompanyId,
};
use compreg_events::{NotificationEvent, Notifier, Operation};

use crate::auth::Principal;
use crate::error::{ApiError, INVALID_PROPERTIES};
use crate::extractors::decode_body;
use crate::store::{CompanyStore, StoreError};

/// The create/read/update/delete path shared by all company routes.
#[derive(Debug, Clone)]
pub struct MutationPipeline {
    store: Arc<dyn CompanyStore>,
    notifier: Notifier,
}

impl MutationPipeline {
    /// Assemble a pipeline over a store and a notifier.
    pub fn new(store: Arc<dyn CompanyStore>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// The underlying store, for readiness checks.
    pub fn store(&self) -> &Arc<dyn CompanyStore> {
        &self.store
    }

    /// Create a company from a JSON body.
    pub async fn create(&self, principal: &Principal, body: &[u8]) -> Result<Company, ApiError> {
        let draft: CompanyDraft = decode_body(body)?;
        let new = validate_draft(draft)?;

        let company = self.store.insert(new).await.map_err(write_error)?;

        tracing::info!(
            company_id = %company.id,
            operation = %Operation::Create,
            subject = %principal.subject,
            "company created"
        );
        self.notifier
            .emit(NotificationEvent::new(Operation::Create, company.clone()));
        Ok(company)
    }

    /// Read a company by its raw path id.
    pub async fn read(&self, principal: &Principal, raw_id: &str) -> Result<Company, ApiError> {
        let id = CompanyId::parse(raw_id)?;

        let company = self.store.get(id).await.map_err(read_error)?;

        tracing::debug!(
            company_id = %id,
            operation = %Operation::Get,
            subject = %principal.subject,
            "company read"
        );
        self.notifier
            .emit(NotificationEvent::new(Operation::Get, company.clone()));
        Ok(company)
    }

    /// Merge the fields present in a JSON body into an existing company.
    ///
    /// The emitted `update` event carries the record as it was before the
    /// merge; the response carries the merged record.
    pub async fn update(
        &self,
        principal: &Principal,
        raw_id: &str,
        body: &[u8],
    ) -> Result<Company, ApiError> {
        let id = CompanyId::parse(raw_id)?;
        let changes: CompanyChanges = decode_body(body)?;
        let patch = validate_changes(changes)?;

        let before = self.store.get(id).await.map_err(read_error)?;
        let merged = self.store.update(id, &patch).await.map_err(write_error)?;

        tracing::info!(
            company_id = %id,
            operation = %Operation::Update,
            subject = %principal.subject,
            "company updated"
        );
        self.notifier
            .emit(NotificationEvent::new(Operation::Update, before));
        Ok(merged)
    }

    /// Delete a company. Nothing is emitted when the id is unknown.
    pub async fn delete(&self, principal: &Principal, raw_id: &str) -> Result<(), ApiError> {
        let id = CompanyId::parse(raw_id)?;

        let before = self.store.get(id).await.map_err(read_error)?;
        self.store.delete(id).await.map_err(write_error)?;

        tracing::info!(
            company_id = %id,
            operation = %Operation::Delete,
            subject = %principal.subject,
            "company deleted"
        );
        self.notifier
            .emit(NotificationEvent::new(Operation::Delete, before));
        Ok(())
    }
}

fn read_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound => ApiError::NotFound,
        other => ApiError::Internal(other.to_string()),
    }
}

fn write_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound => ApiError::NotFound,
        StoreError::Constraint(reason) => {
            tracing::info!(%reason, "store rejected write");
            ApiError::DomainInvalid(INVALID_PROPERTIES.to_string())
        }
        StoreError::Unavailable(reason) => ApiError::Internal(reason),
    }
}
