//! # Company Store
//!
//! The record-store seam of the pipeline. Two implementations:
//!
//! - [`MemoryStore`]: process-local, used when `DATABASE_URL` is unset and
//!   in tests. Column rules come from [`compreg_core::constraints::check`].
//! - [`crate::db::companies::PgCompanyStore`]: Postgres via sqlx. Column
//!   rules come from the schema.
//!
//! Both report a rule violation as [`StoreError::Constraint`] and a missing
//! row as [`StoreError::NotFound`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use compreg_core::constraints::{self, ConstraintViolation};
use compreg_core::{Company, CompanyId, CompanyPatch, NewCompany};
use parking_lot::RwLock;
use thiserror::Error;

/// Store failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No row for the id.
    #[error("record not found")]
    NotFound,

    /// The write would violate a column rule or the unique name.
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// The store could not be reached or answered unexpectedly.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<ConstraintViolation> for StoreError {
    fn from(violation: ConstraintViolation) -> Self {
        Self::Constraint(violation.to_string())
    }
}

/// Persistence operations the pipeline needs.
#[async_trait]
pub trait CompanyStore: Send + Sync + std::fmt::Debug {
    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, new: NewCompany) -> Result<Company, StoreError>;

    /// Fetch a record.
    async fn get(&self, id: CompanyId) -> Result<Company, StoreError>;

    /// Merge `patch` into the stored record and return the result.
    /// Either every present field is written or none is.
    async fn update(&self, id: CompanyId, patch: &CompanyPatch) -> Result<Company, StoreError>;

    /// Remove a record.
    async fn delete(&self, id: CompanyId) -> Result<(), StoreError>;

    /// Whether the store can currently serve requests.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// -- In-memory store ----------------------------------------------------------

/// Thread-safe in-memory company store.
///
/// The `parking_lot::RwLock` is never held across an `.await`. Uniqueness
/// and column checks run under the same write lock as the write itself.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<CompanyId, Company>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn name_taken(data: &HashMap<CompanyId, Company>, name: &str, except: Option<CompanyId>) -> bool {
    data.values()
        .any(|c| c.name == name && Some(c.id) != except)
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn insert(&self, new: NewCompany) -> Result<Company, StoreError> {
        let company = Company::from_new(CompanyId::new(), new);
        constraints::check(&company)?;

        let mut data = self.data.write();
        if name_taken(&data, &company.name, None) {
            return Err(ConstraintViolation::DuplicateName(company.name).into());
        }
        data.insert(company.id, company.clone());
        Ok(company)
    }

    async fn get(&self, id: CompanyId) -> Result<Company, StoreError> {
        self.data.read().get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: CompanyId, patch: &CompanyPatch) -> Result<Company, StoreError> {
        let mut data = self.data.write();
        let mut merged = data.get(&id).cloned().ok_or(StoreError::NotFound)?;
        merged.apply(patch);
        constraints::check(&merged)?;
        if name_taken(&data, &merged.name, Some(id)) {
            return Err(ConstraintViolation::DuplicateName(merged.name).into());
        }
        data.insert(id, merged.clone());
        Ok(merged)
    }

    async fn delete(&self, id: CompanyId) -> Result<(), StoreError> {
        self.data
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
