#![deny(missing_docs)]

//! # compreg-core: Domain Types for the Company Registry
//!
//! Foundational types every other crate in the workspace depends on. No
//! internal crate dependencies and no I/O.
//!
//! ## Design Principles
//!
//! 1. **One persisted entity.** [`Company`] is the only record the service
//!    stores. Unpersisted payloads ([`CompanyDraft`], [`NewCompany`]) carry
//!    no id, so a record without a store-assigned [`CompanyId`] cannot be
//!    mistaken for a persisted one.
//!
//! 2. **Closed type set.** [`CompanyType`] is an enum with an exhaustive
//!    `match` in [`validate::parse_company_type`]. Adding a variant is a
//!    compile error everywhere it matters.
//!
//! 3. **Validation is pure.** [`validate`] only inspects decoded payloads.
//!    Length, emptiness and uniqueness are store constraints, checked by
//!    [`constraints`] in the in-memory store and by the schema in Postgres.

pub mod company;
pub mod constraints;
pub mod error;
pub mod validate;

pub use company::{
    Company, CompanyChanges, CompanyDraft, CompanyId, CompanyPatch, CompanyType, NewCompany,
};
pub use constraints::{ConstraintViolation, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
pub use error::ValidationError;
pub use validate::{parse_company_type, validate_changes, validate_draft};
