//! # API Route Modules
//!
//! - `companies`: the four guarded `/company` routes, delegating to the
//!   mutation pipeline.
//! - `authenticate`: token issuance, unauthenticated.

pub mod authenticate;
pub mod companies;
