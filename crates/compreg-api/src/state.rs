//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Built once in `main` (or a test) and cloned
//! per request; every field is an `Arc` or wraps one.

use std::sync::Arc;

use compreg_events::{EventPublisher, Notifier};

use crate::auth::TokenGuard;
use crate::pipeline::MutationPipeline;
use crate::store::CompanyStore;

/// Everything a request handler can reach.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Create/read/update/delete path over the configured store.
    pub pipeline: MutationPipeline,
    /// Token issuer and verifier.
    pub tokens: Arc<TokenGuard>,
}

impl AppState {
    /// Wire a store, a notification publisher and a token guard together.
    pub fn new(
        store: Arc<dyn CompanyStore>,
        publisher: Arc<dyn EventPublisher>,
        tokens: Arc<TokenGuard>,
    ) -> Self {
        Self {
            pipeline: MutationPipeline::new(store, Notifier::new(publisher)),
            tokens,
        }
    }
}
