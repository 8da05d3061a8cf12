//! Notification events and their dedupe keys.

use compreg_core::Company;
use serde::Serialize;

/// The pipeline operation that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A company was created.
    Create,
    /// A company was read. Reads are reported downstream as audit events.
    Get,
    /// A company was updated.
    Update,
    /// A company was deleted.
    Delete,
}

impl Operation {
    /// Key prefix for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable fact about one successful operation.
///
/// Built once, handed to the [`crate::Notifier`], and never read back.
#[derive(Debug, Clone)]
pub struct NotificationEvent {
    operation: Operation,
    snapshot: Company,
    dedupe_key: String,
}

impl NotificationEvent {
    /// Build an event with a fresh random tie-breaker in its key.
    pub fn new(operation: Operation, snapshot: Company) -> Self {
        let dedupe_key = dedupe_key(operation, &snapshot, rand::random::<u64>());
        Self {
            operation,
            snapshot,
            dedupe_key,
        }
    }

    /// The producing operation.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The company state carried by this event.
    pub fn snapshot(&self) -> &Company {
        &self.snapshot
    }

    /// `{operation}-{id}-{nonce}`.
    pub fn dedupe_key(&self) -> &str {
        &self.dedupe_key
    }

    /// Message value: the snapshot as JSON.
    pub fn payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.snapshot)
    }
}

fn dedupe_key(operation: Operation, snapshot: &Company, nonce: u64) -> String {
    format!("{}-{}-{}", operation, snapshot.id, nonce)
}
