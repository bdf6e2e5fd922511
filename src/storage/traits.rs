use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ComplianceResult, ComplianceStatus};

/// Errors surfaced by the persistence sinks.
///
/// Never swallowed: the orchestrator propagates these verbatim as the
/// run's failure, so an external caller can decide to re-submit.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The underlying store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write (authorization, throttling, bad data)
    #[error("store rejected write: {0}")]
    Rejected(String),
}

/// Record written to the durable store for approved transactions.
///
/// Keyed by sender, not by a per-transaction identifier: a later approved
/// transaction from the same sender overwrites the prior record. That is
/// the intended upsert semantic, not an accident.
#[derive(Debug, Clone, PartialEq)]
pub struct DurableRecord {
    /// Sender name, doubling as the record key
    pub id: String,

    /// Amount in its string rendering
    pub amount: String,

    pub status: ComplianceStatus,
}

impl DurableRecord {
    pub fn from_result(result: &ComplianceResult) -> Self {
        DurableRecord {
            id: result.transaction.sender.clone(),
            amount: result.transaction.amount.to_string(),
            status: result.status,
        }
    }
}

/// Durable-record sink for approved transactions.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Idempotent upsert keyed by `record.id`.
    async fn put_record(&self, record: &DurableRecord) -> Result<(), PersistenceError>;
}

/// Archive sink for every non-approved outcome.
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// Upsert the full result JSON under `key` (the sender name).
    async fn put_object(
        &self,
        key: &str,
        body: &ComplianceResult,
    ) -> Result<(), PersistenceError>;
}
