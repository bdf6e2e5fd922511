use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::domain::ComplianceResult;

use super::traits::{ArchiveStore, DurableRecord, PersistenceError, RecordStore};

/// In-process implementation of both sinks.
///
/// Default backend when no database is configured, and the assertion point
/// for pipeline tests. Upserts are keyed the same way the durable backends
/// key them, so overwrite semantics match production behavior.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, DurableRecord>>,
    archive: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a durable record by id (for assertions).
    pub fn record(&self, id: &str) -> Option<DurableRecord> {
        self.records.lock().get(id).cloned()
    }

    /// Number of durable records held.
    pub fn record_count(&self) -> usize {
        self.records.lock().len()
    }

    /// Fetch an archived object by key (for assertions).
    pub fn archived(&self, key: &str) -> Option<serde_json::Value> {
        self.archive.lock().get(key).cloned()
    }

    /// Number of archived objects held.
    pub fn archive_count(&self) -> usize {
        self.archive.lock().len()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put_record(&self, record: &DurableRecord) -> Result<(), PersistenceError> {
        self.records
            .lock()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }
}

#[async_trait]
impl ArchiveStore for MemoryStore {
    async fn put_object(
        &self,
        key: &str,
        body: &ComplianceResult,
    ) -> Result<(), PersistenceError> {
        let blob = serde_json::to_value(body)
            .map_err(|e| PersistenceError::Rejected(e.to_string()))?;
        self.archive.lock().insert(key.to_string(), blob);
        Ok(())
    }
}
