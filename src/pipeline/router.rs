use serde::Serialize;
use std::fmt;

use crate::domain::ComplianceStatus;

/// The two persistence paths a run can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sink {
    /// Key-value upsert of the approved record
    DurableRecord,
    /// Blob archive of the full result for audit
    Archive,
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::DurableRecord => write!(f, "durable_record"),
            Sink::Archive => write!(f, "archive"),
        }
    }
}

/// Select exactly one persistence path for a compliance status.
///
/// Total two-way branch with no error path: only APPROVED reaches the
/// durable store, and anything else archives. The wildcard arm is load
/// bearing; a status added later must archive rather than fail the run.
pub fn route(status: ComplianceStatus) -> Sink {
    match status {
        ComplianceStatus::Approved => Sink::DurableRecord,
        _ => Sink::Archive,
    }
}
