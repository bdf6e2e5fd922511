use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::Transaction;

/// Outcome of compliance evaluation.
///
/// `Approved` is the only status that reaches the durable-record store;
/// everything else is archived for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    /// Clean transaction, recorded durably
    Approved,
    /// Sender is on the watchlist
    Blocked,
    /// Amount exceeds the configured threshold
    HighRisk,
}

impl ComplianceStatus {
    /// Returns true if this status selects the durable-record path.
    #[inline]
    pub fn is_approved(&self) -> bool {
        *self == ComplianceStatus::Approved
    }

    /// Parse from string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "APPROVED" => Some(ComplianceStatus::Approved),
            "BLOCKED" => Some(ComplianceStatus::Blocked),
            "HIGH_RISK" => Some(ComplianceStatus::HighRisk),
            _ => None,
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Approved => write!(f, "APPROVED"),
            ComplianceStatus::Blocked => write!(f, "BLOCKED"),
            ComplianceStatus::HighRisk => write!(f, "HIGH_RISK"),
        }
    }
}

/// Evaluated transaction: the validated record plus the compliance verdict.
///
/// Created by the evaluator, consumed exactly once by the routing/persisting
/// stage, then dropped. The orchestrator does not retain it after the sink
/// write completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceResult {
    #[serde(flatten)]
    pub transaction: Transaction,

    /// Verdict computed from `sender` and `amount`
    pub status: ComplianceStatus,

    /// Evaluation timestamp (ISO-8601)
    pub checked_at: DateTime<Utc>,
}

impl ComplianceResult {
    pub fn sender(&self) -> &str {
        &self.transaction.sender
    }
}
